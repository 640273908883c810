mod codegen;
mod heap;
mod machine_code;
mod static_table;

pub use codegen::*;
pub use heap::*;
pub use machine_code::*;
pub use static_table::*;

/// Size of the VM address space, and therefore of every image.
pub const IMAGE_SIZE: usize = 256;
