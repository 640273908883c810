mod cst;
mod parser;

pub use cst::*;
pub use parser::*;
