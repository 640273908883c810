use log::debug;

use crate::error::CodegenError;

use super::IMAGE_SIZE;

/// String constants, staged downward from the top of the address space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heap {
    bytes: Vec<u8>,
    strings: Vec<(String, u8)>,
}

impl Heap {
    pub const FALSE_ADDRESS: u8 = 0xFA;
    pub const TRUE_ADDRESS: u8 = 0xF5;
    /// Terminator of the staged `"false"`; always holds `00`.
    pub const ZERO_ADDRESS: u8 = 0xFF;

    /// Creates a heap holding the boolean constants. The staging order is what
    /// pins `false` to `0xFA` and `true` to `0xF5`.
    pub fn new() -> Self {
        let mut heap = Self {
            bytes: vec![],
            strings: vec![],
        };
        heap.push("false");
        heap.push("true");
        debug_assert_eq!(heap.address_of("false"), Some(Self::FALSE_ADDRESS));
        debug_assert_eq!(heap.address_of("true"), Some(Self::TRUE_ADDRESS));
        heap
    }

    pub fn bool_address(value: bool) -> u8 {
        if value {
            Self::TRUE_ADDRESS
        } else {
            Self::FALSE_ADDRESS
        }
    }

    fn push(&mut self, s: &str) -> u8 {
        let mut bytes: Vec<u8> = s.bytes().chain(std::iter::once(0)).collect();
        bytes.extend_from_slice(&self.bytes);
        self.bytes = bytes;
        let address = self.start() as u8;
        debug!("CODEGEN --> staged \"{}\" at ${:02X}", s, address);
        self.strings.push((s.to_string(), address));
        address
    }

    /// Address of `s` in the heap, staging it first if it is not there yet.
    pub fn stage(&mut self, s: &str) -> Result<u8, CodegenError> {
        if let Some(address) = self.address_of(s) {
            return Ok(address);
        }
        // one byte is always left for the terminating BRK
        if self.bytes.len() + s.len() + 1 >= IMAGE_SIZE {
            return Err(CodegenError::StringTooLong {
                len: s.len(),
                heap: self.bytes.len(),
            });
        }
        Ok(self.push(s))
    }

    pub fn address_of(&self, s: &str) -> Option<u8> {
        self.strings
            .iter()
            .find(|(staged, _)| staged == s)
            .map(|(_, address)| *address)
    }

    /// First heap address; equals the next free address counter.
    pub fn start(&self) -> usize {
        IMAGE_SIZE - self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}
