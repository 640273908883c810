#![allow(dead_code)]

use alanc::codegen::{Assembly, IMAGE_SIZE};
use alanc::lexer::{Token, TokenKind};
use alanc::{compile, ProgramOutput};

pub fn compile_one(source: &str) -> ProgramOutput {
    let mut programs = compile(source);
    assert_eq!(programs.len(), 1, "expected exactly one program");
    programs.remove(0)
}

pub fn assemble_one(source: &str) -> Assembly {
    match compile_one(source).codegen {
        Ok(assembly) => assembly,
        Err(e) => panic!("compilation failed: {}", e),
    }
}

/// Compiles `source` and returns what the VM prints when running it.
pub fn run_source(source: &str) -> String {
    Vm::new(assemble_one(source).image.bytes()).run()
}

pub fn token(kind: TokenKind, literal: &str) -> Token {
    Token::new(kind, literal, 1, 1)
}

/// Reference emulator for the 256-byte target machine.
pub struct Vm {
    memory: [u8; IMAGE_SIZE],
    pc: usize,
    a: u8,
    x: u8,
    y: u8,
    zero: bool,
    output: String,
}

impl Vm {
    const MAX_STEPS: usize = 100_000;

    pub fn new(image: &[u8; IMAGE_SIZE]) -> Self {
        Self {
            memory: *image,
            pc: 0,
            a: 0,
            x: 0,
            y: 0,
            zero: false,
            output: String::new(),
        }
    }

    fn byte(&self, offset: usize) -> u8 {
        self.memory[(self.pc + offset) % IMAGE_SIZE]
    }

    fn absolute(&self) -> usize {
        assert_eq!(self.byte(2), 0x00, "high byte of an address must be 00");
        self.byte(1) as usize
    }

    fn print_string(&mut self) {
        let mut address = self.y as usize;
        while self.memory[address] != 0 {
            self.output.push(self.memory[address] as char);
            address = (address + 1) % IMAGE_SIZE;
        }
    }

    pub fn run(mut self) -> String {
        for _ in 0..Self::MAX_STEPS {
            let (next, halt) = match self.byte(0) {
                0xA9 => {
                    self.a = self.byte(1);
                    (2, false)
                }
                0xAD => {
                    self.a = self.memory[self.absolute()];
                    (3, false)
                }
                0x8D => {
                    let address = self.absolute();
                    self.memory[address] = self.a;
                    (3, false)
                }
                0x6D => {
                    self.a = self.a.wrapping_add(self.memory[self.absolute()]);
                    (3, false)
                }
                0xA2 => {
                    self.x = self.byte(1);
                    (2, false)
                }
                0xAE => {
                    self.x = self.memory[self.absolute()];
                    (3, false)
                }
                0xA0 => {
                    self.y = self.byte(1);
                    (2, false)
                }
                0xAC => {
                    self.y = self.memory[self.absolute()];
                    (3, false)
                }
                0xEC => {
                    self.zero = self.x == self.memory[self.absolute()];
                    (3, false)
                }
                0xD0 => {
                    let offset = self.byte(1) as usize;
                    if self.zero {
                        (2, false)
                    } else {
                        (2 + offset, false)
                    }
                }
                0xEA => (1, false),
                0xFF => {
                    match self.x {
                        0x01 => self.output.push_str(&self.y.to_string()),
                        0x02 => self.print_string(),
                        x => panic!("unknown system call {:02X}", x),
                    }
                    (1, false)
                }
                0x00 => (1, true),
                op => panic!("unknown opcode {:02X} at {:02X}", op, self.pc),
            };
            if halt {
                return self.output;
            }
            self.pc = (self.pc + next) % IMAGE_SIZE;
        }
        panic!("program did not halt, output so far: {:?}", self.output);
    }
}
