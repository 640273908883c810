use std::collections::HashMap;
use std::fmt;

use anyhow::anyhow;
use log::{debug, info};

use crate::error::CodegenError;

use super::{Heap, Slot, SlotId, StaticTable, IMAGE_SIZE};

pub mod opcodes {
    pub const LDA_IMM: u8 = 0xA9;
    pub const LDA_ABS: u8 = 0xAD;
    pub const STA_ABS: u8 = 0x8D;
    pub const ADC_ABS: u8 = 0x6D;
    pub const LDX_IMM: u8 = 0xA2;
    pub const LDX_ABS: u8 = 0xAE;
    pub const LDY_IMM: u8 = 0xA0;
    pub const LDY_ABS: u8 = 0xAC;
    pub const CPX_ABS: u8 = 0xEC;
    pub const BNE: u8 = 0xD0;
    pub const SYS: u8 = 0xFF;
    pub const BRK: u8 = 0x00;
}

/// `SYS` modes, selected through the X register.
pub mod syscall {
    pub const PRINT_INT: u8 = 0x01;
    pub const PRINT_STRING: u8 = 0x02;
}

/// A memory operand, either still symbolic or already known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Address {
    Slot(SlotId),
    Fixed(u8),
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Slot(slot) => write!(f, "{}", slot),
            Address::Fixed(address) => write!(f, "${:02X}", address),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Immediate(u8),
    Memory(Address),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Immediate(value) => write!(f, "#${:02X}", value),
            Operand::Memory(address) => write!(f, "{}", address),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Label(pub usize);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Lda(Operand),
    Ldx(Operand),
    Ldy(Operand),
    Sta(Address),
    Adc(Address),
    Cpx(Address),
    Bne(Label),
    Sys,
    Brk,
    /// Marks a branch target; occupies no bytes.
    Label(Label),
}

impl Instruction {
    pub fn size(&self) -> usize {
        match self {
            Instruction::Lda(Operand::Immediate(_))
            | Instruction::Ldx(Operand::Immediate(_))
            | Instruction::Ldy(Operand::Immediate(_)) => 2,
            Instruction::Lda(Operand::Memory(_))
            | Instruction::Ldx(Operand::Memory(_))
            | Instruction::Ldy(Operand::Memory(_)) => 3,
            Instruction::Sta(_) | Instruction::Adc(_) | Instruction::Cpx(_) => 3,
            Instruction::Bne(_) => 2,
            Instruction::Sys | Instruction::Brk => 1,
            Instruction::Label(_) => 0,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Lda(op) => write!(f, "  LDA {}", op),
            Instruction::Ldx(op) => write!(f, "  LDX {}", op),
            Instruction::Ldy(op) => write!(f, "  LDY {}", op),
            Instruction::Sta(address) => write!(f, "  STA {}", address),
            Instruction::Adc(address) => write!(f, "  ADC {}", address),
            Instruction::Cpx(address) => write!(f, "  CPX {}", address),
            Instruction::Bne(label) => write!(f, "  BNE {}", label),
            Instruction::Sys => write!(f, "  SYS"),
            Instruction::Brk => write!(f, "  BRK"),
            Instruction::Label(label) => write!(f, "{}:", label),
        }
    }
}

/// The 256-byte memory image: code, zero padding, then the heap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image([u8; IMAGE_SIZE]);

impl Image {
    pub fn bytes(&self) -> &[u8; IMAGE_SIZE] {
        &self.0
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.0.chunks(8).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let groups = line
                .iter()
                .map(|b| format!("{:02X}", b))
                .collect::<Vec<_>>();
            write!(f, "{}", groups.join(" "))?;
        }
        Ok(())
    }
}

/// Everything produced by code generation for one program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assembly {
    pub image: Image,
    pub code_size: usize,
    /// Each static slot with its resolved address, in allocation order.
    pub statics: Vec<(Slot, u8)>,
    pub listing: Vec<Instruction>,
}

struct Assembler {
    labels: HashMap<Label, usize>,
    code_size: usize,
}

impl Assembler {
    fn new(instructions: &[Instruction]) -> Self {
        let mut labels = HashMap::new();
        let mut code_size = 0;
        for instruction in instructions {
            if let Instruction::Label(label) = instruction {
                labels.insert(*label, code_size);
            }
            code_size += instruction.size();
        }
        Self { labels, code_size }
    }

    fn resolve(&self, address: Address) -> [u8; 2] {
        match address {
            Address::Slot(slot) => [(self.code_size + slot.0) as u8, 0x00],
            Address::Fixed(address) => [address, 0x00],
        }
    }

    fn encode_operand(&self, imm: u8, abs: u8, operand: Operand, out: &mut Vec<u8>) {
        match operand {
            Operand::Immediate(value) => out.extend([imm, value]),
            Operand::Memory(address) => {
                out.push(abs);
                out.extend(self.resolve(address));
            }
        }
    }

    fn encode_memory(&self, opcode: u8, address: Address, out: &mut Vec<u8>) {
        out.push(opcode);
        out.extend(self.resolve(address));
    }

    fn encode(&self, instruction: &Instruction, out: &mut Vec<u8>) -> Result<(), CodegenError> {
        match *instruction {
            Instruction::Lda(op) => self.encode_operand(opcodes::LDA_IMM, opcodes::LDA_ABS, op, out),
            Instruction::Ldx(op) => self.encode_operand(opcodes::LDX_IMM, opcodes::LDX_ABS, op, out),
            Instruction::Ldy(op) => self.encode_operand(opcodes::LDY_IMM, opcodes::LDY_ABS, op, out),
            Instruction::Sta(address) => self.encode_memory(opcodes::STA_ABS, address, out),
            Instruction::Adc(address) => self.encode_memory(opcodes::ADC_ABS, address, out),
            Instruction::Cpx(address) => self.encode_memory(opcodes::CPX_ABS, address, out),
            Instruction::Bne(label) => {
                let target = *self
                    .labels
                    .get(&label)
                    .ok_or_else(|| anyhow!("undefined label {}", label))?;
                // the VM adds the offset to the address after the operand, modulo the image size
                let next = out.len() + 2;
                let offset = (target + IMAGE_SIZE - next) % IMAGE_SIZE;
                out.extend([opcodes::BNE, offset as u8]);
            }
            Instruction::Sys => out.push(opcodes::SYS),
            Instruction::Brk => out.push(opcodes::BRK),
            Instruction::Label(_) => (),
        }
        Ok(())
    }
}

/// Lays out `[code][statics + padding][heap]` and resolves every symbolic
/// operand. `instructions` must already end with `BRK`.
pub fn assemble(
    instructions: Vec<Instruction>,
    statics: &StaticTable,
    heap: &Heap,
) -> Result<Assembly, CodegenError> {
    let assembler = Assembler::new(&instructions);
    let code_size = assembler.code_size;
    let heap_start = heap.start();

    if code_size + statics.len() > heap_start {
        return Err(CodegenError::OutOfMemory {
            code: code_size,
            statics: statics.len(),
            heap: heap.len(),
            limit: IMAGE_SIZE,
        });
    }

    let resolved = statics
        .slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| (slot.clone(), (code_size + i) as u8))
        .collect::<Vec<_>>();
    for (slot, address) in &resolved {
        debug!("CODEGEN --> {} resolved to ${:02X}", slot, address);
    }

    let mut bytes = Vec::with_capacity(IMAGE_SIZE);
    for instruction in &instructions {
        assembler.encode(instruction, &mut bytes)?;
    }
    bytes.resize(heap_start, 0);
    bytes.extend_from_slice(heap.bytes());

    let len = bytes.len();
    let image: [u8; IMAGE_SIZE] = bytes
        .try_into()
        .map_err(|_| anyhow!("image is {} bytes instead of {}", len, IMAGE_SIZE))?;

    info!(
        "CODEGEN --> {} bytes of code, {} static cell(s), {} bytes of heap",
        code_size,
        statics.len(),
        heap.len()
    );

    Ok(Assembly {
        image: Image(image),
        code_size,
        statics: resolved,
        listing: instructions,
    })
}
