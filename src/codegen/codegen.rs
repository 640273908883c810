use anyhow::anyhow;
use log::{debug, info};

use crate::{
    analyzer::{Analysis, Ast, AstLabel, ScopeId, ScopeTree, Ty},
    error::{CodegenError, Skipped, Stage},
    parser::ParseOutput,
    tree::NodeId,
};

use super::{
    assemble, syscall, Address, Assembly, Heap, Instruction, Label, Operand, SlotId, StaticTable,
};

type CodegenResult<T> = Result<T, CodegenError>;

pub struct Codegen<'a> {
    ast: &'a Ast,
    scopes: &'a ScopeTree,
    instructions: Vec<Instruction>,
    statics: StaticTable,
    heap: Heap,
    label_index: usize,
}

impl<'a> Codegen<'a> {
    /// Refuses to generate code for a program that failed an earlier stage.
    pub fn new(parse: &ParseOutput, analysis: &'a Analysis) -> Result<Self, Skipped> {
        if !parse.succeeded() {
            return Err(Skipped::new(Stage::Codegen, Stage::Parse));
        }
        if !analysis.succeeded() {
            return Err(Skipped::new(Stage::Codegen, Stage::Semantic));
        }

        Ok(Self {
            ast: &analysis.ast,
            scopes: &analysis.scopes,
            instructions: vec![],
            statics: StaticTable::new(),
            heap: Heap::new(),
            label_index: 0,
        })
    }

    pub fn generate(mut self) -> CodegenResult<Assembly> {
        let root = self
            .ast
            .root()
            .ok_or_else(|| anyhow!("program has no syntax tree"))?;
        let AstLabel::Block(scope) = *self.ast.label(root) else {
            return Err(anyhow!("program root is not a block").into());
        };
        self.gen_block(root, scope)?;
        self.emit(Instruction::Brk);

        let assembly = assemble(self.instructions, &self.statics, &self.heap)?;
        info!("CODEGEN --> image generated");
        Ok(assembly)
    }

    fn emit(&mut self, instruction: Instruction) {
        debug!("CODEGEN --> {}", instruction);
        self.instructions.push(instruction);
    }

    fn new_label(&mut self) -> Label {
        let label = Label(self.label_index);
        self.label_index += 1;
        label
    }

    fn label(&self, node: NodeId) -> &'a AstLabel {
        self.ast.label(node)
    }

    fn operands<const N: usize>(&self, node: NodeId) -> CodegenResult<[NodeId; N]> {
        let children = self.ast.children(node);
        <[NodeId; N]>::try_from(children).map_err(|_| {
            anyhow!(
                "{} node has {} children, expected {}",
                self.label(node),
                children.len(),
                N
            )
            .into()
        })
    }

    /// Finds the slot and type of `name` as seen from `scope`.
    fn resolve(&self, name: char, scope: ScopeId) -> CodegenResult<(SlotId, Ty)> {
        self.scopes
            .ancestors(scope)
            .find_map(|id| self.statics.lookup(name, id))
            .ok_or_else(|| anyhow!("unresolved variable [{}] in scope {}", name, scope).into())
    }

    /// Moves an immediate operand into a fresh temporary so it can be used
    /// where the VM only accepts memory.
    fn in_memory(&mut self, operand: Operand, scope: ScopeId) -> Address {
        match operand {
            Operand::Memory(address) => address,
            Operand::Immediate(value) => {
                let temp = self.statics.temporary(scope);
                self.emit(Instruction::Lda(Operand::Immediate(value)));
                self.emit(Instruction::Sta(Address::Slot(temp)));
                Address::Slot(temp)
            }
        }
    }

    fn value_type(&self, expr: NodeId, scope: ScopeId) -> CodegenResult<Ty> {
        match self.label(expr) {
            AstLabel::Digit(_) | AstLabel::Addition => Ok(Ty::Int),
            AstLabel::StringLit(_) => Ok(Ty::String),
            AstLabel::Bool(_) | AstLabel::IsEqual | AstLabel::IsNotEqual => Ok(Ty::Boolean),
            AstLabel::Id(name) => Ok(self.resolve(*name, scope)?.1),
            label => Err(anyhow!("{} is not an expression", label).into()),
        }
    }

    fn gen_block(&mut self, block: NodeId, scope: ScopeId) -> CodegenResult<()> {
        let ast = self.ast;
        for &statement in ast.children(block) {
            self.gen_statement(statement, scope)?;
        }
        Ok(())
    }

    fn gen_statement(&mut self, statement: NodeId, scope: ScopeId) -> CodegenResult<()> {
        match self.label(statement) {
            AstLabel::Block(inner) => self.gen_block(statement, *inner),
            AstLabel::VarDecl => self.gen_var_decl(statement, scope),
            AstLabel::Assign => self.gen_assign(statement, scope),
            AstLabel::Print => self.gen_print(statement, scope),
            AstLabel::While => self.gen_while(statement, scope),
            AstLabel::If => self.gen_if(statement, scope),
            label => Err(anyhow!("{} is not a statement", label).into()),
        }
    }

    fn gen_var_decl(&mut self, decl: NodeId, scope: ScopeId) -> CodegenResult<()> {
        let [ty, id] = self.operands(decl)?;
        let (&AstLabel::Type(ty), &AstLabel::Id(name)) = (self.label(ty), self.label(id)) else {
            return Err(anyhow!("malformed variable declaration").into());
        };

        let slot = self.statics.declare(name, scope, ty);
        self.emit(Instruction::Lda(Operand::Immediate(0)));
        self.emit(Instruction::Sta(Address::Slot(slot)));
        Ok(())
    }

    fn gen_assign(&mut self, assign: NodeId, scope: ScopeId) -> CodegenResult<()> {
        let [target, expr] = self.operands(assign)?;
        let &AstLabel::Id(name) = self.label(target) else {
            return Err(anyhow!("assignment target is not an identifier").into());
        };

        let value = self.gen_operand(expr, scope)?;
        let (slot, _) = self.resolve(name, scope)?;
        self.emit(Instruction::Lda(value));
        self.emit(Instruction::Sta(Address::Slot(slot)));
        Ok(())
    }

    fn gen_print(&mut self, print: NodeId, scope: ScopeId) -> CodegenResult<()> {
        let [expr] = self.operands(print)?;
        let mode = if self.value_type(expr, scope)?.is_numeric() {
            syscall::PRINT_INT
        } else {
            syscall::PRINT_STRING
        };

        let value = self.gen_operand(expr, scope)?;
        self.emit(Instruction::Ldy(value));
        self.emit(Instruction::Ldx(Operand::Immediate(mode)));
        self.emit(Instruction::Sys);
        Ok(())
    }

    /// Evaluates `condition` and branches to the returned label when it is false.
    fn gen_condition(&mut self, condition: NodeId, scope: ScopeId) -> CodegenResult<Label> {
        let value = self.gen_operand(condition, scope)?;
        let flag = self.in_memory(value, scope);
        let end = self.new_label();
        self.emit(Instruction::Ldx(Operand::Immediate(Heap::TRUE_ADDRESS)));
        self.emit(Instruction::Cpx(flag));
        self.emit(Instruction::Bne(end));
        Ok(end)
    }

    fn gen_if(&mut self, node: NodeId, scope: ScopeId) -> CodegenResult<()> {
        let [condition, body] = self.operands(node)?;
        let AstLabel::Block(inner) = *self.label(body) else {
            return Err(anyhow!("if body is not a block").into());
        };

        let end = self.gen_condition(condition, scope)?;
        self.gen_block(body, inner)?;
        self.emit(Instruction::Label(end));
        Ok(())
    }

    fn gen_while(&mut self, node: NodeId, scope: ScopeId) -> CodegenResult<()> {
        let [condition, body] = self.operands(node)?;
        let AstLabel::Block(inner) = *self.label(body) else {
            return Err(anyhow!("while body is not a block").into());
        };

        let begin = self.new_label();
        self.emit(Instruction::Label(begin));
        let end = self.gen_condition(condition, scope)?;
        self.gen_block(body, inner)?;

        // X = 1 never matches the zero byte, so this branch is always taken
        self.emit(Instruction::Ldx(Operand::Immediate(1)));
        self.emit(Instruction::Cpx(Address::Fixed(Heap::ZERO_ADDRESS)));
        self.emit(Instruction::Bne(begin));
        self.emit(Instruction::Label(end));
        Ok(())
    }

    /// Lowers an expression to something a load instruction can take.
    fn gen_operand(&mut self, expr: NodeId, scope: ScopeId) -> CodegenResult<Operand> {
        let operand = match self.label(expr) {
            AstLabel::Digit(value) => Operand::Immediate(*value),
            AstLabel::Bool(value) => Operand::Immediate(Heap::bool_address(*value)),
            AstLabel::StringLit(s) => Operand::Immediate(self.heap.stage(s)?),
            AstLabel::Id(name) => {
                let (slot, _) = self.resolve(*name, scope)?;
                Operand::Memory(Address::Slot(slot))
            }
            AstLabel::Addition => Operand::Memory(Address::Slot(self.gen_addition(expr, scope)?)),
            AstLabel::IsEqual => {
                Operand::Memory(Address::Slot(self.gen_comparison(expr, scope, true)?))
            }
            AstLabel::IsNotEqual => {
                Operand::Memory(Address::Slot(self.gen_comparison(expr, scope, false)?))
            }
            label => return Err(anyhow!("{} is not an expression", label).into()),
        };
        Ok(operand)
    }

    /// `digit + rhs` into a fresh temporary. Chains nest to the right, so each
    /// `+` allocates exactly one temporary.
    fn gen_addition(&mut self, addition: NodeId, scope: ScopeId) -> CodegenResult<SlotId> {
        let [digit, rhs] = self.operands(addition)?;
        let &AstLabel::Digit(digit) = self.label(digit) else {
            return Err(anyhow!("left operand of an addition is not a digit").into());
        };

        let sum = self.statics.temporary(scope);
        let addend = match self.gen_operand(rhs, scope)? {
            Operand::Memory(address) => address,
            Operand::Immediate(value) => {
                self.emit(Instruction::Lda(Operand::Immediate(value)));
                self.emit(Instruction::Sta(Address::Slot(sum)));
                Address::Slot(sum)
            }
        };
        self.emit(Instruction::Lda(Operand::Immediate(digit)));
        self.emit(Instruction::Adc(addend));
        self.emit(Instruction::Sta(Address::Slot(sum)));
        Ok(sum)
    }

    /// Stores the address of `"true"` or `"false"` into a fresh temporary
    /// depending on whether the operands are equal.
    fn gen_comparison(
        &mut self,
        comparison: NodeId,
        scope: ScopeId,
        equal: bool,
    ) -> CodegenResult<SlotId> {
        let [lhs, rhs] = self.operands(comparison)?;
        let lhs = self.gen_operand(lhs, scope)?;
        let rhs = self.gen_operand(rhs, scope)?;
        let rhs = self.in_memory(rhs, scope);

        let (fallthrough, on_equal) = if equal {
            (Heap::FALSE_ADDRESS, Heap::TRUE_ADDRESS)
        } else {
            (Heap::TRUE_ADDRESS, Heap::FALSE_ADDRESS)
        };

        let result = self.statics.temporary(scope);
        let skip = self.new_label();
        self.emit(Instruction::Lda(Operand::Immediate(fallthrough)));
        self.emit(Instruction::Sta(Address::Slot(result)));
        self.emit(Instruction::Ldx(lhs));
        self.emit(Instruction::Cpx(rhs));
        self.emit(Instruction::Bne(skip));
        self.emit(Instruction::Lda(Operand::Immediate(on_equal)));
        self.emit(Instruction::Sta(Address::Slot(result)));
        self.emit(Instruction::Label(skip));
        Ok(result)
    }
}
