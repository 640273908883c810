use std::fmt;

use crate::tree::Tree;

use super::{ScopeId, Ty};

pub type Ast = Tree<AstLabel>;

/// Label of an AST node. Branch labels name the construct, leaf labels carry
/// the operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AstLabel {
    Block(ScopeId),
    VarDecl,
    Assign,
    Print,
    While,
    If,
    Addition,
    IsEqual,
    IsNotEqual,

    Type(Ty),
    Id(char),
    Digit(u8),
    StringLit(String),
    Bool(bool),
}

impl fmt::Display for AstLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstLabel::Block(_) => write!(f, "Block"),
            AstLabel::VarDecl => write!(f, "VarDecl"),
            AstLabel::Assign => write!(f, "Assign"),
            AstLabel::Print => write!(f, "Print"),
            AstLabel::While => write!(f, "While"),
            AstLabel::If => write!(f, "If"),
            AstLabel::Addition => write!(f, "Addition"),
            AstLabel::IsEqual => write!(f, "isEqual"),
            AstLabel::IsNotEqual => write!(f, "isNotEqual"),
            AstLabel::Type(ty) => write!(f, "{}", ty),
            AstLabel::Id(name) => write!(f, "{}", name),
            AstLabel::Digit(value) => write!(f, "{}", value),
            AstLabel::StringLit(s) => write!(f, "\"{}\"", s),
            AstLabel::Bool(b) => write!(f, "{}", b),
        }
    }
}
