use std::fmt;

use crate::tree::Tree;

pub type Cst = Tree<CstLabel>;

/// Nonterminals of the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Production {
    Program,
    Block,
    StatementList,
    Statement,
    PrintStatement,
    AssignmentStatement,
    VarDecl,
    WhileStatement,
    IfStatement,
    Expr,
    IntExpr,
    StringExpr,
    BooleanExpr,
    CharList,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Production::Program => "Program",
            Production::Block => "Block",
            Production::StatementList => "Statement List",
            Production::Statement => "Statement",
            Production::PrintStatement => "Print Statement",
            Production::AssignmentStatement => "Assignment Statement",
            Production::VarDecl => "Variable Declaration",
            Production::WhileStatement => "While Statement",
            Production::IfStatement => "If Statement",
            Production::Expr => "Expression",
            Production::IntExpr => "Int Expression",
            Production::StringExpr => "String Expression",
            Production::BooleanExpr => "Boolean Expression",
            Production::CharList => "Char List",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CstLabel {
    Production(Production),
    Terminal(String),
}

impl fmt::Display for CstLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CstLabel::Production(p) => write!(f, "{}", p),
            CstLabel::Terminal(literal) => write!(f, "{}", literal),
        }
    }
}
