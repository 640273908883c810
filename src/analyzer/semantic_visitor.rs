use log::debug;

use crate::error::{SemanticError, SemanticWarning};
use crate::lexer::{Token, TokenKind};
use crate::tree::{NodeId, NodeKind};

use super::{Ast, AstLabel, ScopeId, ScopeTree, Symbol, Ty};

/// Result of semantic analysis of one program.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub ast: Ast,
    pub scopes: ScopeTree,
    pub errors: Vec<SemanticError>,
    pub warnings: Vec<SemanticWarning>,
}

impl Analysis {
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Builds the AST and the scope tree while the parser walks the grammar.
///
/// Each `visit_*` method receives a construct whose children have already been
/// visited, and returns the AST node it folded them into.
#[derive(Debug, Default)]
pub struct SemanticVisitor {
    ast: Ast,
    scopes: ScopeTree,
    errors: Vec<SemanticError>,
}

impl SemanticVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    fn leaf(&mut self, label: AstLabel) -> NodeId {
        self.ast.add_node(label, NodeKind::Leaf, vec![])
    }

    fn branch(&mut self, label: AstLabel, children: Vec<NodeId>) -> NodeId {
        self.ast.add_node(label, NodeKind::Branch, children)
    }

    fn error(&mut self, error: SemanticError) {
        debug!("SEMANTIC --> {}", error);
        self.errors.push(error);
    }

    pub fn enter_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let scope = self.scopes.push_scope(parent);
        debug!("SEMANTIC --> entering scope {} (parent {:?})", scope, parent);
        scope
    }

    pub fn visit_block(&mut self, scope: ScopeId, statements: Vec<NodeId>) -> NodeId {
        debug!("SEMANTIC --> leaving scope {}", scope);
        self.branch(AstLabel::Block(scope), statements)
    }

    pub fn visit_var_decl(&mut self, scope: ScopeId, ty: Ty, id: &Token, name: char) -> NodeId {
        debug!(
            "SEMANTIC --> declaring {} [{}] in scope {} at line {}",
            ty, name, scope, id.line
        );
        self.scopes
            .declare(scope, name, Symbol::new(ty, id.line, id.column));

        let ty = self.leaf(AstLabel::Type(ty));
        let id = self.leaf(AstLabel::Id(name));
        self.branch(AstLabel::VarDecl, vec![ty, id])
    }

    /// Resolves the target of an assignment and marks it initialized.
    pub fn visit_assign_target(&mut self, scope: ScopeId, id: &Token, name: char) -> NodeId {
        match self.scopes.lookup_mut(scope, name) {
            Some((found, symbol)) => {
                debug!("SEMANTIC --> [{}] initialized in scope {}", name, found);
                symbol.initialized = true;
            }
            None => self.error(SemanticError::UndeclaredAssignment {
                name,
                line: id.line,
                column: id.column,
            }),
        }
        self.leaf(AstLabel::Id(name))
    }

    pub fn visit_assign(&mut self, target: NodeId, expr: NodeId) -> NodeId {
        self.branch(AstLabel::Assign, vec![target, expr])
    }

    pub fn visit_print(&mut self, expr: NodeId) -> NodeId {
        self.branch(AstLabel::Print, vec![expr])
    }

    pub fn visit_while(&mut self, condition: NodeId, body: NodeId) -> NodeId {
        self.branch(AstLabel::While, vec![condition, body])
    }

    pub fn visit_if(&mut self, condition: NodeId, body: NodeId) -> NodeId {
        self.branch(AstLabel::If, vec![condition, body])
    }

    pub fn visit_addition(&mut self, digit: u8, rhs: NodeId) -> NodeId {
        let digit = self.leaf(AstLabel::Digit(digit));
        self.branch(AstLabel::Addition, vec![digit, rhs])
    }

    pub fn visit_comparison(&mut self, op: &Token, lhs: NodeId, rhs: NodeId) -> NodeId {
        let label = if op.kind == TokenKind::InequalityOp {
            AstLabel::IsNotEqual
        } else {
            AstLabel::IsEqual
        };
        self.branch(label, vec![lhs, rhs])
    }

    pub fn visit_digit(&mut self, digit: u8) -> NodeId {
        self.leaf(AstLabel::Digit(digit))
    }

    pub fn visit_string(&mut self, s: String) -> NodeId {
        self.leaf(AstLabel::StringLit(s))
    }

    pub fn visit_bool(&mut self, token: &Token) -> NodeId {
        self.leaf(AstLabel::Bool(token.kind == TokenKind::BoolTrue))
    }

    /// Resolves an identifier read by an expression and marks it used.
    pub fn visit_id(&mut self, scope: ScopeId, id: &Token, name: char) -> NodeId {
        match self.scopes.lookup_mut(scope, name) {
            Some((found, symbol)) => {
                debug!("SEMANTIC --> [{}] used from scope {}", name, found);
                symbol.used = true;
            }
            None => self.error(SemanticError::UndeclaredUse {
                name,
                line: id.line,
                column: id.column,
            }),
        }
        self.leaf(AstLabel::Id(name))
    }

    /// Runs the warnings pass and hands over the finished artifacts.
    pub fn finish(self) -> Analysis {
        let warnings = self.scopes.warnings();
        for w in &warnings {
            debug!("SEMANTIC --> {}", w);
        }

        Analysis {
            ast: self.ast,
            scopes: self.scopes,
            errors: self.errors,
            warnings,
        }
    }
}
