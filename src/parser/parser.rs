use log::{debug, info, trace};

use crate::analyzer::{Analysis, ScopeId, SemanticVisitor, Ty};
use crate::error::{Expected, SyntaxError};
use crate::lexer::{Token, TokenKind};
use crate::tree::NodeId;

use super::{Cst, CstLabel, Production};

type ParseResult<T> = Result<T, SyntaxError>;

/// Concrete syntax tree of one program and the syntax errors found in it.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseOutput {
    pub cst: Cst,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutput {
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Recursive-descent parser. While it validates the token stream it drives a
/// [`SemanticVisitor`], so one walk yields both the CST and the AST.
///
/// Rules fail fast: the first mismatch aborts the program with a single
/// diagnostic.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    cst: Cst,
    visitor: SemanticVisitor,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            cst: Cst::new(),
            visitor: SemanticVisitor::new(),
        }
    }

    pub fn parse(mut self) -> (ParseOutput, Analysis) {
        let mut errors = vec![];
        if let Err(e) = self.parse_program() {
            debug!("PARSER --> {}", e);
            errors.push(e);
        }
        info!("PARSER --> parse completed with {} error(s)", errors.len());

        let output = ParseOutput {
            cst: self.cst,
            errors,
        };
        (output, self.visitor.finish())
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.index).map(|t| t.kind)
    }

    fn end_of_stream(&self, expected: Expected) -> SyntaxError {
        let line = self
            .tokens
            .get(self.index)
            .or(self.tokens.last())
            .map_or(1, |t| t.line);
        SyntaxError::UnexpectedEndOfStream { expected, line }
    }

    fn unexpected_here(&self, expected: Expected) -> SyntaxError {
        match self.tokens.get(self.index) {
            Some(t) => SyntaxError::unexpected(expected, t),
            None => self.end_of_stream(expected),
        }
    }

    fn open(&mut self, production: Production) {
        debug!("PARSER --> parse {}", production);
        self.cst.add_branch(CstLabel::Production(production));
    }

    fn close(&mut self) {
        self.cst.end_children();
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        let Some(token) = self.tokens.get(self.index).cloned() else {
            return Err(self.end_of_stream(Expected::Token(kind)));
        };
        if token.kind != kind {
            return Err(SyntaxError::unexpected(Expected::Token(kind), &token));
        }
        trace!("PARSER --> matched {:?} [{}]", kind, token.literal);
        self.index += 1;
        self.cst.add_leaf(CstLabel::Terminal(token.literal.clone()));
        Ok(token)
    }

    fn expect_id(&mut self) -> ParseResult<(Token, char)> {
        let token = self.expect(TokenKind::Id)?;
        match token.id_name() {
            Some(name) => Ok((token, name)),
            None => Err(SyntaxError::unexpected(
                Expected::Token(TokenKind::Id),
                &token,
            )),
        }
    }

    /// program = block "$"
    fn parse_program(&mut self) -> ParseResult<()> {
        self.open(Production::Program);
        self.parse_block(None)?;
        self.expect(TokenKind::EndOfProgram)?;
        self.close();
        Ok(())
    }

    /// block = "{" statement-list "}"
    fn parse_block(&mut self, parent: Option<ScopeId>) -> ParseResult<NodeId> {
        self.open(Production::Block);
        self.expect(TokenKind::LeftBrace)?;
        let scope = self.visitor.enter_scope(parent);

        let mut statements = vec![];
        self.parse_statement_list(scope, &mut statements)?;
        self.expect(TokenKind::RightBrace)?;
        self.close();
        Ok(self.visitor.visit_block(scope, statements))
    }

    /// statement-list = statement statement-list
    ///                | ε
    ///
    /// Each statement opens one more nested `Statement List`; all of them are
    /// closed after the ε case.
    fn parse_statement_list(
        &mut self,
        scope: ScopeId,
        statements: &mut Vec<NodeId>,
    ) -> ParseResult<()> {
        let mut depth = 0;
        loop {
            self.open(Production::StatementList);
            depth += 1;
            match self.peek_kind() {
                None | Some(TokenKind::EndOfProgram) => {
                    return Err(self.end_of_stream(Expected::Token(TokenKind::RightBrace)));
                }
                Some(kind) if kind.starts_statement() => {
                    statements.push(self.parse_statement(scope)?);
                }
                Some(_) => break,
            }
        }
        for _ in 0..depth {
            self.close();
        }
        Ok(())
    }

    /// statement = print-stmt
    ///           | assign-stmt
    ///           | var-decl
    ///           | while-stmt
    ///           | if-stmt
    ///           | block
    fn parse_statement(&mut self, scope: ScopeId) -> ParseResult<NodeId> {
        self.open(Production::Statement);
        let node = match self.peek_kind() {
            Some(TokenKind::Print) => self.parse_print(scope)?,
            Some(TokenKind::Id) => self.parse_assignment(scope)?,
            Some(TokenKind::Type) => self.parse_var_decl(scope)?,
            Some(TokenKind::While) => self.parse_while(scope)?,
            Some(TokenKind::If) => self.parse_if(scope)?,
            Some(TokenKind::LeftBrace) => self.parse_block(Some(scope))?,
            _ => return Err(self.unexpected_here(Expected::Statement)),
        };
        self.close();
        Ok(node)
    }

    /// print-stmt = "print" "(" expr ")"
    fn parse_print(&mut self, scope: ScopeId) -> ParseResult<NodeId> {
        self.open(Production::PrintStatement);
        self.expect(TokenKind::Print)?;
        self.expect(TokenKind::LeftParen)?;
        let expr = self.parse_expr(scope)?;
        self.expect(TokenKind::RightParen)?;
        self.close();
        Ok(self.visitor.visit_print(expr))
    }

    /// assign-stmt = id "=" expr
    fn parse_assignment(&mut self, scope: ScopeId) -> ParseResult<NodeId> {
        self.open(Production::AssignmentStatement);
        let (id, name) = self.expect_id()?;
        let target = self.visitor.visit_assign_target(scope, &id, name);
        self.expect(TokenKind::AssignOp)?;
        let expr = self.parse_expr(scope)?;
        self.close();
        Ok(self.visitor.visit_assign(target, expr))
    }

    /// var-decl = type id
    fn parse_var_decl(&mut self, scope: ScopeId) -> ParseResult<NodeId> {
        self.open(Production::VarDecl);
        let type_token = self.expect(TokenKind::Type)?;
        let Some(ty) = Ty::from_keyword(&type_token.literal) else {
            return Err(SyntaxError::unexpected(
                Expected::Token(TokenKind::Type),
                &type_token,
            ));
        };
        let (id, name) = self.expect_id()?;
        self.close();
        Ok(self.visitor.visit_var_decl(scope, ty, &id, name))
    }

    /// while-stmt = "while" boolean-expr block
    fn parse_while(&mut self, scope: ScopeId) -> ParseResult<NodeId> {
        self.open(Production::WhileStatement);
        self.expect(TokenKind::While)?;
        let condition = self.parse_boolean_expr(scope)?;
        let body = self.parse_block(Some(scope))?;
        self.close();
        Ok(self.visitor.visit_while(condition, body))
    }

    /// if-stmt = "if" boolean-expr block
    fn parse_if(&mut self, scope: ScopeId) -> ParseResult<NodeId> {
        self.open(Production::IfStatement);
        self.expect(TokenKind::If)?;
        let condition = self.parse_boolean_expr(scope)?;
        let body = self.parse_block(Some(scope))?;
        self.close();
        Ok(self.visitor.visit_if(condition, body))
    }

    /// expr = int-expr
    ///      | string-expr
    ///      | boolean-expr
    ///      | id
    fn parse_expr(&mut self, scope: ScopeId) -> ParseResult<NodeId> {
        self.open(Production::Expr);
        let node = match self.peek_kind() {
            Some(TokenKind::Digit) => self.parse_int_expr(scope)?,
            Some(TokenKind::Quote) => self.parse_string_expr()?,
            Some(TokenKind::LeftParen | TokenKind::BoolTrue | TokenKind::BoolFalse) => {
                self.parse_boolean_expr(scope)?
            }
            Some(TokenKind::Id) => {
                let (id, name) = self.expect_id()?;
                self.visitor.visit_id(scope, &id, name)
            }
            _ => return Err(self.unexpected_here(Expected::Expression)),
        };
        self.close();
        Ok(node)
    }

    /// int-expr = digit ("+" expr)?
    fn parse_int_expr(&mut self, scope: ScopeId) -> ParseResult<NodeId> {
        self.open(Production::IntExpr);
        let token = self.expect(TokenKind::Digit)?;
        let Some(digit) = token.digit_value() else {
            return Err(SyntaxError::unexpected(
                Expected::Token(TokenKind::Digit),
                &token,
            ));
        };

        let node = if self.peek_kind() == Some(TokenKind::AdditionOp) {
            self.expect(TokenKind::AdditionOp)?;
            let rhs = self.parse_expr(scope)?;
            self.visitor.visit_addition(digit, rhs)
        } else {
            self.visitor.visit_digit(digit)
        };
        self.close();
        Ok(node)
    }

    /// string-expr = '"' char-list '"'
    fn parse_string_expr(&mut self) -> ParseResult<NodeId> {
        self.open(Production::StringExpr);
        self.expect(TokenKind::Quote)?;
        let mut s = String::new();
        self.parse_char_list(&mut s)?;
        self.expect(TokenKind::Quote)?;
        self.close();
        Ok(self.visitor.visit_string(s))
    }

    /// char-list = char char-list
    ///           | ε
    fn parse_char_list(&mut self, s: &mut String) -> ParseResult<()> {
        let mut depth = 0;
        loop {
            self.open(Production::CharList);
            depth += 1;
            if self.peek_kind() != Some(TokenKind::Char) {
                break;
            }
            let c = self.expect(TokenKind::Char)?;
            s.push_str(&c.literal);
        }
        for _ in 0..depth {
            self.close();
        }
        Ok(())
    }

    /// boolean-expr = "(" expr bool-op expr ")"
    ///              | bool-val
    fn parse_boolean_expr(&mut self, scope: ScopeId) -> ParseResult<NodeId> {
        self.open(Production::BooleanExpr);
        let node = match self.peek_kind() {
            Some(TokenKind::LeftParen) => {
                self.expect(TokenKind::LeftParen)?;
                let lhs = self.parse_expr(scope)?;
                let op = self.parse_bool_op()?;
                let rhs = self.parse_expr(scope)?;
                self.expect(TokenKind::RightParen)?;
                self.visitor.visit_comparison(&op, lhs, rhs)
            }
            Some(kind @ (TokenKind::BoolTrue | TokenKind::BoolFalse)) => {
                let token = self.expect(kind)?;
                self.visitor.visit_bool(&token)
            }
            _ => return Err(self.unexpected_here(Expected::BooleanExpression)),
        };
        self.close();
        Ok(node)
    }

    /// bool-op = "==" | "!="
    fn parse_bool_op(&mut self) -> ParseResult<Token> {
        match self.peek_kind() {
            Some(kind @ (TokenKind::EqualityOp | TokenKind::InequalityOp)) => self.expect(kind),
            _ => Err(self.unexpected_here(Expected::BooleanOperator)),
        }
    }
}
