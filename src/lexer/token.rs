use std::fmt;

use phf::phf_map;

pub(super) static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "print" => TokenKind::Print,
    "while" => TokenKind::While,
    "if" => TokenKind::If,
    "int" => TokenKind::Type,
    "string" => TokenKind::Type,
    "boolean" => TokenKind::Type,
    "true" => TokenKind::BoolTrue,
    "false" => TokenKind::BoolFalse,
};

pub(super) static TWO_SYMBOLS_TOKENS: phf::Map<&'static str, TokenKind> = phf_map! {
    "==" => TokenKind::EqualityOp,
    "!=" => TokenKind::InequalityOp,
};

pub(super) static ONE_SYMBOL_TOKENS: phf::Map<char, TokenKind> = phf_map! {
    '{' => TokenKind::LeftBrace,
    '}' => TokenKind::RightBrace,
    '(' => TokenKind::LeftParen,
    ')' => TokenKind::RightParen,
    '=' => TokenKind::AssignOp,
    '+' => TokenKind::AdditionOp,
    '"' => TokenKind::Quote,
    '$' => TokenKind::EndOfProgram,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,

    Print,
    While,
    If,
    Type,

    Id,
    AssignOp,
    AdditionOp,
    EqualityOp,
    InequalityOp,

    Digit,
    Quote,
    Char,
    BoolTrue,
    BoolFalse,

    EndOfProgram,
}

impl TokenKind {
    /// Kinds that may open a `Statement`.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Print
                | TokenKind::Id
                | TokenKind::Type
                | TokenKind::While
                | TokenKind::If
                | TokenKind::LeftBrace
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::LeftBrace => "'{'",
            TokenKind::RightBrace => "'}'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Print => "'print'",
            TokenKind::While => "'while'",
            TokenKind::If => "'if'",
            TokenKind::Type => "type",
            TokenKind::Id => "identifier",
            TokenKind::AssignOp => "'='",
            TokenKind::AdditionOp => "'+'",
            TokenKind::EqualityOp => "'=='",
            TokenKind::InequalityOp => "'!='",
            TokenKind::Digit => "digit",
            TokenKind::Quote => "'\"'",
            TokenKind::Char => "char",
            TokenKind::BoolTrue => "'true'",
            TokenKind::BoolFalse => "'false'",
            TokenKind::EndOfProgram => "'$'",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
            column,
        }
    }

    /// Value of a `Digit` token.
    pub fn digit_value(&self) -> Option<u8> {
        let mut chars = self.literal.chars();
        let value = chars.next()?.to_digit(10)?;
        match chars.next() {
            None => Some(value as u8),
            Some(_) => None,
        }
    }

    /// Name of an `Id` token.
    pub fn id_name(&self) -> Option<char> {
        let mut chars = self.literal.chars();
        let c = chars.next().filter(|c| c.is_ascii_lowercase())?;
        match chars.next() {
            None => Some(c),
            Some(_) => None,
        }
    }
}
