use log::{debug, info, trace};

use crate::error::{LexError, LexWarning};

use super::{
    token::{KEYWORDS, ONE_SYMBOL_TOKENS, TWO_SYMBOLS_TOKENS},
    Token, TokenKind,
};

/// Tokens and diagnostics of one `$`-terminated program.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LexedProgram {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
    pub warnings: Vec<LexWarning>,
}

impl LexedProgram {
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug)]
pub struct Lexer {
    chars: Vec<char>,
    index: usize,
    line: usize,
    column: usize,
    in_string: bool,
    current: LexedProgram,
    programs: Vec<LexedProgram>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            index: 0,
            line: 1,
            column: 1,
            in_string: false,
            current: LexedProgram::default(),
            programs: vec![],
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.index + offset).copied()
    }

    fn advance(&mut self, n: usize) {
        for _ in 0..n {
            if let Some(c) = self.peek(0) {
                self.index += 1;
                if c == '\n' {
                    self.line += 1;
                    self.column = 1;
                } else {
                    self.column += 1;
                }
            }
        }
    }

    fn new_token(&mut self, kind: TokenKind, s: &str) {
        let token = Token::new(kind, s, self.line, self.column);
        trace!(
            "LEXER --> {:?} [{}] at ({}:{})",
            kind,
            s,
            token.line,
            token.column
        );
        self.current.tokens.push(token);
        self.advance(s.chars().count());

        if kind == TokenKind::EndOfProgram {
            self.end_program();
        }
    }

    fn error(&mut self, error: LexError) {
        debug!("LEXER --> {}", error);
        self.current.errors.push(error);
    }

    fn end_program(&mut self) {
        let program = std::mem::take(&mut self.current);
        info!(
            "LEXER --> program {} lexed with {} error(s)",
            self.programs.len() + 1,
            program.errors.len()
        );
        self.programs.push(program);
    }

    fn skip_comment(&mut self) {
        let (line, column) = (self.line, self.column);
        self.advance(2);
        loop {
            match (self.peek(0), self.peek(1)) {
                (Some('*'), Some('/')) => {
                    self.advance(2);
                    return;
                }
                (Some(_), _) => self.advance(1),
                (None, _) => {
                    self.error(LexError::UnterminatedComment { line, column });
                    return;
                }
            }
        }
    }

    fn keyword_at(&self) -> Option<(&'static str, TokenKind)> {
        KEYWORDS
            .entries()
            .find(|(keyword, _)| {
                keyword
                    .chars()
                    .enumerate()
                    .all(|(i, c)| self.peek(i) == Some(c))
            })
            .map(|(keyword, kind)| (*keyword, *kind))
    }

    fn lex_string_char(&mut self, c: char) {
        match c {
            '"' => {
                self.in_string = false;
                self.new_token(TokenKind::Quote, "\"");
            }
            'a'..='z' | ' ' => self.new_token(TokenKind::Char, &c.to_string()),
            '\n' => {
                self.error(LexError::UnterminatedString {
                    line: self.line,
                    column: self.column,
                });
                self.in_string = false;
            }
            _ => {
                self.error(LexError::InvalidStringChar {
                    ch: c,
                    line: self.line,
                    column: self.column,
                });
                self.advance(1);
            }
        }
    }

    fn lex_char(&mut self, c: char) {
        let c2 = self.chars[self.index..].iter().take(2).collect::<String>();

        if c.is_whitespace() {
            self.advance(1);
        } else if c2 == "/*" {
            self.skip_comment();
        } else if let Some((keyword, kind)) = self.keyword_at() {
            self.new_token(kind, keyword);
        } else if c.is_ascii_lowercase() {
            self.new_token(TokenKind::Id, &c.to_string());
        } else if c.is_ascii_digit() {
            self.new_token(TokenKind::Digit, &c.to_string());
        } else if let Some(kind) = TWO_SYMBOLS_TOKENS.get(c2.as_str()) {
            self.new_token(*kind, &c2);
        } else if let Some(kind) = ONE_SYMBOL_TOKENS.get(&c) {
            if *kind == TokenKind::Quote {
                self.in_string = true;
            }
            self.new_token(*kind, &c.to_string());
        } else {
            self.error(LexError::UnrecognizedToken {
                text: c.to_string(),
                line: self.line,
                column: self.column,
            });
            self.advance(1);
        }
    }

    fn _tokenize(&mut self) {
        while let Some(c) = self.peek(0) {
            if self.in_string {
                self.lex_string_char(c);
            } else {
                self.lex_char(c);
            }
        }

        if self.in_string {
            self.error(LexError::UnterminatedString {
                line: self.line,
                column: self.column,
            });
        }

        if !self.current.tokens.is_empty() || !self.current.errors.is_empty() {
            let line = self.line;
            let warning = LexWarning::MissingEndOfProgram { line };
            debug!("LEXER --> {}", warning);
            self.current.warnings.push(warning);
            self.current
                .tokens
                .push(Token::new(TokenKind::EndOfProgram, "$", line, self.column));
            self.end_program();
        }
    }

    /// Splits `source` into `$`-terminated programs and tokenizes each of them.
    pub fn tokenize(source: &str) -> Vec<LexedProgram> {
        let mut lexer = Lexer::new(source);
        lexer._tokenize();

        lexer.programs
    }
}
