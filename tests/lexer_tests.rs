use alanc::error::{LexError, LexWarning};
use alanc::lexer::{LexedProgram, Lexer, TokenKind};

fn lex_one(input: &str) -> LexedProgram {
    let mut programs = Lexer::tokenize(input);
    assert_eq!(programs.len(), 1);
    programs.remove(0)
}

fn kinds(program: &LexedProgram) -> Vec<TokenKind> {
    program.tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn keywords_are_matched_by_prefix() {
    let program = lex_one("{ inta }$");
    assert_eq!(
        kinds(&program),
        vec![
            TokenKind::LeftBrace,
            TokenKind::Type,
            TokenKind::Id,
            TokenKind::RightBrace,
            TokenKind::EndOfProgram,
        ]
    );
    assert_eq!(program.tokens[1].literal, "int");
    assert_eq!(program.tokens[2].literal, "a");
}

#[test]
fn keywords_and_symbols() {
    let program = lex_one("{while(a!=b)if true==false print(1+2)}$");
    assert_eq!(
        kinds(&program),
        vec![
            TokenKind::LeftBrace,
            TokenKind::While,
            TokenKind::LeftParen,
            TokenKind::Id,
            TokenKind::InequalityOp,
            TokenKind::Id,
            TokenKind::RightParen,
            TokenKind::If,
            TokenKind::BoolTrue,
            TokenKind::EqualityOp,
            TokenKind::BoolFalse,
            TokenKind::Print,
            TokenKind::LeftParen,
            TokenKind::Digit,
            TokenKind::AdditionOp,
            TokenKind::Digit,
            TokenKind::RightParen,
            TokenKind::RightBrace,
            TokenKind::EndOfProgram,
        ]
    );
    assert!(program.succeeded());
}

#[test]
fn assignment_is_not_equality() {
    let program = lex_one("{ a = 1 b == c }$");
    assert_eq!(program.tokens[2].kind, TokenKind::AssignOp);
    assert_eq!(program.tokens[5].kind, TokenKind::EqualityOp);
}

#[test]
fn strings_are_split_into_chars() {
    let program = lex_one("{ print(\"a int\") }$");
    let chars = program
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Char)
        .map(|t| t.literal.as_str())
        .collect::<Vec<_>>();
    // keywords are not recognized inside strings
    assert_eq!(chars, vec!["a", " ", "i", "n", "t"]);
    assert!(program.succeeded());
}

#[test]
fn comments_are_skipped() {
    let program = lex_one("{ /* int a */ print(1) }$");
    assert_eq!(program.tokens[1].kind, TokenKind::Print);
    assert_eq!(program.tokens.len(), 7);
}

#[test]
fn positions() {
    let program = lex_one("{\n  int a\n}$");
    let int = &program.tokens[1];
    assert_eq!((int.line, int.column), (2, 3));
    let a = &program.tokens[2];
    assert_eq!((a.line, a.column), (2, 7));
    let end = &program.tokens[4];
    assert_eq!((end.line, end.column), (3, 2));
}

#[test]
fn uppercase_is_unrecognized() {
    let program = lex_one("{ int A }$");
    assert!(!program.succeeded());
    assert_eq!(
        program.errors,
        vec![LexError::UnrecognizedToken {
            text: "A".to_string(),
            line: 1,
            column: 7,
        }]
    );
}

#[test]
fn invalid_string_char() {
    let program = lex_one("{ print(\"a1\") }$");
    let [LexError::InvalidStringChar { ch, .. }] = program.errors.as_slice() else {
        panic!("unexpected errors: {:?}", program.errors);
    };
    assert_eq!(*ch, '1');
}

#[test]
fn unterminated_string() {
    let program = lex_one("{ print(\"ab\n) }$");
    let [LexError::UnterminatedString { line, .. }] = program.errors.as_slice() else {
        panic!("unexpected errors: {:?}", program.errors);
    };
    assert_eq!(*line, 1);
}

#[test]
fn unterminated_comment() {
    let programs = Lexer::tokenize("{ /* never closed }$");
    let program = &programs[0];
    let [LexError::UnterminatedComment { line, column }] = program.errors.as_slice() else {
        panic!("unexpected errors: {:?}", program.errors);
    };
    assert_eq!((*line, *column), (1, 3));
}

#[test]
fn programs_are_split_on_end_marker() {
    let programs = Lexer::tokenize("{}$\n{ print(1) }$\n");
    assert_eq!(programs.len(), 2);
    assert_eq!(programs[0].tokens.len(), 3);
    assert_eq!(programs[1].tokens[1].kind, TokenKind::Print);
    assert_eq!(programs[1].tokens[1].line, 2);
}

#[test]
fn missing_end_marker_is_added() {
    let program = lex_one("{ print(1) }");
    assert_eq!(
        program.warnings,
        vec![LexWarning::MissingEndOfProgram { line: 1 }]
    );
    assert_eq!(program.tokens.last().map(|t| t.kind), Some(TokenKind::EndOfProgram));
    assert!(program.succeeded());
}

#[test]
fn trailing_whitespace_is_not_a_program() {
    assert_eq!(Lexer::tokenize("{}$   \n\n").len(), 1);
    assert!(Lexer::tokenize("").is_empty());
}
