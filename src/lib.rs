pub mod analyzer;
pub mod cli;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod tree;

use log::info;

use analyzer::Analysis;
use codegen::{Assembly, Codegen};
use error::{CodegenError, Skipped, Stage};
use lexer::{LexedProgram, Lexer};
use parser::{ParseOutput, Parser};

/// Every stage's output for one `$`-terminated program.
#[derive(Debug)]
pub struct ProgramOutput {
    pub number: usize,
    pub lex: LexedProgram,
    pub parse: Result<ParseOutput, Skipped>,
    pub semantic: Result<Analysis, Skipped>,
    pub codegen: Result<Assembly, CodegenError>,
}

impl ProgramOutput {
    pub fn succeeded(&self) -> bool {
        self.codegen.is_ok()
    }
}

/// Compiles every program in `source` independently.
pub fn compile(source: &str) -> Vec<ProgramOutput> {
    Lexer::tokenize(source)
        .into_iter()
        .enumerate()
        .map(|(i, lex)| compile_program(i + 1, lex))
        .collect()
}

pub fn compile_program(number: usize, lex: LexedProgram) -> ProgramOutput {
    info!("compiling program {}", number);

    if !lex.succeeded() {
        return ProgramOutput {
            number,
            lex,
            parse: Err(Skipped::new(Stage::Parse, Stage::Lex)),
            semantic: Err(Skipped::new(Stage::Semantic, Stage::Lex)),
            codegen: Err(Skipped::new(Stage::Codegen, Stage::Lex).into()),
        };
    }

    let (parse, analysis) = Parser::new(lex.tokens.clone()).parse();
    if !parse.succeeded() {
        return ProgramOutput {
            number,
            lex,
            parse: Ok(parse),
            semantic: Err(Skipped::new(Stage::Semantic, Stage::Parse)),
            codegen: Err(Skipped::new(Stage::Codegen, Stage::Parse).into()),
        };
    }

    info!(
        "SEMANTIC --> analysis completed with {} error(s) and {} warning(s)",
        analysis.errors.len(),
        analysis.warnings.len()
    );

    let codegen = Codegen::new(&parse, &analysis)
        .map_err(CodegenError::from)
        .and_then(Codegen::generate);

    ProgramOutput {
        number,
        lex,
        parse: Ok(parse),
        semantic: Ok(analysis),
        codegen,
    }
}
