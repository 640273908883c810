use std::process::ExitCode;

use alanc::{cli::Cli, compile, ProgramOutput};
use anyhow::Context;
use clap::Parser;

fn report(program: &ProgramOutput, quiet: bool) {
    println!("Program {}", program.number);

    for warning in &program.lex.warnings {
        println!("  LEXER WARNING: {}", warning);
    }
    for error in &program.lex.errors {
        println!("  LEXER ERROR: {}", error);
    }

    match &program.parse {
        Ok(parse) => {
            for error in &parse.errors {
                println!("  PARSER ERROR: {}", error);
            }
            println!(
                "  Parse {} with {} error(s)",
                if parse.succeeded() { "succeeded" } else { "failed" },
                parse.errors.len()
            );
            if parse.succeeded() && !quiet {
                println!("\nCST for program {}:\n{}", program.number, parse.cst);
            }
        }
        Err(skipped) => println!("  {}", skipped),
    }

    match &program.semantic {
        Ok(analysis) => {
            for error in &analysis.errors {
                println!("  SEMANTIC ERROR: {}", error);
            }
            for warning in &analysis.warnings {
                println!("  SEMANTIC WARNING: {}", warning);
            }
            println!(
                "  Semantic analysis {} with {} error(s) and {} warning(s)",
                if analysis.succeeded() { "succeeded" } else { "failed" },
                analysis.errors.len(),
                analysis.warnings.len()
            );
            if analysis.succeeded() && !quiet {
                println!("\nAST for program {}:\n{}", program.number, analysis.ast);
                println!(
                    "Symbol table for program {}:\n{}",
                    program.number,
                    analysis.scopes.render_table()
                );
            }
        }
        Err(skipped) => println!("  {}", skipped),
    }

    match &program.codegen {
        Ok(assembly) => {
            println!("  Code generation succeeded ({} bytes of code)", assembly.code_size);
            println!("\nImage for program {}:\n{}\n", program.number, assembly.image);
        }
        Err(e) => println!("  {}\n", e),
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let source = cli
        .input
        .contents()
        .context("Failed to read source input")?;

    let programs = compile(&source);
    if programs.is_empty() {
        eprintln!("No programs found in input");
        return Ok(false);
    }

    for program in &programs {
        report(program, cli.quiet);
    }
    Ok(programs.iter().all(ProgramOutput::succeeded))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{:?}", err);
            ExitCode::FAILURE
        }
    }
}
