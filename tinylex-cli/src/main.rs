//! The driver binary: reads one source file, lexes it with the
//! `tinylex`-compiled spec for the demo Lisp-like language (`token::spec`),
//! parses the resulting token stream, and evaluates it -- grounded on
//! `original_source/src/main.py`'s `main` function. Prints either the
//! evaluated result or the lex/parse error message and exits nonzero on
//! failure, per spec §6.4.

mod ast;
mod parser;
mod token;

use clap::Parser as ClapParser;
use std::path::PathBuf;
use std::process::ExitCode;

use token::LTerminal;

/// A tiny Lisp-like expression language: lex, parse, and evaluate one file.
#[derive(Debug, ClapParser)]
#[command(name = "tinylex-cli", version, about)]
struct Cli {
    /// Source file to lex, parse, and evaluate.
    file: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let source = match std::fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            log::error!("failed to read {}: {err}", cli.file.display());
            eprintln!("cannot read {}: {err}", cli.file.display());
            return ExitCode::FAILURE;
        }
    };

    let lexer = tinylex::lexer::compile(&token::spec())
        .expect("the built-in demo-language spec is a fixed, known-good set of regexes");

    let tokens = match lexer.lex(&source) {
        Ok(tokens) => tokens,
        Err(err) => {
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("{} tokens after lexing", tokens.len());

    let significant: Vec<(LTerminal, String)> = tokens
        .into_iter()
        .filter(|(token, _)| *token != LTerminal::Ws)
        .collect();

    let program = match parser::parse(&significant) {
        Ok(program) => program,
        Err(err) => {
            println!("{err}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("parsed program: {program}");

    match program.evaluate(&ast::Scope::new()) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}
