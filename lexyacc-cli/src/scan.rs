use crate::grammar_io::load_lexical;
use crate::table::Table;
use crate::{LexyaccArgs, ScanArgs};
use lexyacc::lexer::Scanner;
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] crate::grammar_io::LoadError),
    #[error("failed to read source file `{0}`: {1}")]
    ReadSource(String, std::io::Error),
    #[error(transparent)]
    Lex(#[from] lexyacc::lexer::LexError),
}

pub fn scan(main_args: &LexyaccArgs, args: &ScanArgs) -> Result<(), Error> {
    let log = |s: &str| {
        if !main_args.no_log {
            eprintln!("{s}");
        }
    };

    let dfas = load_lexical(&args.lexical)?;
    log(&format!("Loaded {} token categories", dfas.len()));

    let source = fs::read_to_string(&args.source)
        .map_err(|e| Error::ReadSource(args.source.display().to_string(), e))?;

    let scanner = Scanner::new(dfas);
    let tokens = scanner.tokenize(&source)?;

    let mut table = Table::default();
    table.push_row(vec!["line", "category", "lexeme"]);
    let rows: Vec<(String, String, String)> = tokens
        .iter()
        .map(|t| (t.line.to_string(), t.category.to_string(), t.lexeme.clone()))
        .collect();
    for (line, category, lexeme) in &rows {
        table.push_row(vec![line.as_str(), category.as_str(), lexeme.as_str()]);
    }
    println!("{}", table.to_string(" | "));

    Ok(())
}
