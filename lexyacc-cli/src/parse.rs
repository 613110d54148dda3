use crate::grammar_io::{load_lexical, load_syntactic};
use crate::table::Table;
use crate::{LexyaccArgs, ParseArgs};
use lexyacc::first::first_sets;
use lexyacc::lexer::Scanner;
use lexyacc::lr1::{build_canonical_collection, build_tables, parse as run_parse, ParseStep};
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
    #[error(transparent)]
    Table(#[from] lexyacc::lr1::TableError),
    #[error(transparent)]
    Parse(#[from] lexyacc::lr1::ParseError),
}

pub fn parse(main_args: &LexyaccArgs, args: &ParseArgs) -> Result<(), Error> {
    let log = |s: &str| {
        if !main_args.no_log {
            eprintln!("{s}");
        }
    };

    let dfas = load_lexical(&args.lexical)?;
    let grammar = load_syntactic(&args.syntax)?;
    log(&format!("Loaded {} token categories and {} productions", dfas.len(), grammar.productions.len() - 1));

    let source = fs::read_to_string(&args.source)
        .map_err(|e| Error::ReadSource(args.source.display().to_string(), e))?;

    let scanner = Scanner::new(dfas);
    let tokens = scanner.tokenize(&source)?;

    let first = first_sets(&grammar);
    let collection = build_canonical_collection(&grammar, &first);
    let tables = build_tables(&grammar, &collection)?;
    log(&format!("Built {} LR(1) states", tables.num_states));

    let outcome = run_parse(&grammar, &tables, &tokens)?;

    if args.trace {
        let mut table = Table::default();
        table.push_row(vec!["action", "detail"]);
        let rows: Vec<(String, String)> = outcome
            .trace
            .iter()
            .map(|step| match step {
                ParseStep::Shift { lexeme, target_state } => ("shift".to_string(), format!("`{lexeme}` -> state {target_state}")),
                ParseStep::Reduce { production, lhs } => ("reduce".to_string(), format!("production #{production} ({lhs})")),
                ParseStep::Accept => ("accept".to_string(), String::new()),
            })
            .collect();
        for (action, detail) in &rows {
            table.push_row(vec![action.as_str(), detail.as_str()]);
        }
        println!("{}", table.to_string(" | "));
    } else {
        println!("accepted");
    }

    Ok(())
}
