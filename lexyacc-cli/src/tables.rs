use crate::grammar_io::load_syntactic;
use crate::table::Table;
use crate::{LexyaccArgs, TablesArgs};
use lexyacc::first::first_sets;
use lexyacc::grammar::{classify_terminal, Symbol};
use lexyacc::lr1::{build_canonical_collection, build_tables, Action};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] crate::grammar_io::LoadError),
    #[error(transparent)]
    Table(#[from] lexyacc::lr1::TableError),
}

pub fn tables(main_args: &LexyaccArgs, args: &TablesArgs) -> Result<(), Error> {
    let log = |s: &str| {
        if !main_args.no_log {
            eprintln!("{s}");
        }
    };

    let grammar = load_syntactic(&args.syntax)?;
    let first = first_sets(&grammar);
    let collection = build_canonical_collection(&grammar, &first);
    let tables = build_tables(&grammar, &collection)?;
    log(&format!("{} states", tables.num_states));

    let mut terminals: Vec<&str> = grammar.terminals.iter().map(|t| t.as_ref()).collect();
    terminals.sort();
    let mut nonterminals: Vec<&str> = grammar
        .nonterminals
        .iter()
        .filter(|nt| nt.as_ref() != grammar.augmented_start())
        .map(|nt| nt.as_ref())
        .collect();
    nonterminals.sort();

    let mut header = vec!["state"];
    header.extend(terminals.iter().copied());
    header.push("$");
    header.extend(nonterminals.iter().copied());

    let mut table = Table::default();
    table.push_row(header);

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(tables.num_states);
    for state in 0..tables.num_states {
        let mut row = vec![state.to_string()];
        let render = |symbol: Symbol| match tables.action.get(&(state, symbol)) {
            Some(Action::Shift(s)) => format!("s{s}"),
            Some(Action::Reduce(p)) => format!("r{p}"),
            Some(Action::Accept) => "acc".to_string(),
            None => String::new(),
        };
        for t in &terminals {
            row.push(render(classify_terminal(Rc::from(*t))));
        }
        row.push(render(Symbol::EndOfInput));
        for nt in &nonterminals {
            let key: Rc<str> = Rc::from(*nt);
            let cell = tables.goto.get(&(state, key)).map(|s| s.to_string()).unwrap_or_default();
            row.push(cell);
        }
        cells.push(row);
    }
    for row in &cells {
        table.push_row(row.iter().map(String::as_str).collect());
    }

    println!("{}", table.to_string(" | "));
    Ok(())
}
