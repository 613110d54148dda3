//! Translates a canonical LR(1) item-set collection into ACTION/GOTO tables.
//! A shift/reduce or reduce/reduce clash is a construction error (fatal,
//! reported at build time — the reference's commented-out item-merge path is
//! deliberately not implemented, so a grammar that only parses under LALR(1)
//! merging surfaces here as a conflict instead of silently merging states).

use crate::grammar::{Grammar, Symbol};
use crate::lr1::closure::Collection;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("shift/reduce conflict in state {state} on `{terminal}`")]
    ShiftReduce { state: usize, terminal: String },
    #[error("reduce/reduce conflict in state {state} on `{terminal}` between productions {a} and {b}")]
    ReduceReduce { state: usize, terminal: String, a: usize, b: usize },
}

#[derive(Debug, Clone)]
pub struct Tables {
    pub action: HashMap<(usize, Symbol), Action>,
    pub goto: HashMap<(usize, Rc<str>), usize>,
    pub num_states: usize,
}

fn insert_action(
    action: &mut HashMap<(usize, Symbol), Action>,
    state: usize,
    terminal: Symbol,
    new: Action,
) -> Result<(), TableError> {
    match action.get(&(state, terminal.clone())) {
        None => {
            action.insert((state, terminal), new);
            Ok(())
        }
        Some(existing) if *existing == new => Ok(()),
        Some(Action::Shift(_)) => Err(TableError::ShiftReduce { state, terminal: terminal.to_string() }),
        Some(Action::Reduce(a)) => match new {
            Action::Shift(_) => Err(TableError::ShiftReduce { state, terminal: terminal.to_string() }),
            Action::Reduce(b) => Err(TableError::ReduceReduce { state, terminal: terminal.to_string(), a: *a, b }),
            Action::Accept => Err(TableError::ReduceReduce { state, terminal: terminal.to_string(), a: *a, b: 0 }),
        },
        Some(Action::Accept) => Err(TableError::ShiftReduce { state, terminal: terminal.to_string() }),
    }
}

pub fn build_tables(grammar: &Grammar, collection: &Collection) -> Result<Tables, TableError> {
    let mut action: HashMap<(usize, Symbol), Action> = HashMap::new();
    let mut goto: HashMap<(usize, Rc<str>), usize> = HashMap::new();

    for (&(state_idx, ref symbol), &target) in &collection.transitions {
        match symbol {
            Symbol::TerminalAlias(_) | Symbol::TerminalLiteral(_) | Symbol::EndOfInput => {
                insert_action(&mut action, state_idx, symbol.clone(), Action::Shift(target))?;
            }
            Symbol::NonTerminal(n) => {
                goto.insert((state_idx, n.clone()), target);
            }
        }
    }

    for (state_idx, items) in collection.states.iter().enumerate() {
        for item in items {
            let production = &grammar.productions[item.production];
            if item.dot != production.rhs.len() {
                continue;
            }
            if item.production == 0 {
                if matches!(item.lookahead, Symbol::EndOfInput) {
                    insert_action(&mut action, state_idx, Symbol::EndOfInput, Action::Accept)?;
                }
                continue;
            }
            insert_action(&mut action, state_idx, item.lookahead.clone(), Action::Reduce(item.production))?;
        }
    }

    Ok(Tables { action, goto, num_states: collection.states.len() })
}
