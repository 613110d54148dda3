//! The shift/reduce parser driver (§4.7): a stack machine executed against
//! the ACTION/GOTO tables. The first unexpected token halts analysis with a
//! diagnostic naming the candidate terminals the current state would have
//! accepted — there is no error recovery.

use crate::grammar::{Grammar, Symbol};
use crate::lexer::Token;
use crate::lr1::table::{Action, Tables};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseStep {
    Shift { lexeme: String, target_state: usize },
    Reduce { production: usize, lhs: String },
    Accept,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: unexpected token `{lexeme}` (category `{category}`); expected one of: {expected:?}")]
    UnexpectedToken { line: usize, lexeme: String, category: String, expected: Vec<String> },
    #[error("unexpected end of input; expected one of: {expected:?}")]
    UnexpectedEof { expected: Vec<String> },
    #[error("line {line}: missing GOTO entry for state {state} on `{nonterminal}`")]
    MissingGoto { line: usize, state: usize, nonterminal: String },
}

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub trace: Vec<ParseStep>,
}

pub fn parse(grammar: &Grammar, tables: &Tables, tokens: &[Token]) -> Result<ParseOutcome, ParseError> {
    let mut state_stack: Vec<usize> = vec![0];
    let mut trace = Vec::new();
    let mut pos = 0;

    loop {
        let state = *state_stack.last().expect("state stack is never empty");
        let current: Option<&Token> = tokens.get(pos);

        // §4.7 point 1: a terminal-alias (`<identifier>`, `<constant>`)
        // matches by the token's category; every other terminal is a literal
        // matched by exact lexeme. Try the alias reading first, then fall
        // back to the literal reading.
        let action = match current {
            Some(tok) => tables
                .action
                .get(&(state, Symbol::TerminalAlias(tok.category.clone())))
                .or_else(|| tables.action.get(&(state, Symbol::TerminalLiteral(Rc::from(tok.lexeme.as_str()))))),
            None => tables.action.get(&(state, Symbol::EndOfInput)),
        };

        match action {
            Some(Action::Shift(target)) => {
                let tok = current.expect("a Shift action always corresponds to an actual token");
                state_stack.push(*target);
                trace.push(ParseStep::Shift { lexeme: tok.lexeme.clone(), target_state: *target });
                pos += 1;
            }
            Some(&Action::Reduce(prod_idx)) => {
                let production = &grammar.productions[prod_idx];
                let n = production.rhs.len();
                state_stack.truncate(state_stack.len() - n);
                let top = *state_stack.last().expect("state stack is never empty");
                let target = *tables.goto.get(&(top, production.lhs.clone())).ok_or_else(|| {
                    ParseError::MissingGoto {
                        line: current.map(|t| t.line).unwrap_or(0),
                        state: top,
                        nonterminal: production.lhs.to_string(),
                    }
                })?;
                state_stack.push(target);
                trace.push(ParseStep::Reduce { production: prod_idx, lhs: production.lhs.to_string() });
            }
            Some(Action::Accept) => {
                trace.push(ParseStep::Accept);
                return Ok(ParseOutcome { trace });
            }
            None => {
                let expected = expected_terminals(tables, state);
                return Err(match current {
                    Some(tok) => ParseError::UnexpectedToken {
                        line: tok.line,
                        lexeme: tok.lexeme.clone(),
                        category: tok.category.to_string(),
                        expected,
                    },
                    None => ParseError::UnexpectedEof { expected },
                });
            }
        }
    }
}

fn expected_terminals(tables: &Tables, state: usize) -> Vec<String> {
    let mut expected: Vec<String> = tables
        .action
        .keys()
        .filter(|(s, _)| *s == state)
        .map(|(_, symbol)| symbol.to_string())
        .collect();
    expected.sort();
    expected
}
