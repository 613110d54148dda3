//! The context-free (type-2) grammar model shared by the FIRST-set solver and
//! the LR(1) item-set builder: [`Symbol`], [`Production`] and the validated
//! [`Grammar`] they live in.

use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// The two terminal-alias names §3 distinguishes from literal terminals: a
/// declared terminal with one of these names matches any token of that
/// lexer category, rather than matching a specific lexeme.
const ALIAS_IDENTIFIER: &str = "identifier";
const ALIAS_CONSTANT: &str = "constant";

/// A grammar symbol (§3): a nonterminal, a terminal-alias that matches any
/// token whose *category* is the alias's name (`<identifier>`, `<constant>`),
/// a literal terminal that matches a token by exact *lexeme* (keywords,
/// operators, delimiters), or the distinguished end-of-input marker used as
/// a lookahead placeholder.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    TerminalAlias(Rc<str>),
    TerminalLiteral(Rc<str>),
    NonTerminal(Rc<str>),
    EndOfInput,
}

impl Symbol {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::TerminalAlias(_) | Symbol::TerminalLiteral(_) | Symbol::EndOfInput)
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::TerminalAlias(name) => write!(f, "<{name}>"),
            Symbol::TerminalLiteral(lexeme) => write!(f, "{lexeme}"),
            Symbol::NonTerminal(name) => write!(f, "{name}"),
            Symbol::EndOfInput => write!(f, "$"),
        }
    }
}

/// Classifies a declared terminal name as a terminal-alias or a literal
/// terminal per §3: `identifier` and `constant` match by token category,
/// every other declared terminal matches by exact lexeme.
pub fn classify_terminal(name: Rc<str>) -> Symbol {
    match name.as_ref() {
        ALIAS_IDENTIFIER | ALIAS_CONSTANT => Symbol::TerminalAlias(name),
        _ => Symbol::TerminalLiteral(name),
    }
}

/// One context-free production `lhs -> rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: Rc<str>,
    pub rhs: Vec<Symbol>,
}

/// The raw, on-disk shape of a syntactic grammar file.
#[derive(Debug, Deserialize)]
pub struct RawGrammar {
    pub start: String,
    pub terminals: Vec<String>,
    pub productions: Vec<RawProduction>,
}

#[derive(Debug, Deserialize)]
pub struct RawProduction {
    pub lhs: String,
    pub rhs: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("start symbol `{0}` is not the left-hand side of any production")]
    UnknownStartSymbol(String),
    #[error("symbol `{0}` is neither a declared terminal nor the left-hand side of any production")]
    UnknownSymbol(String),
    #[error("`{0}` is declared as a terminal but also appears as a production's left-hand side")]
    TerminalUsedAsNonTerminal(String),
    #[error("grammar has no productions")]
    Empty,
}

/// A validated context-free grammar, augmented with a synthetic start
/// production `S' -> S` at index 0 (see the LR(1) item-set builder).
#[derive(Debug, Clone)]
pub struct Grammar {
    pub productions: Vec<Production>,
    /// The grammar's original (non-augmented) start symbol.
    pub start: Rc<str>,
    pub terminals: HashSet<Rc<str>>,
    pub nonterminals: HashSet<Rc<str>>,
}

const AUGMENTED_START: &str = "<start>";

impl Grammar {
    pub fn from_raw(raw: RawGrammar) -> Result<Grammar, GrammarError> {
        if raw.productions.is_empty() {
            return Err(GrammarError::Empty);
        }

        let terminals: HashSet<Rc<str>> = raw.terminals.iter().map(|s| Rc::from(s.as_str())).collect();
        let nonterminals: HashSet<Rc<str>> = raw
            .productions
            .iter()
            .map(|p| Rc::from(p.lhs.as_str()))
            .collect();

        for nt in &nonterminals {
            if terminals.contains(nt) {
                return Err(GrammarError::TerminalUsedAsNonTerminal(nt.to_string()));
            }
        }

        if !nonterminals.contains(raw.start.as_str()) {
            return Err(GrammarError::UnknownStartSymbol(raw.start));
        }

        let classify = |name: &str| -> Result<Symbol, GrammarError> {
            if let Some(nt) = nonterminals.get(name) {
                Ok(Symbol::NonTerminal(nt.clone()))
            } else if let Some(t) = terminals.get(name) {
                Ok(classify_terminal(t.clone()))
            } else {
                Err(GrammarError::UnknownSymbol(name.to_string()))
            }
        };

        let start: Rc<str> = nonterminals.get(raw.start.as_str()).unwrap().clone();

        let mut productions = Vec::with_capacity(raw.productions.len() + 1);
        productions.push(Production {
            lhs: Rc::from(AUGMENTED_START),
            rhs: vec![Symbol::NonTerminal(start.clone())],
        });
        for p in &raw.productions {
            let lhs = nonterminals.get(p.lhs.as_str()).unwrap().clone();
            let rhs = p.rhs.iter().map(|s| classify(s)).collect::<Result<Vec<_>, _>>()?;
            productions.push(Production { lhs, rhs });
        }

        Ok(Grammar {
            productions,
            start,
            terminals,
            nonterminals,
        })
    }

    pub fn augmented_start(&self) -> &str {
        AUGMENTED_START
    }

    /// Indices of every production whose left-hand side is `nt`.
    pub fn productions_for(&self, nt: &Rc<str>) -> Vec<usize> {
        self.productions
            .iter()
            .enumerate()
            .filter(|(_, p)| &p.lhs == nt)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawGrammar {
        RawGrammar {
            start: "E".into(),
            terminals: vec!["id".into(), "plus".into()],
            productions: vec![
                RawProduction { lhs: "E".into(), rhs: vec!["E".into(), "plus".into(), "id".into()] },
                RawProduction { lhs: "E".into(), rhs: vec!["id".into()] },
            ],
        }
    }

    #[test]
    fn validates_and_augments() {
        let g = Grammar::from_raw(sample()).unwrap();
        assert_eq!(g.productions.len(), 3);
        assert_eq!(g.productions[0].lhs.as_ref(), AUGMENTED_START);
        assert_eq!(g.productions[0].rhs, vec![Symbol::NonTerminal(Rc::from("E"))]);
    }

    #[test]
    fn rejects_unknown_start() {
        let mut raw = sample();
        raw.start = "Z".into();
        assert_eq!(
            Grammar::from_raw(raw),
            Err(GrammarError::UnknownStartSymbol("Z".into()))
        );
    }

    #[test]
    fn rejects_unknown_symbol_in_rhs() {
        let mut raw = sample();
        raw.productions[1].rhs = vec!["nope".into()];
        assert_eq!(
            Grammar::from_raw(raw),
            Err(GrammarError::UnknownSymbol("nope".into()))
        );
    }
}
