//! # lexyacc
//!
//! `lexyacc` builds a longest-match lexical scanner and a canonical LR(1)
//! parser from two declarative grammars: a right-linear grammar describing
//! token categories, and a context-free grammar describing program
//! structure.
//!
//! ## Pipeline
//!
//! Lexical side: [`lexgrammar::Category`] (one right-linear grammar per
//! token category) is lifted to an [`nfa::Nfa`] by [`nfa::Nfa::build`],
//! then to a [`dfa::Dfa`] by subset construction ([`dfa::Dfa::from_nfa`]).
//! A [`lexer::Scanner`] runs every category's DFA over the input in
//! lock-step and picks the longest accepting match, breaking ties by
//! category priority.
//!
//! Syntactic side: a [`grammar::Grammar`] is augmented with a synthetic
//! start production, its [`first::first_sets`] are solved, the canonical
//! LR(1) item-set collection is built with
//! [`lr1::build_canonical_collection`], ACTION/GOTO tables are generated
//! with [`lr1::build_tables`], and [`lr1::parse`] drives the resulting
//! tables against the scanner's token stream.
//!
//! ## Usage
//!
//! ```ignore
//! use lexyacc::{dfa::Dfa, first, grammar::Grammar, lexer::Scanner, lexgrammar, lr1, nfa::Nfa};
//!
//! let lexical: lexgrammar::RawLexicalGrammar = serde_json::from_str(include_str!("lex.json"))?;
//! let categories = lexgrammar::load(lexical)?;
//! let dfas: Vec<Dfa> = categories.iter()
//!     .map(|c| Ok(Dfa::from_nfa(&Nfa::build(c)?)))
//!     .collect::<Result<_, nfa::NfaBuildError>>()?;
//! let scanner = Scanner::new(dfas);
//! let tokens = scanner.tokenize(include_str!("program.src"))?;
//!
//! let raw: grammar::RawGrammar = serde_json::from_str(include_str!("grammar.json"))?;
//! let grammar = Grammar::from_raw(raw)?;
//! let first_sets = first::first_sets(&grammar);
//! let collection = lr1::build_canonical_collection(&grammar, &first_sets);
//! let tables = lr1::build_tables(&grammar, &collection)?;
//! let outcome = lr1::parse(&grammar, &tables, &tokens)?;
//! ```

pub mod charclass;
pub mod dfa;
pub mod first;
pub mod grammar;
pub mod lexer;
pub mod lexgrammar;
pub mod lr1;
pub mod nfa;
