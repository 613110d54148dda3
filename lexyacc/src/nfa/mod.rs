//! Construction of an NFA fragment from a single lexical [`Category`]: every
//! right-linear production `A -> a B` becomes an edge `A -(a)-> B`, `A -> a`
//! becomes an edge into a synthetic accepting state, and `A -> empty` becomes
//! an epsilon edge out of `A` into that same accepting state.

use crate::charclass::EdgeLabel;
use crate::lexgrammar::Category;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct NfaState {
    pub name: Rc<str>,
    pub description: Rc<str>,
    pub accepting: bool,
    /// One entry per alphabet position; each may fan out to several target
    /// states when more than one production shares a label.
    pub transitions: Vec<BTreeSet<usize>>,
    pub epsilon: BTreeSet<usize>,
}

impl NfaState {
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

#[derive(Debug, Clone)]
pub struct Nfa {
    pub states: Vec<NfaState>,
    pub alphabet: Vec<char>,
    pub initial_state: usize,
    pub category: Rc<str>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NfaBuildError {
    #[error("category `{0}` has no productions to build an NFA from")]
    NoProductions(String),
}

impl Nfa {
    pub fn build(category: &Category) -> Result<Nfa, NfaBuildError> {
        if category.productions.is_empty() {
            return Err(NfaBuildError::NoProductions(category.name.to_string()));
        }

        let names = category.state_names();
        let index_of: HashMap<Rc<str>, usize> =
            names.iter().cloned().enumerate().map(|(i, n)| (n, i)).collect();
        let final_state = names.len();

        let mut alphabet: BTreeSet<char> = BTreeSet::new();
        for p in &category.productions {
            match p.label {
                EdgeLabel::Literal(c) => {
                    alphabet.insert(c);
                }
                EdgeLabel::Alias(a) => alphabet.extend(a.expand()),
                EdgeLabel::Empty => {}
            }
        }
        let alphabet: Vec<char> = alphabet.into_iter().collect();
        let char_index: HashMap<char, usize> =
            alphabet.iter().copied().enumerate().map(|(i, c)| (c, i)).collect();

        let no_description: Rc<str> = Rc::from("");
        let mut states: Vec<NfaState> = names
            .iter()
            .map(|n| NfaState {
                name: n.clone(),
                description: category.node_descriptions.get(n).cloned().unwrap_or_else(|| no_description.clone()),
                accepting: false,
                transitions: vec![BTreeSet::new(); alphabet.len()],
                epsilon: BTreeSet::new(),
            })
            .collect();
        states.push(NfaState {
            name: Rc::from("<accept>"),
            description: Rc::from("accepting state"),
            accepting: true,
            transitions: vec![BTreeSet::new(); alphabet.len()],
            epsilon: BTreeSet::new(),
        });

        for p in &category.productions {
            let lhs_idx = index_of[&p.lhs];
            match p.label {
                EdgeLabel::Empty => {
                    let target = p.next.as_ref().map_or(final_state, |n| index_of[n]);
                    states[lhs_idx].epsilon.insert(target);
                }
                EdgeLabel::Literal(c) => {
                    let target = p.next.as_ref().map_or(final_state, |n| index_of[n]);
                    states[lhs_idx].transitions[char_index[&c]].insert(target);
                }
                EdgeLabel::Alias(a) => {
                    let target = p.next.as_ref().map_or(final_state, |n| index_of[n]);
                    for c in a.expand() {
                        states[lhs_idx].transitions[char_index[&c]].insert(target);
                    }
                }
            }
        }

        Ok(Nfa {
            states,
            alphabet,
            initial_state: index_of[&category.start],
            category: category.name.clone(),
        })
    }

    /// The epsilon-closure of a set of states: every state reachable from it
    /// using zero or more epsilon moves. Iterative, per the requirement that
    /// automaton walks not recurse.
    pub fn closure(&self, states: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut closure = states.clone();
        let mut worklist: Vec<usize> = states.iter().copied().collect();
        while let Some(s) = worklist.pop() {
            for &t in &self.states[s].epsilon {
                if closure.insert(t) {
                    worklist.push(t);
                }
            }
        }
        closure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charclass::Alias;
    use crate::lexgrammar::LexProduction;

    fn letter_category() -> Category {
        Category {
            name: Rc::from("id"),
            start: Rc::from("S"),
            productions: vec![
                LexProduction { lhs: Rc::from("S"), label: EdgeLabel::Alias(Alias::Letter), next: Some(Rc::from("S")) },
                LexProduction { lhs: Rc::from("S"), label: EdgeLabel::Alias(Alias::Letter), next: None },
            ],
            node_descriptions: HashMap::new(),
        }
    }

    #[test]
    fn builds_expected_alphabet_size() {
        let nfa = Nfa::build(&letter_category()).unwrap();
        assert_eq!(nfa.alphabet.len(), 52);
    }

    #[test]
    fn initial_state_is_start_symbol() {
        let nfa = Nfa::build(&letter_category()).unwrap();
        assert_eq!(nfa.states[nfa.initial_state].name.as_ref(), "S");
        assert!(!nfa.states[nfa.initial_state].accepting);
    }

    #[test]
    fn empty_production_adds_epsilon_edge() {
        let cat = Category {
            name: Rc::from("eps"),
            start: Rc::from("S"),
            productions: vec![LexProduction { lhs: Rc::from("S"), label: EdgeLabel::Empty, next: None }],
            node_descriptions: HashMap::new(),
        };
        let nfa = Nfa::build(&cat).unwrap();
        let closure = nfa.closure(&BTreeSet::from([nfa.initial_state]));
        assert!(closure.iter().any(|&i| nfa.states[i].accepting));
    }

    #[test]
    fn rejects_empty_category() {
        let cat = Category { name: Rc::from("x"), start: Rc::from("S"), productions: vec![], node_descriptions: HashMap::new() };
        assert_eq!(Nfa::build(&cat), Err(NfaBuildError::NoProductions("x".into())));
    }
}
