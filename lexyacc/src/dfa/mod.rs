//! Subset construction: turns an [`Nfa`] into an equivalent [`Dfa`] by
//! iteratively discovering reachable epsilon-closed state sets (see
//! [`Dfa::from_nfa`]).

pub mod eval;

use crate::nfa::Nfa;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::rc::Rc;

/// Sentinel transition target meaning "no move on this character"; the
/// scanner driver treats reaching it as the automaton getting stuck.
pub const DEAD: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct DfaState {
    pub accepting: bool,
    pub transitions: Vec<usize>,
}

impl DfaState {
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }
}

#[derive(Debug, Clone)]
pub struct Dfa {
    pub states: Vec<DfaState>,
    pub alphabet: Vec<char>,
    pub initial_state: usize,
    pub category: Rc<str>,
}

impl Dfa {
    /// Subset construction over `nfa`. States are identified by their
    /// epsilon-closed set of NFA state indices, compared as a real
    /// [`BTreeSet`] (not stringified) so two sets are equal iff they contain
    /// the same states. Discovery order is a breadth-first worklist, not
    /// recursion, and is itself part of the observable output (state 0 is
    /// always the closure of the NFA's initial state).
    pub fn from_nfa(nfa: &Nfa) -> Dfa {
        let start_set = nfa.closure(&BTreeSet::from([nfa.initial_state]));

        let mut index_of: HashMap<BTreeSet<usize>, usize> = HashMap::new();
        index_of.insert(start_set.clone(), 0);
        let mut states = vec![DfaState { accepting: false, transitions: vec![DEAD; nfa.alphabet.len()] }];
        let mut worklist: VecDeque<(usize, BTreeSet<usize>)> = VecDeque::new();
        worklist.push_back((0, start_set));

        while let Some((idx, set)) = worklist.pop_front() {
            states[idx].accepting = set.iter().any(|&s| nfa.states[s].is_accepting());

            for char_idx in 0..nfa.alphabet.len() {
                let moved: BTreeSet<usize> = set
                    .iter()
                    .flat_map(|&s| nfa.states[s].transitions[char_idx].iter().copied())
                    .collect();
                if moved.is_empty() {
                    continue;
                }
                let closed = nfa.closure(&moved);
                let target = match index_of.get(&closed) {
                    Some(&i) => i,
                    None => {
                        let i = states.len();
                        index_of.insert(closed.clone(), i);
                        states.push(DfaState { accepting: false, transitions: vec![DEAD; nfa.alphabet.len()] });
                        worklist.push_back((i, closed));
                        i
                    }
                };
                states[idx].transitions[char_idx] = target;
            }
        }

        Dfa {
            states,
            alphabet: nfa.alphabet.clone(),
            initial_state: 0,
            category: nfa.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charclass::{Alias, EdgeLabel};
    use crate::lexgrammar::{Category, LexProduction};

    fn digits_category() -> Category {
        Category {
            name: Rc::from("num"),
            start: Rc::from("S"),
            productions: vec![
                LexProduction { lhs: Rc::from("S"), label: EdgeLabel::Alias(Alias::Digit), next: Some(Rc::from("S")) },
                LexProduction { lhs: Rc::from("S"), label: EdgeLabel::Alias(Alias::Digit), next: None },
            ],
            node_descriptions: std::collections::HashMap::new(),
        }
    }

    #[test]
    fn subset_construction_is_deterministic_and_total_on_its_alphabet() {
        let nfa = Nfa::build(&digits_category()).unwrap();
        let dfa = Dfa::from_nfa(&nfa);
        // every transition out of the initial state on a digit goes somewhere
        for t in &dfa.states[dfa.initial_state].transitions {
            assert_ne!(*t, DEAD);
        }
    }

    #[test]
    fn accepts_after_one_digit() {
        let nfa = Nfa::build(&digits_category()).unwrap();
        let dfa = Dfa::from_nfa(&nfa);
        let mut ev = eval::DfaEvaluator::from(&dfa);
        ev.step('7');
        assert!(ev.is_accepting());
    }

    #[test]
    fn rejects_non_alphabet_character() {
        let nfa = Nfa::build(&digits_category()).unwrap();
        let dfa = Dfa::from_nfa(&nfa);
        let mut ev = eval::DfaEvaluator::from(&dfa);
        assert!(ev.step('x').is_none());
    }
}
