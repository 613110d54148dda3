use crate::dfa::{Dfa, DfaState, DEAD};
use std::collections::HashMap;

/// Iterative, non-recursive walker over a [`Dfa`]: each [`step`](Self::step)
/// advances the current state by one character, or marks the evaluator stuck
/// once a character outside the alphabet (or a dead transition) is seen.
#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    rev_map: HashMap<char, usize>,
    current_state: usize,
    stuck: bool,
}

impl<'a> DfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current_state().map_or(false, DfaState::is_accepting)
    }

    pub fn current_state(&self) -> Option<&DfaState> {
        if self.stuck {
            None
        } else {
            Some(&self.dfa.states[self.current_state])
        }
    }

    pub fn current_state_idx(&self) -> Option<usize> {
        (!self.stuck).then_some(self.current_state)
    }

    pub fn step(&mut self, c: char) -> Option<&DfaState> {
        if self.stuck {
            return None;
        }
        match self.rev_map.get(&c) {
            None => {
                self.stuck = true;
                None
            }
            Some(&idx) => {
                let target = self.dfa.states[self.current_state].transitions[idx];
                if target == DEAD {
                    self.stuck = true;
                    None
                } else {
                    self.current_state = target;
                    Some(&self.dfa.states[self.current_state])
                }
            }
        }
    }

    pub fn step_str(&mut self, s: &str) -> Option<&DfaState> {
        for c in s.chars() {
            self.step(c)?;
        }
        self.current_state()
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(value: &'a Dfa) -> Self {
        let rev_map = value.alphabet.iter().enumerate().map(|(idx, &c)| (c, idx)).collect();
        Self {
            dfa: value,
            rev_map,
            current_state: value.initial_state,
            stuck: false,
        }
    }
}
