//! CLOSURE and GOTO over LR(1) item sets, and the worklist that builds the
//! canonical collection of LR(1) states from them. State identity is the
//! item set itself, compared as a real [`BTreeSet`] — never serialized to a
//! string for comparison.

use crate::first::{first_of_sequence, FirstMember, FirstSets};
use crate::grammar::{Grammar, Symbol};
use crate::lr1::item::Item;
use std::collections::{BTreeSet, HashMap, VecDeque};

pub type State = BTreeSet<Item>;

/// Lookaheads that an item `[A -> alpha . B beta, a]` propagates onto the
/// items for `B`'s own productions: FIRST(beta a).
fn propagated_lookaheads(first: &FirstSets, beta: &[Symbol], a: &Symbol) -> BTreeSet<Symbol> {
    let mut seq: Vec<Symbol> = beta.to_vec();
    seq.push(a.clone());
    first_of_sequence(&seq, first)
        .into_iter()
        .filter_map(|m| match m {
            FirstMember::Terminal(symbol) => Some(symbol),
            FirstMember::Epsilon => None,
        })
        .collect()
}

pub fn closure(grammar: &Grammar, first: &FirstSets, items: State) -> State {
    let mut items = items;
    loop {
        let mut additions: Vec<Item> = Vec::new();
        for item in &items {
            let production = &grammar.productions[item.production];
            let Some(Symbol::NonTerminal(b)) = production.rhs.get(item.dot) else {
                continue;
            };
            let beta = &production.rhs[item.dot + 1..];
            let lookaheads = propagated_lookaheads(first, beta, &item.lookahead);
            for prod_idx in grammar.productions_for(b) {
                for la in &lookaheads {
                    let candidate = Item { production: prod_idx, dot: 0, lookahead: la.clone() };
                    if !items.contains(&candidate) && !additions.contains(&candidate) {
                        additions.push(candidate);
                    }
                }
            }
        }
        if additions.is_empty() {
            break;
        }
        items.extend(additions);
    }
    items
}

pub fn goto(grammar: &Grammar, first: &FirstSets, items: &State, symbol: &Symbol) -> State {
    let moved: State = items
        .iter()
        .filter_map(|item| {
            let production = &grammar.productions[item.production];
            if production.rhs.get(item.dot) == Some(symbol) {
                Some(Item { production: item.production, dot: item.dot + 1, lookahead: item.lookahead.clone() })
            } else {
                None
            }
        })
        .collect();
    closure(grammar, first, moved)
}

/// The symbols immediately following the dot in any item of `state`, in a
/// deterministic (sorted) order so that state-discovery order is reproducible.
fn symbols_after_dot(grammar: &Grammar, state: &State) -> Vec<Symbol> {
    let set: BTreeSet<Symbol> = state
        .iter()
        .filter_map(|item| grammar.productions[item.production].rhs.get(item.dot).cloned())
        .collect();
    set.into_iter().collect()
}

#[derive(Debug, Clone)]
pub struct Collection {
    pub states: Vec<State>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

/// Builds the canonical collection of LR(1) item sets by a breadth-first
/// worklist over GOTO, starting from the closure of the augmented start
/// item `[<start> -> . S, $]`.
pub fn build_canonical_collection(grammar: &Grammar, first: &FirstSets) -> Collection {
    let start_item = Item { production: 0, dot: 0, lookahead: Symbol::EndOfInput };
    let start_state = closure(grammar, first, State::from([start_item]));

    let mut states = vec![start_state.clone()];
    let mut index_of: HashMap<State, usize> = HashMap::from([(start_state, 0)]);
    let mut transitions = HashMap::new();
    let mut worklist: VecDeque<usize> = VecDeque::from([0usize]);

    while let Some(state_idx) = worklist.pop_front() {
        for symbol in symbols_after_dot(grammar, &states[state_idx]) {
            let target = goto(grammar, first, &states[state_idx], &symbol);
            if target.is_empty() {
                continue;
            }
            let target_idx = match index_of.get(&target) {
                Some(&i) => i,
                None => {
                    let i = states.len();
                    index_of.insert(target.clone(), i);
                    states.push(target);
                    worklist.push_back(i);
                    i
                }
            };
            transitions.insert((state_idx, symbol), target_idx);
        }
    }

    Collection { states, transitions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first::first_sets;
    use crate::grammar::{RawGrammar, RawProduction};

    fn arith_grammar() -> Grammar {
        Grammar::from_raw(RawGrammar {
            start: "E".into(),
            terminals: vec!["plus".into(), "id".into()],
            productions: vec![
                RawProduction { lhs: "E".into(), rhs: vec!["E".into(), "plus".into(), "T".into()] },
                RawProduction { lhs: "E".into(), rhs: vec!["T".into()] },
                RawProduction { lhs: "T".into(), rhs: vec!["id".into()] },
            ],
        })
        .unwrap()
    }

    #[test]
    fn start_state_contains_augmented_item() {
        let g = arith_grammar();
        let first = first_sets(&g);
        let collection = build_canonical_collection(&g, &first);
        assert!(collection.states[0].contains(&Item { production: 0, dot: 0, lookahead: Symbol::EndOfInput }));
    }

    #[test]
    fn collection_is_nonempty_and_deterministic() {
        let g = arith_grammar();
        let first = first_sets(&g);
        let c1 = build_canonical_collection(&g, &first);
        let c2 = build_canonical_collection(&g, &first);
        assert_eq!(c1.states.len(), c2.states.len());
        assert!(c1.states.len() > 1);
    }
}
