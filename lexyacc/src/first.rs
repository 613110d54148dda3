//! FIRST-set computation: a fixed-point iteration over every nonterminal's
//! production set, per the standard definition — no early-break special case
//! for left recursion, so termination falls directly out of the fixed-point
//! property (a FIRST set only grows, and is bounded by the terminal count).

use crate::grammar::{Grammar, Symbol};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A FIRST-set member: either a terminal symbol (carrying the alias/literal
/// distinction from [`Symbol`]), or epsilon (meaning the symbol sequence it
/// was computed from can derive the empty string).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FirstMember {
    Terminal(Symbol),
    Epsilon,
}

pub type FirstSets = HashMap<Rc<str>, HashSet<FirstMember>>;

pub fn first_sets(grammar: &Grammar) -> FirstSets {
    let mut first: FirstSets = grammar
        .nonterminals
        .iter()
        .cloned()
        .map(|nt| (nt, HashSet::new()))
        .collect();
    first.insert(Rc::from(grammar.augmented_start()), HashSet::new());

    loop {
        let mut changed = false;
        for production in &grammar.productions {
            let seq_first = first_of_sequence(&production.rhs, &first);
            let entry = first.get_mut(&production.lhs).unwrap();
            for member in seq_first {
                changed |= entry.insert(member);
            }
        }
        if !changed {
            break;
        }
    }

    first
}

/// FIRST of a symbol sequence: terminals seen before the first non-nullable
/// symbol, plus epsilon iff every symbol in the sequence is nullable.
pub fn first_of_sequence(seq: &[Symbol], first: &FirstSets) -> HashSet<FirstMember> {
    let mut result = HashSet::new();
    let mut nullable_so_far = true;

    for symbol in seq {
        if !nullable_so_far {
            break;
        }
        match symbol {
            Symbol::TerminalAlias(_) | Symbol::TerminalLiteral(_) | Symbol::EndOfInput => {
                result.insert(FirstMember::Terminal(symbol.clone()));
                nullable_so_far = false;
            }
            Symbol::NonTerminal(nt) => {
                let nt_first = first.get(nt).cloned().unwrap_or_default();
                nullable_so_far = nt_first.contains(&FirstMember::Epsilon);
                for m in nt_first {
                    if m != FirstMember::Epsilon {
                        result.insert(m);
                    }
                }
            }
        }
    }

    if nullable_so_far {
        result.insert(FirstMember::Epsilon);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{RawGrammar, RawProduction};

    fn arith_grammar() -> Grammar {
        // E -> E plus T | T
        // T -> id
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
    fn first_of_left_recursive_nonterminal_is_first_of_terminal() {
        let g = arith_grammar();
        let first = first_sets(&g);
        let e_first = &first[&Rc::<str>::from("E")];
        assert_eq!(e_first.len(), 1);
        assert!(e_first.contains(&FirstMember::Terminal(Symbol::TerminalLiteral(Rc::from("id")))));
    }

    #[test]
    fn nullable_sequence_contributes_epsilon() {
        let g = Grammar::from_raw(RawGrammar {
            start: "S".into(),
            terminals: vec!["a".into()],
            productions: vec![
                RawProduction { lhs: "S".into(), rhs: vec!["A".into(), "a".into()] },
                RawProduction { lhs: "A".into(), rhs: vec![] },
            ],
        })
        .unwrap();
        let first = first_sets(&g);
        assert!(first[&Rc::<str>::from("A")].contains(&FirstMember::Epsilon));
        assert!(first[&Rc::<str>::from("S")].contains(&FirstMember::Terminal(Symbol::TerminalLiteral(Rc::from("a")))));
    }
}
