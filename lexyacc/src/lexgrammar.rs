//! The right-linear (type-3) lexical grammar model: one [`Category`] per
//! token class, each built from [`LexProduction`]s of the shape
//! `lhs -> label [next]`.
//!
//! On disk (§6) a lexical grammar is a five-element ordered sequence, one
//! element per fixed category `{keyword, identifier, constant, operator,
//! delimiter}`. Each category carries a `description` and a `contents` list
//! of *groups* — e.g. one group per keyword, one group per operator — and
//! every group has its own `description` plus a list of production strings
//! `"LHS->RHS"`. Node names are scoped per group so two groups in the same
//! category can reuse a helper name like `S0` without colliding; every
//! group's own start symbol is aliased into one shared start node for the
//! whole category.

use crate::charclass::{parse_label, CharClassError, EdgeLabel};
use serde::Deserialize;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

/// Fixed category order a lexical grammar file's five elements are read in.
pub const CATEGORY_NAMES: [&str; 5] = ["keyword", "identifier", "constant", "operator", "delimiter"];

/// The on-disk shape is a plain five-element JSON array, not a wrapper
/// object — category identity comes from position, via [`CATEGORY_NAMES`].
pub type RawLexicalGrammar = Vec<RawCategory>;

#[derive(Debug, Deserialize)]
pub struct RawCategory {
    pub description: String,
    pub contents: Vec<RawGroup>,
}

#[derive(Debug, Deserialize)]
pub struct RawGroup {
    pub description: String,
    pub production: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexGrammarError {
    #[error(transparent)]
    CharClass(#[from] CharClassError),
    #[error("malformed production string `{0}`; expected `LHS->RHS`")]
    MalformedProduction(String),
    #[error("lexical grammar must declare exactly {} categories ({:?}), found {0}", CATEGORY_NAMES.len(), CATEGORY_NAMES)]
    WrongCategoryCount(usize),
    #[error("category `{name}` declares no productions")]
    EmptyCategory { name: String },
}

/// One right-linear production: `lhs -(label)-> next`, or `lhs -(empty)->
/// next` (an epsilon move, whether from an empty right-hand side onto the
/// accepting state, or from a bare nonterminal reference onto the node it
/// names).
#[derive(Debug, Clone)]
pub struct LexProduction {
    pub lhs: Rc<str>,
    pub label: EdgeLabel,
    pub next: Option<Rc<str>>,
}

/// A single token category: a named right-linear grammar with a designated
/// start symbol, built by fusing every group's productions at one shared
/// start node.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: Rc<str>,
    pub start: Rc<str>,
    pub productions: Vec<LexProduction>,
    /// Free-text description to attach to NFA nodes, keyed by node name
    /// (§3: "Each node carries `(index, description, state-name)`").
    pub node_descriptions: HashMap<Rc<str>, Rc<str>>,
}

const START_NAME: &str = "<start>";

/// Splits a production string `"LHS->RHS"` into its two raw halves.
fn split_production(raw: &str) -> Result<(&str, &str), LexGrammarError> {
    raw.split_once("->")
        .ok_or_else(|| LexGrammarError::MalformedProduction(raw.to_string()))
}

/// Parses a production's right-hand side into an optional label fragment
/// and an optional bare next-node name, per §4.1: `""` is epsilon-to-end,
/// `<label>` is a literal/alias edge to end, `<label>Next` is an edge to a
/// named node, and a bare (bracket-less) name is an epsilon edge to that
/// node (a reference to another group's production chain).
fn parse_rhs(rhs: &str) -> Result<(Option<&str>, Option<&str>), LexGrammarError> {
    if rhs.is_empty() {
        return Ok((None, None));
    }
    if let Some(after_open) = rhs.strip_prefix('<') {
        let close = after_open
            .find('>')
            .ok_or_else(|| LexGrammarError::MalformedProduction(format!("<{after_open}")))?;
        let label = &after_open[..close];
        let remainder = &after_open[close + 1..];
        let next = if remainder.is_empty() { None } else { Some(remainder) };
        Ok((Some(label), next))
    } else {
        Ok((None, Some(rhs)))
    }
}

impl Category {
    fn from_raw(name: &str, raw: RawCategory) -> Result<Category, LexGrammarError> {
        if raw.contents.iter().all(|g| g.production.is_empty()) {
            return Err(LexGrammarError::EmptyCategory { name: name.to_string() });
        }

        let mut productions = Vec::new();
        let mut node_descriptions: HashMap<Rc<str>, Rc<str>> = HashMap::new();
        node_descriptions.insert(Rc::from(START_NAME), Rc::from(raw.description.as_str()));

        for (group_idx, group) in raw.contents.iter().enumerate() {
            let Some(first) = group.production.first() else { continue };
            let (group_start_raw, _) = split_production(first)?;
            let group_start_raw = group_start_raw.to_string();
            let group_desc: Rc<str> = Rc::from(group.description.as_str());

            let scoped_name = |raw_name: &str| -> Rc<str> {
                if raw_name == group_start_raw {
                    Rc::from(START_NAME)
                } else {
                    Rc::from(format!("g{group_idx}:{raw_name}"))
                }
            };

            for raw_production in &group.production {
                let (lhs_raw, rhs_raw) = split_production(raw_production)?;
                let (label_raw, next_raw) = parse_rhs(rhs_raw)?;

                let lhs = scoped_name(lhs_raw);
                node_descriptions.entry(lhs.clone()).or_insert_with(|| group_desc.clone());

                let next = next_raw.map(|n| {
                    let scoped = scoped_name(n);
                    node_descriptions.entry(scoped.clone()).or_insert_with(|| group_desc.clone());
                    scoped
                });

                let label = match label_raw {
                    Some(s) => parse_label(s)?,
                    None => EdgeLabel::Empty,
                };

                productions.push(LexProduction { lhs, label, next });
            }
        }

        Ok(Category {
            name: Rc::from(name),
            start: Rc::from(START_NAME),
            productions,
            node_descriptions,
        })
    }

    /// Every distinct state name (nonterminal) reachable in this category's
    /// productions, in first-seen order with the start symbol first.
    pub fn state_names(&self) -> Vec<Rc<str>> {
        let mut seen = std::collections::HashSet::new();
        let mut names = Vec::new();
        seen.insert(self.start.clone());
        names.push(self.start.clone());
        for p in &self.productions {
            if seen.insert(p.lhs.clone()) {
                names.push(p.lhs.clone());
            }
            if let Some(n) = &p.next {
                if seen.insert(n.clone()) {
                    names.push(n.clone());
                }
            }
        }
        names
    }
}

pub fn load(raw: RawLexicalGrammar) -> Result<Vec<Category>, LexGrammarError> {
    if raw.len() != CATEGORY_NAMES.len() {
        return Err(LexGrammarError::WrongCategoryCount(raw.len()));
    }
    raw.into_iter()
        .zip(CATEGORY_NAMES)
        .map(|(rc, name)| Category::from_raw(name, rc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(productions: Vec<&str>) -> RawCategory {
        RawCategory {
            description: "a category".into(),
            contents: vec![RawGroup { description: "a group".into(), production: productions.iter().map(|s| s.to_string()).collect() }],
        }
    }

    fn sample() -> RawLexicalGrammar {
        vec![
            category(vec!["S-><letter>S", "S-><letter>"]),
            category(vec!["S-><letter>S", "S-><letter>"]),
            category(vec!["S-><digit>S", "S-><digit>"]),
            category(vec!["S-><+>"]),
            category(vec!["S-><;>"]),
        ]
    }

    #[test]
    fn loads_valid_grammar() {
        let cats = load(sample()).unwrap();
        assert_eq!(cats.len(), 5);
        assert_eq!(cats[0].name.as_ref(), "keyword");
        assert_eq!(cats[1].name.as_ref(), "identifier");
        assert_eq!(cats[0].start.as_ref(), START_NAME);
        assert_eq!(cats[0].state_names(), vec![Rc::<str>::from(START_NAME)]);
    }

    #[test]
    fn rejects_wrong_category_count() {
        let mut raw = sample();
        raw.pop();
        assert_eq!(load(raw), Err(LexGrammarError::WrongCategoryCount(4)));
    }

    #[test]
    fn rejects_empty_category() {
        let mut raw = sample();
        raw[0] = RawCategory { description: "empty".into(), contents: vec![] };
        assert_eq!(load(raw), Err(LexGrammarError::EmptyCategory { name: "keyword".to_string() }));
    }

    #[test]
    fn two_groups_in_one_category_reuse_a_helper_name_without_collision() {
        // "do" and "while" both use a helper node named "S0"; the groups
        // must not be fused into the same node just because they share a
        // raw name.
        let keyword = RawCategory {
            description: "keywords".into(),
            contents: vec![
                RawGroup { description: "do".into(), production: vec!["do-><d>S0".into(), "S0-><o>".into()] },
                RawGroup {
                    description: "while".into(),
                    production: vec![
                        "while-><w>S0".into(),
                        "S0-><h>S1".into(),
                        "S1-><i>S2".into(),
                        "S2-><l>S3".into(),
                        "S3-><e>".into(),
                    ],
                },
            ],
        };
        let cats = load(vec![
            keyword,
            category(vec!["S-><letter>"]),
            category(vec!["S-><digit>"]),
            category(vec!["S-><+>"]),
            category(vec!["S-><;>"]),
        ])
        .unwrap();

        let do_edge = cats[0].productions.iter().find(|p| p.lhs.as_ref() == "<start>" && matches!(p.label, EdgeLabel::Literal('d'))).unwrap();
        let while_edge = cats[0].productions.iter().find(|p| p.lhs.as_ref() == "<start>" && matches!(p.label, EdgeLabel::Literal('w'))).unwrap();
        // each group's own "S0" was scoped separately, so the two edges
        // target distinct nodes even though both raw names were "S0".
        assert_ne!(do_edge.next, while_edge.next);
    }

    #[test]
    fn bare_nonterminal_reference_is_an_epsilon_edge_to_a_named_node() {
        let cats = load(vec![
            category(vec!["S-><letter>T", "T-><letter>", "U->T"]),
            category(vec!["S-><letter>"]),
            category(vec!["S-><digit>"]),
            category(vec!["S-><+>"]),
            category(vec!["S-><;>"]),
        ])
        .unwrap();
        let bare = cats[0].productions.iter().find(|p| p.lhs.as_ref() == "g0:U").unwrap();
        assert!(matches!(bare.label, EdgeLabel::Empty));
        assert_eq!(bare.next.as_deref(), Some("g0:T"));
    }

    #[test]
    fn rejects_malformed_production_without_arrow() {
        let raw = vec![
            category(vec!["S letter S"]),
            category(vec!["S-><letter>"]),
            category(vec!["S-><digit>"]),
            category(vec!["S-><+>"]),
            category(vec!["S-><;>"]),
        ];
        assert!(matches!(load(raw), Err(LexGrammarError::MalformedProduction(_))));
    }
}
