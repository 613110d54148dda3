//! The scanner driver (§4.3): runs every category DFA over the input in
//! lock-step, picks the longest accepting match across all of them, and
//! breaks ties by category priority (the order categories are declared in
//! the lexical grammar file). This is what gives keyword categories
//! precedence over an identifier category that would otherwise swallow the
//! same characters — list keywords first.
//!
//! Whitespace between tokens is skipped in a loop until a non-whitespace
//! character (or end of input) is reached, not one cluster per driver
//! iteration.

use crate::dfa::eval::DfaEvaluator;
use crate::dfa::Dfa;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub category: Rc<str>,
    pub lexeme: String,
    pub line: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("line {line}: no token category matches starting at `{ch}`")]
    Stuck { line: usize, ch: char },
    #[error("line {line}: category `{category}` accepts the empty string at `{ch}`, which would never consume input")]
    EmptyMatch { line: usize, category: String, ch: char },
    #[error("line {line}: `{lexeme}` (category `{category}`) must be followed by whitespace, end of input, or a delimiter")]
    BoundaryViolation { line: usize, category: String, lexeme: String },
}

pub struct Scanner {
    categories: Vec<Dfa>,
}

impl Scanner {
    /// `categories` must be given in priority order: on a tie in match
    /// length, the earlier category wins.
    pub fn new(categories: Vec<Dfa>) -> Self {
        Self { categories }
    }

    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        let chars: Vec<char> = input.chars().collect();
        let mut pos = 0;
        let mut line = 1;
        let mut tokens = Vec::new();

        while pos < chars.len() {
            while pos < chars.len() && chars[pos].is_whitespace() {
                if chars[pos] == '\n' {
                    line += 1;
                }
                pos += 1;
            }
            if pos >= chars.len() {
                break;
            }

            let (len, category_idx) = self.longest_match(&chars[pos..])?
                .ok_or(LexError::Stuck { line, ch: chars[pos] })?;

            if len == 0 {
                return Err(LexError::EmptyMatch {
                    line,
                    category: self.categories[category_idx].category.to_string(),
                    ch: chars[pos],
                });
            }

            let lexeme: String = chars[pos..pos + len].iter().collect();
            let category = self.categories[category_idx].category.clone();

            // §4.3 keyword/constant boundary rule: a keyword or constant
            // match is only valid if what follows is whitespace, end of
            // input, or the start of a delimiter match. Without this, a
            // longest-match scan over "123abc" would happily split it into
            // a constant "123" followed by an identifier "abc".
            if matches!(category.as_ref(), "keyword" | "constant") && !self.boundary_ok(&chars[pos + len..]) {
                return Err(LexError::BoundaryViolation { line, category: category.to_string(), lexeme });
            }

            tokens.push(Token { category, lexeme, line });
            pos += len;
        }

        Ok(tokens)
    }

    /// True if `rest` starts at whitespace, end of input, or a string the
    /// `delimiter` category would accept.
    fn boundary_ok(&self, rest: &[char]) -> bool {
        match rest.first() {
            None => true,
            Some(c) if c.is_whitespace() => true,
            Some(_) => self.delimiter_match_len(rest) > 0,
        }
    }

    /// Length of the shortest prefix of `rest` accepted by the `delimiter`
    /// category, or 0 if there is no such category or it never accepts.
    fn delimiter_match_len(&self, rest: &[char]) -> usize {
        let Some(idx) = self.categories.iter().position(|d| d.category.as_ref() == "delimiter") else {
            return 0;
        };
        let mut ev = DfaEvaluator::from(&self.categories[idx]);
        let mut len = 0;
        for &c in rest {
            if ev.step(c).is_none() {
                break;
            }
            len += 1;
            if ev.is_accepting() {
                return len;
            }
        }
        0
    }

    /// Runs every category DFA over `remaining` in lock-step, returning the
    /// length and category index of the longest accepting match found, or
    /// `None` if no category ever accepted.
    fn longest_match(&self, remaining: &[char]) -> Result<Option<(usize, usize)>, LexError> {
        let mut evaluators: Vec<DfaEvaluator> = self.categories.iter().map(DfaEvaluator::from).collect();
        let mut alive = vec![true; evaluators.len()];
        let mut best: Option<(usize, usize)> = None;

        let record = |best: &mut Option<(usize, usize)>, len: usize, category_idx: usize| {
            let better = match best {
                None => true,
                Some((bl, bc)) => len > *bl || (len == *bl && category_idx < *bc),
            };
            if better {
                *best = Some((len, category_idx));
            }
        };

        for (ci, ev) in evaluators.iter().enumerate() {
            if ev.is_accepting() {
                record(&mut best, 0, ci);
            }
        }

        let mut len = 0;
        for &c in remaining {
            if !alive.iter().any(|&a| a) {
                break;
            }
            len += 1;
            for (ci, ev) in evaluators.iter_mut().enumerate() {
                if !alive[ci] {
                    continue;
                }
                if ev.step(c).is_none() {
                    alive[ci] = false;
                    continue;
                }
                if ev.is_accepting() {
                    record(&mut best, len, ci);
                }
            }
        }

        Ok(best)
    }
}
