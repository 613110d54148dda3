//! Expansion of the alphabet labels used on the right-hand side of lexical
//! productions. A label is either a literal single character, spelled as it
//! appears in the grammar file, or one of the four named aliases below.

use thiserror::Error;

/// One alphabet label as it appears on a lexical production's right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeLabel {
    /// A literal single character.
    Literal(char),
    /// A named character class.
    Alias(Alias),
    /// The empty symbol; the owning production marks its left-hand side as
    /// directly reachable via an epsilon move, rather than consuming input.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alias {
    Digit,
    Letter,
    Dot1,
    Dot2,
}

impl Alias {
    /// The concrete characters this alias stands for.
    pub fn expand(self) -> Vec<char> {
        match self {
            Alias::Digit => ('0'..='9').collect(),
            Alias::Letter => ('a'..='z').chain('A'..='Z').collect(),
            // Every ASCII byte 0..=127 except the three that would end or
            // escape a quoted string: CR, LF and the closing quote itself.
            Alias::Dot1 => (0u8..=127).filter(|b| !matches!(b, b'\r' | b'\n' | b'"')).map(|b| b as char).collect(),
            // Same, but for a quoted character literal: excludes the
            // closing `'` instead of `"`.
            Alias::Dot2 => (0u8..=127).filter(|b| !matches!(b, b'\r' | b'\n' | b'\'')).map(|b| b as char).collect(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CharClassError {
    #[error("unknown edge label `{0}` (expected a single character, or one of digit/letter/dot1/dot2/empty)")]
    UnknownLabel(String),
}

/// Parses one raw edge-label string from a grammar file into an [`EdgeLabel`].
pub fn parse_label(raw: &str) -> Result<EdgeLabel, CharClassError> {
    match raw {
        "empty" => Ok(EdgeLabel::Empty),
        "digit" => Ok(EdgeLabel::Alias(Alias::Digit)),
        "letter" => Ok(EdgeLabel::Alias(Alias::Letter)),
        "dot1" => Ok(EdgeLabel::Alias(Alias::Dot1)),
        "dot2" => Ok(EdgeLabel::Alias(Alias::Dot2)),
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(EdgeLabel::Literal(c)),
                _ => Err(CharClassError::UnknownLabel(s.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_single_char() {
        assert_eq!(parse_label("a"), Ok(EdgeLabel::Literal('a')));
        assert_eq!(parse_label("+"), Ok(EdgeLabel::Literal('+')));
    }

    #[test]
    fn aliases() {
        assert_eq!(parse_label("digit"), Ok(EdgeLabel::Alias(Alias::Digit)));
        assert_eq!(parse_label("letter"), Ok(EdgeLabel::Alias(Alias::Letter)));
        assert_eq!(parse_label("empty"), Ok(EdgeLabel::Empty));
    }

    #[test]
    fn digit_expands_to_ten_chars() {
        assert_eq!(Alias::Digit.expand().len(), 10);
    }

    #[test]
    fn letter_expands_to_fifty_two_chars() {
        assert_eq!(Alias::Letter.expand().len(), 52);
    }

    #[test]
    fn dot1_and_dot2_expand_to_125_chars_each() {
        assert_eq!(Alias::Dot1.expand().len(), 125);
        assert_eq!(Alias::Dot2.expand().len(), 125);
    }

    #[test]
    fn dot1_excludes_double_quote_but_allows_single_quote() {
        let set = Alias::Dot1.expand();
        assert!(!set.contains(&'"'));
        assert!(!set.contains(&'\r'));
        assert!(!set.contains(&'\n'));
        assert!(set.contains(&'\''));
    }

    #[test]
    fn dot2_excludes_single_quote_but_allows_double_quote() {
        let set = Alias::Dot2.expand();
        assert!(!set.contains(&'\''));
        assert!(!set.contains(&'\r'));
        assert!(!set.contains(&'\n'));
        assert!(set.contains(&'"'));
    }

    #[test]
    fn rejects_multi_char_non_alias() {
        assert!(parse_label("nope").is_err());
    }
}
