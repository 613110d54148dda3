use lexyacc::dfa::Dfa;
use lexyacc::grammar::{Grammar, RawGrammar};
use lexyacc::lexgrammar::{self, RawLexicalGrammar};
use lexyacc::nfa::Nfa;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read `{path}`: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse `{path}` as JSON: {source}")]
    Json { path: String, source: serde_json::Error },
    #[error("invalid lexical grammar in `{path}`: {source}")]
    LexGrammar { path: String, source: lexyacc::lexgrammar::LexGrammarError },
    #[error("invalid syntactic grammar in `{path}`: {source}")]
    Grammar { path: String, source: lexyacc::grammar::GrammarError },
    #[error("failed to build NFA for category in `{path}`: {source}")]
    NfaBuild { path: String, source: lexyacc::nfa::NfaBuildError },
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read { path: path.display().to_string(), source })
}

/// Loads the lexical grammar file and builds one DFA per category, in the
/// priority order the categories were declared in.
pub fn load_lexical(path: &Path) -> Result<Vec<Dfa>, LoadError> {
    let text = read(path)?;
    let raw: RawLexicalGrammar = serde_json::from_str(&text)
        .map_err(|source| LoadError::Json { path: path.display().to_string(), source })?;
    let categories = lexgrammar::load(raw)
        .map_err(|source| LoadError::LexGrammar { path: path.display().to_string(), source })?;
    categories
        .iter()
        .map(|c| {
            Nfa::build(c)
                .map(|nfa| Dfa::from_nfa(&nfa))
                .map_err(|source| LoadError::NfaBuild { path: path.display().to_string(), source })
        })
        .collect()
}

/// Loads and validates the syntactic (context-free) grammar file.
pub fn load_syntactic(path: &Path) -> Result<Grammar, LoadError> {
    let text = read(path)?;
    let raw: RawGrammar = serde_json::from_str(&text)
        .map_err(|source| LoadError::Json { path: path.display().to_string(), source })?;
    Grammar::from_raw(raw).map_err(|source| LoadError::Grammar { path: path.display().to_string(), source })
}
