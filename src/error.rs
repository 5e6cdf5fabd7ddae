//! Error types for the generator and the C# front end.
use std::path::PathBuf;

/// Fatal, corpus-level failures. Anything below this level (a bad file, a bad
/// attribute, an unresolvable type) is recovered and never surfaces here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("client root `{0}` does not exist or is not a directory")]
    MissingClientRoot(PathBuf),

    #[error("there is no `{dir}` folder under `{root}`; make sure you point at the client project root")]
    MissingServicesDir { root: PathBuf, dir: PathBuf },

    #[error("no .cs files found under `{0}`")]
    NoSourceFiles(PathBuf),

    #[error("invalid source file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to write `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Lexing and parsing failures for a single source unit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("line {line}: unterminated {what}")]
    Unterminated { what: &'static str, line: u32 },

    #[error("line {line}: unexpected character `{ch}`")]
    UnexpectedChar { ch: char, line: u32 },

    #[error("line {line}: expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
        line: u32,
    },

    #[error("line {line}: unbalanced `{delim}`")]
    Unbalanced { delim: char, line: u32 },
}

/// A source unit that was skipped during corpus loading.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
