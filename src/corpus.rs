//! Source discovery and parsing.
use std::path::{Path, PathBuf};

use crate::error::{Diagnostic, Error, Result};
use crate::source::{self, CompilationUnit};

/// Directory names holding build output rather than sources.
const SKIPPED_DIRS: &[&str] = &["bin", "obj"];

#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub unit: CompilationUnit,
}

/// Every parsed unit plus the ones that had to be skipped.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub units: Vec<SourceUnit>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Corpus {
    /// Parses every `.cs` file below `dir`, in path order. A file that cannot
    /// be read or parsed becomes a diagnostic; finding no files at all is an
    /// error.
    pub fn load(dir: &Path) -> Result<Corpus> {
        let pattern = format!("{}/**/*.cs", glob::Pattern::escape(&dir.to_string_lossy()));
        let mut corpus = Corpus::default();
        let mut paths = Vec::new();
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) if !is_build_output(&path, dir) => paths.push(path),
                Ok(_) => {}
                Err(error) => corpus.skip(error.path().to_path_buf(), error.error().to_string()),
            }
        }
        if paths.is_empty() {
            return Err(Error::NoSourceFiles(dir.to_path_buf()));
        }
        paths.sort();

        for path in paths {
            tracing::debug!(path = %path.display(), "parsing");
            match std::fs::read_to_string(&path) {
                Ok(text) => corpus.add(path, &text),
                Err(error) => corpus.skip(path, error.to_string()),
            }
        }
        tracing::info!(
            dir = %dir.display(),
            parsed = corpus.units.len(),
            skipped = corpus.diagnostics.len(),
            "loaded sources"
        );
        Ok(corpus)
    }

    /// Builds a corpus from in-memory sources.
    pub fn from_sources<'a, P: Into<PathBuf>>(sources: impl IntoIterator<Item = (P, &'a str)>) -> Corpus {
        let mut corpus = Corpus::default();
        for (path, text) in sources {
            corpus.add(path.into(), text);
        }
        corpus
    }

    pub fn path_of(&self, index: usize) -> Option<&Path> {
        self.units.get(index).map(|u| u.path.as_path())
    }

    fn add(&mut self, path: PathBuf, text: &str) {
        match source::parse_unit(text) {
            Ok(unit) => self.units.push(SourceUnit { path, unit }),
            Err(error) => self.skip(path, error.to_string()),
        }
    }

    fn skip(&mut self, path: PathBuf, message: String) {
        tracing::warn!(path = %path.display(), %message, "skipping source file");
        self.diagnostics.push(Diagnostic { path, message });
    }
}

fn is_build_output(path: &Path, root: &Path) -> bool {
    path.strip_prefix(root)
        .map(|rel| rel.components().any(|c| SKIPPED_DIRS.iter().any(|d| c.as_os_str() == *d)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_units_become_diagnostics() {
        let corpus = Corpus::from_sources([
            ("Services/Good.cs", "class Good { }"),
            ("Services/Bad.cs", "class Bad { string s = \"unterminated; }"),
        ]);
        assert_eq!(corpus.units.len(), 1);
        assert_eq!(corpus.diagnostics.len(), 1);
        assert_eq!(corpus.diagnostics[0].path, PathBuf::from("Services/Bad.cs"));
        assert!(corpus.diagnostics[0].message.contains("unterminated"));
    }

    #[test]
    fn build_output_is_recognised() {
        let root = Path::new("/src/Services");
        assert!(is_build_output(Path::new("/src/Services/obj/Debug/Gen.cs"), root));
        assert!(is_build_output(Path::new("/src/Services/Orders/bin/X.cs"), root));
        assert!(!is_build_output(Path::new("/src/Services/Orders/IOrders.cs"), root));
        assert!(!is_build_output(Path::new("/bin/Services/IOrders.cs"), Path::new("/bin/Services")));
    }
}
