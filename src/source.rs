//! C# front end: just enough of the language to see declarations.
pub mod lexer;
pub mod parser;
pub mod syntax;

pub use syntax::CompilationUnit;

use crate::error::SyntaxError;

/// Tokenizes and parses one source unit.
pub fn parse_unit(src: &str) -> Result<CompilationUnit, SyntaxError> {
    let tokens = lexer::tokenize(src)?;
    parser::parse(tokens)
}
