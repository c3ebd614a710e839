//! Go source front end for declaration-level tooling.
//!
//! - The lexer uses Logos and implements Go semicolon insertion.
//! - The parser is a hand-written recursive-descent parser over the top-level
//!   grammar; it builds an arena-allocated syntax tree (see [`ast`]).
//!
//! Function bodies and initializer expressions are only checked for balanced
//! delimiters, so a file that parses here may still fail to type-check.

pub mod ast;
pub mod error;
pub mod lexer;
mod parser;
mod parser_support;

pub use ast::SourceFile;
pub use error::{Diag, DiagKind, ParseFailure, Span};
pub use lexer::Lexer;

/// Parse one Go source file.
///
/// Lexical errors take precedence: if the lexer reported anything, those
/// diagnostics are returned without running the parser.
pub fn parse_source(src: &str) -> Result<SourceFile, ParseFailure> {
    let mut lexer = Lexer::new(src);
    let toks: Vec<_> = lexer.by_ref().collect();
    let diags = lexer.take_diags();
    if !diags.is_empty() {
        return Err(ParseFailure { diags });
    }

    parser::Parser::new(toks, src.len())
        .parse_file()
        .map_err(|err| ParseFailure {
            diags: vec![err.diag()],
        })
}
