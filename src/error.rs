use std::io;
use std::path::PathBuf;

use goinspect_parser::ParseFailure;
use thiserror::Error;

use crate::printer::UnsupportedTypeExpression;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `position` is the 1-based `line:col` of the first diagnostic.
    #[error("{}:{position}: {failure}", .path.display())]
    Parse {
        path: PathBuf,
        position: String,
        #[source]
        failure: ParseFailure,
    },

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error(transparent)]
    UnsupportedTypeExpression(#[from] UnsupportedTypeExpression),

    #[error("writing output: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    pub(crate) fn parse(path: PathBuf, src: &str, failure: ParseFailure) -> Self {
        let (line, col) = failure
            .first()
            .map_or((1, 1), |diag| diag.span.line_col(src));
        Error::Parse {
            path,
            position: format!("{line}:{col}"),
            failure,
        }
    }
}
