use std::{io, path::PathBuf};

use thiserror::Error;

use crate::document::Document;

pub type Result<T> = std::result::Result<T, IniError>;

/// Everything that can go wrong while loading, querying, editing or saving a [`Document`].
#[derive(Error, Debug)]
pub enum IniError {
    #[error("cannot load INI file {}: {source}", path.display())]
    Load { path: PathBuf, source: io::Error },

    #[error("cannot save INI file {}: {source}", path.display())]
    Save { path: PathBuf, source: io::Error },

    #[error("failed to read INI data: {0}")]
    Read(#[source] io::Error),

    #[error("failed to write INI data: {0}")]
    Write(#[source] io::Error),

    #[error("cannot parse INI data: {0}")]
    Parse(#[from] ParseError),

    #[error("section [{0}] does not exist")]
    SectionNotFound(String),

    #[error("parameter [{parameter}] does not exist in section [{section}]")]
    ParameterNotFound { section: String, parameter: String },

    #[error("cannot write parameter [{parameter}]: section [{section}] does not exist")]
    WriteWithoutSection { section: String, parameter: String },
}

/// What is wrong with a single line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFault {
    #[error("invalid parameter")]
    InvalidParameter,
    #[error("invalid section, missing closing bracket")]
    UnterminatedSection,
    #[error("empty section name")]
    EmptySectionName,
    #[error("parameter has no '=' delimiter")]
    MissingDelimiter,
    #[error("parameter has more than one '=' delimiter")]
    ExtraDelimiter,
    #[error("parameter outside any section")]
    ParameterOutsideSection,
    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}

/// A malformed line found while building a [`Document`].
///
/// The document accumulated before the offending line is kept in
/// [`ParseError::partial`]; it is informational only and the error itself is authoritative.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{fault} at line {line}: {text:?}")]
pub struct ParseError {
    pub line: usize,
    pub text: String,
    pub fault: LineFault,
    partial: Document,
}

impl ParseError {
    pub(crate) fn new(line: usize, text: &str, fault: LineFault, partial: Document) -> Self {
        ParseError {
            line,
            text: text.to_string(),
            fault,
            partial,
        }
    }

    pub fn partial(&self) -> &Document {
        &self.partial
    }

    pub fn into_partial(self) -> Document {
        self.partial
    }
}
