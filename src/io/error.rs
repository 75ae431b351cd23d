//! # Error reporting for reading of problem and solution files
//!
//! A collection of enums and structures describing any problems encountered during reading and
//! parsing.
use std::fmt;
use std::io;

use crate::data::number_types::rational::ParseRationalError;

/// An `Import` error is created when an error was encountered during IO or parsing.
///
/// It is the highest error in the io error hierarchy.
#[derive(thiserror::Error, Debug)]
pub enum Import {
    /// The file extension of the provided file path is not known or supported.
    ///
    /// The contained `String` is a message for the end user.
    #[error("{0}")]
    FileExtension(String),
    /// The file to read isn't found, or the reading of file couldn't start or was interrupted.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// Contents of the file could not be parsed.
    ///
    /// # Note
    ///
    /// If the problem is inconsistent, that will not be represented with this error. This variant
    /// should only be created for syntactically incorrect files.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// There is a logical inconsistency in the problem described by a file.
    ///
    /// For example, a bound might be given for a variable which is not known.
    #[error(transparent)]
    Inconsistency(#[from] InconsistencyError),
}

/// A `ParseError` represents all errors encountered during parsing.
///
/// It may recursively hold more `ParseError`s to provide more detail. At the end of this chain,
/// there may be a file location containing a line number and line, at which the error was caused.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseError {
    description: String,
    source: Option<Source>,
}

/// Shorthand for results of parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// A `Source` can be used with a `ParseError` to describe its cause.
///
/// It can be either a file line number and line contents, or another `ParseError` with its own
/// description and optionally, a cause.
#[derive(Debug, Eq, PartialEq)]
enum Source {
    FileLocation(u64, String),
    Nested(Box<ParseError>),
}

/// A `FileLocation` references a line in the file by the line number of the file as originally
/// read from the disk. It contains a reference to the line itself.
pub type FileLocation<'a> = (u64, &'a str);

impl ParseError {
    /// Create a new `ParseError` with only a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), source: None }
    }

    /// Create a new `ParseError` instance with a `FileLocation` as a cause.
    ///
    /// # Arguments
    ///
    /// * `description`: What's wrong at the moment of creation.
    /// * `file_location`: A reference to a line number and line that caused the error.
    pub fn with_location(description: impl Into<String>, file_location: FileLocation) -> Self {
        let (line_number, line) = file_location;
        Self {
            description: description.into(),
            source: Some(Source::FileLocation(line_number, line.to_string())),
        }
    }

    /// Wrap a new `ParseError` around this one.
    #[must_use]
    pub fn wrap(self, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            source: Some(Source::Nested(Box::new(self))),
        }
    }

    /// Attach the line that caused this error at the end of the chain, unless there is one already.
    #[must_use]
    pub fn located(self, file_location: FileLocation) -> Self {
        match self.source {
            None => Self::with_location(self.description, file_location),
            Some(Source::FileLocation(..)) => self,
            Some(Source::Nested(error)) => Self {
                description: self.description,
                source: Some(Source::Nested(Box::new(error.located(file_location)))),
            },
        }
    }

    /// Wrap a `ParseError` around another error, only keeping its text.
    pub fn wrap_other(source: impl std::error::Error, description: impl Into<String>) -> Self {
        Self::new(source.to_string()).wrap(description)
    }

    /// The description of this error only, without its causes.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Line number at the end of the chain, if any.
    #[must_use]
    pub fn line_number(&self) -> Option<u64> {
        match &self.source {
            None => None,
            Some(Source::FileLocation(number, _)) => Some(*number),
            Some(Source::Nested(error)) => error.line_number(),
        }
    }

    /// Get all errors in the chain, leading up to this one.
    fn chain_description(&self) -> Vec<String> {
        let mut descriptions = vec![self.description.clone()];

        match &self.source {
            None => {},
            Some(Source::FileLocation(line_number, line)) => {
                descriptions.push(format!("\tCaused at line\t{}:\t{}", line_number, line));
            },
            Some(Source::Nested(error)) => {
                descriptions.append(&mut error.chain_description());
            },
        }

        descriptions
    }
}

impl From<ParseRationalError> for ParseError {
    fn from(error: ParseRationalError) -> Self {
        Self::new(error.to_string())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseError: {}", self.chain_description().join("\n"))
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.source {
            Some(Source::Nested(error)) => Some(error.as_ref()),
            _ => None,
        }
    }
}

/// An `InconsistencyError` is returned when the problem is inconsistently represented in the file.
///
/// This error is not about the solution being checked. It is meant only for descriptions of
/// problems, and should not be used after the importing process.
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
#[error("InconsistencyError: {description}")]
pub struct InconsistencyError {
    description: String,
}

impl InconsistencyError {
    /// Wrap a text in an `InconsistencyError`.
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into() }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}
