//! Error types for chatgram.
//!
//! Two enums live here:
//!
//! - [`ImportError`] classifies everything that can abort an import. Each
//!   variant is terminal for the import attempt; no partial result survives.
//! - [`ChatgramError`] is the crate-wide error returned by output writers,
//!   filters and the CLI. Import failures convert into it via `?`.
//!
//! Records that are expected noise in real exports (service events, media-only
//! posts, deleted-account senders) are *not* errors; see
//! [`parsing::telegram::MessageOutcome`](crate::parsing::telegram::MessageOutcome).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatgram operations.
///
/// # Example
///
/// ```rust
/// use chatgram::error::Result;
/// use chatgram::Chat;
///
/// fn load() -> Result<Vec<Chat>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatgramError>;

/// Why an import failed.
///
/// Every message is prefixed with `Could not import data: ` so it can be
/// shown to a user as-is.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The source file could not be opened (missing, unreadable, a directory).
    #[error("Could not import data: source file {} does not exist, is not readable or is no file", path.display())]
    FileUnreadable {
        /// The path that was requested
        path: PathBuf,
        /// The error returned when opening it
        #[source]
        source: io::Error,
    },

    /// The input is not a well-formed JSON document, or reading it failed.
    #[error("Could not import data: malformed input: {0}")]
    MalformedInput(#[source] InputFault),

    /// A required key is absent.
    #[error("Could not import data: required json field '{field}' not set")]
    MissingField {
        /// Dotted path of the missing key, e.g. `chats.list[0].name`
        field: String,
    },

    /// A `date` literal could not be parsed as a local date-time.
    #[error("Could not import data: could not parse date '{input}' at '{field}': {source}")]
    InvalidDate {
        /// Dotted path of the offending field
        field: String,
        /// The literal as found in the export
        input: String,
        /// The parser's complaint
        #[source]
        source: DateFault,
    },

    /// A key is present but holds the wrong kind of JSON value.
    #[error("Could not import data: wrong json field type at '{field}': expected {expected}, found {found}")]
    UnexpectedSchema {
        /// Dotted path of the offending field
        field: String,
        /// What the schema requires there
        expected: &'static str,
        /// The JSON type that was actually present
        found: &'static str,
    },
}

/// Low-level cause of [`ImportError::MalformedInput`].
#[derive(Debug, Error)]
pub enum InputFault {
    /// Invalid JSON syntax or premature end of input.
    #[error("{0}")]
    Json(#[source] serde_json::Error),
    /// The stream failed while being read.
    #[error("IO error while reading input: {0}")]
    Io(#[source] io::Error),
}

/// Why a `date` literal was rejected.
#[derive(Debug, Error)]
pub enum DateFault {
    /// The literal does not match `YYYY-MM-DDTHH:MM[:SS[.fff]]`.
    #[error("{0}")]
    Syntax(#[from] chrono::ParseError),
    /// Second 60 parses, but local date-times have no leap seconds.
    #[error("leap seconds are not supported")]
    LeapSecond,
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            ImportError::MalformedInput(InputFault::Io(io::Error::from(err)))
        } else {
            ImportError::MalformedInput(InputFault::Json(err))
        }
    }
}

impl ImportError {
    /// Creates a missing-field error.
    pub fn missing(field: impl Into<String>) -> Self {
        ImportError::MissingField {
            field: field.into(),
        }
    }

    /// Creates a wrong-type error.
    pub fn unexpected(field: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        ImportError::UnexpectedSchema {
            field: field.into(),
            expected,
            found,
        }
    }

    /// Returns `true` if the source could not be opened.
    pub fn is_file_unreadable(&self) -> bool {
        matches!(self, ImportError::FileUnreadable { .. })
    }

    /// Returns `true` if the input was not valid JSON or could not be read.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, ImportError::MalformedInput(_))
    }

    /// Returns `true` if a required field was absent.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, ImportError::MissingField { .. })
    }

    /// Returns `true` if a date literal was unparseable.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ImportError::InvalidDate { .. })
    }

    /// Returns `true` if a field had the wrong JSON type.
    pub fn is_unexpected_schema(&self) -> bool {
        matches!(self, ImportError::UnexpectedSchema { .. })
    }

    /// Returns the dotted field path this error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ImportError::MissingField { field }
            | ImportError::InvalidDate { field, .. }
            | ImportError::UnexpectedSchema { field, .. } => Some(field),
            ImportError::FileUnreadable { .. } | ImportError::MalformedInput(_) => None,
        }
    }
}

/// The error type for all chatgram operations outside the importer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatgramError {
    /// Importing an export failed.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// An I/O error occurred, typically while writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid date in a range filter.
    ///
    /// Range filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A value does not match the expected format.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What was being interpreted (e.g. "output", "time unit")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatgramError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatgramError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatgramError {
    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatgramError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatgramError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an import error.
    pub fn is_import(&self) -> bool {
        matches!(self, ChatgramError::Import(_))
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatgramError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatgramError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatgramError::InvalidDate { .. })
    }

    /// Returns the underlying import error, if this is one.
    pub fn as_import(&self) -> Option<&ImportError> {
        match self {
            ChatgramError::Import(err) => Some(err),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
