//! Error types for querydsl.
//!
//! Every failure produced while decoding a query request, a mapping, or the
//! analysis settings is a [`QueryDslError`]. DSL errors carry an
//! [`ErrorKind`] (the Elasticsearch-style error category), a human readable
//! reason and an optional cause, so a failure deep inside a nested `bool`
//! query keeps the whole path of annotations.
//!
//! # Examples
//!
//! ```
//! use querydsl::error::{ErrorKind, QueryDslError, Result};
//!
//! fn decode() -> Result<()> {
//!     Err(QueryDslError::parsing("[term] unknown field [foo]"))
//! }
//!
//! let err = QueryDslError::x_content_parse("[term] failed to parse field")
//!     .caused_by(decode().unwrap_err());
//!
//! assert_eq!(err.kind(), ErrorKind::XContentParseException);
//! assert_eq!(err.cause().unwrap().kind(), ErrorKind::ParsingException);
//! ```

use std::fmt;
use std::io;

use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Category of a DSL error, rendered as the `type` of an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed structural shape: wrong key cardinality, missing required key.
    ParsingException,
    /// A value is present but has the wrong shape or type, or names an unknown kind.
    XContentParseException,
    /// A well-typed value outside of the allowed domain.
    IllegalArgumentException,
    /// A recognized feature that is intentionally unsupported.
    NotImplemented,
    /// Catch-all for failures raised by the analysis components.
    RuntimeException,
}

impl ErrorKind {
    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ParsingException => "parsing_exception",
            ErrorKind::XContentParseException => "x_content_parse_exception",
            ErrorKind::IllegalArgumentException => "illegal_argument_exception",
            ErrorKind::NotImplemented => "not_implemented",
            ErrorKind::RuntimeException => "runtime_exception",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The main error type for querydsl operations.
#[derive(Error, Debug)]
pub enum QueryDslError {
    /// A categorized DSL error with an optional chained cause.
    #[error("{kind}: {reason}")]
    Dsl {
        kind: ErrorKind,
        reason: String,
        #[source]
        cause: Option<Box<QueryDslError>>,
    },

    /// I/O errors (loading settings or request files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with QueryDslError.
pub type Result<T> = std::result::Result<T, QueryDslError>;

impl QueryDslError {
    /// Create a new error of the given kind.
    pub fn new<S: Into<String>>(kind: ErrorKind, reason: S) -> Self {
        QueryDslError::Dsl {
            kind,
            reason: reason.into(),
            cause: None,
        }
    }

    /// Create a new parsing exception.
    pub fn parsing<S: Into<String>>(reason: S) -> Self {
        Self::new(ErrorKind::ParsingException, reason)
    }

    /// Create a new x-content parse exception.
    pub fn x_content_parse<S: Into<String>>(reason: S) -> Self {
        Self::new(ErrorKind::XContentParseException, reason)
    }

    /// Create a new illegal argument exception.
    pub fn illegal_argument<S: Into<String>>(reason: S) -> Self {
        Self::new(ErrorKind::IllegalArgumentException, reason)
    }

    /// Create a new not implemented error.
    pub fn not_implemented<S: Into<String>>(reason: S) -> Self {
        Self::new(ErrorKind::NotImplemented, reason)
    }

    /// Create a new runtime exception.
    pub fn runtime<S: Into<String>>(reason: S) -> Self {
        Self::new(ErrorKind::RuntimeException, reason)
    }

    /// Attach `cause` to this error, keeping this error's kind and reason.
    ///
    /// I/O and JSON errors cannot carry a cause, so they are first converted
    /// into a DSL error with the same reason.
    pub fn caused_by(self, cause: QueryDslError) -> Self {
        let kind = self.kind();
        let reason = self.reason();
        QueryDslError::Dsl {
            kind,
            reason,
            cause: Some(Box::new(cause)),
        }
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryDslError::Dsl { kind, .. } => *kind,
            QueryDslError::Io(_) => ErrorKind::RuntimeException,
            QueryDslError::Json(_) => ErrorKind::XContentParseException,
        }
    }

    /// The reason message, without the kind prefix.
    pub fn reason(&self) -> String {
        match self {
            QueryDslError::Dsl { reason, .. } => reason.clone(),
            QueryDslError::Io(e) => e.to_string(),
            QueryDslError::Json(e) => e.to_string(),
        }
    }

    /// The directly chained cause, if any.
    pub fn cause(&self) -> Option<&QueryDslError> {
        match self {
            QueryDslError::Dsl { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }

    /// Iterate over the chain of causes, innermost last.
    pub fn causes(&self) -> impl Iterator<Item = &QueryDslError> {
        std::iter::successors(self.cause(), |e| e.cause())
    }

    /// The innermost error of the chain (the error itself when there is no cause).
    pub fn root_cause(&self) -> &QueryDslError {
        self.causes().last().unwrap_or(self)
    }

    /// Render this error as an error response body.
    ///
    /// ```
    /// use querydsl::error::QueryDslError;
    ///
    /// let err = QueryDslError::x_content_parse("[match] failed to parse field")
    ///     .caused_by(QueryDslError::illegal_argument("[match] unknown operator XOR"));
    /// let body = err.to_response();
    ///
    /// assert_eq!(body["error"]["type"], "x_content_parse_exception");
    /// assert_eq!(
    ///     body["error"]["cause"],
    ///     "illegal_argument_exception: [match] unknown operator XOR"
    /// );
    /// ```
    pub fn to_response(&self) -> Value {
        let mut error = Map::new();
        error.insert("type".to_string(), json!(self.kind().as_str()));
        error.insert("reason".to_string(), json!(self.reason()));
        let chain: Vec<String> = self
            .causes()
            .map(|e| format!("{}: {}", e.kind(), e.reason()))
            .collect();
        if !chain.is_empty() {
            error.insert("cause".to_string(), json!(chain.join("; caused by: ")));
        }
        json!({ "error": error })
    }
}
