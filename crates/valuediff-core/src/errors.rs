use std::fmt;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Error classification with a stable code per kind.
///
/// Comparison never fails. These kinds cover the collaborators that turn
/// external input into values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Fixture bytes are not UTF-8 JSON
    InvalidJson,
    /// A 128-bit integer outside the 64-bit range
    IntegerOverflow,
    /// Raised by a `Serialize` impl
    Serialization,
    Internal,
}

impl ExErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidJson => "ERR_INVALID_JSON",
            ExErrorKind::IntegerOverflow => "ERR_INTEGER_OVERFLOW",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Structured error returned by lowering and decoding.
///
/// `op` names the operation that failed. A failure that started in the
/// serde lowering keeps the originating [`ValueError`] as its cause; an
/// operation that wraps another's failure chains it with
/// [`with_source`](ExError::with_source).
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: &'static str,
    message: String,
    source: Option<Source>,
}

#[derive(Debug, Clone, PartialEq)]
enum Source {
    Lowering(ValueError),
    Nested(Box<ExError>),
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: "",
            message: String::new(),
            source: None,
        }
    }

    /// Set or replace the failing operation
    pub fn with_op(self, op: &'static str) -> Self {
        Self { op, ..self }
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    /// Chain the failure this error wraps
    pub fn with_source(self, source: ExError) -> Self {
        Self {
            source: Some(Source::Nested(Box::new(source))),
            ..self
        }
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&'static str> {
        Some(self.op).filter(|op| !op.is_empty())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The lowering failure at the root of the chain, if any
    pub fn cause(&self) -> Option<&ValueError> {
        match self.source.as_ref()? {
            Source::Lowering(err) => Some(err),
            Source::Nested(inner) => inner.cause(),
        }
    }

    /// The wrapped error, if this one was built with `with_source`
    pub fn source_error(&self) -> Option<&ExError> {
        match self.source.as_ref()? {
            Source::Nested(inner) => Some(inner.as_ref()),
            Source::Lowering(_) => None,
        }
    }
}

impl fmt::Display for ExError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = self.op() {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.source.as_ref()? {
            Source::Lowering(err) => Some(err as &(dyn std::error::Error + 'static)),
            Source::Nested(inner) => Some(inner.as_ref() as &(dyn std::error::Error + 'static)),
        }
    }
}

// ========== End Error Facility ==========

/// Failures while lowering a native value through serde
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// A map key is not a scalar. Raised and handled inside the
    /// lowering, which retries the key as a composite.
    #[error("map key is not a scalar, got {found}")]
    NotScalarKey { found: &'static str },

    /// A map value arrived before its key
    #[error("map value serialized without a preceding key")]
    ValueWithoutKey,

    #[error("integer {value} does not fit in 64 bits")]
    IntegerOverflow { value: String },

    #[error("{message}")]
    Custom { message: String },
}

impl serde::ser::Error for ValueError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ValueError::Custom {
            message: msg.to_string(),
        }
    }
}

impl From<ValueError> for ExError {
    fn from(err: ValueError) -> Self {
        let kind = match &err {
            ValueError::NotScalarKey { .. } => ExErrorKind::Internal,
            ValueError::IntegerOverflow { .. } => ExErrorKind::IntegerOverflow,
            ValueError::ValueWithoutKey => ExErrorKind::Internal,
            ValueError::Custom { .. } => ExErrorKind::Serialization,
        };
        ExError {
            kind,
            op: "to_value",
            message: err.to_string(),
            source: Some(Source::Lowering(err)),
        }
    }
}
