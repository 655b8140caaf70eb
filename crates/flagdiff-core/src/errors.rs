use flagdiff_core_types::RequestId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// The diff functions themselves are total; these kinds classify failures of
/// the surfaces around them (snapshot and catalog loading, CLI I/O). Each kind
/// maps to a stable error code for programmatic handling and tests.
/// Snapshot invariant violations are not errors; they are reported on the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    /// A request argument names something absent from the inputs
    InvalidInput,
    /// Snapshot or catalog bytes are not valid UTF-8 JSON of the expected shape
    InvalidSnapshot,
    /// A required document field (e.g. `feature_states`) is absent
    MissingField,

    // Integration/IO
    /// Reading an input file or writing the output failed
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (file path, feature id, segment id)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for snapshot and catalog loading
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlagDiffError {
    /// Document bytes are not valid UTF-8
    #[error("{document} is not valid UTF-8: {reason}")]
    NotUtf8 { document: String, reason: String },

    /// Document bytes are not valid JSON
    #[error("{document} is not valid JSON: {reason}")]
    NotJson { document: String, reason: String },

    /// The JSON root has the wrong shape
    #[error("{document} root must be {expected}")]
    UnexpectedRoot { document: String, expected: String },

    /// A required field is absent from the document
    #[error("{document} is missing required field `{field}`")]
    MissingField { document: String, field: String },

    /// An element of a record list could not be decoded
    #[error("{document} element {index} is invalid: {reason}")]
    InvalidRecord {
        document: String,
        index: usize,
        reason: String,
    },

    /// An input file could not be read
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    /// The output file could not be written
    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    /// Failed to serialize a value for digesting or output
    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },
}

impl From<FlagDiffError> for ExError {
    fn from(err: FlagDiffError) -> Self {
        let message = err.to_string();
        match err {
            FlagDiffError::NotUtf8 { document, .. }
            | FlagDiffError::NotJson { document, .. }
            | FlagDiffError::UnexpectedRoot { document, .. } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_entity_id(document)
                    .with_message(message)
            }
            FlagDiffError::MissingField { document, .. } => ExError::new(ExErrorKind::MissingField)
                .with_entity_id(document)
                .with_message(message),
            FlagDiffError::InvalidRecord { document, .. } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_entity_id(document)
                    .with_message(message)
            }
            FlagDiffError::ReadFailed { path, .. } | FlagDiffError::WriteFailed { path, .. } => {
                ExError::new(ExErrorKind::Io)
                    .with_entity_id(path)
                    .with_message(message)
            }
            FlagDiffError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for FlagDiffError {
    fn from(err: serde_json::Error) -> Self {
        FlagDiffError::Serialization {
            reason: err.to_string(),
        }
    }
}
