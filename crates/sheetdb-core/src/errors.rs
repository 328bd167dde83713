use thiserror::Error;

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers and tests can match on
/// without depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input / lookup
    InvalidInput,
    NotFound,
    InvalidConfig,

    /// A table payload could not be fetched (non-fatal: table degrades to empty)
    Transport,

    // Integration / IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Transport => "ERR_TRANSPORT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional context (operation, table) for
/// logging and programmatic handling.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    table: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            table: None,
            message: String::new(),
            source: None,
        }
    }

    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Stable error code of this error's kind
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

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
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the ingestion core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetDbError {
    /// Table name is not part of the catalog
    #[error("Unknown table: {table}")]
    UnknownTable { table: String },

    /// Two catalog entries share a name
    #[error("Duplicate table in catalog: {table}")]
    DuplicateTable { table: String },

    /// Two catalog tables would persist under the same snapshot key
    #[error("Tables {first} and {second} share snapshot key {key}")]
    SnapshotKeyCollision {
        key: String,
        first: String,
        second: String,
    },

    /// A catalog needs exactly one settings table to expose settings
    #[error("Catalog has {count} settings tables, expected at most one")]
    AmbiguousSettingsTable { count: usize },

    /// Language tag not supported by the change reporter
    #[error("Unsupported language: {tag}")]
    UnsupportedLang { tag: String },

    /// Snapshot could not be persisted or restored
    #[error("Snapshot persistence failed: {message}")]
    Persistence { message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<SheetDbError> for ExError {
    fn from(err: SheetDbError) -> Self {
        match err {
            SheetDbError::UnknownTable { table } => ExError::new(ExErrorKind::NotFound)
                .with_table(table)
                .with_message("Table is not part of the catalog"),

            SheetDbError::DuplicateTable { table } => ExError::new(ExErrorKind::InvalidConfig)
                .with_table(table)
                .with_message("Table declared twice"),

            SheetDbError::SnapshotKeyCollision { key, first, second } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_table(second)
                    .with_message(format!("snapshot key {} already used by {}", key, first))
            }

            SheetDbError::AmbiguousSettingsTable { count } => {
                ExError::new(ExErrorKind::InvalidConfig)
                    .with_message(format!("{} settings tables declared", count))
            }

            SheetDbError::UnsupportedLang { tag } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Unsupported language: {}", tag)),

            SheetDbError::Persistence { message } => {
                ExError::new(ExErrorKind::Persistence).with_message(message)
            }

            SheetDbError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SheetDbError {
    fn from(err: serde_json::Error) -> Self {
        SheetDbError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        SheetDbError::from(err).into()
    }
}
