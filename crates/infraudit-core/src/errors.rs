use infraudit_core_types::RunId;
use thiserror::Error;

/// Result type alias using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// test assertions and CLI exit reporting. Data-shape problems found while
/// evaluating rules are never errors (they fail open); only genuinely broken
/// configuration or collaborator I/O reaches this taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    InvalidRuleSet,
    InvalidInventory,
    InvalidSnapshot,

    // Lookup
    NotFound,
    AlreadyExists,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidRuleSet => "ERR_INVALID_RULE_SET",
            ExErrorKind::InvalidInventory => "ERR_INVALID_INVENTORY",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Builder-style: start from a kind and attach whatever context the failing
/// operation knows about.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    resource_type: Option<String>,
    rule: Option<String>,
    path: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            resource_type: None,
            rule: None,
            path: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add resource type context
    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Add rule name context
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
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

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the resource type context, if any
    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    /// Get the rule name context, if any
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the run ID context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(resource_type) = &self.resource_type {
            write!(f, " (resource_type: {})", resource_type)?;
        }
        if let Some(rule) = &self.rule {
            write!(f, " (rule: {})", rule)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
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

/// Domain error taxonomy for infraudit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    /// The rule set document could not be parsed at all
    #[error("Rule set could not be parsed: {reason}")]
    RuleSetParse { reason: String },

    /// A rule's severity is not one of low/medium/high
    #[error("Rule {rule} in {resource_type} has unknown severity: {severity}")]
    UnknownSeverity {
        resource_type: String,
        rule: String,
        severity: String,
    },

    /// The inventory document could not be parsed
    #[error("Inventory could not be parsed: {reason}")]
    InventoryParse { reason: String },

    /// No snapshot stored for the requested timestamp
    #[error("Snapshot not found: {timestamp}")]
    SnapshotNotFound { timestamp: String },

    /// A different snapshot is already stored for this timestamp
    #[error("Snapshot already exists: {timestamp}")]
    SnapshotExists { timestamp: String },

    /// Stored snapshot is corrupt or has the wrong shape
    #[error("Snapshot {timestamp} is invalid: {reason}")]
    SnapshotInvalid { timestamp: String, reason: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

}

impl From<AuditError> for ExError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::RuleSetParse { reason } => ExError::new(ExErrorKind::InvalidRuleSet)
                .with_op("load_rule_set")
                .with_message(reason),

            AuditError::UnknownSeverity {
                resource_type,
                rule,
                severity,
            } => ExError::new(ExErrorKind::InvalidRuleSet)
                .with_op("load_rule_set")
                .with_resource_type(resource_type)
                .with_rule(rule)
                .with_message(format!("Unknown severity: {}", severity)),

            AuditError::InventoryParse { reason } => ExError::new(ExErrorKind::InvalidInventory)
                .with_op("load_inventory")
                .with_message(reason),

            AuditError::SnapshotNotFound { timestamp } => ExError::new(ExErrorKind::NotFound)
                .with_op("load_snapshot")
                .with_message(format!("No snapshot for {}", timestamp)),

            AuditError::SnapshotExists { timestamp } => ExError::new(ExErrorKind::AlreadyExists)
                .with_op("save_snapshot")
                .with_message(format!(
                    "A different snapshot already exists for {}",
                    timestamp
                )),

            AuditError::SnapshotInvalid { timestamp, reason } => {
                ExError::new(ExErrorKind::InvalidSnapshot)
                    .with_op("load_snapshot")
                    .with_message(format!("Snapshot {} is invalid: {}", timestamp, reason))
            }

            AuditError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to AuditError
impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Serialization {
            message: err.to_string(),
        }
    }
}
