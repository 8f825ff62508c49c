use thiserror::Error;

/// Result type alias using FormStateError
pub type Result<T> = std::result::Result<T, FormStateError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    EmptyName,
    NotFound,
    DuplicateName,

    // Integration/IO
    Io,
    Serialization,
    Configuration,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::EmptyName => "ERR_EMPTY_NAME",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DuplicateName => "ERR_DUPLICATE_NAME",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Configuration => "ERR_CONFIGURATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context that
/// locates the failure: the operation, the control node or group involved,
/// and for parse failures the offending line.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    node: Option<String>,
    line: Option<usize>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            node: None,
            line: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add node or group context
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Add line number context (1-based)
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

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

    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    pub fn line(&self) -> Option<usize> {
        self.line
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
        if let Some(node) = &self.node {
            write!(f, " (node: {})", node)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for control tree construction and name auditing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormStateError {
    /// Control identifiers name persistence groups and keys, so they must be non-empty
    #[error("Control name must not be empty")]
    EmptyName,

    /// Node handle does not belong to this tree
    #[error("Node not found: {node}")]
    NodeNotFound { node: String },

    /// Two siblings share an identifier and would collide in the store
    #[error("Duplicate control name '{name}' under '{parent}'")]
    DuplicateSiblingName { parent: String, name: String },
}

impl From<FormStateError> for ExError {
    fn from(err: FormStateError) -> Self {
        match err {
            FormStateError::EmptyName => {
                ExError::new(ExErrorKind::EmptyName).with_message("Control name must not be empty")
            }
            FormStateError::NodeNotFound { node } => ExError::new(ExErrorKind::NotFound)
                .with_node(node)
                .with_message("Node not found"),
            FormStateError::DuplicateSiblingName { parent, name } => {
                ExError::new(ExErrorKind::DuplicateName)
                    .with_node(format!("{}/{}", parent, name))
                    .with_message(format!("Duplicate control name '{}'", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ExErrorKind::NotFound.code(), "ERR_NOT_FOUND");
        assert_eq!(ExErrorKind::DuplicateName.code(), "ERR_DUPLICATE_NAME");
        assert_eq!(ExErrorKind::Serialization.code(), "ERR_SERIALIZATION");
    }

    #[test]
    fn test_duplicate_name_converts_with_context() {
        let err = FormStateError::DuplicateSiblingName {
            parent: "Form".to_string(),
            name: "Name".to_string(),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::DuplicateName);
        assert_eq!(ex.node(), Some("Form/Name"));
    }

    #[test]
    fn test_display_includes_op_and_line() {
        let err = ExError::new(ExErrorKind::Serialization)
            .with_op("ini_parse")
            .with_message("unterminated quote")
            .with_line(7);
        let text = err.to_string();
        assert!(text.starts_with("[ERR_SERIALIZATION] in operation 'ini_parse'"));
        assert!(text.contains("unterminated quote"));
        assert!(text.contains("(line: 7)"));
    }

    #[test]
    fn test_every_kind_has_a_distinct_code() {
        let kinds = [
            ExErrorKind::EmptyName,
            ExErrorKind::NotFound,
            ExErrorKind::DuplicateName,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Configuration,
        ];
        let mut codes: Vec<_> = kinds.iter().map(ExErrorKind::code).collect();
        assert!(codes.iter().all(|c| c.starts_with("ERR_")));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }
}
