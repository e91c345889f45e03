//! Error types for fastmac-core

use thiserror::Error;

/// Result type alias using fastmac-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for FastMac
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog violates one or more invariants
    #[error("Catalog is invalid:\n{}", format_problems(.problems))]
    CatalogInvalid { problems: Vec<String> },

    /// No tool identifiers were supplied
    #[error("No tools selected")]
    EmptySelection,

    /// A selected or required identifier is not in the catalog
    #[error("Unknown tool: {id}")]
    UnknownTool { id: String },

    /// The dependency relation contains a cycle
    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },

    /// A tool record could not be rendered into shell text
    #[error("Failed to render install steps for {tool}: {message}")]
    RenderFailure { tool: String, message: String },

    /// Catalog document not found
    #[error("Catalog file not found: {path}")]
    CatalogNotFound { path: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Schema validation error
    #[error("Schema validation failed:\n{errors}")]
    SchemaValidation { errors: String },

    /// Schema not found
    #[error("Schema not found: {name}")]
    SchemaNotFound { name: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template engine error outside of a specific tool
    #[error("Template error: {0}")]
    Template(String),
}

/// Stable, message-independent classification of an [`Error`]
///
/// A service boundary maps these to response statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CatalogInvalid,
    EmptySelection,
    UnknownTool,
    CycleDetected,
    RenderFailure,
    Config,
    Parse,
    Io,
}

impl ErrorKind {
    /// Short machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::CatalogInvalid => "catalog_invalid",
            ErrorKind::EmptySelection => "empty_selection",
            ErrorKind::UnknownTool => "unknown_tool",
            ErrorKind::CycleDetected => "cycle_detected",
            ErrorKind::RenderFailure => "render_failure",
            ErrorKind::Config => "config",
            ErrorKind::Parse => "parse",
            ErrorKind::Io => "io",
        }
    }

    /// Whether the caller's input (rather than the catalog or environment) caused the failure
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ErrorKind::EmptySelection | ErrorKind::UnknownTool)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

fn format_problems(problems: &[String]) -> String {
    problems
        .iter()
        .map(|p| format!("  - {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CatalogInvalid { .. } => ErrorKind::CatalogInvalid,
            Error::EmptySelection => ErrorKind::EmptySelection,
            Error::UnknownTool { .. } => ErrorKind::UnknownTool,
            Error::CycleDetected { .. } => ErrorKind::CycleDetected,
            Error::RenderFailure { .. } | Error::Template(_) => ErrorKind::RenderFailure,
            Error::CatalogNotFound { .. }
            | Error::ConfigNotFound { .. }
            | Error::InvalidConfig { .. } => ErrorKind::Config,
            Error::YamlParse(_)
            | Error::JsonParse(_)
            | Error::SchemaValidation { .. }
            | Error::SchemaNotFound { .. } => ErrorKind::Parse,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether retrying later could succeed without anyone editing the catalog
    ///
    /// Only I/O failures and a missing catalog file qualify; parse, schema and
    /// model errors describe the document itself.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Io(_) | Error::CatalogNotFound { .. })
    }

    /// Create a catalog invalid error from a list of problems
    pub fn catalog_invalid(problems: Vec<String>) -> Self {
        Self::CatalogInvalid { problems }
    }

    /// Create an unknown tool error
    pub fn unknown_tool(id: impl Into<String>) -> Self {
        Self::UnknownTool { id: id.into() }
    }

    /// Create a cycle error from the offending path
    pub fn cycle_detected(cycle: Vec<String>) -> Self {
        Self::CycleDetected { cycle }
    }

    /// Create a render failure error
    pub fn render_failure(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RenderFailure {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a catalog not found error
    pub fn catalog_not_found(path: impl Into<String>) -> Self {
        Self::CatalogNotFound { path: path.into() }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a schema validation error from a list of errors
    pub fn schema_validation(errors: Vec<String>) -> Self {
        Self::SchemaValidation {
            errors: errors.join("\n"),
        }
    }

    /// Create a schema not found error
    pub fn schema_not_found(name: impl Into<String>) -> Self {
        Self::SchemaNotFound { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_io_failures_are_transient() {
        assert!(Error::catalog_not_found("catalog.yaml").is_transient());
        assert!(Error::Io(std::io::Error::other("disk")).is_transient());
        assert!(!Error::catalog_invalid(vec!["bad".into()]).is_transient());
        assert!(!Error::schema_validation(vec!["/tools/0: bad".into()]).is_transient());
        assert!(!Error::cycle_detected(vec!["a".into(), "a".into()]).is_transient());
    }

    #[test]
    fn test_cycle_message_names_path() {
        let err = Error::cycle_detected(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(err.to_string(), "Circular dependency detected: a -> b -> a");
        assert_eq!(err.kind(), ErrorKind::CycleDetected);
    }

    #[test]
    fn test_catalog_invalid_lists_every_problem() {
        let err = Error::catalog_invalid(vec!["first".into(), "second".into()]);
        let msg = err.to_string();
        assert!(msg.contains("  - first"));
        assert!(msg.contains("  - second"));
    }

    #[test]
    fn test_caller_errors() {
        assert!(Error::EmptySelection.kind().is_caller_error());
        assert!(Error::unknown_tool("x").kind().is_caller_error());
        assert!(!Error::catalog_invalid(vec![]).kind().is_caller_error());
        assert_eq!(Error::unknown_tool("x").kind().code(), "unknown_tool");
    }
}
