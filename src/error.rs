//! Error handling for the rock surface filter
//!
//! This module defines the crate error type and a Result alias used by the
//! graph host, the assembler and the preset loader.

use thiserror::Error;

/// Main error type for rock surface operations
#[derive(Error, Debug)]
pub enum RockSurfaceError {
    /// The host's operation registry does not provide the requested primitive
    #[error("Operation '{0}' is not available in the operation registry")]
    OperationUnavailable(String),

    /// A node was asked for a parameter its operation does not declare.
    ///
    /// When raised while installing redirects this is an internal
    /// consistency bug in the assembler, not an input condition.
    #[error("Operation '{operation}' has no parameter '{param}'")]
    UnknownParameter { operation: String, param: String },

    /// The public parameter surface has no property with this name
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    /// A value of the wrong kind was written to a parameter
    #[error("Parameter '{param}' expects {expected}, got {actual}")]
    ParameterType {
        param: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A value that cannot be clamped into range (e.g. NaN)
    #[error("Invalid value for '{param}': {message}")]
    InvalidValue { param: String, message: String },

    /// A connection referenced a missing port or linked a node to itself
    #[error("Invalid edge: {0}")]
    InvalidEdge(String),

    /// A node id does not refer to a node of this graph
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    /// The live topology contains a cycle
    #[error("Cycle detected in operation graph")]
    CycleDetected,

    /// Errors related to preset loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<RockSurfaceError>,
    },
}

impl RockSurfaceError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        RockSurfaceError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all context layers stripped
    pub fn root(&self) -> &RockSurfaceError {
        match self {
            RockSurfaceError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for rock surface operations
pub type Result<T> = std::result::Result<T, RockSurfaceError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RockSurfaceError::UnknownProperty("roughness".to_string());
        assert_eq!(err.to_string(), "Unknown property: roughness");
    }

    #[test]
    fn test_error_with_context() {
        let err = RockSurfaceError::OperationUnavailable("gegl:mantiuk06".to_string());
        let with_ctx = err.with_context("Failed to attach rock surface");
        assert!(with_ctx.to_string().contains("Failed to attach rock surface"));
        assert!(matches!(
            with_ctx.root(),
            RockSurfaceError::OperationUnavailable(_)
        ));
    }

    #[test]
    fn test_parameter_type_error() {
        let err = RockSurfaceError::ParameterType {
            param: "depth".to_string(),
            expected: "int",
            actual: "bool",
        };
        assert!(err.to_string().contains("depth"));
        assert!(err.to_string().contains("expects int"));
    }

    #[test]
    fn test_result_ext_context() {
        let res: Result<()> = Err(RockSurfaceError::CycleDetected);
        let err = res.context("relink").unwrap_err();
        assert_eq!(err.to_string(), "relink: Cycle detected in operation graph");
    }
}
