use thiserror::Error;

/// Error taxonomy shared by every Tenvolve crate.
///
/// Every variant carries the name of the operation that rejected the
/// call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VolumeError {
    #[error("Shape mismatch in operation '{operation}': expected {expected}, got {got}")]
    ShapeMismatch {
        operation: String,
        expected: String,
        got: String,
    },

    #[error("Invalid shape in operation '{operation}': {reason}")]
    InvalidShape { operation: String, reason: String },

    #[error("Out of bounds in operation '{operation}': {details}")]
    OutOfBounds { operation: String, details: String },

    #[error("Parse error in operation '{operation}': {details}")]
    Parse { operation: String, details: String },

    #[error("IO error in operation '{operation}': {details}")]
    Io { operation: String, details: String },

    #[error("Serialization error in operation '{operation}': {details}")]
    Serialization { operation: String, details: String },
}

impl VolumeError {
    /// Create a shape mismatch error.
    pub fn shape_mismatch(operation: &str, expected: &str, got: &str) -> Self {
        Self::ShapeMismatch {
            operation: operation.to_string(),
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    /// Create an invalid shape error.
    pub fn invalid_shape(operation: &str, reason: &str) -> Self {
        Self::InvalidShape {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an out-of-bounds error.
    pub fn out_of_bounds(operation: &str, details: &str) -> Self {
        Self::OutOfBounds {
            operation: operation.to_string(),
            details: details.to_string(),
        }
    }

    /// Create a parse error.
    pub fn parse(operation: &str, details: &str) -> Self {
        Self::Parse {
            operation: operation.to_string(),
            details: details.to_string(),
        }
    }

    /// Create an IO error.
    pub fn io(operation: &str, details: &str) -> Self {
        Self::Io {
            operation: operation.to_string(),
            details: details.to_string(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(operation: &str, details: &str) -> Self {
        Self::Serialization {
            operation: operation.to_string(),
            details: details.to_string(),
        }
    }

    /// Get the operation name for this error.
    pub fn operation(&self) -> &str {
        match self {
            Self::ShapeMismatch { operation, .. } => operation,
            Self::InvalidShape { operation, .. } => operation,
            Self::OutOfBounds { operation, .. } => operation,
            Self::Parse { operation, .. } => operation,
            Self::Io { operation, .. } => operation,
            Self::Serialization { operation, .. } => operation,
        }
    }
}

pub type Result<T> = std::result::Result<T, VolumeError>;
