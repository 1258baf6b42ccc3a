//! Error types for level generation and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// Configuration validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Room placement kept restarting without fitting every room
    ///
    /// Recovered by the level generator as a failed room epoch.
    PlacementExhausted {
        /// Number of rooms the batch tried to place
        rooms_requested: usize,
        /// Number of full-batch restarts performed
        restarts: usize,
    },

    /// Every room epoch ended without a fully connected corridor network
    GenerationFailed {
        /// Room layouts attempted
        room_epochs: usize,
        /// Corridor epochs consumed across all room layouts
        corridor_epochs: usize,
    },

    /// An internal invariant did not hold
    ///
    /// Signals a programming error such as asking for the top-left room of an
    /// empty registry, or a room without any interior floor left.
    InvariantViolation {
        /// Operation that detected the violation
        operation: &'static str,
        /// Description of the broken invariant
        reason: String,
    },

    /// Failed to encode or save an image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::PlacementExhausted {
                rooms_requested,
                restarts,
            } => {
                write!(
                    f,
                    "Could not place {rooms_requested} rooms after {restarts} batch restarts"
                )
            }
            Self::GenerationFailed {
                room_epochs,
                corridor_epochs,
            } => {
                write!(
                    f,
                    "Unable to generate a level after {room_epochs} room epochs \
                     ({corridor_epochs} corridor epochs), retry with another seed"
                )
            }
            Self::InvariantViolation { operation, reason } => {
                write!(f, "Invariant violated in {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl GenerationError {
    /// Whether a fresh room layout may recover from this error
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::PlacementExhausted { .. })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invariant violation error
pub fn invariant_violation(operation: &'static str, reason: &impl ToString) -> GenerationError {
    GenerationError::InvariantViolation {
        operation,
        reason: reason.to_string(),
    }
}
