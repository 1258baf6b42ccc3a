//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use roomgraph::GenerationError;
    use roomgraph::io::error::{invalid_parameter, invariant_violation};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests file system errors expose their I/O source
    // Verified by returning None from source
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = GenerationError::FileSystem {
            path: "/tmp/level.png".into(),
            operation: "create file",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("create file"));
        assert!(error.to_string().contains("/tmp/level.png"));
    }

    // Tests invalid parameter messages carry name, value and reason
    // Verified by omitting the value from the message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("room_count", &12, &"at most 9 rooms are supported");

        let message = error.to_string();
        assert!(message.contains("room_count"));
        assert!(message.contains("12"));
        assert!(message.contains("at most 9 rooms"));
        assert!(error.source().is_none());
        assert!(!error.is_recoverable());
    }

    // Tests generation failures report both retry counters
    // Verified by omitting the corridor epochs
    #[test]
    fn test_generation_failed_error() {
        let error = GenerationError::GenerationFailed {
            room_epochs: 50,
            corridor_epochs: 2500,
        };

        let message = error.to_string();
        assert!(message.contains("50 room epochs"));
        assert!(message.contains("2500 corridor epochs"));
        assert!(!error.is_recoverable());
    }

    // Tests placement exhaustion is the only recoverable error
    // Verified by marking generation failures recoverable
    #[test]
    fn test_placement_exhausted_is_recoverable() {
        let error = GenerationError::PlacementExhausted {
            rooms_requested: 9,
            restarts: 10_000,
        };

        assert!(error.is_recoverable());
        assert!(error.to_string().contains("9 rooms"));
        assert!(!invariant_violation("start room selection", &"no rooms").is_recoverable());
    }

    // Tests invariant violations name the operation
    // Verified by dropping the operation from the message
    #[test]
    fn test_invariant_violation_error() {
        let error = invariant_violation("entity placement", &"room has no free floor cell left");

        let message = error.to_string();
        assert!(message.contains("entity placement"));
        assert!(message.contains("no free floor"));
    }

    // Tests image export errors include the path and the underlying cause
    // Verified by excluding the source from the message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = GenerationError::ImageExport {
            path: PathBuf::from("/restricted/level.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/level.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests bare I/O errors convert into file system errors
    // Verified by converting into an invariant violation
    #[test]
    fn test_from_io_error() {
        let error: GenerationError =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed").into();

        assert!(matches!(error, GenerationError::FileSystem { .. }));
        assert!(error.to_string().contains("pipe closed"));
    }
}
