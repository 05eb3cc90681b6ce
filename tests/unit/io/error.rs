//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use patchsynth::PatchError;
    use patchsynth::io::error::{invalid_parameter, io_error, shape_mismatch};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = PatchError::FileSystem {
            path: "/tmp/out".into(),
            operation: "create directory",
            source: io,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("create directory"));
        assert!(message.contains("/tmp/out"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("size", &0, &"must be positive");
        let message = error.to_string();

        assert!(message.contains("size"));
        assert!(message.contains('0'));
        assert!(message.contains("must be positive"));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_unsupported_kind_error() {
        let error = PatchError::UnsupportedKind {
            kind: "gabor".to_string(),
        };
        assert_eq!(error.to_string(), "Patch kind 'gabor' is not implemented");
    }

    #[test]
    fn test_shape_mismatch_error() {
        let error = shape_mismatch("psnr", &[2, 2, 3], &[2, 3, 3]);
        assert_eq!(
            error.to_string(),
            "Shape mismatch in psnr: [2, 2, 3] vs [2, 3, 3]"
        );
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = PatchError::ImageExport {
            path: PathBuf::from("/out/sine_00000.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("sine_00000.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_conversions() {
        let from_io: PatchError = std::io::Error::other("disk full").into();
        assert!(matches!(from_io, PatchError::FileSystem { .. }));

        let from_image: PatchError =
            image::ImageError::IoError(std::io::Error::other("truncated")).into();
        assert!(matches!(from_image, PatchError::ImageLoad { .. }));
    }

    #[test]
    fn test_io_error_helper() {
        let error = io_error("Output path must be a directory");
        assert!(matches!(
            error,
            PatchError::InvalidParameter {
                parameter: "path",
                ..
            }
        ));
        assert!(error.to_string().contains("must be a directory"));
    }
}
