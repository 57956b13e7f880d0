//! Error types for shimr
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// All error types that can occur in shimr
#[derive(Debug, Error)]
pub enum ShimError {
    /// Host OS/architecture pair has no platform mapping
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Package cache has no installed version of the tool package
    #[error("Package not found at {}", .0.display())]
    PackageNotFound(PathBuf),

    /// Package is installed but contains no matching binary
    #[error("Binary '{tool}' not found in {}", .root.display())]
    BinaryNotFound { tool: String, root: PathBuf },

    /// Child process could not be started
    #[error("Failed to launch {program}: {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for shimr operations
pub type Result<T> = std::result::Result<T, ShimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_error() {
        let err = ShimError::UnsupportedPlatform("freebsd-riscv64".to_string());
        assert_eq!(err.to_string(), "Unsupported platform: freebsd-riscv64");
    }

    #[test]
    fn test_package_not_found_error() {
        let err = ShimError::PackageNotFound(PathBuf::from("/home/u/.nuget/packages/x/1.0.0"));
        assert_eq!(
            err.to_string(),
            "Package not found at /home/u/.nuget/packages/x/1.0.0"
        );
    }

    #[test]
    fn test_binary_not_found_error() {
        let err = ShimError::BinaryNotFound {
            tool: "ilasm".to_string(),
            root: PathBuf::from("/tmp/pkg"),
        };
        assert_eq!(err.to_string(), "Binary 'ilasm' not found in /tmp/pkg");
    }

    #[test]
    fn test_launch_failed_error() {
        let err = ShimError::LaunchFailed {
            program: "/tmp/pkg/ilasm".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("Failed to launch /tmp/pkg/ilasm"));
    }

    #[test]
    fn test_config_error() {
        let err = ShimError::Config("bad yaml".to_string());
        assert_eq!(err.to_string(), "Config error: bad yaml");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ShimError = io_err.into();
        assert!(matches!(err, ShimError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(ShimError::UnsupportedPlatform("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
