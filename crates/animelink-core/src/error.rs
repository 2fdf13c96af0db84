use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during animelink operations.
///
/// Name parsing and classification never fail; only pattern compilation and
/// the filesystem boundary produce errors.
#[derive(Debug, Error)]
pub enum AnimelinkError {
    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// The source path does not exist.
    #[error("path does not exist: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The source path exists but is not a directory.
    #[error("path is not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A directory listing could not be read.
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        /// The directory being listed.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A destination directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// The directory being created.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A hard link could not be created.
    #[error("failed to link {} -> {}: {source}", src.display(), dst.display())]
    Link {
        /// The existing file.
        src: PathBuf,
        /// The link that was to be created.
        dst: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The source directory could not be moved into the archive root.
    #[error("failed to archive {} -> {}: {source}", src.display(), dst.display())]
    Archive {
        /// The source directory.
        src: PathBuf,
        /// The archive destination.
        dst: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Result type alias for animelink operations.
pub type Result<T> = std::result::Result<T, AnimelinkError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn error_display_messages() {
        let err = AnimelinkError::NotFound {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(err.to_string(), "path does not exist: /nope");

        let err = AnimelinkError::NotADirectory {
            path: PathBuf::from("/etc/hosts"),
        };
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn link_error_keeps_io_source() {
        let err = AnimelinkError::Link {
            src: PathBuf::from("a.mkv"),
            dst: PathBuf::from("b.mkv"),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "exists"),
        };
        assert!(err.to_string().starts_with("failed to link a.mkv -> b.mkv"));
        assert!(err.source().is_some());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnimelinkError>();
    }
}
