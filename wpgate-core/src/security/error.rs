use std::path::PathBuf;
use thiserror::Error;

/// A request rejected on security grounds. Always surfaces as `403`.
///
/// The messages are safe to echo to the client: none of them carries the
/// offending path or the rule that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SecurityViolation {
    #[error("Null byte detected in path")]
    NullByte,

    #[error("Directory traversal attempt detected")]
    Traversal,

    #[error("Invalid characters in path")]
    InvalidCharacter,

    #[error("Access denied")]
    HiddenPath,

    #[error("Access denied")]
    BlockedPattern,

    #[error("Path outside web root")]
    OutsideRoot,
}

#[derive(Debug, Error)]
pub enum PathValidatorError {
    #[error("invalid web root path {path}: {source}")]
    InvalidWebRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("web root {path} is not a directory")]
    NotADirectory { path: PathBuf },
}
