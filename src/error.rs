use thiserror::Error;

/// Unified error type for tag-bump operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Command `{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tag-bump
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        BumpError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        BumpError::Remote(msg.into())
    }

    /// Create an error for a version-control command that exited unsuccessfully
    pub fn command(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        BumpError::Command {
            command: command.into(),
            stderr: stderr.into().trim().to_string(),
        }
    }
}
