use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while processing a package.
/// They are reported to the user and processing moves on.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Fetching tags from the remote failed
    FetchFailed { package: String, reason: String },
    /// Listing local tags failed
    ListFailed { package: String, reason: String },
    /// No tag of the package matches `<namespace>/<package>@<version>`
    NoValidTag { package: String },
    /// Tag has the right shape but is not a valid semantic version
    MalformedTag { tag: String, reason: String },
    /// Requested package path is not a directory
    NotADirectory { package: String, path: PathBuf },
    /// Deleting a tag on the remote before moving it failed
    RemoteDeleteFailed { tag: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::FetchFailed { package, reason } => {
                write!(f, "Could not fetch tags for '{}': {}", package, reason)
            }
            BoundaryWarning::ListFailed { package, reason } => {
                write!(f, "Could not list tags for '{}': {}", package, reason)
            }
            BoundaryWarning::NoValidTag { package } => {
                write!(f, "No valid tag found for package '{}'", package)
            }
            BoundaryWarning::MalformedTag { tag, reason } => {
                write!(f, "Ignoring malformed tag '{}': {}", tag, reason)
            }
            BoundaryWarning::NotADirectory { package, path } => {
                write!(
                    f,
                    "Package '{}' is not a directory ({})",
                    package,
                    path.display()
                )
            }
            BoundaryWarning::RemoteDeleteFailed { tag, reason } => {
                write!(f, "Could not delete remote tag '{}': {}", tag, reason)
            }
        }
    }
}
