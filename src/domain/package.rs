use std::fmt;
use std::path::{Path, PathBuf};

/// One independently versioned unit inside the shared repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRef {
    pub path: PathBuf,
    pub name: String,
}

impl PackageRef {
    /// Create a package reference; the short name is the final path segment
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        PackageRef { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
