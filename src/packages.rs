//! Package enumeration: one named package, or every directory under the root

use crate::domain::PackageRef;
use crate::error::{BumpError, Result};
use std::fs;
use std::path::Path;

/// List the packages to process.
///
/// With `name`, the result is exactly `root/name`; whether it exists is left to
/// the later stages. Without it, every directory directly under `root` is
/// returned in directory-listing order (not sorted); plain files are skipped.
///
/// # Returns
/// * `Ok(packages)` - possibly empty
/// * `Err` - If `root` cannot be read
pub fn enumerate_packages(root: &Path, name: Option<&str>) -> Result<Vec<PackageRef>> {
    if let Some(name) = name {
        return Ok(vec![PackageRef::new(root.join(name))]);
    }

    let entries = fs::read_dir(root).map_err(|e| {
        BumpError::Io(std::io::Error::new(
            e.kind(),
            format!("Cannot read packages root {}: {}", root.display(), e),
        ))
    })?;

    let mut packages = Vec::new();
    for entry in entries {
        let path = entry?.path();
        // Follows symlinks, so a linked package directory counts
        if path.is_dir() {
            packages.push(PackageRef::new(path));
        }
    }

    Ok(packages)
}
