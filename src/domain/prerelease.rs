//! Pre-release counter handling for semantic versioning
//!
//! Pre-release identifiers look like `alpha.3` or `rc.1`: a label followed by a
//! numeric iteration. See https://semver.org/#spec-item-9

use crate::error::{BumpError, Result};
use semver::Prerelease;

/// Advance the pre-release iteration counter.
///
/// The last purely numeric dot-separated identifier is incremented; every other
/// identifier is kept verbatim. A pre-release without any numeric identifier
/// gets `.1` appended.
///
/// # Examples
/// ```ignore
/// "alpha.3"   -> "alpha.4"
/// "rc.1.dev"  -> "rc.2.dev"
/// "beta"      -> "beta.1"
/// ```
pub fn increment(pre: &Prerelease) -> Result<Prerelease> {
    if pre.is_empty() {
        return Err(BumpError::version(
            "Cannot advance the pre-release counter of a final version",
        ));
    }

    let mut identifiers: Vec<String> = pre.as_str().split('.').map(str::to_string).collect();

    let numeric = identifiers
        .iter()
        .rposition(|ident| !ident.is_empty() && ident.bytes().all(|b| b.is_ascii_digit()));

    match numeric {
        Some(index) => {
            let current = identifiers[index].parse::<u64>().map_err(|e| {
                BumpError::version(format!(
                    "Invalid pre-release counter '{}': {}",
                    identifiers[index], e
                ))
            })?;
            let next = current.checked_add(1).ok_or_else(|| {
                BumpError::version(format!("Pre-release counter overflow in '{}'", pre))
            })?;
            identifiers[index] = next.to_string();
        }
        None => identifiers.push("1".to_string()),
    }

    Prerelease::new(&identifiers.join("."))
        .map_err(|e| BumpError::version(format!("Invalid pre-release '{}': {}", pre, e)))
}

/// Label part of a pre-release, i.e. everything before the counter.
pub fn label(pre: &Prerelease) -> &str {
    match pre.as_str().rsplit_once('.') {
        Some((label, counter)) if counter.bytes().all(|b| b.is_ascii_digit()) => label,
        _ => pre.as_str(),
    }
}
