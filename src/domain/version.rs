use crate::domain::prerelease;
use crate::error::{BumpError, Result};
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;
use std::str::FromStr;

/// Granularity of the version increment requested for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseLevel {
    Major,
    Minor,
    #[default]
    Patch,
}

impl FromStr for ReleaseLevel {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(ReleaseLevel::Major),
            "minor" => Ok(ReleaseLevel::Minor),
            "patch" => Ok(ReleaseLevel::Patch),
            _ => Err(BumpError::config(format!(
                "Unknown release level '{}' - expected one of major, minor, patch",
                s
            ))),
        }
    }
}

impl fmt::Display for ReleaseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseLevel::Major => write!(f, "major"),
            ReleaseLevel::Minor => write!(f, "minor"),
            ReleaseLevel::Patch => write!(f, "patch"),
        }
    }
}

/// Parse a tag-local version string (e.g. "1.2.0-alpha.3")
pub fn parse(version: &str) -> Result<Version> {
    Version::parse(version)
        .map_err(|e| BumpError::version(format!("Invalid version '{}': {}", version, e)))
}

/// Whether a string is a valid semantic version
pub fn is_valid(version: &str) -> bool {
    Version::parse(version).is_ok()
}

/// Whether the tag-local version segment carries a pre-release suffix
pub fn is_prerelease(version: &str) -> bool {
    version.contains('-')
}

/// Add one to a version component, refusing to wrap
fn increment(component: u64, name: &str, version: &Version) -> Result<u64> {
    component.checked_add(1).ok_or_else(|| {
        BumpError::version(format!(
            "Cannot bump {} of {}: component is already at its maximum",
            name, version
        ))
    })
}

/// Increment major, reset minor and patch
pub fn bump_major(version: &Version) -> Result<Version> {
    Ok(Version::new(increment(version.major, "major", version)?, 0, 0))
}

/// Increment minor, reset patch
pub fn bump_minor(version: &Version) -> Result<Version> {
    Ok(Version::new(
        version.major,
        increment(version.minor, "minor", version)?,
        0,
    ))
}

/// Increment patch only
pub fn bump_patch(version: &Version) -> Result<Version> {
    Ok(Version::new(
        version.major,
        version.minor,
        increment(version.patch, "patch", version)?,
    ))
}

/// Apply a release-level bump; any pre-release or build suffix is dropped
pub fn bump_level(version: &Version, level: ReleaseLevel) -> Result<Version> {
    match level {
        ReleaseLevel::Major => bump_major(version),
        ReleaseLevel::Minor => bump_minor(version),
        ReleaseLevel::Patch => bump_patch(version),
    }
}

/// Advance the pre-release counter, keeping major.minor.patch and the label
pub fn bump_prerelease(version: &Version) -> Result<Version> {
    let mut next = version.clone();
    next.pre = prerelease::increment(&version.pre)?;
    next.build = BuildMetadata::EMPTY;
    Ok(next)
}

/// Drop the pre-release suffix: 1.2.0-alpha.3 -> 1.2.0
pub fn finalize(version: &Version) -> Version {
    let mut final_version = version.clone();
    final_version.pre = Prerelease::EMPTY;
    final_version.build = BuildMetadata::EMPTY;
    final_version
}

/// Compute the next version string.
///
/// - pre-release and `bump_prerelease`: only the pre-release counter moves
/// - pre-release without `bump_prerelease`: finalize, then apply `level`
/// - final version: apply `level` (`bump_prerelease` has no effect)
///
/// # Example
/// ```ignore
/// assert_eq!(bump_version("1.2.0-alpha.3", ReleaseLevel::Minor, true, false)?, "1.3.0");
/// assert_eq!(bump_version("1.2.0-alpha.3", ReleaseLevel::Minor, true, true)?, "1.2.0-alpha.4");
/// ```
pub fn bump_version(
    current: &str,
    level: ReleaseLevel,
    is_prerelease: bool,
    bump_prerelease_only: bool,
) -> Result<String> {
    let version = parse(current)?;

    let next = match (is_prerelease, bump_prerelease_only) {
        (true, true) => bump_prerelease(&version)?,
        (true, false) => bump_level(&finalize(&version), level)?,
        (false, _) => bump_level(&version, level)?,
    };

    Ok(next.to_string())
}
