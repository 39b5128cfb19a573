//! Latest-tag resolution for one package

use crate::boundary::BoundaryWarning;
use crate::domain::{version, PackageRef, TagPattern};
use crate::git::TagRepository;

/// Outcome of looking up a package's current version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Highest matching tag and its version part (pre-release suffix included)
    Found { tag: String, version: String },
    NotFound,
}

/// Resolution plus the warnings met on the way
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveReport {
    pub resolution: Resolution,
    pub warnings: Vec<BoundaryWarning>,
}

impl ResolveReport {
    fn not_found(warnings: Vec<BoundaryWarning>) -> Self {
        ResolveReport {
            resolution: Resolution::NotFound,
            warnings,
        }
    }
}

/// Finds the latest `<namespace>/<package>@<version>` tag of a package.
///
/// Failures are soft: a fetch or list error, or the absence of any matching
/// tag, yields [Resolution::NotFound] with the cause in the report's warnings.
pub struct TagResolver<'a, R: TagRepository + ?Sized> {
    repo: &'a R,
    pattern: &'a TagPattern,
    remote: &'a str,
}

impl<'a, R: TagRepository + ?Sized> TagResolver<'a, R> {
    pub fn new(repo: &'a R, pattern: &'a TagPattern, remote: &'a str) -> Self {
        TagResolver {
            repo,
            pattern,
            remote,
        }
    }

    pub fn resolve(&self, package: &PackageRef) -> ResolveReport {
        let name = package.name.clone();
        let mut warnings = Vec::new();

        if !package.path().is_dir() {
            warnings.push(BoundaryWarning::NotADirectory {
                package: name.clone(),
                path: package.path.clone(),
            });
            warnings.push(BoundaryWarning::NoValidTag { package: name });
            return ResolveReport::not_found(warnings);
        }

        if let Err(e) = self.repo.fetch_tags(package.path(), self.remote) {
            warnings.push(BoundaryWarning::FetchFailed {
                package: name.clone(),
                reason: e.to_string(),
            });
            warnings.push(BoundaryWarning::NoValidTag { package: name });
            return ResolveReport::not_found(warnings);
        }

        let tags = match self.repo.list_tags_descending(package.path()) {
            Ok(tags) => tags,
            Err(e) => {
                warnings.push(BoundaryWarning::ListFailed {
                    package: name.clone(),
                    reason: e.to_string(),
                });
                warnings.push(BoundaryWarning::NoValidTag { package: name });
                return ResolveReport::not_found(warnings);
            }
        };

        let matcher = match self.pattern.matcher(&package.name) {
            Ok(matcher) => matcher,
            Err(e) => {
                warnings.push(BoundaryWarning::ListFailed {
                    package: name.clone(),
                    reason: e.to_string(),
                });
                warnings.push(BoundaryWarning::NoValidTag { package: name });
                return ResolveReport::not_found(warnings);
            }
        };

        // The backend already sorted newest first, so the first usable match wins
        for tag in &tags {
            let Some(captured) = matcher.capture_version(tag) else {
                continue;
            };

            if let Err(e) = version::parse(captured) {
                warnings.push(BoundaryWarning::MalformedTag {
                    tag: tag.clone(),
                    reason: e.to_string(),
                });
                continue;
            }

            return ResolveReport {
                resolution: Resolution::Found {
                    tag: tag.clone(),
                    version: captured.to_string(),
                },
                warnings,
            };
        }

        warnings.push(BoundaryWarning::NoValidTag { package: name });
        ResolveReport::not_found(warnings)
    }
}
