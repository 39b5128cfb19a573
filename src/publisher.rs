//! Tag creation and push for one package

use crate::domain::{PackageRef, TagPattern};
use crate::error::BumpError;
use crate::git::TagRepository;
use std::fmt;
use thiserror::Error;

/// Step of publishing that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    Create,
    Push,
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishStage::Create => write!(f, "create"),
            PublishStage::Push => write!(f, "push"),
        }
    }
}

/// A failed publish, with enough context to report it per package
#[derive(Error, Debug)]
#[error("Failed to {stage} tag '{tag}' for package '{package}': {source}")]
pub struct PublishFailure {
    pub package: String,
    pub tag: String,
    pub stage: PublishStage,
    #[source]
    pub source: BumpError,
}

/// Creates `<namespace>/<package>@<version>` at the current commit and pushes it
pub struct TagPublisher<'a, R: TagRepository + ?Sized> {
    repo: &'a R,
    pattern: &'a TagPattern,
    remote: &'a str,
}

impl<'a, R: TagRepository + ?Sized> TagPublisher<'a, R> {
    pub fn new(repo: &'a R, pattern: &'a TagPattern, remote: &'a str) -> Self {
        TagPublisher {
            repo,
            pattern,
            remote,
        }
    }

    pub fn tag_name(&self, package: &PackageRef, version: &str) -> String {
        self.pattern.format(&package.name, version)
    }

    /// Create (or overwrite) the tag locally, then force-push it.
    ///
    /// If the push fails the local tag is left in place.
    ///
    /// # Returns
    /// * `Ok(tag)` - The published tag name
    /// * `Err(PublishFailure)` - Which step failed and why
    pub fn publish(&self, package: &PackageRef, version: &str) -> Result<String, PublishFailure> {
        let tag = self.tag_name(package, version);

        let failure = |stage: PublishStage, source: BumpError| PublishFailure {
            package: package.name.clone(),
            tag: tag.clone(),
            stage,
            source,
        };

        self.repo
            .create_or_force_tag(package.path(), &tag)
            .map_err(|e| failure(PublishStage::Create, e))?;

        self.repo
            .push_tag(package.path(), self.remote, &tag)
            .map_err(|e| failure(PublishStage::Push, e))?;

        Ok(tag)
    }
}
