//! Moving existing tags onto another commit
//!
//! Used after local history was rewritten (for example squashed onto the
//! remote branch): every namespace tag that contains the old base revision is
//! deleted locally and on the remote, re-created at the new commit and pushed.

use crate::boundary::BoundaryWarning;
use crate::domain::TagPattern;
use crate::error::{BumpError, Result};
use crate::git::TagRepository;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Step of a tag move that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetagStage {
    Delete,
    Create,
    Push,
}

impl fmt::Display for RetagStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetagStage::Delete => write!(f, "delete"),
            RetagStage::Create => write!(f, "re-create"),
            RetagStage::Push => write!(f, "push"),
        }
    }
}

/// A tag that could not be moved
#[derive(Error, Debug)]
#[error("Failed to {stage} tag '{tag}' at '{target}': {source}")]
pub struct RetagFailure {
    pub tag: String,
    pub target: String,
    pub stage: RetagStage,
    #[source]
    pub source: BumpError,
}

/// Finds and moves the namespace's tags in the repository containing a path
pub struct TagMover<'a, R: TagRepository + ?Sized> {
    repo: &'a R,
    pattern: &'a TagPattern,
    remote: &'a str,
}

impl<'a, R: TagRepository + ?Sized> TagMover<'a, R> {
    pub fn new(repo: &'a R, pattern: &'a TagPattern, remote: &'a str) -> Self {
        TagMover {
            repo,
            pattern,
            remote,
        }
    }

    /// Tags of the namespace (or of one package) that contain `from`.
    ///
    /// Tags outside `<namespace>/<package>@<version>` are never returned.
    pub fn tags_to_move(
        &self,
        path: &Path,
        from: &str,
        package: Option<&str>,
    ) -> Result<Vec<String>> {
        let matcher = match package {
            Some(name) => self.pattern.matcher(name)?,
            None => self.pattern.namespace_matcher()?,
        };

        Ok(self
            .repo
            .tags_containing(path, from)?
            .into_iter()
            .filter(|tag| matcher.matches(tag))
            .collect())
    }

    /// Delete `tag` locally and on the remote, re-create it at `target`, push it.
    ///
    /// A failed remote delete is only a warning: the forced push that follows
    /// replaces the remote tag anyway. Any other failure stops this tag; a tag
    /// deleted but not re-created stays deleted.
    pub fn move_tag(
        &self,
        path: &Path,
        tag: &str,
        target: &str,
    ) -> std::result::Result<Vec<BoundaryWarning>, RetagFailure> {
        let failure = |stage: RetagStage, source: BumpError| RetagFailure {
            tag: tag.to_string(),
            target: target.to_string(),
            stage,
            source,
        };
        let mut warnings = Vec::new();

        self.repo
            .delete_tag(path, tag)
            .map_err(|e| failure(RetagStage::Delete, e))?;

        if let Err(e) = self.repo.delete_remote_tag(path, self.remote, tag) {
            warnings.push(BoundaryWarning::RemoteDeleteFailed {
                tag: tag.to_string(),
                reason: e.to_string(),
            });
        }

        self.repo
            .create_or_force_tag_at(path, tag, target)
            .map_err(|e| failure(RetagStage::Create, e))?;

        self.repo
            .push_tag(path, self.remote, tag)
            .map_err(|e| failure(RetagStage::Push, e))?;

        Ok(warnings)
    }
}
