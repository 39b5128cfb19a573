//! Version-control abstraction layer
//!
//! The [TagRepository] trait covers the tag operations tag-bump needs: the
//! fetch/list/create/push cycle of a bump, and the lookup and delete
//! operations used when moving tags to another commit.
//! Implementations:
//!
//! - [system::SystemGit]: shells out to the `git` command line
//! - [repository::Git2Repository]: uses the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for testing
//!
//! Every operation takes the package path; backends resolve the enclosing
//! repository from it, so packages may live anywhere inside a shared checkout.
//!
//! ```rust
//! # use tag_bump::git::TagRepository;
//! # use std::path::Path;
//! # fn example<R: TagRepository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let path = Path::new("packages/libA");
//! repo.fetch_tags(path, "origin")?;
//! let newest_first = repo.list_tags_descending(path)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;
pub mod system;

pub use mock::MockRepository;
pub use repository::Git2Repository;
pub use system::SystemGit;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Tag operations against a working copy and its remote
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map their
/// underlying failures (`git2::Error`, non-zero exit status) to
/// [crate::error::BumpError] variants; callers decide whether a failure is soft.
pub trait TagRepository {
    /// Fetch all tags from `remote` into the repository containing `path`
    fn fetch_tags(&self, path: &Path, remote: &str) -> Result<()>;

    /// List every tag of the repository containing `path`, highest version first
    fn list_tags_descending(&self, path: &Path) -> Result<Vec<String>>;

    /// Create `name` at the current commit, replacing an existing tag of that name
    fn create_or_force_tag(&self, path: &Path, name: &str) -> Result<()> {
        self.create_or_force_tag_at(path, name, "HEAD")
    }

    /// Create `name` at the commit `target` resolves to, replacing an existing tag
    fn create_or_force_tag_at(&self, path: &Path, name: &str, target: &str) -> Result<()>;

    /// Force-push tag `name` to `remote`
    fn push_tag(&self, path: &Path, remote: &str, name: &str) -> Result<()>;

    /// Tags whose commit is `rev` or a descendant of it, highest version first
    fn tags_containing(&self, path: &Path, rev: &str) -> Result<Vec<String>>;

    /// Delete the local tag `name`
    fn delete_tag(&self, path: &Path, name: &str) -> Result<()>;

    /// Delete tag `name` on `remote`
    fn delete_remote_tag(&self, path: &Path, remote: &str, name: &str) -> Result<()>;
}

impl<R: TagRepository + ?Sized> TagRepository for Box<R> {
    fn fetch_tags(&self, path: &Path, remote: &str) -> Result<()> {
        (**self).fetch_tags(path, remote)
    }

    fn list_tags_descending(&self, path: &Path) -> Result<Vec<String>> {
        (**self).list_tags_descending(path)
    }

    fn create_or_force_tag(&self, path: &Path, name: &str) -> Result<()> {
        (**self).create_or_force_tag(path, name)
    }

    fn create_or_force_tag_at(&self, path: &Path, name: &str, target: &str) -> Result<()> {
        (**self).create_or_force_tag_at(path, name, target)
    }

    fn push_tag(&self, path: &Path, remote: &str, name: &str) -> Result<()> {
        (**self).push_tag(path, remote, name)
    }

    fn tags_containing(&self, path: &Path, rev: &str) -> Result<Vec<String>> {
        (**self).tags_containing(path, rev)
    }

    fn delete_tag(&self, path: &Path, name: &str) -> Result<()> {
        (**self).delete_tag(path, name)
    }

    fn delete_remote_tag(&self, path: &Path, remote: &str, name: &str) -> Result<()> {
        (**self).delete_remote_tag(path, remote, name)
    }
}

/// Which [TagRepository] implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// System `git` command line
    #[default]
    Git,
    /// libgit2 via the `git2` crate
    Git2,
}

impl FromStr for Backend {
    type Err = crate::error::BumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "git" => Ok(Backend::Git),
            "git2" | "libgit2" => Ok(Backend::Git2),
            other => Err(crate::error::BumpError::config(format!(
                "Unknown backend '{}' - expected 'git' or 'git2'",
                other
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Git => write!(f, "git"),
            Backend::Git2 => write!(f, "git2"),
        }
    }
}

/// Open the configured backend
pub fn open_backend(backend: Backend) -> Box<dyn TagRepository> {
    match backend {
        Backend::Git => Box::new(SystemGit::new()),
        Backend::Git2 => Box::new(Git2Repository::new()),
    }
}

/// Sort tag names highest version first.
///
/// The version is whatever follows the last '@' (or the whole name). Names whose
/// version parses as semver come first, ordered by semver precedence, so a
/// pre-release sorts below its final release. The rest follow in reverse name
/// order.
pub fn sort_tags_descending(tags: &mut [String]) {
    fn version_of(tag: &str) -> Option<semver::Version> {
        let local = tag.rsplit_once('@').map(|(_, v)| v).unwrap_or(tag);
        semver::Version::parse(local).ok()
    }

    tags.sort_by(|a, b| match (version_of(a), version_of(b)) {
        (Some(va), Some(vb)) => vb.cmp(&va).then_with(|| b.cmp(a)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    });
}
