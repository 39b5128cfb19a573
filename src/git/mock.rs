use crate::error::{BumpError, Result};
use crate::git::{sort_tags_descending, TagRepository};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Operations a [MockRepository] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    Fetch,
    List,
    Create,
    Push,
    Contains,
    Delete,
    DeleteRemote,
}

/// Mock repository for testing without actual git operations.
///
/// Models one shared checkout: local tags, tags that exist only on the remote
/// (copied in by `fetch_tags`), and a record of every tag created, pushed and
/// deleted. History is not modelled; `tags_containing` answers from a table
/// filled with [MockRepository::set_tags_containing].
#[derive(Debug, Default)]
pub struct MockRepository {
    local_tags: RefCell<Vec<String>>,
    remote_tags: RefCell<Vec<String>>,
    created: RefCell<Vec<(PathBuf, String)>>,
    pushed: RefCell<Vec<(String, String)>>,
    remote_deleted: RefCell<Vec<(String, String)>>,
    targets: RefCell<HashMap<String, String>>,
    containing: HashMap<String, Vec<String>>,
    failures: HashSet<(MockOperation, Option<PathBuf>)>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag that already exists in the local checkout
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.local_tags.get_mut().push(name.into());
    }

    /// Add a tag that only exists on the remote until fetched
    pub fn add_remote_tag(&mut self, name: impl Into<String>) {
        self.remote_tags.get_mut().push(name.into());
    }

    /// Declare which tags contain revision `rev`
    pub fn set_tags_containing(&mut self, rev: impl Into<String>, tags: &[&str]) {
        self.containing
            .insert(rev.into(), tags.iter().map(|t| t.to_string()).collect());
    }

    /// Make `operation` fail for every path
    pub fn fail(&mut self, operation: MockOperation) {
        self.failures.insert((operation, None));
    }

    /// Make `operation` fail only for `path`
    pub fn fail_for(&mut self, operation: MockOperation, path: impl Into<PathBuf>) {
        self.failures.insert((operation, Some(path.into())));
    }

    /// Tags created so far, with the package path they were created from
    pub fn created_tags(&self) -> Vec<(PathBuf, String)> {
        self.created.borrow().clone()
    }

    /// Tags pushed so far, as (remote, tag) pairs
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }

    /// Tags deleted on a remote so far, as (remote, tag) pairs
    pub fn remote_deleted_tags(&self) -> Vec<(String, String)> {
        self.remote_deleted.borrow().clone()
    }

    /// Revision the tag was last created at
    pub fn tag_target(&self, name: &str) -> Option<String> {
        self.targets.borrow().get(name).cloned()
    }

    pub fn local_tags(&self) -> Vec<String> {
        self.local_tags.borrow().clone()
    }

    pub fn remote_tags(&self) -> Vec<String> {
        self.remote_tags.borrow().clone()
    }

    fn check(&self, operation: MockOperation, path: &Path) -> Result<()> {
        if self.failures.contains(&(operation, None))
            || self
                .failures
                .contains(&(operation, Some(path.to_path_buf())))
        {
            return Err(BumpError::command(
                format!("mock {:?}", operation).to_lowercase(),
                format!("injected failure for {}", path.display()),
            ));
        }
        Ok(())
    }
}

impl TagRepository for MockRepository {
    fn fetch_tags(&self, path: &Path, _remote: &str) -> Result<()> {
        self.check(MockOperation::Fetch, path)?;

        let mut local = self.local_tags.borrow_mut();
        for tag in self.remote_tags.borrow().iter() {
            if !local.contains(tag) {
                local.push(tag.clone());
            }
        }
        Ok(())
    }

    fn list_tags_descending(&self, path: &Path) -> Result<Vec<String>> {
        self.check(MockOperation::List, path)?;

        let mut tags = self.local_tags.borrow().clone();
        sort_tags_descending(&mut tags);
        Ok(tags)
    }

    fn create_or_force_tag_at(&self, path: &Path, name: &str, target: &str) -> Result<()> {
        self.check(MockOperation::Create, path)?;

        let mut local = self.local_tags.borrow_mut();
        if !local.iter().any(|t| t == name) {
            local.push(name.to_string());
        }
        self.created
            .borrow_mut()
            .push((path.to_path_buf(), name.to_string()));
        self.targets
            .borrow_mut()
            .insert(name.to_string(), target.to_string());
        Ok(())
    }

    fn push_tag(&self, path: &Path, remote: &str, name: &str) -> Result<()> {
        self.check(MockOperation::Push, path)?;

        let mut remote_tags = self.remote_tags.borrow_mut();
        if !remote_tags.iter().any(|t| t == name) {
            remote_tags.push(name.to_string());
        }
        self.pushed
            .borrow_mut()
            .push((remote.to_string(), name.to_string()));
        Ok(())
    }

    fn tags_containing(&self, path: &Path, rev: &str) -> Result<Vec<String>> {
        self.check(MockOperation::Contains, path)?;

        let candidates = self
            .containing
            .get(rev)
            .ok_or_else(|| BumpError::tag(format!("Cannot resolve '{}' to a commit", rev)))?;
        let local = self.local_tags.borrow();
        let mut tags: Vec<String> = candidates
            .iter()
            .filter(|t| local.contains(t))
            .cloned()
            .collect();
        sort_tags_descending(&mut tags);
        Ok(tags)
    }

    fn delete_tag(&self, path: &Path, name: &str) -> Result<()> {
        self.check(MockOperation::Delete, path)?;

        let mut local = self.local_tags.borrow_mut();
        let before = local.len();
        local.retain(|t| t != name);
        if local.len() == before {
            return Err(BumpError::tag(format!("tag '{}' not found", name)));
        }
        Ok(())
    }

    fn delete_remote_tag(&self, path: &Path, remote: &str, name: &str) -> Result<()> {
        self.check(MockOperation::DeleteRemote, path)?;

        let mut remote_tags = self.remote_tags.borrow_mut();
        let before = remote_tags.len();
        remote_tags.retain(|t| t != name);
        if remote_tags.len() == before {
            return Err(BumpError::remote(format!(
                "unable to delete '{}': remote ref does not exist",
                name
            )));
        }
        self.remote_deleted
            .borrow_mut()
            .push((remote.to_string(), name.to_string()));
        Ok(())
    }
}
