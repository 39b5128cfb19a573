//! Shared fixtures: a working copy with a `packages/` directory and a bare
//! `origin` remote, both created with git2 inside a temp dir.

#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Fixture {
    pub work: Repository,
    pub remote: Repository,
    pub dir: TempDir,
}

impl Fixture {
    /// Working copy with one commit containing `packages/<name>/README.md` per package
    pub fn new(packages: &[&str]) -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let remote_path = dir.path().join("remote.git");
        let work_path = dir.path().join("work");

        let remote = Repository::init_bare(&remote_path).expect("Could not init bare remote");
        let work = Repository::init(&work_path).expect("Could not init working copy");

        for name in packages {
            let package_dir = work_path.join("packages").join(name);
            fs::create_dir_all(&package_dir).expect("Could not create package dir");
            fs::write(package_dir.join("README.md"), format!("# {}\n", name))
                .expect("Could not write package file");
        }

        {
            let mut index = work.index().expect("Could not get index");
            for name in packages {
                index
                    .add_path(&Path::new("packages").join(name).join("README.md"))
                    .expect("Could not add file to index");
            }
            index.write().expect("Could not write index");
            let tree_id = index.write_tree().expect("Could not write tree");
            let tree = work.find_tree(tree_id).expect("Could not find tree");
            let sig = Signature::now("Test User", "test@example.com").expect("Could not get sig");
            work.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .expect("Could not create commit");
        }

        work.remote("origin", remote_path.to_str().expect("utf-8 temp path"))
            .expect("Could not add origin");

        Fixture { work, remote, dir }
    }

    pub fn work_path(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    pub fn packages_root(&self) -> PathBuf {
        self.work_path().join("packages")
    }

    /// Create a tag in the working copy and push it to origin, then drop the
    /// local copy so only a fetch can bring it back
    pub fn seed_remote_tag(&self, name: &str) {
        let head = self
            .work
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Could not resolve HEAD");
        self.work
            .tag_lightweight(name, head.as_object(), false)
            .expect("Could not create tag");

        let mut origin = self.work.find_remote("origin").expect("Could not find origin");
        let refspec = format!("refs/tags/{0}:refs/tags/{0}", name);
        origin
            .push(&[refspec.as_str()], None)
            .expect("Could not push seed tag");

        self.work.tag_delete(name).expect("Could not delete local tag");
    }

    /// Add an empty commit on top of HEAD
    pub fn commit(&self, message: &str) -> Oid {
        let parent = self
            .work
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Could not resolve HEAD");
        let tree = parent.tree().expect("Could not get tree");
        let sig = Signature::now("Test User", "test@example.com").expect("Could not get sig");
        self.work
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
            .expect("Could not create commit")
    }

    pub fn head_id(&self) -> Oid {
        self.work
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.id())
            .expect("Could not resolve HEAD")
    }

    /// Commit the remote's tag points at, if the remote has it
    pub fn remote_tag_target(&self, name: &str) -> Option<Oid> {
        self.remote
            .find_reference(&format!("refs/tags/{}", name))
            .and_then(|r| r.peel_to_commit())
            .map(|c| c.id())
            .ok()
    }

    pub fn remote_has_tag(&self, name: &str) -> bool {
        self.remote
            .find_reference(&format!("refs/tags/{}", name))
            .is_ok()
    }

    pub fn local_has_tag(&self, name: &str) -> bool {
        self.work
            .find_reference(&format!("refs/tags/{}", name))
            .is_ok()
    }
}

/// Whether a usable `git` executable is on PATH
pub fn system_git_available() -> bool {
    std::process::Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
