use crate::error::{BumpError, Result};
use crate::git::{sort_tags_descending, TagRepository};
use git2::{Cred, CredentialType, FetchOptions, PushOptions, RemoteCallbacks, Repository};
use std::path::{Path, PathBuf};

/// Tag backend using libgit2 through the `git2` crate.
///
/// The enclosing repository is discovered from each package path, so one
/// instance serves every package of a shared checkout.
#[derive(Debug, Clone, Default)]
pub struct Git2Repository;

impl Git2Repository {
    pub fn new() -> Self {
        Git2Repository
    }

    /// Discover the repository containing `path`
    fn open(&self, path: &Path) -> Result<Repository> {
        Repository::discover(path).map_err(|e| {
            BumpError::Tag(format!(
                "Not in a git repository ({}): {}",
                path.display(),
                e.message()
            ))
        })
    }
}

/// Candidate private keys, in order of preference
fn ssh_key_paths() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };

    ["id_ed25519", "id_rsa", "id_ecdsa"]
        .iter()
        .map(|name| home.join(".ssh").join(name))
        .filter(|path| path.exists())
        .collect()
}

/// Credential callbacks shared by fetch and push.
///
/// Tries on-disk SSH keys, then the SSH agent, then libgit2's default credentials.
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();

    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            for key_path in ssh_key_paths() {
                if let Ok(cred) = Cred::ssh_key(username, None, &key_path, None) {
                    return Ok(cred);
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        Cred::default()
    });

    callbacks
}

impl TagRepository for Git2Repository {
    fn fetch_tags(&self, path: &Path, remote: &str) -> Result<()> {
        let repo = self.open(path)?;
        let mut remote_handle = repo
            .find_remote(remote)
            .map_err(|e| BumpError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks());

        remote_handle
            .fetch(
                &["+refs/tags/*:refs/tags/*"],
                Some(&mut fetch_options),
                None,
            )
            .map_err(|e| {
                BumpError::remote(format!("Fetching tags from '{}' failed: {}", remote, e))
            })?;

        Ok(())
    }

    fn list_tags_descending(&self, path: &Path) -> Result<Vec<String>> {
        let repo = self.open(path)?;
        let names = repo.tag_names(None)?;

        let mut tags: Vec<String> = names.iter().flatten().map(str::to_string).collect();
        sort_tags_descending(&mut tags);

        Ok(tags)
    }

    fn create_or_force_tag_at(&self, path: &Path, name: &str, target: &str) -> Result<()> {
        let repo = self.open(path)?;
        let commit = resolve_commit(&repo, target)?;

        repo.tag_lightweight(name, commit.as_object(), true)
            .map_err(|e| BumpError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn push_tag(&self, path: &Path, remote: &str, name: &str) -> Result<()> {
        let repo = self.open(path)?;
        let refspec = format!("+refs/tags/{0}:refs/tags/{0}", name);
        push_refspec(&repo, remote, &refspec, name)
    }

    fn tags_containing(&self, path: &Path, rev: &str) -> Result<Vec<String>> {
        let repo = self.open(path)?;
        let base = resolve_commit(&repo, rev)?.id();

        let names = repo.tag_names(None)?;
        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            // Tags pointing at trees or blobs cannot contain a commit
            let Ok(commit) = resolve_commit(&repo, &format!("refs/tags/{}", name)) else {
                continue;
            };
            if commit.id() == base || repo.graph_descendant_of(commit.id(), base)? {
                tags.push(name.to_string());
            }
        }
        sort_tags_descending(&mut tags);

        Ok(tags)
    }

    fn delete_tag(&self, path: &Path, name: &str) -> Result<()> {
        let repo = self.open(path)?;
        repo.tag_delete(name)
            .map_err(|e| BumpError::tag(format!("Cannot delete tag '{}': {}", name, e)))
    }

    fn delete_remote_tag(&self, path: &Path, remote: &str, name: &str) -> Result<()> {
        let repo = self.open(path)?;
        let refspec = format!(":refs/tags/{}", name);
        push_refspec(&repo, remote, &refspec, name)
    }
}

/// Peel a revision (`HEAD`, `HEAD~1`, a tag ref, an object id) to its commit
fn resolve_commit<'r>(repo: &'r Repository, rev: &str) -> Result<git2::Commit<'r>> {
    repo.revparse_single(rev)
        .and_then(|object| object.peel_to_commit())
        .map_err(|e| BumpError::tag(format!("Cannot resolve '{}' to a commit: {}", rev, e)))
}

/// Push one refspec, turning per-ref rejections into errors
fn push_refspec(repo: &Repository, remote: &str, refspec: &str, name: &str) -> Result<()> {
    let mut remote_handle = repo
        .find_remote(remote)
        .map_err(|e| BumpError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

    let mut callbacks = remote_callbacks();
    // The server reports per-ref rejections here rather than failing push()
    callbacks.push_update_reference(|refname, status| match status {
        Some(message) => Err(git2::Error::from_str(&format!(
            "remote rejected {}: {}",
            refname, message
        ))),
        None => Ok(()),
    });

    let mut push_options = PushOptions::new();
    push_options.remote_callbacks(callbacks);

    remote_handle
        .push(&[refspec], Some(&mut push_options))
        .map_err(|e| match e.class() {
            git2::ErrorClass::Net => {
                BumpError::remote(format!("Network error pushing '{}': {}", name, e))
            }
            _ => BumpError::remote(format!("Failed to push tag '{}': {}", name, e)),
        })?;

    Ok(())
}
