//! System git backend
//!
//! Runs one `git -C <package>` subprocess per operation. The child gets an
//! isolated environment and a few forced config overrides so that user
//! configuration cannot change tag ordering or output.

use crate::error::{BumpError, Result};
use crate::git::TagRepository;
use std::path::Path;
use std::process::Command;

/// Variables passed through to git; everything else is cleared.
///
/// Besides PATH and HOME this keeps what remote access needs: SSH agent and
/// command, credential prompts, proxies, and XDG config for credential helpers.
const INHERITED_ENV: &[&str] = &[
    "PATH",
    "HOME",
    "XDG_CONFIG_HOME",
    "SSH_AUTH_SOCK",
    "GIT_SSH_COMMAND",
    "GIT_ASKPASS",
    "SSH_ASKPASS",
    "HTTPS_PROXY",
    "https_proxy",
    "HTTP_PROXY",
    "http_proxy",
    "ALL_PROXY",
    "all_proxy",
    "NO_PROXY",
    "no_proxy",
];

/// Tag backend using the system `git` executable
#[derive(Debug, Clone, Default)]
pub struct SystemGit;

impl SystemGit {
    pub fn new() -> Self {
        SystemGit
    }

    /// Create a git command rooted at `path` with an isolated environment
    fn git_cmd(&self, path: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(path);

        cmd.env_clear();
        for key in INHERITED_ENV {
            if let Ok(value) = std::env::var(key) {
                cmd.env(key, value);
            }
        }

        // "1.0.0-rc.1" sorts below "1.0.0" under -v:refname
        cmd.arg("-c").arg("versionsort.suffix=-");
        cmd.arg("-c").arg("core.quotePath=false");

        cmd
    }

    /// Run git with `args` and return trimmed stdout
    fn run(&self, path: &Path, args: &[&str]) -> Result<String> {
        let command_line = format!("git {}", args.join(" "));

        let output = self.git_cmd(path).args(args).output().map_err(|e| {
            BumpError::command(command_line.clone(), format!("failed to spawn git: {}", e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BumpError::command(command_line, stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl TagRepository for SystemGit {
    fn fetch_tags(&self, path: &Path, remote: &str) -> Result<()> {
        self.run(path, &["fetch", remote, "--tags", "--force", "--quiet"])?;
        Ok(())
    }

    fn list_tags_descending(&self, path: &Path) -> Result<Vec<String>> {
        let stdout = self.run(path, &["tag", "--list", "--sort=-v:refname"])?;
        Ok(lines(&stdout))
    }

    fn create_or_force_tag_at(&self, path: &Path, name: &str, target: &str) -> Result<()> {
        self.run(path, &["tag", "--force", name, target])?;
        Ok(())
    }

    fn push_tag(&self, path: &Path, remote: &str, name: &str) -> Result<()> {
        let refspec = format!("refs/tags/{}", name);
        self.run(path, &["push", "--force", "--quiet", remote, &refspec])?;
        Ok(())
    }

    fn tags_containing(&self, path: &Path, rev: &str) -> Result<Vec<String>> {
        let contains = format!("--contains={}", rev);
        let stdout = self.run(path, &["tag", "--list", "--sort=-v:refname", &contains])?;
        Ok(lines(&stdout))
    }

    fn delete_tag(&self, path: &Path, name: &str) -> Result<()> {
        self.run(path, &["tag", "--delete", name])?;
        Ok(())
    }

    fn delete_remote_tag(&self, path: &Path, remote: &str, name: &str) -> Result<()> {
        let refspec = format!(":refs/tags/{}", name);
        self.run(path, &["push", "--quiet", remote, &refspec])?;
        Ok(())
    }
}

/// Non-empty trimmed lines of git output
fn lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
