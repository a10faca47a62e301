//! src/git.rs

use crate::errors::CommitError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// The version-control operations the commit workflow needs.
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Fails unless the working directory is inside a repository.
    async fn ensure_repository(&self) -> Result<()>;
    /// Staged changes, or every tracked change when `all` is set.
    async fn diff(&self, all: bool) -> Result<String>;
    /// Records a commit with `message`; `all` mirrors `git commit -a`.
    async fn commit(&self, message: &str, all: bool) -> Result<()>;
}

/// `VersionControl` backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Finds `git` on PATH.
    pub fn locate() -> Result<Self> {
        let program = which::which("git").map_err(CommitError::GitNotFound)?;
        log::debug!("using git at {}", program.display());
        Ok(Self {
            program,
            workdir: None,
        })
    }

    /// Runs every command in `dir` instead of the process working directory.
    #[cfg(test)]
    pub fn in_dir(mut self, dir: impl AsRef<std::path::Path>) -> Self {
        self.workdir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub async fn run_git_command(&self, args: &[&str]) -> Result<String> {
        log::debug!("git {}", args.join(" "));
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .await
            .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(CommitError::Git {
                command: args.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into())
        }
    }
}

pub fn diff_args(all: bool) -> Vec<&'static str> {
    if all {
        vec!["diff"]
    } else {
        vec!["diff", "--cached"]
    }
}

pub fn commit_args(message: &str, all: bool) -> Vec<&str> {
    let mut args = vec!["commit"];
    if all {
        args.push("-a");
    }
    args.extend(["-m", message]);
    args
}

/// Only git's own "not a git repository" complaint becomes `NotARepository`;
/// anything else (dubious ownership, corrupt index) keeps its stderr.
fn classify_rev_parse_failure(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<CommitError>() {
        Some(CommitError::Git { stderr, .. })
            if stderr.to_lowercase().contains("not a git repository") =>
        {
            CommitError::NotARepository.into()
        }
        _ => err,
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn ensure_repository(&self) -> Result<()> {
        match self
            .run_git_command(&["rev-parse", "--is-inside-work-tree"])
            .await
        {
            Ok(out) if out.trim() == "true" => Ok(()),
            Ok(_) => Err(CommitError::NotARepository.into()),
            Err(e) => Err(classify_rev_parse_failure(e)),
        }
    }

    async fn diff(&self, all: bool) -> Result<String> {
        self.run_git_command(&diff_args(all))
            .await
            .context("error getting diff")
    }

    async fn commit(&self, message: &str, all: bool) -> Result<()> {
        self.run_git_command(&commit_args(message, all))
            .await
            .context("Error making commit")?;
        Ok(())
    }
}
