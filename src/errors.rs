//! src/errors.rs

use std::process::ExitCode;
use thiserror::Error;

/// Failures the commit workflow can end in.
///
/// Operations return `anyhow::Result` and attach context as they go; the
/// variant at the root of the chain decides the process exit code.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Please set {var} environment variable")]
    MissingApiKey { var: &'static str },

    #[error("Invalid configuration in {path}: {reason}")]
    InvalidConfig { path: String, reason: String },

    #[error("git executable not found in PATH")]
    GitNotFound(#[source] which::Error),

    #[error("Not a git repository (or any of the parent directories)")]
    NotARepository,

    #[error("`git {command}` failed with {status}:\n{stderr}")]
    Git {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Editor `{editor}` failed: {reason}")]
    Editor { editor: String, reason: String },

    #[error("Request to the API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API error: {status} - {body}")]
    ApiStatus { status: String, body: String },

    #[error("Could not decode API response: {0}")]
    MalformedResponse(#[source] reqwest::Error),

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("{0}")]
    Cancelled(String),
}

/// Broad class of a failure, one per exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Tool,
    Transport,
    Cancelled,
}

impl CommitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommitError::MissingApiKey { .. } | CommitError::InvalidConfig { .. } => {
                ErrorKind::Config
            }
            CommitError::GitNotFound(_)
            | CommitError::NotARepository
            | CommitError::Git { .. }
            | CommitError::Editor { .. } => ErrorKind::Tool,
            CommitError::Transport(_)
            | CommitError::ApiStatus { .. }
            | CommitError::MalformedResponse(_)
            | CommitError::EmptyResponse => ErrorKind::Transport,
            CommitError::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl ErrorKind {
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::Config => 2,
            ErrorKind::Tool => 3,
            ErrorKind::Transport => 4,
            ErrorKind::Cancelled => 5,
        }
    }
}

/// Exit status of the first typed cause in the chain.
/// Untyped failures (plain I/O and the like) exit with 1.
pub fn exit_status_for(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CommitError>())
        .map(|e| e.kind().code())
        .unwrap_or(1)
}

pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    ExitCode::from(exit_status_for(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn typed_cause_survives_added_context() {
        let err = Err::<(), _>(CommitError::Cancelled("edit cancelled".into()))
            .context("Error editing message")
            .unwrap_err();
        assert_eq!(exit_status_for(&err), 5);
    }

    #[test]
    fn untyped_errors_exit_with_one() {
        let err = anyhow::anyhow!("disk full");
        assert_eq!(exit_status_for(&err), 1);
    }

    #[test]
    fn categories_have_distinct_codes() {
        assert_eq!(CommitError::MissingApiKey { var: "X" }.kind().code(), 2);
        assert_eq!(CommitError::NotARepository.kind().code(), 3);
        assert_eq!(CommitError::EmptyResponse.kind().code(), 4);
        assert_eq!(CommitError::Cancelled(String::new()).kind().code(), 5);
    }
}
