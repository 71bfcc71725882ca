use std::path::PathBuf;
use thiserror::Error;

/// Upstream fetch failures (discussions, diffs, merge-request lookup).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("project not found: {project}")]
    ProjectNotFound { project: String },
    #[error("request failed: {reason}")]
    RequestFailed { reason: String },
}

/// Per-note classification failures. Recovered locally into a degraded
/// analysis record; never propagated past the scheduler.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("provider unavailable")]
    ProviderUnavailable,
    #[error("timeout")]
    Timeout,
    #[error("invalid output: {message}")]
    InvalidOutput { message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Sibling auto-response pipeline failures. Caught and logged, never
/// surfaced to the caller.
#[derive(Debug, Error)]
pub enum RespondError {
    #[error("auto-response failed: {reason}")]
    Failed { reason: String },
}

/// File patch failures. Recovered per fix; later fixes still proceed.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("file does not exist: {path}")]
    FileMissing { path: PathBuf },
    #[error("original code mismatch at {path}:{start_line}-{end_line}")]
    PreImageMismatch {
        path: PathBuf,
        start_line: u32,
        end_line: u32,
    },
    #[error("invalid change: {message}")]
    InvalidChange { message: String },
    #[error("unsupported change type")]
    UnsupportedChangeType,
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Conditions that make a whole orchestration run meaningless. Everything
/// else degrades into structured result fields instead of raising.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("missing project identifier")]
    MissingProject,
    #[error("missing merge request selector")]
    MissingSelector,
    #[error("merge request not found")]
    MergeRequestNotFound,
    #[error("failed to fetch discussions: {reason}")]
    DiscussionFetch { reason: String },
    #[error(transparent)]
    Source(#[from] SourceError),
}
