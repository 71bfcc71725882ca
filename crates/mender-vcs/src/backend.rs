use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("repo not found")]
    RepoNotFound,
    #[error("detached head")]
    DetachedHead,
    #[error("backend error: {reason}")]
    BackendError { reason: String },
}

/// Read-only questions the remediation engine asks about a working tree.
///
/// Callers treat every error as "unsafe to modify" and skip the fix phase.
pub trait WorktreeInspector {
    fn current_branch(&self, workdir: &Path) -> Result<String, VcsError>;
    fn has_uncommitted_changes(&self, workdir: &Path) -> Result<bool, VcsError>;
}
