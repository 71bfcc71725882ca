use crate::backend::{VcsError, WorktreeInspector};
use std::path::Path;

pub struct GitInspector;

impl WorktreeInspector for GitInspector {
    fn current_branch(&self, workdir: &Path) -> Result<String, VcsError> {
        let repo = open_repo(workdir)?;
        let head = repo.head_name().map_err(map_backend_error("head name"))?;
        let name = head.ok_or(VcsError::DetachedHead)?;
        Ok(name.shorten().to_string())
    }

    fn has_uncommitted_changes(&self, workdir: &Path) -> Result<bool, VcsError> {
        let repo = open_repo(workdir)?;
        let dirty = repo
            .status(gix::progress::Discard)
            .map_err(map_backend_error("status"))?
            .index_worktree_rewrites(None)
            .index_worktree_submodules(gix::status::Submodule::AsConfigured { check_dirty: true })
            .into_index_worktree_iter(Vec::new())
            .map_err(map_backend_error("status iter"))?
            .take_while(Result::is_ok)
            .next()
            .is_some();
        Ok(dirty)
    }
}

fn open_repo(workdir: &Path) -> Result<gix::Repository, VcsError> {
    gix::discover(workdir).map_err(|_| VcsError::RepoNotFound)
}

fn map_backend_error<E: std::fmt::Display>(context: &'static str) -> impl Fn(E) -> VcsError {
    move |err| VcsError::BackendError {
        reason: format!("{context}: {err}"),
    }
}
