use crate::error::PatchError;
use crate::types::{ChangeKind, CodeChange};
use crate::validation::validate_code_change;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// What one fix did to the working tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Distinct files touched, in first-touch order.
    pub files: Vec<PathBuf>,
    pub changes_applied: usize,
}

/// Applies one fix's changes strictly in listed order. Each change is a
/// separate read-modify-write of its file. The first failure stops the
/// sequence; changes already written stay on disk.
pub fn apply_changes(workdir: &Path, changes: &[CodeChange]) -> Result<PatchOutcome, PatchError> {
    let mut outcome = PatchOutcome {
        files: Vec::new(),
        changes_applied: 0,
    };
    for change in changes {
        let path = apply_change(workdir, change)?;
        if !outcome.files.contains(&path) {
            outcome.files.push(path);
        }
        outcome.changes_applied += 1;
    }
    Ok(outcome)
}

fn apply_change(workdir: &Path, change: &CodeChange) -> Result<PathBuf, PatchError> {
    validate_code_change(change)?;
    let path = workdir.join(&change.file_path);
    if !path.exists() {
        return Err(PatchError::FileMissing { path });
    }
    let content = fs::read_to_string(&path).map_err(|source| PatchError::Io {
        path: path.clone(),
        source,
    })?;

    // Newline-delimited split with no normalization: a trailing newline
    // surfaces as a trailing empty element, so join() is byte-exact.
    let mut lines: Vec<&str> = content.split('\n').collect();

    match change.change_type {
        ChangeKind::Replace => {
            let (start, end) = line_range(change, lines.len())?;
            if let Some(expected) = change.original_code.as_deref() {
                let current = lines[start - 1..end].join("\n");
                if current.trim() != expected.trim() {
                    return Err(PatchError::PreImageMismatch {
                        path,
                        start_line: start as u32,
                        end_line: end as u32,
                    });
                }
            }
            let new_code = change.new_code.as_deref().unwrap_or_default();
            lines.splice(start - 1..end, new_code.split('\n'));
        }
        ChangeKind::Insert => {
            let start = change.start_line.unwrap_or(1) as usize;
            if start > lines.len() + 1 {
                return Err(PatchError::InvalidChange {
                    message: format!(
                        "insert position {start} is beyond the end of the file ({} lines)",
                        lines.len()
                    ),
                });
            }
            let new_code = change.new_code.as_deref().unwrap_or_default();
            lines.splice(start - 1..start - 1, new_code.split('\n'));
        }
        ChangeKind::Delete => {
            let (start, end) = line_range(change, lines.len())?;
            lines.splice(start - 1..end, std::iter::empty());
        }
        ChangeKind::Unsupported => return Err(PatchError::UnsupportedChangeType),
    }

    let updated = lines.join("\n");
    fs::write(&path, updated).map_err(|source| PatchError::Io {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), kind = ?change.change_type, "applied change");
    Ok(path)
}

/// Validated 1-based inclusive range for replace and delete.
fn line_range(change: &CodeChange, line_count: usize) -> Result<(usize, usize), PatchError> {
    let start = change.start_line.unwrap_or(1) as usize;
    let end = change.end_line.unwrap_or(1) as usize;
    if end > line_count {
        return Err(PatchError::InvalidChange {
            message: format!(
                "line range {start}-{end} is out of bounds (file has {line_count} lines)"
            ),
        });
    }
    Ok((start, end))
}
