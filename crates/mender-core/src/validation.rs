use crate::error::{PatchError, PipelineError};
use crate::types::{ChangeKind, CodeChange, ReviewFeedbackRequest};

/// Checks the shape invariants of a change before any file is touched.
pub fn validate_code_change(change: &CodeChange) -> Result<(), PatchError> {
    match change.change_type {
        ChangeKind::Replace => {
            require(
                change.start_line.is_some() && change.end_line.is_some(),
                "replace requires start_line and end_line",
            )?;
            require(change.new_code.is_some(), "replace requires new_code")?;
        }
        ChangeKind::Insert => {
            require(change.start_line.is_some(), "insert requires start_line")?;
            require(change.new_code.is_some(), "insert requires new_code")?;
        }
        ChangeKind::Delete => {
            require(
                change.start_line.is_some() && change.end_line.is_some(),
                "delete requires start_line and end_line",
            )?;
        }
        // Reported by the executor as an unsupported change type.
        ChangeKind::Unsupported => {}
    }

    if let Some(start) = change.start_line {
        require(start >= 1, "start_line must be 1-indexed")?;
    }
    if let (Some(start), Some(end)) = (change.start_line, change.end_line) {
        require(start <= end, "start_line must not exceed end_line")?;
    }
    Ok(())
}

pub fn validate_request(request: &ReviewFeedbackRequest) -> Result<(), PipelineError> {
    if request
        .project
        .as_deref()
        .is_none_or(|project| project.trim().is_empty())
    {
        return Err(PipelineError::MissingProject);
    }
    if request.selector.is_none() {
        return Err(PipelineError::MissingSelector);
    }
    Ok(())
}

fn require(condition: bool, message: &str) -> Result<(), PatchError> {
    if condition {
        Ok(())
    } else {
        Err(PatchError::InvalidChange {
            message: message.to_string(),
        })
    }
}
