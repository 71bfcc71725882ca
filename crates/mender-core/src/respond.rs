use crate::error::RespondError;
use crate::types::{AutoResponseOutcome, CommentAnalysis, MergeRequest};

/// Optional sibling pipeline that posts replies for the filtered analysis
/// set. Its failures are logged and never affect the fix pipeline.
#[allow(async_fn_in_trait)]
pub trait AutoResponder {
    async fn respond(
        &self,
        merge_request: &MergeRequest,
        analyses: &[CommentAnalysis],
    ) -> Result<AutoResponseOutcome, RespondError>;
}

/// Placeholder responder for pipelines constructed without one.
pub struct DisabledAutoResponder;

impl AutoResponder for DisabledAutoResponder {
    async fn respond(
        &self,
        _merge_request: &MergeRequest,
        _analyses: &[CommentAnalysis],
    ) -> Result<AutoResponseOutcome, RespondError> {
        Ok(AutoResponseOutcome::default())
    }
}
