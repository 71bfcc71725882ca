use crate::error::ClassifyError;
use crate::types::{CommentAnalysis, MergeRequest, MergeRequestDiff, Note, ThreadMetadata};

/// Everything the classifier gets to see besides the note itself.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub merge_request: &'a MergeRequest,
    /// Diff context; empty when the diff fetch degraded.
    pub diffs: &'a [MergeRequestDiff],
    /// All notes of the note's discussion, in thread order.
    pub thread_notes: &'a [Note],
    pub thread_metadata: &'a ThreadMetadata,
}

/// The comment-classification collaborator. Its reasoning is opaque here;
/// this crate only consumes the `CommentAnalysis` it returns.
#[allow(async_fn_in_trait)]
pub trait CommentClassifier {
    async fn analyze_comment(
        &self,
        note: &Note,
        context: &AnalysisContext<'_>,
    ) -> Result<CommentAnalysis, ClassifyError>;
}
