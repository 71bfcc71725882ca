use crate::classify::{AnalysisContext, CommentClassifier};
use crate::threads::TriagedNote;
use crate::types::{
    BatchPolicy, CommentAnalysis, Discussion, DiscussionId, MergeRequest, MergeRequestDiff, Note,
};
use futures::future::join_all;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Zero-based slice of the actionable-note list to analyze in one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindow {
    pub offset: usize,
    pub max_comments: usize,
}

impl AnalysisWindow {
    pub fn slice<'a>(&self, notes: &'a [TriagedNote]) -> &'a [TriagedNote] {
        let start = self.offset.min(notes.len());
        let end = start.saturating_add(self.max_comments).min(notes.len());
        &notes[start..end]
    }
}

/// Analyzes the selected window in fixed-size batches. Batches run strictly
/// in order with a pacing delay between batch starts; within a batch all
/// calls are issued concurrently and collected with index-preserving
/// fan-in, so output order always matches input order.
///
/// A single note's failure never aborts the batch: it is replaced by a
/// degraded record carrying the original thread metadata.
pub async fn analyze_in_batches<C: CommentClassifier>(
    classifier: &C,
    merge_request: &MergeRequest,
    diffs: &[MergeRequestDiff],
    notes: &[TriagedNote],
    discussions: &[Discussion],
    window: AnalysisWindow,
    policy: &BatchPolicy,
) -> Vec<CommentAnalysis> {
    let threads: HashMap<&DiscussionId, &[Note]> = discussions
        .iter()
        .map(|discussion| (&discussion.id, discussion.notes.as_slice()))
        .collect();

    let selected = window.slice(notes);
    let batch_size = policy.batch_size.max(1);
    let mut analyses = Vec::with_capacity(selected.len());

    for (batch_index, batch) in selected.chunks(batch_size).enumerate() {
        if batch_index > 0 {
            tokio::time::sleep(policy.inter_batch_delay()).await;
        }
        debug!(batch = batch_index, notes = batch.len(), "analyzing batch");

        let batch_results = join_all(batch.iter().map(|item| {
            let thread_notes = threads
                .get(&item.metadata.discussion_id)
                .copied()
                .unwrap_or(&[]);
            async move {
                let context = AnalysisContext {
                    merge_request,
                    diffs,
                    thread_notes,
                    thread_metadata: &item.metadata,
                };
                match classifier.analyze_comment(&item.note, &context).await {
                    Ok(analysis) => analysis,
                    Err(err) => {
                        warn!(note = %item.note.id, error = %err, "comment analysis failed");
                        CommentAnalysis::degraded(&item.note, item.metadata.clone(), err.to_string())
                    }
                }
            }
        }))
        .await;

        analyses.extend(batch_results);
    }

    analyses
}
