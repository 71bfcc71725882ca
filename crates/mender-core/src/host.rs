use crate::error::SourceError;
use crate::types::{Discussion, MergeRequest, MergeRequestDiff};

/// The review platform this pipeline reads from. Transport, retries and
/// authentication live behind this boundary.
#[allow(async_fn_in_trait)]
pub trait MergeRequestHost {
    async fn merge_request_by_iid(
        &self,
        project: &str,
        iid: u64,
    ) -> Result<Option<MergeRequest>, SourceError>;

    async fn merge_request_by_source_branch(
        &self,
        project: &str,
        branch: &str,
    ) -> Result<Option<MergeRequest>, SourceError>;

    async fn discussions(&self, project: &str, iid: u64) -> Result<Vec<Discussion>, SourceError>;

    async fn diffs(&self, project: &str, iid: u64) -> Result<Vec<MergeRequestDiff>, SourceError>;
}
