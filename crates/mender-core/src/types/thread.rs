use crate::types::enums::ConversationFlow;
use crate::types::ids::DiscussionId;
use serde::{Deserialize, Serialize};

/// Per-note placement inside its discussion. Computed once when discussions
/// are fetched and immutable for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadMetadata {
    pub discussion_id: DiscussionId,
    pub is_resolved: bool,
    /// 1-based ordinal of the note within its discussion.
    pub thread_position: u32,
    pub conversation_flow: ConversationFlow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadStatistics {
    pub discussions: usize,
    pub notes: usize,
    pub system_notes: usize,
    pub actionable_notes: usize,
    pub context_notes: usize,
    pub resolved_threads: usize,
}
