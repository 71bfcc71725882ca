use crate::types::enums::Category;
use crate::types::fix::AutoFixDecision;
use crate::types::ids::NoteId;
use crate::types::merge_request::Note;
use crate::types::thread::ThreadMetadata;
use serde::{Deserialize, Serialize};

/// One classified reviewer comment, as produced by the classification
/// collaborator. Lives for a single analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAnalysis {
    pub id: NoteId,
    pub body: String,
    pub author: String,
    pub category: Category,
    pub severity: u8,
    pub confidence: f64,
    pub is_valid: bool,
    pub reasoning: String,
    pub suggested_response: Option<String>,
    pub thread_metadata: ThreadMetadata,
    pub auto_response: Option<AutoResponseDecision>,
    pub auto_fix: Option<AutoFixDecision>,
    pub risk_assessment: Option<RiskAssessment>,
}

impl CommentAnalysis {
    /// Fallback record for a note whose classification call failed. Keeps the
    /// original thread metadata so downstream accounting still lines up.
    pub fn degraded(note: &Note, thread_metadata: ThreadMetadata, reason: impl Into<String>) -> Self {
        Self {
            id: note.id,
            body: note.body.clone(),
            author: note.author.username.clone(),
            category: Category::Minor,
            severity: 1,
            confidence: 0.1,
            is_valid: false,
            reasoning: reason.into(),
            suggested_response: None,
            thread_metadata,
            auto_response: None,
            auto_fix: None,
            risk_assessment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 1-10, bucketed onto `RiskLevel` by the post-analysis filter.
    pub risk_score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoResponseDecision {
    pub should_respond: bool,
    pub response: Option<String>,
}
