use crate::decision::SkipReason;
use crate::types::analysis::CommentAnalysis;
use crate::types::enums::{Category, FixType, RiskLevel};
use crate::types::ids::{NoteId, RunId};
use crate::types::merge_request::{MergeRequest, MergeRequestSelector};
use crate::types::thread::ThreadStatistics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewFeedbackRequest {
    pub project: Option<String>,
    pub selector: Option<MergeRequestSelector>,
    pub max_comments: usize,
    pub offset: usize,
    pub category_filter: Option<Vec<Category>>,
    pub min_severity: Option<u8>,
    pub risk_threshold: Option<RiskLevel>,
    pub summary_only: bool,
    pub include_resolved: bool,
}

impl Default for ReviewFeedbackRequest {
    fn default() -> Self {
        Self {
            project: None,
            selector: None,
            max_comments: 20,
            offset: 0,
            category_filter: None,
            min_severity: None,
            risk_threshold: None,
            summary_only: false,
            include_resolved: false,
        }
    }
}

/// Window bookkeeping, computed against the count of actionable notes,
/// not the raw note count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: usize,
    pub max_comments: usize,
    pub total_available: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub statistics: ThreadStatistics,
    pub analyzed: usize,
    pub valid: usize,
    pub invalid: usize,
    pub by_category: Vec<CategoryCount>,
    pub mean_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitStatusReport {
    pub is_on_correct_branch: bool,
    pub current_branch: Option<String>,
    pub expected_branch: String,
    pub has_uncommitted_changes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixExecutionResult {
    pub note_id: NoteId,
    pub fix_type: FixType,
    pub files: Vec<PathBuf>,
    pub changes_applied: usize,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFix {
    pub note_id: NoteId,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoFixResults {
    pub planned_fixes: Vec<CommentAnalysis>,
    pub applied_fixes: Vec<FixExecutionResult>,
    pub skipped_fixes: Vec<SkippedFix>,
    pub git_status: GitStatusReport,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoResponseOutcome {
    pub responses_posted: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewFeedbackReport {
    pub run_id: RunId,
    pub merge_request: MergeRequest,
    pub analyses: Vec<CommentAnalysis>,
    pub summary: ReviewSummary,
    pub pagination: Pagination,
    pub auto_response: Option<AutoResponseOutcome>,
    pub auto_fix: Option<AutoFixResults>,
}
