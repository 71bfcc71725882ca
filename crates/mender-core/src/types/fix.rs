use crate::types::enums::{ChangeKind, FixType, RiskLevel};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The classifier's verdict on whether (and how) a comment can be fixed
/// without a human. `should_fix = false` means the decision is never
/// evaluated for application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoFixDecision {
    pub should_fix: bool,
    pub fix_type: FixType,
    pub fix_reason: String,
    pub confidence: f64,
    pub estimated_risk: RiskLevel,
    pub affected_files: Vec<PathBuf>,
    pub code_changes: Vec<CodeChange>,
    pub requires_approval: bool,
    pub prerequisites: Vec<String>,
}

/// One line-based edit. Lines are 1-indexed and ranges are inclusive.
///
/// Shape invariants (checked before any file is touched):
/// replace and delete need `start_line` and `end_line`; replace and insert
/// need `new_code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeChange {
    pub file_path: PathBuf,
    pub change_type: ChangeKind,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
    /// Expected pre-image of the replaced range; compared trimmed.
    pub original_code: Option<String>,
    pub new_code: Option<String>,
}
