use crate::types::{AutoFixConfig, AutoFixDecision, CommentAnalysis, FixType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Why an otherwise fix-worthy analysis was not applied. The first failing
/// policy check wins; later checks are not evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    SessionLimitReached,
    ThreadResolved,
    RiskTooHigh,
    ConfidenceTooLow,
    RestrictedFiles,
    RequiresApproval,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionLimitReached => "session limit reached",
            Self::ThreadResolved => "thread is resolved",
            Self::RiskTooHigh => "risk too high",
            Self::ConfidenceTooLow => "confidence too low",
            Self::RestrictedFiles => "restricted file types or excluded paths",
            Self::RequiresApproval => "requires human approval",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixEligibility {
    /// No fix decision, or the classifier decided against fixing.
    NotCandidate,
    Skip(SkipReason),
    Planned,
}

/// Runs the policy checks for one candidate analysis, in fixed order:
/// should-fix, session quota, thread resolution, risk, confidence,
/// file scope, approval.
pub fn evaluate_candidate(
    analysis: &CommentAnalysis,
    config: &AutoFixConfig,
    fixes_applied: u32,
) -> FixEligibility {
    let Some(decision) = analysis.auto_fix.as_ref() else {
        return FixEligibility::NotCandidate;
    };
    if !decision.should_fix {
        return FixEligibility::NotCandidate;
    }
    if fixes_applied >= config.max_fixes_per_session {
        return FixEligibility::Skip(SkipReason::SessionLimitReached);
    }
    if analysis.thread_metadata.is_resolved {
        return FixEligibility::Skip(SkipReason::ThreadResolved);
    }
    if decision.estimated_risk > config.risk_threshold {
        return FixEligibility::Skip(SkipReason::RiskTooHigh);
    }
    if decision.confidence < config.confidence_threshold {
        return FixEligibility::Skip(SkipReason::ConfidenceTooLow);
    }
    if !files_in_scope(&decision.affected_files, config) {
        return FixEligibility::Skip(SkipReason::RestrictedFiles);
    }
    if needs_approval(decision, config) {
        return FixEligibility::Skip(SkipReason::RequiresApproval);
    }
    FixEligibility::Planned
}

fn needs_approval(decision: &AutoFixDecision, config: &AutoFixConfig) -> bool {
    decision.requires_approval
        || (decision.fix_type == FixType::SimpleRefactor && config.require_approval_for_refactors)
        || (decision.fix_type == FixType::BugFix && config.require_approval_for_bug_fixes)
}

fn files_in_scope(files: &[PathBuf], config: &AutoFixConfig) -> bool {
    files.iter().all(|file| {
        extension_allowed(file, &config.allowed_file_types)
            && !path_excluded(file, &config.excluded_paths)
    })
}

fn extension_allowed(file: &Path, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let Some(extension) = file.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    allowed
        .iter()
        .any(|entry| entry.trim_start_matches('.').eq_ignore_ascii_case(extension))
}

fn path_excluded(file: &Path, excluded: &[PathBuf]) -> bool {
    excluded.iter().any(|prefix| file.starts_with(prefix))
}
