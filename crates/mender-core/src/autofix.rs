use crate::decision::{FixEligibility, evaluate_candidate};
use crate::patch;
use crate::types::{
    AutoFixConfig, AutoFixResults, CommentAnalysis, FixExecutionResult, GitStatusReport,
    MergeRequest, SkippedFix,
};
use mender_vcs::WorktreeInspector;
use tracing::{info, warn};

/// Applies eligible fixes for one session. The applied-fix counter lives for
/// the lifetime of this instance and is never reset.
pub struct AutoFixService {
    config: AutoFixConfig,
    inspector: Box<dyn WorktreeInspector + Send + Sync>,
    fixes_applied: u32,
}

impl AutoFixService {
    pub fn new(config: AutoFixConfig, inspector: Box<dyn WorktreeInspector + Send + Sync>) -> Self {
        Self {
            config,
            inspector,
            fixes_applied: 0,
        }
    }

    pub fn config(&self) -> &AutoFixConfig {
        &self.config
    }

    pub fn fixes_applied(&self) -> u32 {
        self.fixes_applied
    }

    /// Runs the fix phase over an analysis set. The working tree is checked
    /// once per call; a branch mismatch (or failed detection) disables the
    /// whole phase. Per-fix failures are recorded and never stop the run.
    pub fn process_analyses(
        &mut self,
        merge_request: &MergeRequest,
        analyses: &[CommentAnalysis],
    ) -> AutoFixResults {
        let git_status = self.check_working_tree(&merge_request.source_branch);
        let mut results = AutoFixResults {
            planned_fixes: Vec::new(),
            applied_fixes: Vec::new(),
            skipped_fixes: Vec::new(),
            git_status,
        };

        if !self.config.enabled {
            return results;
        }
        if !results.git_status.is_on_correct_branch {
            warn!(
                expected = %results.git_status.expected_branch,
                current = results.git_status.current_branch.as_deref().unwrap_or("<unknown>"),
                "working tree is not on the merge request branch; skipping all fixes"
            );
            return results;
        }

        for analysis in analyses {
            match evaluate_candidate(analysis, &self.config, self.fixes_applied) {
                FixEligibility::NotCandidate => {}
                FixEligibility::Skip(reason) => {
                    results.skipped_fixes.push(SkippedFix {
                        note_id: analysis.id,
                        reason,
                    });
                }
                FixEligibility::Planned => {
                    results.planned_fixes.push(analysis.clone());
                    if !self.config.dry_run {
                        results.applied_fixes.push(self.apply_fix(analysis));
                    }
                }
            }
        }

        results
    }

    fn apply_fix(&mut self, analysis: &CommentAnalysis) -> FixExecutionResult {
        let Some(decision) = analysis.auto_fix.as_ref() else {
            // evaluate_candidate only plans analyses that carry a decision.
            return FixExecutionResult {
                note_id: analysis.id,
                fix_type: crate::types::FixType::Other,
                files: Vec::new(),
                changes_applied: 0,
                success: false,
                error: Some("fix decision missing".to_string()),
            };
        };

        match patch::apply_changes(&self.config.working_directory, &decision.code_changes) {
            Ok(outcome) => {
                self.fixes_applied += 1;
                info!(
                    note = %analysis.id,
                    files = outcome.files.len(),
                    changes = outcome.changes_applied,
                    "applied fix"
                );
                FixExecutionResult {
                    note_id: analysis.id,
                    fix_type: decision.fix_type,
                    files: outcome.files,
                    changes_applied: outcome.changes_applied,
                    success: true,
                    error: None,
                }
            }
            Err(err) => {
                warn!(note = %analysis.id, error = %err, "fix application failed");
                FixExecutionResult {
                    note_id: analysis.id,
                    fix_type: decision.fix_type,
                    files: Vec::new(),
                    changes_applied: 0,
                    success: false,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    fn check_working_tree(&self, expected_branch: &str) -> GitStatusReport {
        let workdir = &self.config.working_directory;
        let current_branch = match self.inspector.current_branch(workdir) {
            Ok(branch) => Some(branch),
            Err(err) => {
                // Detection failure defaults to "wrong branch".
                warn!(error = %err, "branch detection failed; treating working tree as unsafe");
                None
            }
        };
        let has_uncommitted_changes = self
            .inspector
            .has_uncommitted_changes(workdir)
            .unwrap_or_else(|err| {
                warn!(error = %err, "uncommitted-change detection failed");
                false
            });

        GitStatusReport {
            is_on_correct_branch: current_branch.as_deref() == Some(expected_branch),
            current_branch,
            expected_branch: expected_branch.to_string(),
            has_uncommitted_changes,
        }
    }
}
