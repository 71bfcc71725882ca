use mender_core::autofix::AutoFixService;
use mender_core::classify::{AnalysisContext, CommentClassifier};
use mender_core::error::{ClassifyError, PipelineError, RespondError, SourceError};
use mender_core::host::MergeRequestHost;
use mender_core::pipeline::FeedbackPipeline;
use mender_core::respond::AutoResponder;
use mender_core::types::{
    AutoFixConfig, AutoFixDecision, AutoResponseOutcome, Category, ChangeKind, CodeChange,
    CommentAnalysis, Discussion, DiscussionId, FixType, MergeRequest, MergeRequestDiff,
    MergeRequestSelector, Note, NoteAuthor, NoteId, ReviewFeedbackRequest, RiskLevel,
};
use mender_vcs::{VcsError, WorktreeInspector};
use std::path::{Path, PathBuf};

struct FakeHost {
    merge_request: MergeRequest,
    discussions: Result<Vec<Discussion>, String>,
    diffs_fail: bool,
}

impl FakeHost {
    fn new(discussions: Vec<Discussion>) -> Self {
        Self {
            merge_request: MergeRequest {
                iid: 42,
                title: "Add retry logic".to_string(),
                description: Some("Retries transient failures".to_string()),
                source_branch: "feature-retries".to_string(),
                target_branch: "main".to_string(),
                author: None,
                web_url: None,
            },
            discussions: Ok(discussions),
            diffs_fail: false,
        }
    }
}

impl MergeRequestHost for FakeHost {
    async fn merge_request_by_iid(
        &self,
        _project: &str,
        iid: u64,
    ) -> Result<Option<MergeRequest>, SourceError> {
        Ok((iid == self.merge_request.iid).then(|| self.merge_request.clone()))
    }

    async fn merge_request_by_source_branch(
        &self,
        _project: &str,
        branch: &str,
    ) -> Result<Option<MergeRequest>, SourceError> {
        Ok((branch == self.merge_request.source_branch).then(|| self.merge_request.clone()))
    }

    async fn discussions(&self, _project: &str, _iid: u64) -> Result<Vec<Discussion>, SourceError> {
        match &self.discussions {
            Ok(discussions) => Ok(discussions.clone()),
            Err(reason) => Err(SourceError::RequestFailed {
                reason: reason.clone(),
            }),
        }
    }

    async fn diffs(&self, _project: &str, _iid: u64) -> Result<Vec<MergeRequestDiff>, SourceError> {
        if self.diffs_fail {
            Err(SourceError::RequestFailed {
                reason: "502".to_string(),
            })
        } else {
            Ok(Vec::new())
        }
    }
}

/// Marks notes whose body contains "fixable" with an eligible fix decision,
/// fails on notes containing "broken", and classifies the rest as context.
struct KeywordClassifier {
    fix_file: PathBuf,
}

impl CommentClassifier for KeywordClassifier {
    async fn analyze_comment(
        &self,
        note: &Note,
        context: &AnalysisContext<'_>,
    ) -> Result<CommentAnalysis, ClassifyError> {
        if note.body.contains("broken") {
            return Err(ClassifyError::ProviderUnavailable);
        }
        let auto_fix = note.body.contains("fixable").then(|| AutoFixDecision {
            should_fix: true,
            fix_type: FixType::Style,
            fix_reason: "mechanical cleanup".to_string(),
            confidence: 0.95,
            estimated_risk: RiskLevel::VeryLow,
            affected_files: vec![self.fix_file.clone()],
            code_changes: vec![CodeChange {
                file_path: self.fix_file.clone(),
                change_type: ChangeKind::Replace,
                start_line: Some(1),
                end_line: Some(1),
                original_code: Some("let x=1;".to_string()),
                new_code: Some("let x = 1;".to_string()),
            }],
            requires_approval: false,
            prerequisites: Vec::new(),
        });
        Ok(CommentAnalysis {
            id: note.id,
            body: note.body.clone(),
            author: note.author.username.clone(),
            category: if auto_fix.is_some() {
                Category::Style
            } else {
                Category::Question
            },
            severity: 3,
            confidence: 0.9,
            is_valid: true,
            reasoning: "keyword match".to_string(),
            suggested_response: None,
            thread_metadata: context.thread_metadata.clone(),
            auto_response: None,
            auto_fix,
            risk_assessment: None,
        })
    }
}

struct CountingResponder;

impl AutoResponder for CountingResponder {
    async fn respond(
        &self,
        _merge_request: &MergeRequest,
        analyses: &[CommentAnalysis],
    ) -> Result<AutoResponseOutcome, RespondError> {
        Ok(AutoResponseOutcome {
            responses_posted: analyses.len(),
            skipped: 0,
        })
    }
}

struct FailingResponder;

impl AutoResponder for FailingResponder {
    async fn respond(
        &self,
        _merge_request: &MergeRequest,
        _analyses: &[CommentAnalysis],
    ) -> Result<AutoResponseOutcome, RespondError> {
        Err(RespondError::Failed {
            reason: "comment api rejected the reply".to_string(),
        })
    }
}

struct FixedBranchInspector(String);

impl WorktreeInspector for FixedBranchInspector {
    fn current_branch(&self, _workdir: &Path) -> Result<String, VcsError> {
        Ok(self.0.clone())
    }

    fn has_uncommitted_changes(&self, _workdir: &Path) -> Result<bool, VcsError> {
        Ok(false)
    }
}

fn note(id: i64, body: &str) -> Note {
    Note {
        id: NoteId::new(id),
        body: body.to_string(),
        author: NoteAuthor {
            username: "reviewer".to_string(),
            name: None,
        },
        system: false,
        created_at: None,
    }
}

fn discussion(id: &str, resolved: bool, notes: Vec<Note>) -> Discussion {
    Discussion {
        id: DiscussionId::new(id),
        resolved,
        notes,
    }
}

fn request() -> ReviewFeedbackRequest {
    ReviewFeedbackRequest {
        project: Some("group/project".to_string()),
        selector: Some(MergeRequestSelector::Iid(42)),
        ..ReviewFeedbackRequest::default()
    }
}

fn auto_fix_service(workdir: &Path, branch: &str) -> AutoFixService {
    let config = AutoFixConfig {
        enabled: true,
        require_approval_for_refactors: false,
        require_approval_for_bug_fixes: false,
        working_directory: workdir.to_path_buf(),
        ..AutoFixConfig::default()
    };
    AutoFixService::new(config, Box::new(FixedBranchInspector(branch.to_string())))
}

#[tokio::test(start_paused = true)]
async fn test_full_run_applies_eligible_fix() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.rs"), "let x=1;\nprintln!();\n").unwrap();

    let host = FakeHost::new(vec![
        discussion("d1", false, vec![note(1, "fixable: spacing"), note(2, "agreed")]),
        discussion("d2", false, vec![note(3, "what about naming?")]),
        discussion("d3", true, vec![note(4, "already handled")]),
    ]);
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier)
        .with_auto_responder(CountingResponder)
        .with_auto_fix(auto_fix_service(dir.path(), "feature-retries"));

    let report = pipeline.review_feedback(request()).await.unwrap();

    // d1 opening + d2 opening are actionable; the reply and the resolved
    // thread are not.
    assert_eq!(report.analyses.len(), 2);
    assert_eq!(report.pagination.total_available, 2);
    assert!(!report.pagination.has_more);
    assert_eq!(report.summary.analyzed, 2);
    assert_eq!(report.summary.statistics.resolved_threads, 1);

    let auto_response = report.auto_response.unwrap();
    assert_eq!(auto_response.responses_posted, 2);

    let auto_fix = report.auto_fix.unwrap();
    assert!(auto_fix.git_status.is_on_correct_branch);
    assert_eq!(auto_fix.planned_fixes.len(), 1);
    assert_eq!(auto_fix.applied_fixes.len(), 1);
    assert!(auto_fix.applied_fixes[0].success);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("main.rs")).unwrap(),
        "let x = 1;\nprintln!();\n"
    );
}

#[tokio::test(start_paused = true)]
async fn test_classifier_failure_degrades_single_note() {
    let host = FakeHost::new(vec![
        discussion("d1", false, vec![note(1, "broken pipe")]),
        discussion("d2", false, vec![note(2, "fine")]),
    ]);
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier);

    let report = pipeline.review_feedback(request()).await.unwrap();
    assert_eq!(report.analyses.len(), 2);
    assert!(!report.analyses[0].is_valid);
    assert_eq!(report.analyses[0].category, Category::Minor);
    assert!(report.analyses[1].is_valid);
    assert_eq!(report.summary.valid, 1);
    assert_eq!(report.summary.invalid, 1);
}

#[tokio::test(start_paused = true)]
async fn test_pagination_over_actionable_notes() {
    let discussions: Vec<Discussion> = (1..=25)
        .map(|id| discussion(&format!("d{id}"), false, vec![note(id, "comment")]))
        .collect();
    let host = FakeHost::new(discussions);
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier);

    let report = pipeline
        .review_feedback(ReviewFeedbackRequest {
            max_comments: 20,
            ..request()
        })
        .await
        .unwrap();

    assert_eq!(report.analyses.len(), 20);
    assert_eq!(report.pagination.total_available, 25);
    assert!(report.pagination.has_more);

    let host = FakeHost::new(
        (1..=25)
            .map(|id| discussion(&format!("d{id}"), false, vec![note(id, "comment")]))
            .collect(),
    );
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier);
    let report = pipeline
        .review_feedback(ReviewFeedbackRequest {
            max_comments: 20,
            offset: 20,
            ..request()
        })
        .await
        .unwrap();
    assert_eq!(report.analyses.len(), 5);
    assert!(!report.pagination.has_more);
}

#[tokio::test(start_paused = true)]
async fn test_branch_mismatch_produces_empty_fix_phase() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.rs"), "let x=1;\n").unwrap();

    let host = FakeHost::new(vec![discussion("d1", false, vec![note(1, "fixable")])]);
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier)
        .with_auto_fix(auto_fix_service(dir.path(), "main"));

    let report = pipeline.review_feedback(request()).await.unwrap();
    let auto_fix = report.auto_fix.unwrap();
    assert!(!auto_fix.git_status.is_on_correct_branch);
    assert_eq!(auto_fix.git_status.current_branch.as_deref(), Some("main"));
    assert!(auto_fix.planned_fixes.is_empty());
    assert!(auto_fix.applied_fixes.is_empty());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("main.rs")).unwrap(),
        "let x=1;\n"
    );
}

#[tokio::test(start_paused = true)]
async fn test_summary_only_skips_response_and_fix_stages() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.rs"), "let x=1;\n").unwrap();

    let host = FakeHost::new(vec![discussion("d1", false, vec![note(1, "fixable")])]);
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier)
        .with_auto_responder(CountingResponder)
        .with_auto_fix(auto_fix_service(dir.path(), "feature-retries"));

    let report = pipeline
        .review_feedback(ReviewFeedbackRequest {
            summary_only: true,
            ..request()
        })
        .await
        .unwrap();
    assert!(report.auto_response.is_none());
    assert!(report.auto_fix.is_none());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("main.rs")).unwrap(),
        "let x=1;\n"
    );
}

#[tokio::test(start_paused = true)]
async fn test_responder_failure_never_surfaces() {
    let host = FakeHost::new(vec![discussion("d1", false, vec![note(1, "comment")])]);
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier).with_auto_responder(FailingResponder);

    let report = pipeline.review_feedback(request()).await.unwrap();
    assert!(report.auto_response.is_none());
    assert_eq!(report.analyses.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_diff_fetch_failure_degrades() {
    let mut host = FakeHost::new(vec![discussion("d1", false, vec![note(1, "comment")])]);
    host.diffs_fail = true;
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier);

    let report = pipeline.review_feedback(request()).await.unwrap();
    assert_eq!(report.analyses.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_discussion_fetch_failure_is_fatal() {
    let mut host = FakeHost::new(Vec::new());
    host.discussions = Err("500 internal error".to_string());
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier);

    let err = pipeline.review_feedback(request()).await.unwrap_err();
    assert!(matches!(err, PipelineError::DiscussionFetch { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_missing_project_and_selector() {
    let host = FakeHost::new(Vec::new());
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier);

    let err = pipeline
        .review_feedback(ReviewFeedbackRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::MissingProject));

    let err = pipeline
        .review_feedback(ReviewFeedbackRequest {
            project: Some("group/project".to_string()),
            ..ReviewFeedbackRequest::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::MissingSelector));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_merge_request() {
    let host = FakeHost::new(Vec::new());
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier);

    let err = pipeline
        .review_feedback(ReviewFeedbackRequest {
            selector: Some(MergeRequestSelector::Iid(999)),
            ..request()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::MergeRequestNotFound));
}

#[tokio::test(start_paused = true)]
async fn test_lookup_by_source_branch() {
    let host = FakeHost::new(vec![discussion("d1", false, vec![note(1, "comment")])]);
    let classifier = KeywordClassifier {
        fix_file: PathBuf::from("main.rs"),
    };
    let mut pipeline = FeedbackPipeline::new(host, classifier);

    let report = pipeline
        .review_feedback(ReviewFeedbackRequest {
            selector: Some(MergeRequestSelector::SourceBranch(
                "feature-retries".to_string(),
            )),
            ..request()
        })
        .await
        .unwrap();
    assert_eq!(report.merge_request.iid, 42);
}
