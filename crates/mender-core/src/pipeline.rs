use crate::autofix::AutoFixService;
use crate::classify::CommentClassifier;
use crate::error::PipelineError;
use crate::filter::AnalysisFilter;
use crate::host::MergeRequestHost;
use crate::respond::{AutoResponder, DisabledAutoResponder};
use crate::scheduler::{AnalysisWindow, analyze_in_batches};
use crate::threads::triage_discussions;
use crate::types::{
    BatchPolicy, Category, CategoryCount, CommentAnalysis, MergeRequestSelector, Pagination,
    ReviewFeedbackReport, ReviewFeedbackRequest, ReviewSummary, RunId, ThreadStatistics,
};
use crate::validation::validate_request;
use tracing::{Instrument, info, info_span, warn};

/// The orchestration entry point: fetch, triage, analyze, filter, then hand
/// the result to the optional response and fix stages.
pub struct FeedbackPipeline<H, C, R = DisabledAutoResponder> {
    host: H,
    classifier: C,
    responder: Option<R>,
    auto_fix: Option<AutoFixService>,
    batch_policy: BatchPolicy,
}

impl<H, C> FeedbackPipeline<H, C>
where
    H: MergeRequestHost,
    C: CommentClassifier,
{
    pub fn new(host: H, classifier: C) -> Self {
        Self {
            host,
            classifier,
            responder: None,
            auto_fix: None,
            batch_policy: BatchPolicy::default(),
        }
    }
}

impl<H, C, R> FeedbackPipeline<H, C, R>
where
    H: MergeRequestHost,
    C: CommentClassifier,
    R: AutoResponder,
{
    pub fn with_batch_policy(mut self, policy: BatchPolicy) -> Self {
        self.batch_policy = policy;
        self
    }

    pub fn with_auto_fix(mut self, service: AutoFixService) -> Self {
        self.auto_fix = Some(service);
        self
    }

    pub fn with_auto_responder<R2: AutoResponder>(self, responder: R2) -> FeedbackPipeline<H, C, R2> {
        FeedbackPipeline {
            host: self.host,
            classifier: self.classifier,
            responder: Some(responder),
            auto_fix: self.auto_fix,
            batch_policy: self.batch_policy,
        }
    }

    pub fn auto_fix_service(&self) -> Option<&AutoFixService> {
        self.auto_fix.as_ref()
    }

    /// Runs one full feedback pass. Only conditions that make the run
    /// meaningless raise; everything else degrades into result fields.
    pub async fn review_feedback(
        &mut self,
        request: ReviewFeedbackRequest,
    ) -> Result<ReviewFeedbackReport, PipelineError> {
        validate_request(&request)?;
        let run_id = RunId::generate();
        let span = info_span!("review_feedback", run = %run_id);
        self.run(request, run_id).instrument(span).await
    }

    async fn run(
        &mut self,
        request: ReviewFeedbackRequest,
        run_id: RunId,
    ) -> Result<ReviewFeedbackReport, PipelineError> {
        let project = request.project.as_deref().unwrap_or_default();
        let selector = request
            .selector
            .as_ref()
            .ok_or(PipelineError::MissingSelector)?;

        let merge_request = match selector {
            MergeRequestSelector::Iid(iid) => {
                self.host.merge_request_by_iid(project, *iid).await?
            }
            MergeRequestSelector::SourceBranch(branch) => {
                self.host
                    .merge_request_by_source_branch(project, branch)
                    .await?
            }
        }
        .ok_or(PipelineError::MergeRequestNotFound)?;
        info!(iid = merge_request.iid, title = %merge_request.title, "reviewing merge request");

        let discussions = self
            .host
            .discussions(project, merge_request.iid)
            .await
            .map_err(|err| PipelineError::DiscussionFetch {
                reason: err.to_string(),
            })?;

        let diffs = match self.host.diffs(project, merge_request.iid).await {
            Ok(diffs) => diffs,
            Err(err) => {
                warn!(error = %err, "diff fetch failed; continuing without diff context");
                Vec::new()
            }
        };

        let triage = triage_discussions(&discussions, request.include_resolved);
        let window = AnalysisWindow {
            offset: request.offset,
            max_comments: request.max_comments,
        };
        let window_len = window.slice(&triage.actionable).len();

        let analyses = analyze_in_batches(
            &self.classifier,
            &merge_request,
            &diffs,
            &triage.actionable,
            &discussions,
            window,
            &self.batch_policy,
        )
        .await;

        let filter = AnalysisFilter {
            categories: request.category_filter.clone(),
            min_severity: request.min_severity,
            max_risk: request.risk_threshold,
        };
        let analyses = filter.apply(analyses);

        let summary = build_summary(triage.statistics, &analyses);
        let pagination = Pagination {
            offset: request.offset,
            max_comments: request.max_comments,
            total_available: triage.statistics.actionable_notes,
            has_more: request.offset + window_len < triage.statistics.actionable_notes,
        };

        let mut auto_response = None;
        let mut auto_fix = None;
        if !request.summary_only {
            if let Some(responder) = &self.responder {
                match responder.respond(&merge_request, &analyses).await {
                    Ok(outcome) => auto_response = Some(outcome),
                    Err(err) => {
                        warn!(error = %err, "auto-response pipeline failed; continuing");
                    }
                }
            }
            if let Some(service) = &mut self.auto_fix {
                auto_fix = Some(service.process_analyses(&merge_request, &analyses));
            }
        }

        Ok(ReviewFeedbackReport {
            run_id,
            merge_request,
            analyses,
            summary,
            pagination,
            auto_response,
            auto_fix,
        })
    }
}

fn build_summary(statistics: ThreadStatistics, analyses: &[CommentAnalysis]) -> ReviewSummary {
    let valid = analyses.iter().filter(|a| a.is_valid).count();
    let by_category = Category::ALL
        .iter()
        .filter_map(|category| {
            let count = analyses.iter().filter(|a| a.category == *category).count();
            (count > 0).then_some(CategoryCount {
                category: *category,
                count,
            })
        })
        .collect();
    let mean_confidence = if analyses.is_empty() {
        0.0
    } else {
        analyses.iter().map(|a| a.confidence).sum::<f64>() / analyses.len() as f64
    };

    ReviewSummary {
        statistics,
        analyzed: analyses.len(),
        valid,
        invalid: analyses.len() - valid,
        by_category,
        mean_confidence,
    }
}
