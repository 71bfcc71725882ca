use crate::types::{Category, CommentAnalysis, RiskLevel};

/// Narrowing applied to the aggregated analysis set. Filters compose with
/// AND semantics, in the fixed order category, severity, risk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisFilter {
    pub categories: Option<Vec<Category>>,
    pub min_severity: Option<u8>,
    pub max_risk: Option<RiskLevel>,
}

impl AnalysisFilter {
    pub fn apply(&self, analyses: Vec<CommentAnalysis>) -> Vec<CommentAnalysis> {
        analyses
            .into_iter()
            .filter(|analysis| self.retains(analysis))
            .collect()
    }

    fn retains(&self, analysis: &CommentAnalysis) -> bool {
        if let Some(categories) = &self.categories {
            if !categories.contains(&analysis.category) {
                return false;
            }
        }
        if let Some(min_severity) = self.min_severity {
            if analysis.severity < min_severity {
                return false;
            }
        }
        if let Some(max_risk) = self.max_risk {
            // Analyses without a risk assessment are always retained.
            if let Some(assessment) = &analysis.risk_assessment {
                if RiskLevel::from_score(assessment.risk_score) > max_risk {
                    return false;
                }
            }
        }
        true
    }
}
