use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bug,
    Security,
    Performance,
    Style,
    Documentation,
    Suggestion,
    Question,
    Minor,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Bug,
        Category::Security,
        Category::Performance,
        Category::Style,
        Category::Documentation,
        Category::Suggestion,
        Category::Question,
        Category::Minor,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationFlow {
    Opening,
    Reply,
    Resolution,
}

/// Ordered risk scale. Variant order is the comparison order used by the
/// risk gate, so `Ord` must stay derived on this declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Buckets a 1-10 risk score into the ordered scale.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Self::VeryLow,
            3..=4 => Self::Low,
            5..=6 => Self::Medium,
            7..=8 => Self::High,
            _ => Self::VeryHigh,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixType {
    SimpleRefactor,
    BugFix,
    Style,
    Documentation,
    Test,
    Other,
}

/// Edit kinds the patch executor understands. Unknown wire values decode to
/// `Unsupported` and fail at execution time, not at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Replace,
    Insert,
    Delete,
    #[serde(other)]
    Unsupported,
}
