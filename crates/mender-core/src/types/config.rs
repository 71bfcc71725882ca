use crate::types::enums::RiskLevel;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Auto-remediation policy for one service instance. Set once at
/// construction, read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoFixConfig {
    pub enabled: bool,
    pub dry_run: bool,
    pub max_fixes_per_session: u32,
    /// Highest acceptable `estimated_risk`.
    pub risk_threshold: RiskLevel,
    /// Lowest acceptable fix confidence, 0-1.
    pub confidence_threshold: f64,
    /// File extensions eligible for editing; empty means all. Entries match
    /// with or without a leading dot, ASCII case-insensitive.
    pub allowed_file_types: Vec<String>,
    pub excluded_paths: Vec<PathBuf>,
    pub require_approval_for_refactors: bool,
    pub require_approval_for_bug_fixes: bool,
    pub working_directory: PathBuf,
}

impl Default for AutoFixConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dry_run: false,
            max_fixes_per_session: 5,
            risk_threshold: RiskLevel::Low,
            confidence_threshold: 0.8,
            allowed_file_types: Vec::new(),
            excluded_paths: Vec::new(),
            require_approval_for_refactors: true,
            require_approval_for_bug_fixes: true,
            working_directory: PathBuf::from("."),
        }
    }
}

/// Pacing for the analysis scheduler. Defaults match the load-shedding
/// behavior the downstream classifier is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchPolicy {
    pub batch_size: usize,
    pub inter_batch_delay_ms: u64,
}

impl BatchPolicy {
    pub fn inter_batch_delay(&self) -> Duration {
        Duration::from_millis(self.inter_batch_delay_ms)
    }
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            batch_size: 10,
            inter_batch_delay_ms: 1_000,
        }
    }
}
