use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Tunable policy of the sentence aligner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Minimum `token_sort_ratio` (0..=100) for a token to count as a sentence word.
    pub threshold: u8,
    /// Consecutive misses tolerated once an alignment is under way.
    pub max_miss_streak: usize,
    /// Grace-period seeds, one matcher pass each.
    pub grace_seeds: Vec<usize>,
    /// Optional cap on the nearest-neighbour distance used when reconciling
    /// passes. `None` keeps every token that has any neighbour.
    pub consensus_radius: Option<f32>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 80,
            max_miss_streak: 15,
            grace_seeds: vec![2, 3, 4],
            consensus_radius: None,
        }
    }
}

impl MatchConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: MatchConfig = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.threshold > 100 {
            bail!("threshold must be within 0..=100, got {}", self.threshold);
        }
        if self.grace_seeds.is_empty() {
            bail!("at least one grace-period seed is required");
        }
        if let Some(radius) = self.consensus_radius {
            if radius.is_nan() || radius < 0.0 {
                bail!("consensus_radius must be a non-negative number, got {radius}");
            }
        }
        Ok(())
    }
}
