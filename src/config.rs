use serde::Deserialize;

/// Engine tuning constants loaded from environment variables
///
/// These are tuning knobs, not invariants: the defaults reproduce the
/// behavior the system shipped with, and deployments can override any of
/// them via `LEVAIN_*` variables.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Maximum number of historical batches the engine averages over
    #[serde(default = "default_selection_window")]
    pub selection_window: usize,

    /// Maximum number of supporting batches returned as evidence
    #[serde(default = "default_evidence_limit")]
    pub evidence_limit: usize,

    /// Additive floor on the similarity distance before inversion.
    /// Must be positive: it bounds the weight of an exact match
    /// (1 / floor) and keeps the division defined at distance zero.
    #[serde(default = "default_distance_floor")]
    pub distance_floor: f64,

    /// Minimum evaluation score for a batch to count as evidence
    #[serde(default = "default_min_score")]
    pub min_score: u8,
}

fn default_selection_window() -> usize {
    20
}

fn default_evidence_limit() -> usize {
    5
}

fn default_distance_floor() -> f64 {
    0.1
}

fn default_min_score() -> u8 {
    4
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            selection_window: default_selection_window(),
            evidence_limit: default_evidence_limit(),
            distance_floor: default_distance_floor(),
            min_score: default_min_score(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from `LEVAIN_`-prefixed environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("LEVAIN_")
            .from_env::<EngineConfig>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
