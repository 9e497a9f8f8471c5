use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque player identifier (a UUID in the players table, compared as text).
pub type PlayerId = String;

/// A finalized match as stored in the `matches` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MatchRecord {
    pub winner_id: Option<PlayerId>,
    // "<margin>-<loser_score>", e.g. "3-0"
    pub final_score: Option<String>,
    pub player_a_id: PlayerId,
    pub player_b_id: PlayerId,
}

impl MatchRecord {
    /// True when this match was played directly between `a` and `b`, in either seat order.
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.player_a_id == a && self.player_b_id == b)
            || (self.player_a_id == b && self.player_b_id == a)
    }
}

/// Odds report returned by `/predict`.
/// Per-player maps are keyed by display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsReport {
    pub winner: String,
    pub loser: String,
    pub win_probabilities: BTreeMap<String, f64>,
    pub moneyline_odds: BTreeMap<String, String>,
    pub spread_line: f64,
    pub spread_odds: BTreeMap<String, String>,
    pub sweep_odds: BTreeMap<String, String>,
    pub score_margin_probs: BTreeMap<String, f64>,
    pub predicted_margin: f64,
}

/// Error body for non-200 responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
