// Head-to-head weighted odds model with a normal margin distribution

use super::american_odds::prob_to_american;
use super::margins::{parse_margin, MarginStats};
use crate::error::OddsError;
use crate::types::{MatchRecord, OddsReport, PlayerId};
use statrs::distribution::{ContinuousCDF, Normal};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Tunables for `calculate_odds`
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    /// Share of the blended probability taken from head-to-head results
    pub head_to_head_weight: f64,
    /// Std deviation used when a player has fewer than two margin samples
    pub default_std_dev: f64,
    /// Margin at or above which a win counts as a sweep
    pub sweep_margin: u32,
    /// Largest exact margin reported in `score_margin_probs`
    pub max_margin_bucket: u32,
    /// Also report the favorite's losing margins as "-k ball"
    pub mirror_margins: bool,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            head_to_head_weight: 0.3,
            default_std_dev: 1.5,
            sweep_margin: 5,
            max_margin_bucket: 5,
            mirror_margins: true,
        }
    }
}

#[derive(Debug, Default)]
struct PlayerTally {
    wins: u32,
    h2h_wins: u32,
    margins: Vec<u32>,
}

/// Compute the odds report for `player_a` against `player_b`.
///
/// `matches` are finalized matches involving either player. Wins by anyone
/// else are ignored. Returns `Ok(None)` when neither player has a win on
/// record. Score strings that cannot be read are skipped with a warning and
/// still count toward the win tally.
pub fn calculate_odds(
    player_a: &str,
    player_b: &str,
    matches: &[MatchRecord],
    names: &HashMap<PlayerId, String>,
    params: &ModelParams,
) -> Result<Option<OddsReport>, OddsError> {
    let mut a = PlayerTally::default();
    let mut b = PlayerTally::default();

    for record in matches {
        let tally = match record.winner_id.as_deref() {
            Some(winner) if winner == player_a => &mut a,
            Some(winner) if winner == player_b => &mut b,
            _ => continue,
        };

        tally.wins += 1;
        if record.is_between(player_a, player_b) {
            tally.h2h_wins += 1;
        }

        match parse_margin(record.final_score.as_deref()) {
            Ok(Some(margin)) => tally.margins.push(margin),
            Ok(None) => {}
            Err(e) => warn!("Skipping margin sample: {}", e),
        }
    }

    let total = a.wins + b.wins;
    if total == 0 {
        debug!("No wins on record for {} or {}", player_a, player_b);
        return Ok(None);
    }

    // Blend overall win rate with the head-to-head rate
    let total = total as f64;
    let h2h_total = a.h2h_wins + b.h2h_wins;
    let (h2h_a, h2h_b) = if h2h_total == 0 {
        (0.5, 0.5)
    } else {
        let n = h2h_total as f64;
        (a.h2h_wins as f64 / n, b.h2h_wins as f64 / n)
    };

    let w = params.head_to_head_weight;
    let prob_a = finite(
        ((1.0 - w) * (a.wins as f64 / total) + w * h2h_a).clamp(0.0, 1.0),
        "win probability",
    )?;
    let prob_b = finite(
        ((1.0 - w) * (b.wins as f64 / total) + w * h2h_b).clamp(0.0, 1.0),
        "win probability",
    )?;

    // Margin model, oriented toward the favorite
    let stats_a = MarginStats::from_samples(&a.margins, params.default_std_dev);
    let stats_b = MarginStats::from_samples(&b.margins, params.default_std_dev);

    let a_is_favorite = prob_a >= prob_b;
    let mu = finite((stats_a.mean - stats_b.mean).abs(), "predicted margin")?;
    let mut sigma = (stats_a.std_dev + stats_b.std_dev) / 2.0;
    if !(sigma.is_finite() && sigma > 0.0) {
        sigma = params.default_std_dev;
    }

    let favorite_dist = normal(mu, sigma)?;
    let underdog_dist = normal(-mu, sigma)?;
    let standard = normal(0.0, 1.0)?;

    let cover = finite(standard.cdf(mu / sigma), "spread probability")?;
    let sweep_at = params.sweep_margin as f64;
    let favorite_sweep = finite(1.0 - favorite_dist.cdf(sweep_at), "sweep probability")?;
    let underdog_sweep = finite(1.0 - underdog_dist.cdf(sweep_at), "sweep probability")?;

    let mut score_margin_probs = BTreeMap::new();
    for k in 1..=params.max_margin_bucket {
        let p = finite(exact_margin(&favorite_dist, k as f64), "margin probability")?;
        score_margin_probs.insert(format!("{} ball", k), p);

        if params.mirror_margins {
            let p = finite(exact_margin(&favorite_dist, -(k as f64)), "margin probability")?;
            score_margin_probs.insert(format!("-{} ball", k), p);
        }
    }

    // Labels
    let (label_a, label_b) = display_labels(player_a, player_b, names);
    let (winner, loser) = if a_is_favorite {
        (label_a.clone(), label_b.clone())
    } else {
        (label_b.clone(), label_a.clone())
    };

    // Per-player pairs as (a, b)
    let (spread_a, spread_b) = oriented(a_is_favorite, cover, 1.0 - cover);
    let (sweep_a, sweep_b) = oriented(a_is_favorite, favorite_sweep, underdog_sweep);
    let signed_margin = round1(if a_is_favorite { mu } else { -mu });

    let report = OddsReport {
        winner,
        loser,
        win_probabilities: pair(&label_a, prob_a, &label_b, prob_b),
        moneyline_odds: pair(
            &label_a,
            prob_to_american(prob_a),
            &label_b,
            prob_to_american(prob_b),
        ),
        spread_line: signed_margin,
        spread_odds: pair(
            &label_a,
            prob_to_american(spread_a),
            &label_b,
            prob_to_american(spread_b),
        ),
        sweep_odds: pair(
            &label_a,
            prob_to_american(sweep_a),
            &label_b,
            prob_to_american(sweep_b),
        ),
        score_margin_probs,
        predicted_margin: signed_margin,
    };

    debug!(
        "Odds for {} vs {}: p=({:.3}, {:.3}) mu={:.3} sigma={:.3} over {} games",
        player_a, player_b, prob_a, prob_b, mu, sigma, total
    );

    Ok(Some(report))
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal, OddsError> {
    Normal::new(mean, std_dev).map_err(|e| OddsError::Distribution(e.to_string()))
}

/// P(margin rounds to k) under `dist`
fn exact_margin(dist: &Normal, k: f64) -> f64 {
    (dist.cdf(k + 0.5) - dist.cdf(k - 0.5)).max(0.0)
}

fn finite(value: f64, what: &'static str) -> Result<f64, OddsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OddsError::NonFinite(what))
    }
}

fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    // no "-0.0" in the output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

fn oriented<T>(a_is_favorite: bool, favorite: T, underdog: T) -> (T, T) {
    if a_is_favorite {
        (favorite, underdog)
    } else {
        (underdog, favorite)
    }
}

fn pair<T>(label_a: &str, a: T, label_b: &str, b: T) -> BTreeMap<String, T> {
    let mut map = BTreeMap::new();
    map.insert(label_a.to_string(), a);
    map.insert(label_b.to_string(), b);
    map
}

/// Display names for both players, falling back to the raw id. Players that
/// share a name are disambiguated with their id so neither map entry is lost.
fn display_labels(
    player_a: &str,
    player_b: &str,
    names: &HashMap<PlayerId, String>,
) -> (String, String) {
    let lookup = |id: &str| names.get(id).cloned().unwrap_or_else(|| id.to_string());
    let label_a = lookup(player_a);
    let label_b = lookup(player_b);

    if label_a == label_b {
        (
            format!("{} ({})", label_a, player_a),
            format!("{} ({})", label_b, player_b),
        )
    } else {
        (label_a, label_b)
    }
}
