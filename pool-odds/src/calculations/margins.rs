use crate::error::MarginParseError;

/// Extract the winning margin from a final score such as "3-1".
///
/// Returns `Ok(None)` when there is no score to read. The leading token must
/// be a positive integer; anything else is a `MarginParseError`.
pub fn parse_margin(final_score: Option<&str>) -> Result<Option<u32>, MarginParseError> {
    let score = match final_score.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    let token = score.split('-').next().unwrap_or_default().trim();
    match token.parse::<u32>() {
        Ok(margin) if margin >= 1 => Ok(Some(margin)),
        _ => Err(MarginParseError {
            score: score.to_string(),
        }),
    }
}

/// Mean and standard deviation of one player's winning margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl MarginStats {
    /// Population statistics over `samples`. With fewer than two samples there
    /// is no spread to measure, so `default_std_dev` is used instead.
    pub fn from_samples(samples: &[u32], default_std_dev: f64) -> Self {
        if samples.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: default_std_dev,
            };
        }

        let n = samples.len() as f64;
        let mean = samples.iter().map(|&m| m as f64).sum::<f64>() / n;

        if samples.len() == 1 {
            return Self {
                mean,
                std_dev: default_std_dev,
            };
        }

        let variance = samples
            .iter()
            .map(|&m| {
                let d = m as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }
}
