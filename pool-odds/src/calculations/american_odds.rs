// American odds formatting

/// Probability above which the favorite line is pinned to the display cap
const FAVORITE_CAP_PROB: f64 = 0.99;
/// Probability below which the underdog line is pinned to the display cap
const UNDERDOG_CAP_PROB: f64 = 0.01;
const DISPLAY_CAP: i64 = 10_000;

pub const POSITIVE_INFINITY: &str = "+∞";
pub const NEGATIVE_INFINITY: &str = "-∞";

/// Convert a win probability into an American moneyline string.
///
/// Favorites (p > 0.5) get `-100p/(1-p)`, underdogs `+100(1-p)/p`.
/// Magnitudes are truncated toward zero, not rounded, so "-233" for p = 0.7.
/// Certain outcomes map to the infinity sentinels and anything past the
/// 1%/99% bounds is pinned to 10000.
pub fn prob_to_american(p: f64) -> String {
    if p <= 0.0 {
        return POSITIVE_INFINITY.to_string();
    }
    if p >= 1.0 {
        return NEGATIVE_INFINITY.to_string();
    }
    if p > FAVORITE_CAP_PROB {
        return format!("-{}", DISPLAY_CAP);
    }
    if p < UNDERDOG_CAP_PROB {
        return format!("+{}", DISPLAY_CAP);
    }

    if p > 0.5 {
        format!("-{}", (100.0 * p / (1.0 - p)) as i64)
    } else {
        format!("+{}", (100.0 * (1.0 - p) / p) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_and_underdog_lines() {
        assert_eq!(prob_to_american(0.75), "-300");
        assert_eq!(prob_to_american(0.25), "+300");
        assert_eq!(prob_to_american(0.5), "+100");
    }

    #[test]
    fn test_magnitude_truncates_toward_zero() {
        // 233.33 on both sides
        assert_eq!(prob_to_american(0.7), "-233");
        assert_eq!(prob_to_american(0.3), "+233");
        // 6566.67
        assert_eq!(prob_to_american(0.985), "-6566");
    }

    #[test]
    fn test_certainty_sentinels() {
        assert_eq!(prob_to_american(0.0), POSITIVE_INFINITY);
        assert_eq!(prob_to_american(1.0), NEGATIVE_INFINITY);
    }

    #[test]
    fn test_display_caps() {
        assert_eq!(prob_to_american(0.995), "-10000");
        assert_eq!(prob_to_american(0.999_999), "-10000");
        assert_eq!(prob_to_american(0.005), "+10000");
        assert_eq!(prob_to_american(1e-9), "+10000");
    }

    #[test]
    fn test_sign_follows_favorite() {
        for i in 1..100 {
            let p = i as f64 / 100.0;
            let line = prob_to_american(p);
            if p > 0.5 {
                assert!(line.starts_with('-'), "p={} gave {}", p, line);
            } else {
                assert!(line.starts_with('+'), "p={} gave {}", p, line);
            }
        }
    }
}
