//! Confidence estimation from peak strength and cross-signal agreement.
//!
//! The sender signal is deliberately excluded: it says who wrote the
//! email, not how strongly the text itself signals a level, so it has no
//! vote in how much the content signals agree.

use super::types::{ImpactScores, LevelScores};

/// Peak score above which a signal counts as strong.
const STRONG_PEAK: f64 = 0.7;

/// Bonus per strong signal, capped.
const STRONG_BONUS_STEP: f64 = 0.1;
const STRONG_BONUS_CAP: f64 = 0.2;

/// Bonus when all three families point at the same level.
const FULL_AGREEMENT_BONUS: f64 = 0.3;

/// Bonus when exactly two families agree.
const PARTIAL_AGREEMENT_BONUS: f64 = 0.15;

/// Estimate confidence from the three content signals.
pub(crate) fn estimate(
    keyword: &LevelScores,
    business: &ImpactScores,
    time: &LevelScores,
) -> f64 {
    let (keyword_level, keyword_peak) = keyword.peak();
    let (business_impact, business_peak) = business.peak();
    let business_level = business_impact.as_priority();
    let (time_level, time_peak) = time.peak();

    let base = (keyword_peak + business_peak + time_peak) / 3.0;

    let levels = [keyword_level, business_level, time_level];
    let agreement = levels
        .iter()
        .map(|level| levels.iter().filter(|other| *other == level).count())
        .max()
        .unwrap_or(0);
    let agreement_bonus = match agreement {
        3 => FULL_AGREEMENT_BONUS,
        2 => PARTIAL_AGREEMENT_BONUS,
        _ => 0.0,
    };

    let strong = [keyword_peak, business_peak, time_peak]
        .iter()
        .filter(|peak| **peak > STRONG_PEAK)
        .count();
    let strong_bonus = (strong as f64 * STRONG_BONUS_STEP).min(STRONG_BONUS_CAP);

    (base + agreement_bonus + strong_bonus).min(1.0)
}
