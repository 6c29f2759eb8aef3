//! Score aggregation: family scalars, adaptive weights, final score.

use super::types::{FactorScores, FactorWeights, ImpactScores, LevelScores};

/// Signal strength above which a family is considered dominant.
const STRONG_SIGNAL: f64 = 0.7;

/// Sender scalar above which the VIP branch fires.
const VIP_SENDER: f64 = 0.8;

/// Aggregation output: the final score plus the intermediates that
/// produced it, kept for explanation and audit.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Aggregate {
    pub score: f64,
    pub factor_scores: FactorScores,
    pub weights: FactorWeights,
}

/// Collapse the per-level signal scores into one scalar per family, pick
/// weights (base weights, shifted by at most one adaptive branch), and
/// take the weighted sum.
pub(crate) fn aggregate(
    keyword: &LevelScores,
    business: &ImpactScores,
    time: &LevelScores,
    sender: f64,
) -> Aggregate {
    let factor_scores = FactorScores {
        keyword: level_scalar(keyword),
        business: impact_scalar(business),
        time: level_scalar(time),
        sender,
    };

    let mut weights = FactorWeights::BASE;
    if keyword.urgent > STRONG_SIGNAL || time.urgent > STRONG_SIGNAL {
        // Time-critical urgency dominates
        weights.keyword += 0.05;
        weights.time += 0.05;
        weights.business -= 0.03;
        weights.sender -= 0.02;
    } else if business.high > STRONG_SIGNAL {
        weights.business += 0.1;
        weights.keyword -= 0.04;
        weights.time -= 0.04;
        weights.sender -= 0.02;
    } else if sender > VIP_SENDER {
        weights.sender += 0.1;
        weights.keyword -= 0.04;
        weights.business -= 0.03;
        weights.time -= 0.03;
    }
    let weights = weights.clamped();

    let score = (factor_scores.keyword * weights.keyword
        + factor_scores.business * weights.business
        + factor_scores.time * weights.time
        + factor_scores.sender * weights.sender)
        .clamp(0.0, 1.0);

    Aggregate {
        score,
        factor_scores,
        weights,
    }
}

/// Family scalar for the four-level signals.
fn level_scalar(scores: &LevelScores) -> f64 {
    scores.urgent * 1.0 + scores.high * 0.7 + scores.normal * 0.4 + scores.low * 0.1
}

/// Family scalar for the three-level business-impact signal.
fn impact_scalar(scores: &ImpactScores) -> f64 {
    scores.high * 1.0 + scores.medium * 0.6 + scores.low * 0.2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> (LevelScores, ImpactScores, LevelScores) {
        (
            LevelScores::default(),
            ImpactScores::default(),
            LevelScores::default(),
        )
    }

    #[test]
    fn base_weights_used_when_no_signal_dominates() {
        let (kw, biz, time) = quiet();
        let agg = aggregate(&kw, &biz, &time, 0.5);
        assert_eq!(agg.weights, FactorWeights::BASE);
        assert!((agg.score - 0.5 * 0.15).abs() < 1e-9);
    }

    #[test]
    fn urgency_branch_boosts_keyword_and_time() {
        let kw = LevelScores {
            urgent: 0.8,
            ..Default::default()
        };
        let (_, biz, time) = quiet();
        let agg = aggregate(&kw, &biz, &time, 0.5);
        assert!((agg.weights.keyword - 0.40).abs() < 1e-9);
        assert!((agg.weights.time - 0.30).abs() < 1e-9);
        assert!((agg.weights.business - 0.22).abs() < 1e-9);
        assert!((agg.weights.sender - 0.13).abs() < 1e-9);
    }

    #[test]
    fn urgency_branch_triggers_on_time_signal_too() {
        let (kw, biz, _) = quiet();
        let time = LevelScores {
            urgent: 0.9,
            ..Default::default()
        };
        let agg = aggregate(&kw, &biz, &time, 0.5);
        assert!((agg.weights.time - 0.30).abs() < 1e-9);
    }

    #[test]
    fn business_branch_fires_only_without_urgency() {
        let (kw, _, time) = quiet();
        let biz = ImpactScores {
            high: 0.8,
            ..Default::default()
        };
        let agg = aggregate(&kw, &biz, &time, 0.5);
        assert!((agg.weights.business - 0.35).abs() < 1e-9);
        assert!((agg.weights.keyword - 0.31).abs() < 1e-9);

        // With an urgent keyword signal present, the urgency branch wins
        let kw = LevelScores {
            urgent: 0.8,
            ..Default::default()
        };
        let agg = aggregate(&kw, &biz, &time, 0.5);
        assert!((agg.weights.business - 0.22).abs() < 1e-9);
    }

    #[test]
    fn vip_sender_branch_is_last_resort() {
        let (kw, biz, time) = quiet();
        let agg = aggregate(&kw, &biz, &time, 0.9);
        assert!((agg.weights.sender - 0.25).abs() < 1e-9);
        assert!((agg.score - 0.9 * 0.25).abs() < 1e-9);
    }

    #[test]
    fn sender_at_exactly_point_eight_keeps_base_weights() {
        let (kw, biz, time) = quiet();
        let agg = aggregate(&kw, &biz, &time, 0.8);
        assert_eq!(agg.weights, FactorWeights::BASE);
    }

    #[test]
    fn family_scalars_use_fixed_internal_weights() {
        let kw = LevelScores {
            urgent: 1.0,
            high: 1.0,
            normal: 1.0,
            low: 1.0,
        };
        assert!((level_scalar(&kw) - 2.2).abs() < 1e-9);

        let biz = ImpactScores {
            high: 1.0,
            medium: 1.0,
            low: 1.0,
        };
        assert!((impact_scalar(&biz) - 1.8).abs() < 1e-9);
    }

    #[test]
    fn final_score_clamped_to_unit_interval() {
        let kw = LevelScores {
            urgent: 1.0,
            high: 1.0,
            normal: 1.0,
            low: 1.0,
        };
        let biz = ImpactScores {
            high: 1.0,
            medium: 1.0,
            low: 1.0,
        };
        let time = kw;
        let agg = aggregate(&kw, &biz, &time, 1.0);
        assert_eq!(agg.score, 1.0);
    }
}
