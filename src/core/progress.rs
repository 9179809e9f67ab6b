use super::ladder::TierLadder;

/// Visual ceiling for the open-ended top band, as a multiple of its threshold.
pub const TOP_BAND_CEILING_FACTOR: f64 = 1.5;

pub fn progress_fractions(ladder: &TierLadder, amount_base: f64) -> Vec<f64> {
    let tiers = ladder.tiers();
    tiers
        .iter()
        .enumerate()
        .map(|(index, tier)| {
            let start = tier.threshold_base;
            let end = tiers
                .get(index + 1)
                .map(|next| next.threshold_base)
                .unwrap_or(start * TOP_BAND_CEILING_FACTOR);
            band_fraction(amount_base, start, end)
        })
        .collect()
}

fn band_fraction(amount: f64, start: f64, end: f64) -> f64 {
    let progress = if amount <= start {
        0.0
    } else if amount >= end {
        1.0
    } else {
        (amount - start) / (end - start)
    };
    progress.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Tier;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn reference_ladder() -> TierLadder {
        TierLadder::from_validated(vec![
            Tier::new("Member", 0.0),
            Tier::new("Silver", 1_000.0),
            Tier::new("Gold", 2_500.0),
            Tier::new("Platinum", 5_000.0),
        ])
    }

    #[test]
    fn zero_spend_leaves_every_bar_empty() {
        let fractions = progress_fractions(&reference_ladder(), 0.0);
        assert_eq!(fractions, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn containing_band_is_partially_filled() {
        let fractions = progress_fractions(&reference_ladder(), 2_640.0);
        assert_approx(fractions[0], 1.0);
        assert_approx(fractions[1], 1.0);
        assert_approx(fractions[2], 140.0 / 2_500.0);
        assert_approx(fractions[3], 0.0);
    }

    #[test]
    fn exact_threshold_fills_lower_band_and_leaves_own_band_empty() {
        let fractions = progress_fractions(&reference_ladder(), 1_000.0);
        assert_eq!(fractions, vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn top_band_uses_fixed_ceiling() {
        let ladder = reference_ladder();
        assert_approx(progress_fractions(&ladder, 6_250.0)[3], 0.5);
        assert_approx(progress_fractions(&ladder, 7_500.0)[3], 1.0);
        assert_approx(progress_fractions(&ladder, 90_000.0)[3], 1.0);
    }

    #[test]
    fn single_floor_tier_flips_to_full_above_zero() {
        let ladder = TierLadder::from_validated(vec![Tier::new("Member", 0.0)]);
        assert_eq!(progress_fractions(&ladder, 0.0), vec![0.0]);
        assert_eq!(progress_fractions(&ladder, 0.01), vec![1.0]);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_fractions_are_bounded_and_non_increasing(cents in 0u64..1_000_000) {
            let ladder = reference_ladder();
            let amount = cents as f64 / 100.0;
            let fractions = progress_fractions(&ladder, amount);
            prop_assert_eq!(fractions.len(), ladder.tiers().len());
            for fraction in &fractions {
                prop_assert!((0.0..=1.0).contains(fraction));
            }
            for pair in fractions.windows(2) {
                prop_assert!(pair[0] >= pair[1]);
            }
        }
    }
}
