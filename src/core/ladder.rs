use super::types::Tier;

/// Ordered tier thresholds in base currency.
///
/// Invariants (checked by `config::ProgramConfig::validate`): non-empty,
/// first threshold is 0, thresholds strictly ascending.
#[derive(Debug, Clone)]
pub struct TierLadder {
    tiers: Vec<Tier>,
}

impl TierLadder {
    pub(crate) fn from_validated(tiers: Vec<Tier>) -> Self {
        debug_assert!(!tiers.is_empty());
        Self { tiers }
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn top_index(&self) -> usize {
        self.tiers.len().saturating_sub(1)
    }

    pub fn tier(&self, index: usize) -> Option<&Tier> {
        self.tiers.get(index)
    }

    pub fn is_top(&self, index: usize) -> bool {
        index == self.top_index()
    }

    /// Highest tier whose threshold is `<=` the amount. Falls back to the
    /// floor tier for amounts below every threshold (including NaN).
    pub fn tier_index_for(&self, amount_base: f64) -> usize {
        let mut index = 0;
        for (i, tier) in self.tiers.iter().enumerate() {
            if amount_base >= tier.threshold_base {
                index = i;
            } else {
                break;
            }
        }
        index
    }

    pub fn next_tier_index(&self, current_index: usize) -> usize {
        (current_index + 1).min(self.top_index())
    }

    /// Remaining base amount from `amount_base` to the tier above
    /// `tier_index`; zero at the top of the ladder.
    pub fn gap_to_next(&self, tier_index: usize, amount_base: f64) -> f64 {
        if self.is_top(tier_index) {
            return 0.0;
        }
        self.tier(self.next_tier_index(tier_index))
            .map(|next| (next.threshold_base - amount_base).max(0.0))
            .unwrap_or(0.0)
    }
}
