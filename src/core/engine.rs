use tracing::debug;

use super::currency::{RegionTable, normalize, to_local};
use super::error::ScenarioError;
use super::ladder::TierLadder;
use super::progress::progress_fractions;
use super::types::{RawScenario, ScenarioInput, ScenarioProjection, ScenarioResult};

pub const DEFAULT_PARTNER_MULTIPLIER: f64 = 1.0;
pub const DEFAULT_EXTRA_SPEND: f64 = 0.0;

#[derive(Debug, Clone)]
pub struct TierEngine {
    regions: RegionTable,
    ladder: TierLadder,
}

impl TierEngine {
    pub fn new(regions: RegionTable, ladder: TierLadder) -> Self {
        Self { regions, ladder }
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    pub fn ladder(&self) -> &TierLadder {
        &self.ladder
    }

    pub fn parse_input<'a>(
        &'a self,
        raw: &RawScenario,
    ) -> Result<ScenarioInput<'a>, ScenarioError> {
        let region = self
            .regions
            .find(&raw.region)
            .ok_or_else(|| ScenarioError::UnknownRegion {
                code: raw.region.trim().to_string(),
            })?;

        Ok(ScenarioInput {
            region,
            current_spend_local: parse_primary_spend(raw.current_spend.as_deref())?,
            partner_multiplier: parse_lenient(
                raw.partner_multiplier.as_deref(),
                DEFAULT_PARTNER_MULTIPLIER,
            ),
            extra_spend_local: parse_lenient(raw.extra_spend.as_deref(), DEFAULT_EXTRA_SPEND),
        })
    }

    pub fn evaluate(&self, raw: &RawScenario) -> ScenarioResult {
        match self.parse_input(raw) {
            Ok(input) => ScenarioResult::valid(self.project(&input)),
            Err(err) => ScenarioResult::invalid(rejection_reason(raw, &err)),
        }
    }

    pub fn project(&self, input: &ScenarioInput<'_>) -> ScenarioProjection {
        let region = input.region;
        let multiplier = input.partner_multiplier;

        let baseline_normalized = normalize(input.current_spend_local, region);
        let normalized_extra = if input.extra_spend_local > 0.0 {
            normalize(input.extra_spend_local, region)
        } else {
            0.0
        };
        // May be negative with a negative multiplier; left unfloored.
        let effective_extra = normalized_extra * multiplier;
        let scenario_normalized = baseline_normalized + effective_extra;

        let has_simulated_spend = input.extra_spend_local > 0.0 && effective_extra > 0.0;
        let normalized_for_messaging = if has_simulated_spend {
            scenario_normalized
        } else {
            baseline_normalized
        };

        let baseline_tier_index = self.ladder.tier_index_for(baseline_normalized);
        let scenario_tier_index = self.ladder.tier_index_for(scenario_normalized);
        let messaging_tier_index = self.ladder.tier_index_for(normalized_for_messaging);
        let next_tier_index = self.ladder.next_tier_index(messaging_tier_index);

        let gap_to_next_base = self
            .ladder
            .gap_to_next(messaging_tier_index, normalized_for_messaging);
        let gap_to_next_local = if gap_to_next_base == 0.0 {
            0.0
        } else {
            to_local(gap_to_next_base, region)
        };
        let gap_to_next_local_with_multiplier = if gap_to_next_base > 0.0 && multiplier > 0.0 {
            gap_to_next_base / (region.fx_rate_to_base * multiplier)
        } else {
            gap_to_next_local
        };

        debug!(
            region = %region.code,
            baseline_normalized,
            scenario_normalized,
            has_simulated_spend,
            messaging_tier_index,
            gap_to_next_base,
            "scenario projected"
        );

        ScenarioProjection {
            current_spend_local: input.current_spend_local,
            partner_multiplier: multiplier,
            extra_spend_local: input.extra_spend_local,
            baseline_normalized,
            normalized_extra,
            effective_extra,
            scenario_normalized,
            normalized_for_messaging,
            baseline_tier_index,
            scenario_tier_index,
            messaging_tier_index,
            next_tier_index,
            gap_to_next_base,
            gap_to_next_local,
            gap_to_next_local_with_multiplier,
            tier_progress_fractions: progress_fractions(&self.ladder, normalized_for_messaging),
            has_simulated_spend,
        }
    }
}

pub(crate) fn rejection_reason(raw: &RawScenario, err: &ScenarioError) -> String {
    debug!(region = %raw.region, error = %err, "scenario rejected");
    err.to_string()
}

fn parse_primary_spend(raw: Option<&str>) -> Result<f64, ScenarioError> {
    let text = raw.unwrap_or_default().trim();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ScenarioError::InvalidPrimarySpend {
            raw: text.to_string(),
        }),
    }
}

/// Blank, malformed and non-finite text all degrade to `default`.
fn parse_lenient(raw: Option<&str>, default: f64) -> f64 {
    raw.map(str::trim)
        .filter(|text| !text.is_empty())
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}
