use serde::Serialize;

use super::engine::{TierEngine, rejection_reason};
use super::format::{format_currency, format_multiplier, format_number};
use super::ladder::TierLadder;
use super::types::{RawScenario, Region, ScenarioProjection, StatusClassification};

const BASE_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TierStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStatus {
    pub region: Region,
    pub classification: StatusClassification,
    pub headline: String,
    pub baseline_tier: String,
    pub scenario_tier: String,
    pub messaging_tier: String,
    pub next_tier: Option<String>,
    pub next_tier_threshold_base: Option<f64>,
    pub gap_closed_percent: Option<f64>,
    pub projection: ScenarioProjection,
    pub display: DisplayAmounts,
    pub breakdown: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayAmounts {
    pub current_spend_local: String,
    pub baseline_normalized: String,
    pub scenario_normalized: String,
    pub normalized_for_messaging: String,
    pub effective_extra: String,
    pub gap_to_next_base: String,
    pub gap_to_next_local: String,
    pub gap_to_next_local_with_multiplier: String,
    pub partner_multiplier: String,
    pub gap_closed_percent: Option<String>,
}

impl StatusReport {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            error_reason: Some(reason.into()),
            status: None,
        }
    }
}

impl TierEngine {
    pub fn status_report(&self, raw: &RawScenario) -> StatusReport {
        match self.parse_input(raw) {
            Ok(input) => {
                let projection = self.project(&input);
                StatusReport {
                    valid: true,
                    error_reason: None,
                    status: Some(assemble(self.ladder(), input.region, projection)),
                }
            }
            Err(err) => StatusReport::invalid(rejection_reason(raw, &err)),
        }
    }
}

pub fn classify(ladder: &TierLadder, projection: &ScenarioProjection) -> StatusClassification {
    if ladder.is_top(projection.messaging_tier_index) {
        StatusClassification::AtTopTier
    } else if projection.gap_to_next_base == 0.0 {
        StatusClassification::EligibleForNextTier
    } else {
        StatusClassification::TierInReach
    }
}

/// Share of the baseline's gap to its next tier that the simulated spend
/// covers, capped at 100.
pub fn gap_closed_percent(ladder: &TierLadder, projection: &ScenarioProjection) -> Option<f64> {
    if !projection.has_simulated_spend {
        return None;
    }
    let baseline_gap =
        ladder.gap_to_next(projection.baseline_tier_index, projection.baseline_normalized);
    if baseline_gap <= 0.0 {
        return None;
    }
    Some((projection.effective_extra / baseline_gap).min(1.0) * 100.0)
}

pub fn assemble(
    ladder: &TierLadder,
    region: &Region,
    projection: ScenarioProjection,
) -> TierStatus {
    let classification = classify(ladder, &projection);
    let tier_name = |index: usize| {
        ladder
            .tier(index)
            .map(|tier| tier.name.clone())
            .unwrap_or_default()
    };
    let messaging_tier = tier_name(projection.messaging_tier_index);
    let next_tier = (!ladder.is_top(projection.messaging_tier_index))
        .then(|| ladder.tier(projection.next_tier_index))
        .flatten();

    let headline = match classification {
        StatusClassification::AtTopTier => "Member is already at top-tier status.".to_string(),
        StatusClassification::EligibleForNextTier => {
            "Member is eligible for the next tier based on spend.".to_string()
        }
        StatusClassification::TierInReach => format!(
            "Sitting in {messaging_tier} - {} in reach.",
            next_tier.map(|tier| tier.name.as_str()).unwrap_or_default()
        ),
    };

    let closed_percent = gap_closed_percent(ladder, &projection);
    let display = display_amounts(region, &projection, closed_percent);
    let breakdown = breakdown_lines(ladder, region, &projection);

    TierStatus {
        region: region.clone(),
        classification,
        headline,
        baseline_tier: tier_name(projection.baseline_tier_index),
        scenario_tier: tier_name(projection.scenario_tier_index),
        messaging_tier,
        next_tier: next_tier.map(|tier| tier.name.clone()),
        next_tier_threshold_base: next_tier.map(|tier| tier.threshold_base),
        gap_closed_percent: closed_percent,
        projection,
        display,
        breakdown,
    }
}

fn display_amounts(
    region: &Region,
    p: &ScenarioProjection,
    closed_percent: Option<f64>,
) -> DisplayAmounts {
    let local = region.currency_code.as_str();
    DisplayAmounts {
        current_spend_local: format_currency(p.current_spend_local, local),
        baseline_normalized: format_currency(p.baseline_normalized, BASE_CURRENCY),
        scenario_normalized: format_currency(p.scenario_normalized, BASE_CURRENCY),
        normalized_for_messaging: format_currency(p.normalized_for_messaging, BASE_CURRENCY),
        effective_extra: format_currency(p.effective_extra, BASE_CURRENCY),
        gap_to_next_base: format_currency(p.gap_to_next_base, BASE_CURRENCY),
        gap_to_next_local: format_currency(p.gap_to_next_local, local),
        gap_to_next_local_with_multiplier: format_currency(
            p.gap_to_next_local_with_multiplier,
            local,
        ),
        partner_multiplier: format_multiplier(p.partner_multiplier),
        gap_closed_percent: closed_percent.map(|pct| format!("{}%", format_number(pct, 0))),
    }
}

fn breakdown_lines(ladder: &TierLadder, region: &Region, p: &ScenarioProjection) -> Vec<String> {
    let local = region.currency_code.as_str();
    let at_top = ladder.is_top(p.messaging_tier_index);
    let name = |index: usize| {
        ladder
            .tier(index)
            .map(|tier| tier.name.as_str())
            .unwrap_or_default()
    };
    let or_na = |amount: f64, currency: &str| {
        if at_top {
            "N/A".to_string()
        } else {
            format_currency(amount, currency)
        }
    };

    let next_line = match ladder.tier(p.next_tier_index) {
        Some(next) if !at_top => format!(
            "Next tier: {} at {}",
            next.name,
            format_currency(next.threshold_base, BASE_CURRENCY)
        ),
        _ => "Next tier: none (top tier).".to_string(),
    };
    let simulated_local = if p.extra_spend_local > 0.0 {
        format_currency(p.extra_spend_local, local)
    } else {
        "none".to_string()
    };
    let simulated_base = if p.effective_extra > 0.0 {
        format_currency(p.effective_extra, BASE_CURRENCY)
    } else {
        "none".to_string()
    };

    vec![
        format!("Region: {}", region.label),
        format!("FX rate to base: {}", region.fx_rate_to_base),
        String::new(),
        format!(
            "Current qualifying spend (local): {}",
            format_currency(p.current_spend_local, local)
        ),
        format!(
            "Normalized spend (base): {}",
            format_currency(p.baseline_normalized, BASE_CURRENCY)
        ),
        String::new(),
        format!(
            "Current tier band (based on normalized spend): {}",
            name(p.baseline_tier_index)
        ),
        format!(
            "Status tier (baseline or full scenario): {}",
            name(p.messaging_tier_index)
        ),
        next_line,
        String::new(),
        format!(
            "Gap to next tier (base): {}",
            or_na(p.gap_to_next_base, BASE_CURRENCY)
        ),
        format!(
            "Gap to next tier (local, no multiplier): {}",
            or_na(p.gap_to_next_local, local)
        ),
        format!(
            "Gap to next tier (local, at multiplier): {}",
            or_na(p.gap_to_next_local_with_multiplier, local)
        ),
        String::new(),
        format!(
            "Partner multiplier: {}",
            format_multiplier(p.partner_multiplier)
        ),
        format!("Simulated additional spend (local): {simulated_local}"),
        format!("Effective status progress from simulated spend (base): {simulated_base}"),
        String::new(),
        format!(
            "Effective total (normalized + simulated * multiplier): {}",
            format_currency(p.scenario_normalized, BASE_CURRENCY)
        ),
        format!(
            "Effective tier band (normalized + simulated * multiplier): {}",
            name(p.scenario_tier_index)
        ),
    ]
}
