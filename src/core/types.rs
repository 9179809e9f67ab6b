use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub code: String,
    pub label: String,
    pub fx_rate_to_base: f64,
    pub currency_code: String,
}

impl Region {
    pub fn new(code: &str, label: &str, fx_rate_to_base: f64, currency_code: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            fx_rate_to_base,
            currency_code: currency_code.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub name: String,
    pub threshold_base: f64,
}

impl Tier {
    pub fn new(name: &str, threshold_base: f64) -> Self {
        Self {
            name: name.to_string(),
            threshold_base,
        }
    }
}

/// A single calculation request once the raw text has been parsed.
///
/// Only `current_spend_local` is guaranteed finite and non-negative; the
/// multiplier and extra spend are carried as given.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioInput<'a> {
    pub region: &'a Region,
    pub current_spend_local: f64,
    pub partner_multiplier: f64,
    pub extra_spend_local: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawScenario {
    pub region: String,
    pub current_spend: Option<String>,
    pub partner_multiplier: Option<String>,
    pub extra_spend: Option<String>,
}

impl RawScenario {
    pub fn example() -> Self {
        Self {
            region: "EU".to_string(),
            current_spend: Some("1800".to_string()),
            partner_multiplier: Some("1.5".to_string()),
            extra_spend: Some("400".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub current_spend_local: f64,
    pub partner_multiplier: f64,
    pub extra_spend_local: f64,
    pub baseline_normalized: f64,
    pub normalized_extra: f64,
    pub effective_extra: f64,
    pub scenario_normalized: f64,
    pub normalized_for_messaging: f64,
    pub baseline_tier_index: usize,
    pub scenario_tier_index: usize,
    pub messaging_tier_index: usize,
    pub next_tier_index: usize,
    pub gap_to_next_base: f64,
    pub gap_to_next_local: f64,
    pub gap_to_next_local_with_multiplier: f64,
    pub tier_progress_fractions: Vec<f64>,
    pub has_simulated_spend: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
    #[serde(flatten)]
    pub projection: Option<ScenarioProjection>,
}

impl ScenarioResult {
    pub fn valid(projection: ScenarioProjection) -> Self {
        Self {
            valid: true,
            error_reason: None,
            projection: Some(projection),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            error_reason: Some(reason.into()),
            projection: None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusClassification {
    AtTopTier,
    EligibleForNextTier,
    TierInReach,
}
