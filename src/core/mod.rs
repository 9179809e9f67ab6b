mod currency;
mod engine;
mod error;
pub mod format;
mod ladder;
mod progress;
mod report;
mod types;

pub use currency::{RegionTable, normalize, to_local};
pub use engine::{DEFAULT_EXTRA_SPEND, DEFAULT_PARTNER_MULTIPLIER, TierEngine};
pub use error::ScenarioError;
pub use ladder::TierLadder;
pub use progress::{TOP_BAND_CEILING_FACTOR, progress_fractions};
pub use report::{DisplayAmounts, StatusReport, TierStatus, assemble, classify, gap_closed_percent};
pub use types::{
    RawScenario, Region, ScenarioInput, ScenarioProjection, ScenarioResult, StatusClassification,
    Tier,
};
