use super::types::Region;

pub fn normalize(amount_local: f64, region: &Region) -> f64 {
    amount_local * region.fx_rate_to_base
}

pub fn to_local(amount_base: f64, region: &Region) -> f64 {
    amount_base / region.fx_rate_to_base
}

#[derive(Debug, Clone)]
pub struct RegionTable {
    regions: Vec<Region>,
}

impl RegionTable {
    /// Callers are expected to have validated rates and code uniqueness
    /// (see `config::ProgramConfig::validate`).
    pub(crate) fn from_validated(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn find(&self, code: &str) -> Option<&Region> {
        let code = code.trim();
        self.regions
            .iter()
            .find(|region| region.code.eq_ignore_ascii_case(code))
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}
