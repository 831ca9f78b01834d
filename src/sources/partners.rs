//! Partner-directory collaborator.
//!
//! Partner sourcing is pluggable: the synergy calculator consumes whatever
//! directory implementation the caller wires in. The bundled fixture
//! directory carries an illustrative cross-sector partner set.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::core::Partner;
use crate::errors::{AnalysisError, Result};

pub trait PartnerDirectory: Send + Sync {
    /// Candidate partners for a region and entry objective.
    fn partners_for(&self, region: &str, objective: &str) -> Vec<Partner>;

    fn name(&self) -> &str;
}

/// Bundled illustrative directory: a balanced cross-sector partner set,
/// independent of region.
pub struct FixturePartnerDirectory;

impl PartnerDirectory for FixturePartnerDirectory {
    fn partners_for(&self, _region: &str, _objective: &str) -> Vec<Partner> {
        fn partner(name: &str, sector: &str, strength: f64, maturity_years: u32) -> Partner {
            Partner {
                name: name.to_string(),
                sector: sector.to_string(),
                strength,
                maturity_years,
            }
        }
        vec![
            partner("Nordia Logistics Group", "logistics", 82.0, 12),
            partner("Castellan Merchant Bank", "finance", 76.0, 20),
            partner("Helix Systems", "technology", 84.0, 8),
            partner("Meridian Manufacturing", "manufacturing", 71.0, 15),
            partner("Auric Energy Cooperative", "energy", 68.0, 10),
            partner("Civic University Consortium", "academia", 74.0, 25),
        ]
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

/// Directory backed by a caller-supplied JSON file: an array of partner
/// objects. Malformed entries are skipped; a malformed file is an error.
pub struct FilePartnerDirectory {
    partners: Vec<Partner>,
}

impl FilePartnerDirectory {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let body: Value = serde_json::from_str(&content)
            .map_err(|e| AnalysisError::validation(format!("partner file: {e}")))?;
        let entries = body.as_array().ok_or_else(|| {
            AnalysisError::validation("partner file must contain a JSON array")
        })?;
        let partners = entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect();
        Ok(Self { partners })
    }
}

impl PartnerDirectory for FilePartnerDirectory {
    fn partners_for(&self, _region: &str, _objective: &str) -> Vec<Partner> {
        self.partners.clone()
    }

    fn name(&self) -> &str {
        "file"
    }
}
