//! Architect stage: source the partner ecosystem and score its fit.

use std::collections::BTreeMap;

use crate::analysis::synergy;
use crate::core::inputs::{NormalizationReport, SynergyInput};
use crate::core::RegionRequest;
use crate::errors::Result;
use crate::pipeline::{ArchitectureReport, DiagnosisReport, PipelineDeps, SimulationReport};

pub async fn run(
    deps: &PipelineDeps,
    request: &RegionRequest,
    _diagnosis: &DiagnosisReport,
    _simulation: &SimulationReport,
) -> Result<ArchitectureReport> {
    let partners = deps
        .partners
        .partners_for(&request.region, &request.objective);
    log::debug!(
        "architect {}: {} candidate partners from {}",
        request.region,
        partners.len(),
        deps.partners.name()
    );

    let mut partner_map: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for partner in &partners {
        partner_map
            .entry(partner.sector.clone())
            .or_default()
            .push(partner.name.clone());
    }

    let partner_count = partners.len();
    let report = NormalizationReport {
        provided: usize::from(partner_count > 0),
        ..Default::default()
    };
    let input = SynergyInput::new(partners);
    let synergy = synergy::compute(&input, &report, deps.mode);

    Ok(ArchitectureReport {
        synergy,
        partner_map,
        partner_count,
    })
}
