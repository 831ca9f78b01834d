//! Diagnose stage: gather regional indicators and compute the diagnostic
//! indices (competitiveness, risk).

use serde_json::json;

use crate::analysis::{competitiveness, risk};
use crate::core::inputs::RawParams;
use crate::core::RegionRequest;
use crate::errors::Result;
use crate::pipeline::{DiagnosisReport, PipelineDeps};
use crate::sources::{coverage, gather_latest, REGIONAL_INDICATORS};

pub async fn run(deps: &PipelineDeps, request: &RegionRequest) -> Result<DiagnosisReport> {
    let indicators = gather_latest(
        deps.source.as_ref(),
        &request.region,
        &REGIONAL_INDICATORS,
    )
    .await;
    let coverage = coverage(&indicators);
    log::debug!(
        "diagnose {}: {:.0}% indicator coverage",
        request.region,
        coverage * 100.0
    );

    // Caller-supplied ratings seed the competitiveness input; the fetched
    // economic magnitude takes precedence over any supplied one.
    let mut competitiveness_raw = deps.profile.clone();
    if let Some(gdp) = value_of(&indicators, "gdp") {
        competitiveness_raw.insert("economic".to_string(), json!(gdp));
    }
    let competitiveness = competitiveness::analyze(&competitiveness_raw);

    let mut risk_raw = RawParams::new();
    for (indicator, key) in [
        ("gdp_growth", "gdp_growth"),
        ("inflation", "inflation"),
        ("trade_balance", "trade_balance"),
    ] {
        if let Some(value) = value_of(&indicators, indicator) {
            risk_raw.insert(key.to_string(), json!(value));
        }
    }
    let risk = risk::analyze(&risk_raw);

    Ok(DiagnosisReport {
        indicators,
        coverage,
        competitiveness,
        risk,
    })
}

fn value_of(
    indicators: &std::collections::BTreeMap<String, Option<f64>>,
    name: &str,
) -> Option<f64> {
    indicators.get(name).copied().flatten()
}
