//! Simulate stage: run the investment calculators over the caller's plan,
//! conditioned by the diagnosed risk.

use serde_json::json;

use crate::analysis::{monte_carlo, roi, time_to_profit};
use crate::config::get_config;
use crate::errors::Result;
use crate::pipeline::{DiagnosisReport, PipelineDeps, SimulationReport};

pub async fn run(deps: &PipelineDeps, diagnosis: &DiagnosisReport) -> Result<SimulationReport> {
    let mut plan = deps.plan.clone();

    // The diagnosed risk conditions the simulation unless the caller pinned
    // a risk factor explicitly.
    if !plan.contains_key("risk_factor") {
        plan.insert(
            "risk_factor".to_string(),
            json!((diagnosis.risk.score / 100.0).clamp(0.0, 1.0)),
        );
    }
    if !plan.contains_key("iterations") {
        plan.insert(
            "iterations".to_string(),
            json!(get_config().pipeline.monte_carlo_iterations),
        );
    }

    let roi = roi::analyze(&plan);
    let time_to_profit = time_to_profit::analyze(&plan);
    let monte_carlo = monte_carlo::analyze(&plan, deps.seed);
    log::debug!(
        "simulate: roi {:.0}, tpp {:.0}, monte-carlo {:.0}",
        roi.score,
        time_to_profit.score,
        monte_carlo.score
    );

    Ok(SimulationReport {
        roi,
        time_to_profit,
        monte_carlo,
    })
}
