//! Staged analysis orchestrator.
//!
//! Three ordered stages (diagnose, simulate, architect) where each stage
//! consumes the previous stage's result. The ordering is encoded in the
//! type system: `Pipeline<Uninitialized>` only offers `diagnose()`,
//! `Pipeline<Diagnosed>` only offers `simulate()`, and so on, so running a
//! later stage without its predecessors does not compile. Each stage runs
//! under a configurable deadline and is idempotent given the same input.

pub mod stages;

use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::{
    CompetitivenessAnalysis, MonteCarloAnalysis, RiskAnalysis, RoiAnalysis, ScoringMode,
    SynergyAnalysis, TimeToProfitAnalysis,
};
use crate::config::get_config;
use crate::core::inputs::RawParams;
use crate::core::RegionRequest;
use crate::errors::{AnalysisError, Result};
use crate::sources::{IndicatorSource, PartnerDirectory};

/// Everything a pipeline run needs from its caller: collaborators, the
/// investment plan, optional region ratings, and randomness control.
pub struct PipelineDeps {
    pub source: Box<dyn IndicatorSource>,
    pub partners: Box<dyn PartnerDirectory>,
    /// Investment-plan fields (initial_investment, expected_roi, ...).
    pub plan: RawParams,
    /// Caller-supplied region ratings (infrastructure, institutions, ...)
    /// merged under the fetched indicators.
    pub profile: RawParams,
    pub mode: ScoringMode,
    pub seed: Option<u64>,
    /// Per-run override of the configured stage deadline.
    pub stage_deadline: Option<Duration>,
}

/// Output of the diagnose stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub indicators: BTreeMap<String, Option<f64>>,
    /// Fraction of requested indicators that produced a value.
    pub coverage: f64,
    pub competitiveness: CompetitivenessAnalysis,
    pub risk: RiskAnalysis,
}

/// Output of the simulate stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationReport {
    pub roi: RoiAnalysis,
    pub time_to_profit: TimeToProfitAnalysis,
    pub monte_carlo: MonteCarloAnalysis,
}

/// Output of the architect stage.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArchitectureReport {
    pub synergy: SynergyAnalysis,
    /// Partner names grouped by sector.
    pub partner_map: BTreeMap<String, Vec<String>>,
    pub partner_count: usize,
}

/// Accumulated stage outputs, keyed by stage name for downstream queries.
/// Later stages can reference earlier results, never the reverse.
#[derive(Clone, Debug, Serialize)]
pub struct PipelineContext {
    pub request: RegionRequest,
    pub diagnosis: Option<DiagnosisReport>,
    pub simulation: Option<SimulationReport>,
    pub architecture: Option<ArchitectureReport>,
}

impl PipelineContext {
    /// Stage results as a name-keyed mapping.
    pub fn stage_results(&self) -> BTreeMap<&'static str, serde_json::Value> {
        let mut results = BTreeMap::new();
        if let Some(d) = &self.diagnosis {
            results.insert("diagnose", serde_json::to_value(d).unwrap_or_default());
        }
        if let Some(s) = &self.simulation {
            results.insert("simulate", serde_json::to_value(s).unwrap_or_default());
        }
        if let Some(a) = &self.architecture {
            results.insert("architect", serde_json::to_value(a).unwrap_or_default());
        }
        results
    }
}

/// Typestate markers. Each completed stage carries its own result plus
/// everything accumulated before it.
pub struct Uninitialized;

pub struct Diagnosed {
    pub diagnosis: DiagnosisReport,
}

pub struct Simulated {
    pub diagnosis: DiagnosisReport,
    pub simulation: SimulationReport,
}

pub struct Architected {
    pub diagnosis: DiagnosisReport,
    pub simulation: SimulationReport,
    pub architecture: ArchitectureReport,
}

pub struct Pipeline<S> {
    request: RegionRequest,
    deps: PipelineDeps,
    state: S,
}

impl<S> std::fmt::Debug for Pipeline<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

impl Pipeline<Uninitialized> {
    pub fn new(request: RegionRequest, deps: PipelineDeps) -> Self {
        Self {
            request,
            deps,
            state: Uninitialized,
        }
    }

    pub async fn diagnose(self) -> Result<Pipeline<Diagnosed>> {
        let diagnosis = deadline(
            "diagnose",
            self.deps.stage_deadline,
            stages::diagnose::run(&self.deps, &self.request),
        )
        .await?;
        Ok(Pipeline {
            request: self.request,
            deps: self.deps,
            state: Diagnosed { diagnosis },
        })
    }
}

impl Pipeline<Diagnosed> {
    pub fn diagnosis(&self) -> &DiagnosisReport {
        &self.state.diagnosis
    }

    pub async fn simulate(self) -> Result<Pipeline<Simulated>> {
        let simulation = deadline(
            "simulate",
            self.deps.stage_deadline,
            stages::simulate::run(&self.deps, &self.state.diagnosis),
        )
        .await?;
        Ok(Pipeline {
            request: self.request,
            deps: self.deps,
            state: Simulated {
                diagnosis: self.state.diagnosis,
                simulation,
            },
        })
    }
}

impl Pipeline<Simulated> {
    pub fn diagnosis(&self) -> &DiagnosisReport {
        &self.state.diagnosis
    }

    pub fn simulation(&self) -> &SimulationReport {
        &self.state.simulation
    }

    pub async fn architect(self) -> Result<Pipeline<Architected>> {
        let architecture = deadline(
            "architect",
            self.deps.stage_deadline,
            stages::architect::run(
                &self.deps,
                &self.request,
                &self.state.diagnosis,
                &self.state.simulation,
            ),
        )
        .await?;
        Ok(Pipeline {
            request: self.request,
            deps: self.deps,
            state: Architected {
                diagnosis: self.state.diagnosis,
                simulation: self.state.simulation,
                architecture,
            },
        })
    }
}

impl Pipeline<Architected> {
    pub fn into_context(self) -> PipelineContext {
        PipelineContext {
            request: self.request,
            diagnosis: Some(self.state.diagnosis),
            simulation: Some(self.state.simulation),
            architecture: Some(self.state.architecture),
        }
    }
}

/// Run the full sequence and return the accumulated context.
pub async fn run_full(request: RegionRequest, deps: PipelineDeps) -> Result<PipelineContext> {
    let context = Pipeline::new(request, deps)
        .diagnose()
        .await?
        .simulate()
        .await?
        .architect()
        .await?
        .into_context();
    Ok(context)
}

/// Apply the stage deadline; expiry drops the in-flight fan-out and
/// surfaces a typed timeout.
async fn deadline<T, F>(stage: &'static str, over: Option<Duration>, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let limit =
        over.unwrap_or_else(|| Duration::from_secs(get_config().pipeline.stage_deadline_secs));
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AnalysisError::StageTimeout {
            stage,
            seconds: limit.as_secs(),
        }),
    }
}
