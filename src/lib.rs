// Export modules for library usage
pub mod analysis;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod narrative;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod sources;

// Re-export commonly used types
pub use crate::core::{
    clamp_score, clamp_unit, latest, CompositeIndex, Observation, Partner, RegionRequest,
};

pub use crate::core::inputs::{
    CompetitivenessInput, MonteCarloInput, NormalizationReport, RawParams, RiskInput, RoiInput,
    SynergyInput, TimeToProfitInput,
};

pub use crate::analysis::{
    CompetitivenessAnalysis, MonteCarloAnalysis, RiskAnalysis, RiskLevel, RoiAnalysis,
    ScoringMode, SynergyAnalysis, TimeToProfitAnalysis,
};

pub use crate::errors::{AnalysisError, Result};

pub use crate::pipeline::{
    run_full, ArchitectureReport, DiagnosisReport, Pipeline, PipelineContext, PipelineDeps,
    SimulationReport,
};

pub use crate::report::{assemble, markup, Block, Report, Section};

pub use crate::sources::{
    gather_latest, FilePartnerDirectory, FixturePartnerDirectory, FixtureSource,
    HttpIndicatorSource, IndicatorSource, PartnerDirectory,
};
