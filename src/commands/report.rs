//! `oppmap report`: full pipeline run plus report assembly.

use std::path::PathBuf;

use anyhow::Result;

use crate::analysis::ScoringMode;
use crate::cli::OutputFormat;
use crate::commands::load_raw_params;
use crate::config::get_config;
use crate::core::RegionRequest;
use crate::narrative::{HttpNarrativeService, NarrativeService, OfflineNarrative};
use crate::output::{format_report_terminal, write_output};
use crate::pipeline::{run_full, PipelineDeps};
use crate::report::{assemble, markup};
use crate::sources::{
    FilePartnerDirectory, FixturePartnerDirectory, FixtureSource, HttpIndicatorSource,
    IndicatorSource, PartnerDirectory,
};

pub struct ReportConfig {
    pub region: String,
    pub objective: String,
    pub profile: Option<PathBuf>,
    pub plan: Option<PathBuf>,
    pub partners: Option<PathBuf>,
    pub offline: bool,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
}

pub async fn handle_report(config: ReportConfig) -> Result<()> {
    let app_config = get_config();

    let source: Box<dyn IndicatorSource> = if config.offline {
        Box::new(FixtureSource::offline_profile(&config.region))
    } else {
        Box::new(HttpIndicatorSource::new(&app_config.sources)?)
    };

    let partners: Box<dyn PartnerDirectory> = match &config.partners {
        Some(path) => Box::new(FilePartnerDirectory::load(path)?),
        None => Box::new(FixturePartnerDirectory),
    };

    let narrative: Box<dyn NarrativeService> = if config.offline {
        Box::new(OfflineNarrative)
    } else {
        Box::new(HttpNarrativeService::new(&app_config.narrative)?)
    };

    let request = RegionRequest {
        region: config.region.clone(),
        objective: config.objective.clone(),
    };
    let deps = PipelineDeps {
        source,
        partners,
        plan: load_raw_params(config.plan.as_deref())?,
        profile: load_raw_params(config.profile.as_deref())?,
        mode: ScoringMode::Deterministic,
        seed: config.seed,
        stage_deadline: None,
    };

    let context = run_full(request, deps).await?;
    let report = assemble(&context, narrative.as_ref()).await;

    let rendered = match config.format {
        OutputFormat::Terminal => format_report_terminal(&report),
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Markup => markup::to_markup(&report),
    };
    write_output(&rendered, config.output.as_ref())
}
