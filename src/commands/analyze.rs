//! `oppmap analyze`: run one calculator over a raw input file.

use std::path::PathBuf;

use anyhow::Result;

use crate::analysis::{
    competitiveness, monte_carlo, risk, roi, synergy, time_to_profit, ScoringMode,
};
use crate::cli::{CalculatorKind, OutputFormat};
use crate::commands::load_raw_params;
use crate::core::CompositeIndex;
use crate::output::{composite_to_json, format_composite_terminal, write_output};
use crate::report::{markup, Report, Section};

pub struct AnalyzeConfig {
    pub calculator: CalculatorKind,
    pub input: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
    pub illustrative: bool,
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let raw = load_raw_params(config.input.as_deref())?;

    let index: Box<dyn CompositeIndex> = match config.calculator {
        CalculatorKind::Competitiveness => Box::new(competitiveness::analyze(&raw)),
        CalculatorKind::Roi => Box::new(roi::analyze(&raw)),
        CalculatorKind::TimeToProfit => Box::new(time_to_profit::analyze(&raw)),
        CalculatorKind::Risk => Box::new(risk::analyze(&raw)),
        CalculatorKind::MonteCarlo => Box::new(monte_carlo::analyze(&raw, config.seed)),
        CalculatorKind::Synergy => {
            let mode = if config.illustrative {
                ScoringMode::Illustrative {
                    seed: config.seed.unwrap_or(0),
                }
            } else {
                ScoringMode::Deterministic
            };
            Box::new(synergy::analyze(&raw, mode))
        }
    };

    let rendered = render(index.as_ref(), config.format)?;
    write_output(&rendered, config.output.as_ref())
}

fn render(index: &dyn CompositeIndex, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Terminal => Ok(format_composite_terminal(index)),
        OutputFormat::Json => composite_to_json(index),
        OutputFormat::Markup => {
            let report = Report {
                title: format!("Standalone analysis: {}", index.name()),
                region: String::new(),
                objective: String::new(),
                sections: vec![Section::from_index(index.name(), index)],
            };
            Ok(markup::to_markup(&report))
        }
    }
}
