//! Report assembly.
//!
//! Builds the ordered section tree from accumulated pipeline results and
//! interleaves narrative prose from the text-generation collaborator. No
//! computation happens here beyond structural assembly; when the narrative
//! service fails, a labeled offline paragraph takes its place.

pub mod markup;

use serde::{Deserialize, Serialize};

use crate::core::CompositeIndex;
use crate::narrative::{offline_paragraph, NarrativePrompt, NarrativeService};
use crate::pipeline::PipelineContext;

/// The fixed block vocabulary of a report section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(String),
    Recommendations(Vec<String>),
    Subsection(Section),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Machine name of the composite index this section was produced from.
    pub source: Option<String>,
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            source: None,
            blocks: Vec::new(),
        }
    }

    pub fn from_index(title: &str, index: &dyn CompositeIndex) -> Self {
        let mut section = Self {
            title: title.to_string(),
            source: Some(index.name().to_string()),
            blocks: Vec::new(),
        };
        section.blocks.push(Block::Paragraph(index.summary()));
        section.blocks.push(Block::Paragraph(format!(
            "Score {:.0}/100 at {:.0}% confidence.",
            index.score().round(),
            index.confidence() * 100.0
        )));
        let recommendations: Vec<String> = index.recommendations().iter().cloned().collect();
        if !recommendations.is_empty() {
            section.blocks.push(Block::Recommendations(recommendations));
        }
        section
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    pub fn subsection(mut self, section: Section) -> Self {
        self.blocks.push(Block::Subsection(section));
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub region: String,
    pub objective: String,
    pub sections: Vec<Section>,
}

/// Assemble the full report from a completed pipeline context.
pub async fn assemble(context: &PipelineContext, narrative: &dyn NarrativeService) -> Report {
    let mut sections = Vec::new();

    sections.push(executive_summary(context, narrative).await);

    if let Some(diagnosis) = &context.diagnosis {
        let mut section = Section::from_index("Regional Diagnosis", &diagnosis.competitiveness);
        section = section.paragraph(format!(
            "Indicator coverage for this diagnosis: {:.0}%.",
            diagnosis.coverage * 100.0
        ));
        section = section.subsection(Section::from_index("Risk Profile", &diagnosis.risk));
        sections.push(section);
    }

    if let Some(simulation) = &context.simulation {
        let section = Section::new("Investment Simulation")
            .subsection(Section::from_index(
                "Return on Investment",
                &simulation.roi,
            ))
            .subsection(Section::from_index(
                "Time to Profit",
                &simulation.time_to_profit,
            ))
            .subsection(Section::from_index(
                "Outcome Sensitivity",
                &simulation.monte_carlo,
            ));
        sections.push(section);
    }

    if let Some(architecture) = &context.architecture {
        let mut section = Section::from_index("Partner Ecosystem", &architecture.synergy);
        for (sector, names) in &architecture.partner_map {
            section = section.paragraph(format!("{}: {}", sector, names.join(", ")));
        }
        sections.push(section);
    }

    Report {
        title: format!("Market Entry Intelligence: {}", context.request.region),
        region: context.request.region.clone(),
        objective: context.request.objective.clone(),
        sections,
    }
}

async fn executive_summary(
    context: &PipelineContext,
    narrative: &dyn NarrativeService,
) -> Section {
    let figures = key_figures(context);
    let prompt = NarrativePrompt::analyst("executive_summary");
    let text = match narrative.generate(&prompt, &figures).await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("narrative service degraded to offline mode: {}", e);
            offline_paragraph(&prompt.schema, &figures)
        }
    };
    Section::new("Executive Summary")
        .paragraph(text)
        .paragraph(figures)
}

fn key_figures(context: &PipelineContext) -> String {
    let mut parts = vec![format!("Objective: {}.", context.request.objective)];
    if let Some(d) = &context.diagnosis {
        parts.push(format!(
            "Competitiveness {:.0}/100, risk {:.0}/100.",
            d.competitiveness.score.round(),
            d.risk.score.round()
        ));
    }
    if let Some(s) = &context.simulation {
        parts.push(format!(
            "ROI score {:.0}/100, break-even {}, {:.0}% of simulated outcomes profitable.",
            s.roi.score.round(),
            match s.time_to_profit.components.break_even_year {
                Some(year) => format!("year {}", year),
                None => "beyond horizon".to_string(),
            },
            s.monte_carlo.components.probability_positive * 100.0
        ));
    }
    if let Some(a) = &context.architecture {
        parts.push(format!(
            "{} candidate partners across {} sectors.",
            a.partner_count,
            a.partner_map.len()
        ));
    }
    parts.join(" ")
}
