//! Terminal rendering with colored headers.

use colored::Colorize;

use crate::core::CompositeIndex;
use crate::report::{Block, Report, Section};

pub fn format_composite_terminal(index: &dyn CompositeIndex) -> String {
    let mut out = String::new();

    let header = format!(
        "{} | SCORE {:.0}/100 (confidence {:.0}%)",
        index.name().to_uppercase(),
        index.score().round(),
        index.confidence() * 100.0
    );
    out.push_str(&format!("{}\n", header.bold().cyan()));
    out.push_str(&format!("{}\n", "─".repeat(header.len().min(72))));
    out.push_str(&format!("{}\n\n", index.summary()));

    if let Ok(components) = serde_json::to_string_pretty(&index.components()) {
        out.push_str(&format!("{}\n{}\n\n", "Components:".bold(), components));
    }

    let recommendations = index.recommendations();
    if !recommendations.is_empty() {
        out.push_str(&format!("{}\n", "Recommendations:".bold()));
        for (i, recommendation) in recommendations.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, recommendation));
        }
    }

    out
}

pub fn format_report_terminal(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", report.title.bold().cyan()));
    out.push_str(&format!(
        "{}\n\n",
        format!("Region: {} · Objective: {}", report.region, report.objective).dimmed()
    ));
    for section in &report.sections {
        write_section(&mut out, section, 0);
    }
    out
}

fn write_section(out: &mut String, section: &Section, depth: usize) {
    let pad = "  ".repeat(depth);
    let title = if depth == 0 {
        section.title.to_uppercase().bold().to_string()
    } else {
        section.title.bold().to_string()
    };
    out.push_str(&format!("{}{}\n", pad, title));
    for block in &section.blocks {
        match block {
            Block::Paragraph(text) => out.push_str(&format!("{}{}\n", pad, text)),
            Block::Recommendations(items) => {
                for item in items {
                    out.push_str(&format!("{}• {}\n", pad, item));
                }
            }
            Block::Subsection(subsection) => write_section(out, subsection, depth + 1),
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_rendering_indents_subsections() {
        let report = Report {
            title: "T".to_string(),
            region: "R".to_string(),
            objective: "O".to_string(),
            sections: vec![Section {
                title: "Outer".to_string(),
                source: None,
                blocks: vec![Block::Subsection(Section {
                    title: "Inner".to_string(),
                    source: None,
                    blocks: vec![Block::Paragraph("text".to_string())],
                })],
            }],
        };
        let rendered = format_report_terminal(&report);
        assert!(rendered.contains("\n  "));
        assert!(rendered.contains("text"));
    }
}
