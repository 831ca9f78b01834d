//! Tagged-markup serialization for reports.
//!
//! The vocabulary is fixed: `report`, `section`, `paragraph`,
//! `recommendations`/`item`. Serialization preserves section order and
//! nesting exactly; `parse` reconstructs an equivalent tree, which the
//! round-trip tests rely on. Titles and text are entity-escaped.

use crate::errors::{AnalysisError, Result};
use crate::report::{Block, Report, Section};

pub fn to_markup(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<report title=\"{}\" region=\"{}\" objective=\"{}\">\n",
        attr(&report.title),
        attr(&report.region),
        attr(&report.objective)
    ));
    for section in &report.sections {
        write_section(&mut out, section, 1);
    }
    out.push_str("</report>\n");
    out
}

fn write_section(out: &mut String, section: &Section, depth: usize) {
    let pad = "  ".repeat(depth);
    match &section.source {
        Some(source) => out.push_str(&format!(
            "{}<section title=\"{}\" source=\"{}\">\n",
            pad,
            attr(&section.title),
            attr(source)
        )),
        None => out.push_str(&format!("{}<section title=\"{}\">\n", pad, attr(&section.title))),
    }
    for block in &section.blocks {
        write_block(out, block, depth + 1);
    }
    out.push_str(&format!("{}</section>\n", pad));
}

fn write_block(out: &mut String, block: &Block, depth: usize) {
    let pad = "  ".repeat(depth);
    match block {
        Block::Paragraph(text) => {
            out.push_str(&format!("{}<paragraph>{}</paragraph>\n", pad, text_node(text)));
        }
        Block::Recommendations(items) => {
            out.push_str(&format!("{}<recommendations>\n", pad));
            for item in items {
                out.push_str(&format!("{}  <item>{}</item>\n", pad, text_node(item)));
            }
            out.push_str(&format!("{}</recommendations>\n", pad));
        }
        Block::Subsection(section) => write_section(out, section, depth),
    }
}

fn attr(value: &str) -> String {
    html_escape::encode_safe(value).to_string()
}

fn text_node(value: &str) -> String {
    html_escape::encode_text(value).to_string()
}

pub fn parse(input: &str) -> Result<Report> {
    let mut cursor = Cursor::new(input);
    cursor.skip_whitespace();
    let attrs = cursor.open_tag("report")?;
    let mut sections = Vec::new();
    loop {
        cursor.skip_whitespace();
        if cursor.at_close_tag("report") {
            break;
        }
        sections.push(parse_section(&mut cursor)?);
    }
    cursor.close_tag("report")?;
    Ok(Report {
        title: attrs.require("title")?,
        region: attrs.require("region")?,
        objective: attrs.require("objective")?,
        sections,
    })
}

fn parse_section(cursor: &mut Cursor) -> Result<Section> {
    let attrs = cursor.open_tag("section")?;
    let mut blocks = Vec::new();
    loop {
        cursor.skip_whitespace();
        if cursor.at_close_tag("section") {
            break;
        }
        match cursor.peek_tag_name()? {
            "paragraph" => {
                cursor.open_tag("paragraph")?;
                let text = cursor.text_until_tag();
                cursor.close_tag("paragraph")?;
                blocks.push(Block::Paragraph(text));
            }
            "recommendations" => {
                cursor.open_tag("recommendations")?;
                let mut items = Vec::new();
                loop {
                    cursor.skip_whitespace();
                    if cursor.at_close_tag("recommendations") {
                        break;
                    }
                    cursor.open_tag("item")?;
                    items.push(cursor.text_until_tag());
                    cursor.close_tag("item")?;
                }
                cursor.close_tag("recommendations")?;
                blocks.push(Block::Recommendations(items));
            }
            "section" => blocks.push(Block::Subsection(parse_section(cursor)?)),
            other => {
                return Err(AnalysisError::markup(format!(
                    "unexpected element '{}' inside section",
                    other
                )))
            }
        }
    }
    cursor.close_tag("section")?;
    Ok(Section {
        title: attrs.require("title")?,
        source: attrs.get("source"),
        blocks,
    })
}

struct Attrs(Vec<(String, String)>);

impl Attrs {
    fn get(&self, name: &str) -> Option<String> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn require(&self, name: &str) -> Result<String> {
        self.get(name)
            .ok_or_else(|| AnalysisError::markup(format!("missing '{}' attribute", name)))
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn peek_tag_name(&mut self) -> Result<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        if !rest.starts_with('<') || rest.starts_with("</") {
            return Err(AnalysisError::markup("expected an opening tag"));
        }
        let name_end = rest[1..]
            .find(|c: char| c == ' ' || c == '>' || c == '/')
            .ok_or_else(|| AnalysisError::markup("unterminated tag"))?;
        Ok(&rest[1..1 + name_end])
    }

    fn at_close_tag(&self, name: &str) -> bool {
        self.rest().starts_with(&format!("</{}>", name))
    }

    fn open_tag(&mut self, name: &str) -> Result<Attrs> {
        self.skip_whitespace();
        let expected = format!("<{}", name);
        if !self.rest().starts_with(&expected) {
            return Err(AnalysisError::markup(format!(
                "expected <{}> near position {}",
                name, self.pos
            )));
        }
        self.pos += expected.len();
        let end = self
            .rest()
            .find('>')
            .ok_or_else(|| AnalysisError::markup(format!("unterminated <{}> tag", name)))?;
        let attr_text = &self.rest()[..end];
        self.pos += end + 1;
        parse_attrs(attr_text)
    }

    fn close_tag(&mut self, name: &str) -> Result<()> {
        self.skip_whitespace();
        let expected = format!("</{}>", name);
        if !self.rest().starts_with(&expected) {
            return Err(AnalysisError::markup(format!(
                "expected </{}> near position {}",
                name, self.pos
            )));
        }
        self.pos += expected.len();
        Ok(())
    }

    /// Decoded text content up to the next tag.
    fn text_until_tag(&mut self) -> String {
        let rest = self.rest();
        let end = rest.find('<').unwrap_or(rest.len());
        self.pos += end;
        html_escape::decode_html_entities(&rest[..end]).to_string()
    }
}

fn parse_attrs(text: &str) -> Result<Attrs> {
    let mut attrs = Vec::new();
    let mut rest = text.trim();
    while !rest.is_empty() {
        let eq = rest
            .find('=')
            .ok_or_else(|| AnalysisError::markup("malformed attribute"))?;
        let name = rest[..eq].trim().to_string();
        let after = rest[eq + 1..].trim_start();
        if !after.starts_with('"') {
            return Err(AnalysisError::markup("attribute value must be quoted"));
        }
        let close = after[1..]
            .find('"')
            .ok_or_else(|| AnalysisError::markup("unterminated attribute value"))?;
        let value = html_escape::decode_html_entities(&after[1..1 + close]).to_string();
        attrs.push((name, value));
        rest = after[close + 2..].trim_start();
    }
    Ok(Attrs(attrs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_report() -> Report {
        Report {
            title: "Market Entry Intelligence: Veridia".to_string(),
            region: "Veridia".to_string(),
            objective: "expand <fast> & \"cheap\"".to_string(),
            sections: vec![
                Section {
                    title: "Executive Summary".to_string(),
                    source: None,
                    blocks: vec![Block::Paragraph("Strong outlook.".to_string())],
                },
                Section {
                    title: "Regional Diagnosis".to_string(),
                    source: Some("competitiveness".to_string()),
                    blocks: vec![
                        Block::Paragraph("Scores 76/100.".to_string()),
                        Block::Recommendations(vec![
                            "Invest in logistics".to_string(),
                            "Mind tariffs & quotas".to_string(),
                        ]),
                        Block::Subsection(Section {
                            title: "Risk Profile".to_string(),
                            source: Some("risk".to_string()),
                            blocks: vec![Block::Paragraph("Moderate risk.".to_string())],
                        }),
                    ],
                },
            ],
        }
    }

    #[test]
    fn round_trip_preserves_structure() {
        let report = sample_report();
        let markup = to_markup(&report);
        let parsed = parse(&markup).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn special_characters_are_escaped_in_markup() {
        let markup = to_markup(&sample_report());
        assert!(markup.contains("expand &lt;fast&gt;"));
        assert!(!markup.contains("expand <fast>"));
        assert!(markup.contains("Mind tariffs &amp; quotas"));
    }

    #[test]
    fn section_order_is_preserved() {
        let markup = to_markup(&sample_report());
        let summary_at = markup.find("Executive Summary").unwrap();
        let diagnosis_at = markup.find("Regional Diagnosis").unwrap();
        assert!(summary_at < diagnosis_at);
    }

    #[test]
    fn unknown_elements_are_rejected() {
        let markup = "<report title=\"t\" region=\"r\" objective=\"o\">\n\
                      <section title=\"s\"><figure>x</figure></section>\n\
                      </report>";
        let err = parse(markup).unwrap_err();
        assert!(err.to_string().contains("unexpected element"));
    }

    #[test]
    fn missing_required_attribute_is_rejected() {
        let markup = "<report title=\"t\" region=\"r\">\n</report>\n";
        assert!(parse(markup).is_err());
    }

    #[test]
    fn empty_report_round_trips() {
        let report = Report {
            title: "Empty".to_string(),
            region: "Nowhere".to_string(),
            objective: "none".to_string(),
            sections: Vec::new(),
        };
        let parsed = parse(&to_markup(&report)).unwrap();
        assert_eq!(parsed, report);
    }
}
