//! JSON rendering of composite results and reports.

use anyhow::Result;
use serde::Serialize;

use crate::core::CompositeIndex;

/// The uniform result shape shared by every calculator.
#[derive(Debug, Serialize)]
pub struct CompositeSummary {
    pub name: String,
    pub score: f64,
    pub confidence: f64,
    pub components: serde_json::Value,
    pub recommendations: Vec<String>,
    pub analysis: String,
}

impl CompositeSummary {
    pub fn from_index(index: &dyn CompositeIndex) -> Self {
        Self {
            name: index.name().to_string(),
            score: index.score(),
            confidence: index.confidence(),
            components: index.components(),
            recommendations: index.recommendations().iter().cloned().collect(),
            analysis: index.summary(),
        }
    }
}

pub fn composite_to_json(index: &dyn CompositeIndex) -> Result<String> {
    Ok(serde_json::to_string_pretty(&CompositeSummary::from_index(
        index,
    ))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::competitiveness;
    use crate::core::inputs::RawParams;

    #[test]
    fn composite_json_carries_the_uniform_shape() {
        let analysis = competitiveness::analyze(&RawParams::new());
        let json = composite_to_json(&analysis).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in ["name", "score", "confidence", "components", "recommendations", "analysis"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["name"], "competitiveness");
    }
}
