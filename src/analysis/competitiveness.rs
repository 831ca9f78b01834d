//! Regional Competitiveness Index.
//!
//! Weighted sum of six regional sub-scores. Five arrive as 0-100 ratings;
//! the economic sub-score is derived from an absolute output magnitude
//! scaled against a ceiling and capped at 100 before weighting.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::config::get_config;
use crate::core::inputs::{CompetitivenessInput, NormalizationReport, RawParams};
use crate::core::{clamp_score, CompositeIndex};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompetitivenessComponents {
    pub economic: f64,
    pub infrastructure: f64,
    pub human_capital: f64,
    pub institutions: f64,
    pub innovation: f64,
    pub market_access: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompetitivenessAnalysis {
    pub score: f64,
    pub components: CompetitivenessComponents,
    pub recommendations: Vector<String>,
    pub confidence: f64,
    pub summary: String,
}

/// Normalize a raw field mapping and compute the index.
pub fn analyze(raw: &RawParams) -> CompetitivenessAnalysis {
    let (input, report) = CompetitivenessInput::from_raw(raw);
    compute(&input, &report)
}

pub fn compute(
    input: &CompetitivenessInput,
    report: &NormalizationReport,
) -> CompetitivenessAnalysis {
    let config = get_config();
    let weights = &config.competitiveness_weights;

    let components = CompetitivenessComponents {
        economic: economic_subscore(input.economic_output, config.model.economic_ceiling),
        infrastructure: clamp_score(input.infrastructure),
        human_capital: clamp_score(input.human_capital),
        institutions: clamp_score(input.institutions),
        innovation: clamp_score(input.innovation),
        market_access: clamp_score(input.market_access),
    };

    let score = clamp_score(
        weights.economic * components.economic
            + weights.infrastructure * components.infrastructure
            + weights.human_capital * components.human_capital
            + weights.institutions * components.institutions
            + weights.innovation * components.innovation
            + weights.market_access * components.market_access,
    );

    let recommendations = recommend(&components);
    let summary = format!(
        "Regional competitiveness scores {:.0}/100, led by {} ({:.0}) and held back by {} ({:.0}).",
        score.round(),
        strongest(&components).0,
        strongest(&components).1,
        weakest(&components).0,
        weakest(&components).1,
    );

    CompetitivenessAnalysis {
        score,
        components,
        recommendations,
        confidence: report.confidence(),
        summary,
    }
}

/// Scale economic output against the ceiling, capping at 100 before the
/// weighted sum sees it.
fn economic_subscore(output: f64, ceiling: f64) -> f64 {
    if ceiling <= 0.0 {
        return 0.0;
    }
    clamp_score((output / ceiling).min(1.0) * 100.0)
}

fn named_components(c: &CompetitivenessComponents) -> [(&'static str, f64); 6] {
    [
        ("economic output", c.economic),
        ("infrastructure", c.infrastructure),
        ("human capital", c.human_capital),
        ("institutions", c.institutions),
        ("innovation", c.innovation),
        ("market access", c.market_access),
    ]
}

fn strongest(c: &CompetitivenessComponents) -> (&'static str, f64) {
    named_components(c)
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or(("economic output", 0.0))
}

fn weakest(c: &CompetitivenessComponents) -> (&'static str, f64) {
    named_components(c)
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap_or(("economic output", 0.0))
}

fn recommend(c: &CompetitivenessComponents) -> Vector<String> {
    let mut recommendations = Vector::new();

    if c.economic < 50.0 {
        recommendations.push_back(
            "Economic base is thin; prioritize export diversification and anchor-tenant deals"
                .to_string(),
        );
    }
    if c.infrastructure < 70.0 {
        recommendations.push_back(
            "Infrastructure lags; budget for logistics and connectivity investment before entry"
                .to_string(),
        );
    }
    if c.human_capital < 70.0 {
        recommendations.push_back(
            "Workforce readiness is below target; plan local training partnerships".to_string(),
        );
    }
    if c.institutions < 60.0 {
        recommendations.push_back(
            "Institutional quality is weak; engage local counsel early and stage commitments"
                .to_string(),
        );
    }
    if c.innovation < 60.0 {
        recommendations
            .push_back("Innovation capacity is limited; seek R&D incentive programs".to_string());
    }
    if c.market_access < 70.0 {
        recommendations.push_back(
            "Market access is constrained; evaluate trade-agreement coverage and tariffs"
                .to_string(),
        );
    }
    if recommendations.is_empty() {
        recommendations.push_back(
            "All competitiveness drivers are solid; maintain position and monitor quarterly"
                .to_string(),
        );
    }

    recommendations
}

impl CompositeIndex for CompetitivenessAnalysis {
    fn name(&self) -> &'static str {
        "competitiveness"
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }

    fn components(&self) -> serde_json::Value {
        serde_json::to_value(&self.components).unwrap_or_default()
    }

    fn recommendations(&self) -> Vector<String> {
        self.recommendations.clone()
    }

    fn summary(&self) -> String {
        self.summary.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawParams {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn reference_scenario_scores_seventy_six() {
        let params = raw(json!({
            "economic": 7.5e11,
            "infrastructure": 75.0,
            "human_capital": 78.0,
            "institutions": 76.0,
            "innovation": 72.0,
            "market_access": 80.0,
        }));
        let analysis = analyze(&params);
        // 0.25*75 + 0.20*75 + 0.20*78 + 0.15*76 + 0.10*72 + 0.10*80
        assert_eq!(analysis.score.round() as i64, 76);
        assert_eq!(analysis.components.economic, 75.0);
    }

    #[test]
    fn economic_subscore_caps_at_ceiling() {
        assert_eq!(economic_subscore(5.0e12, 1.0e12), 100.0);
        assert_eq!(economic_subscore(2.5e11, 1.0e12), 25.0);
        assert_eq!(economic_subscore(0.0, 1.0e12), 0.0);
    }

    #[test]
    fn empty_input_still_produces_in_range_score() {
        let analysis = analyze(&RawParams::new());
        assert!(analysis.score >= 0.0 && analysis.score <= 100.0);
        assert!(analysis.confidence >= 0.0 && analysis.confidence <= 1.0);
        assert!(!analysis.recommendations.is_empty());
    }

    #[test]
    fn weak_components_each_trigger_a_recommendation() {
        let params = raw(json!({
            "economic": 1.0e10,
            "infrastructure": 40.0,
            "human_capital": 45.0,
            "institutions": 30.0,
            "innovation": 35.0,
            "market_access": 50.0,
        }));
        let analysis = analyze(&params);
        assert_eq!(analysis.recommendations.len(), 6);
    }

    #[test]
    fn strong_region_gets_maintain_recommendation() {
        let params = raw(json!({
            "economic": 9.0e11,
            "infrastructure": 90.0,
            "human_capital": 88.0,
            "institutions": 85.0,
            "innovation": 80.0,
            "market_access": 92.0,
        }));
        let analysis = analyze(&params);
        assert_eq!(analysis.recommendations.len(), 1);
        assert!(analysis.recommendations[0].contains("maintain"));
    }
}
