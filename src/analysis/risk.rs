//! Risk index.
//!
//! Weighted blend of six risk factors on a 0-100 scale where higher is
//! riskier. Economic volatility is deviation from an ideal 3% growth rate,
//! market instability follows inflation, currency exposure follows the
//! trade-balance sign, and political/regulatory/operational exposures are
//! fixed baselines configured per deployment.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::config::get_config;
use crate::core::inputs::{NormalizationReport, RawParams, RiskInput};
use crate::core::{clamp_score, CompositeIndex};

/// Growth rate treated as the stable ideal; deviation in either direction
/// reads as volatility.
pub const IDEAL_GDP_GROWTH: f64 = 3.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub economic_volatility: f64,
    pub market_instability: f64,
    pub currency_exposure: f64,
    pub political: f64,
    pub regulatory: f64,
    pub operational: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    Elevated,
    Severe,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s < 25.0 => Self::Low,
            s if s < 50.0 => Self::Moderate,
            s if s < 75.0 => Self::Elevated,
            _ => Self::Severe,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// 0-100, higher is riskier.
    pub score: f64,
    pub level: RiskLevel,
    pub components: RiskFactors,
    pub recommendations: Vector<String>,
    pub confidence: f64,
    pub summary: String,
}

pub fn analyze(raw: &RawParams) -> RiskAnalysis {
    let (input, report) = RiskInput::from_raw(raw);
    compute(&input, &report)
}

pub fn compute(input: &RiskInput, report: &NormalizationReport) -> RiskAnalysis {
    let config = get_config();
    let weights = &config.risk_weights;
    let baselines = &config.risk_baselines;

    let components = RiskFactors {
        economic_volatility: clamp_score((input.gdp_growth - IDEAL_GDP_GROWTH).abs() * 8.0),
        market_instability: clamp_score(input.inflation * 5.0),
        currency_exposure: if input.trade_balance < 0.0 { 65.0 } else { 25.0 },
        political: clamp_score(baselines.political),
        regulatory: clamp_score(baselines.regulatory),
        operational: clamp_score(baselines.operational),
    };

    let score = clamp_score(
        weights.economic * components.economic_volatility
            + weights.market * components.market_instability
            + weights.currency * components.currency_exposure
            + weights.political * components.political
            + weights.regulatory * components.regulatory
            + weights.operational * components.operational,
    );
    let level = RiskLevel::from_score(score);

    let recommendations = recommend(&components, level);
    let summary = format!(
        "Composite risk is {:.0}/100 ({:?}); dominant factor is {}.",
        score.round(),
        level,
        dominant_factor(&components).0,
    );

    RiskAnalysis {
        score,
        level,
        components,
        recommendations,
        confidence: report.confidence(),
        summary,
    }
}

fn dominant_factor(c: &RiskFactors) -> (&'static str, f64) {
    [
        ("economic volatility", c.economic_volatility),
        ("market instability", c.market_instability),
        ("currency exposure", c.currency_exposure),
        ("political exposure", c.political),
        ("regulatory exposure", c.regulatory),
        ("operational exposure", c.operational),
    ]
    .into_iter()
    .max_by(|a, b| a.1.total_cmp(&b.1))
    .unwrap_or(("economic volatility", 0.0))
}

fn recommend(c: &RiskFactors, level: RiskLevel) -> Vector<String> {
    let mut recommendations = Vector::new();

    if c.economic_volatility > 40.0 {
        recommendations.push_back(
            "Growth is far from trend; stage capital against macro checkpoints".to_string(),
        );
    }
    if c.market_instability > 40.0 {
        recommendations.push_back(
            "Inflation pressure is significant; index contracts and shorten pricing cycles"
                .to_string(),
        );
    }
    if c.currency_exposure > 50.0 {
        recommendations.push_back(
            "Trade deficit implies currency pressure; hedge repatriation flows".to_string(),
        );
    }
    if matches!(level, RiskLevel::Elevated | RiskLevel::Severe) {
        recommendations.push_back(
            "Overall risk is high; require board-level sign-off and an exit plan".to_string(),
        );
    }
    if recommendations.is_empty() {
        recommendations.push_back(
            "Risk profile is manageable; standard monitoring cadence applies".to_string(),
        );
    }

    recommendations
}

impl CompositeIndex for RiskAnalysis {
    fn name(&self) -> &'static str {
        "risk"
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
    fn stable_economy_with_surplus_scores_low() {
        let analysis = analyze(&raw(json!({
            "gdp_growth": 3.0,
            "inflation": 2.0,
            "trade_balance": 5.0e9,
        })));
        // Volatility is zero; the floor comes from baselines and surplus-side
        // currency exposure.
        assert_eq!(analysis.components.economic_volatility, 0.0);
        assert_eq!(analysis.components.currency_exposure, 25.0);
        assert!(analysis.score < 25.0);
        assert_eq!(analysis.level, RiskLevel::Low);
    }

    #[test]
    fn deficit_raises_currency_exposure() {
        let surplus = analyze(&raw(json!({ "trade_balance": 1.0e9 })));
        let deficit = analyze(&raw(json!({ "trade_balance": -1.0e9 })));
        assert_eq!(deficit.components.currency_exposure, 65.0);
        assert!(deficit.score > surplus.score);
    }

    #[test]
    fn recession_and_hyperinflation_read_as_severe_factors() {
        let analysis = analyze(&raw(json!({
            "gdp_growth": -8.0,
            "inflation": 30.0,
            "trade_balance": -2.0e9,
        })));
        assert_eq!(analysis.components.economic_volatility, 88.0);
        assert_eq!(analysis.components.market_instability, 100.0);
        assert!(analysis.score > 60.0);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("board-level")));
    }

    #[test]
    fn score_is_always_in_range() {
        for growth in [-20.0, 0.0, 3.0, 20.0] {
            for inflation in [-5.0, 0.0, 50.0] {
                let analysis = analyze(&raw(json!({
                    "gdp_growth": growth,
                    "inflation": inflation,
                })));
                assert!(analysis.score >= 0.0 && analysis.score <= 100.0);
            }
        }
    }

    #[test]
    fn level_thresholds_partition_the_scale() {
        assert_eq!(RiskLevel::from_score(10.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(25.0), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(50.0), RiskLevel::Elevated);
        assert_eq!(RiskLevel::from_score(75.0), RiskLevel::Severe);
    }
}
