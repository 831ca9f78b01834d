//! Return-on-investment analysis.
//!
//! Discounts a constant annual return stream over the plan horizon at a
//! risk-adjusted rate. Score is a linear transform of NPV relative to
//! principal, clamped into [0, 100].

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::config::get_config;
use crate::core::inputs::{NormalizationReport, RawParams, RoiInput};
use crate::core::{clamp_score, CompositeIndex};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoiComponents {
    pub net_present_value: f64,
    pub annual_return: f64,
    pub discount_rate: f64,
    /// Years to recover principal at the nominal annual return; `None` when
    /// the return stream cannot recover it.
    pub payback_years: Option<f64>,
    pub total_discounted_return: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoiAnalysis {
    pub score: f64,
    pub components: RoiComponents,
    pub recommendations: Vector<String>,
    pub confidence: f64,
    pub summary: String,
}

pub fn analyze(raw: &RawParams) -> RoiAnalysis {
    let (input, report) = RoiInput::from_raw(raw);
    compute(&input, &report)
}

pub fn compute(input: &RoiInput, report: &NormalizationReport) -> RoiAnalysis {
    let model = &get_config().model;

    let annual_return = input.initial_investment * input.expected_roi / 100.0;
    let discount_rate = model.base_discount_rate + input.risk_factor * model.risk_premium;

    let total_discounted_return = discounted_stream(annual_return, discount_rate, input.timeline_years);
    let net_present_value = total_discounted_return - input.initial_investment;

    // Zero nominal return means principal is never recovered; report that
    // instead of dividing by zero.
    let payback_years = if annual_return > 0.0 {
        Some(input.initial_investment / annual_return)
    } else {
        None
    };

    let score = clamp_score(50.0 + 50.0 * net_present_value / input.initial_investment);

    let components = RoiComponents {
        net_present_value,
        annual_return,
        discount_rate,
        payback_years,
        total_discounted_return,
    };
    let recommendations = recommend(input, &components);
    let summary = summarize(input, &components, score);

    RoiAnalysis {
        score,
        components,
        recommendations,
        confidence: report.confidence(),
        summary,
    }
}

fn discounted_stream(annual: f64, rate: f64, years: u32) -> f64 {
    (1..=years)
        .map(|t| annual / (1.0 + rate).powi(t as i32))
        .sum()
}

fn summarize(input: &RoiInput, c: &RoiComponents, score: f64) -> String {
    let payback = match c.payback_years {
        Some(years) => format!("{:.1}-year payback", years),
        None => "no payback at the expected return".to_string(),
    };
    format!(
        "A {:.0}% expected return over {} years discounts to an NPV of {:.0} ({}), scoring {:.0}/100.",
        input.expected_roi, input.timeline_years, c.net_present_value, payback, score.round(),
    )
}

fn recommend(input: &RoiInput, c: &RoiComponents) -> Vector<String> {
    let mut recommendations = Vector::new();

    if c.net_present_value < 0.0 {
        recommendations.push_back(
            "Discounted returns do not cover principal; renegotiate terms or reduce exposure"
                .to_string(),
        );
    }
    match c.payback_years {
        None => recommendations.push_back(
            "No nominal return stream; the plan never recovers principal as structured"
                .to_string(),
        ),
        Some(years) if years > input.timeline_years as f64 => recommendations.push_back(format!(
            "Payback ({:.1} years) exceeds the {}-year plan; extend the horizon or improve margins",
            years, input.timeline_years
        )),
        Some(_) => {}
    }
    if input.risk_factor > 0.5 {
        recommendations.push_back(
            "Risk factor is high; hedge currency and political exposure before committing"
                .to_string(),
        );
    }
    if recommendations.is_empty() {
        recommendations.push_back(
            "Return profile is sound; proceed with staged capital deployment".to_string(),
        );
    }

    recommendations
}

impl CompositeIndex for RoiAnalysis {
    fn name(&self) -> &'static str {
        "roi"
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
    fn reference_scenario_matches_expected_payback() {
        let params = raw(json!({
            "initial_investment": 1_000_000.0,
            "expected_roi": 15.0,
            "timeline": 5,
            "risk_factor": 0.1,
        }));
        let analysis = analyze(&params);
        let payback = analysis.components.payback_years.unwrap();
        assert!((payback - 6.666_666_666_666_667).abs() < 1e-9);
        assert!(analysis.components.net_present_value.is_finite());
        assert!(analysis.score >= 0.0 && analysis.score <= 100.0);
    }

    #[test]
    fn zero_expected_roi_yields_nonpositive_npv_and_low_score() {
        let params = raw(json!({
            "initial_investment": 500_000.0,
            "expected_roi": 0.0,
            "timeline": 5,
            "risk_factor": 0.2,
        }));
        let analysis = analyze(&params);
        assert!(analysis.components.net_present_value <= 0.0);
        assert!(analysis.score <= 50.0);
        assert!(analysis.components.payback_years.is_none());
    }

    #[test]
    fn discount_rate_reflects_risk_factor() {
        let low = analyze(&raw(json!({ "risk_factor": 0.0 })));
        let high = analyze(&raw(json!({ "risk_factor": 1.0 })));
        assert!(high.components.discount_rate > low.components.discount_rate);
        // Same nominal stream discounted harder is worth less.
        assert!(high.components.net_present_value < low.components.net_present_value);
    }

    #[test]
    fn generous_returns_clamp_to_one_hundred() {
        let params = raw(json!({
            "initial_investment": 100_000.0,
            "expected_roi": 200.0,
            "timeline": 20,
            "risk_factor": 0.0,
        }));
        let analysis = analyze(&params);
        assert_eq!(analysis.score, 100.0);
    }

    #[test]
    fn long_payback_triggers_horizon_recommendation() {
        let params = raw(json!({
            "initial_investment": 1_000_000.0,
            "expected_roi": 5.0,
            "timeline": 5,
            "risk_factor": 0.1,
        }));
        let analysis = analyze(&params);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("exceeds the 5-year plan")));
    }
}
