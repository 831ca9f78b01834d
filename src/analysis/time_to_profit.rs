//! Time-to-profit analysis.
//!
//! Projects year-by-year revenue against a fixed operating-cost ratio to
//! find the break-even horizon, with cumulative NPV at a fixed discount
//! rate. The score penalizes each additional year before break-even
//! linearly, floored at zero.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::config::get_config;
use crate::core::inputs::{NormalizationReport, RawParams, TimeToProfitInput};
use crate::core::{clamp_score, CompositeIndex};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YearProjection {
    pub year: u32,
    pub revenue: f64,
    pub operating_cost: f64,
    pub profit: f64,
    /// Running profit including the initial outlay.
    pub cumulative_profit: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeToProfitComponents {
    /// First projection year whose cumulative profit is non-negative.
    pub break_even_year: Option<u32>,
    pub cumulative_npv: f64,
    pub annual_operating_cost: f64,
    pub first_year_revenue: f64,
    pub projections: Vector<YearProjection>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeToProfitAnalysis {
    pub score: f64,
    pub components: TimeToProfitComponents,
    pub recommendations: Vector<String>,
    pub confidence: f64,
    pub summary: String,
}

pub fn analyze(raw: &RawParams) -> TimeToProfitAnalysis {
    let (input, report) = TimeToProfitInput::from_raw(raw);
    compute(&input, &report)
}

pub fn compute(input: &TimeToProfitInput, report: &NormalizationReport) -> TimeToProfitAnalysis {
    let model = &get_config().model;

    let annual_operating_cost = input.initial_investment * model.operating_cost_ratio;
    let first_year_revenue = input.market_size * model.capture_rate;
    let growth = 1.0 + input.growth_rate / 100.0;

    let mut projections = Vector::new();
    let mut cumulative = -input.initial_investment;
    let mut cumulative_npv = -input.initial_investment;
    let mut break_even_year = None;

    for year in 1..=input.horizon_years {
        let revenue = first_year_revenue * growth.powi(year as i32 - 1);
        let profit = revenue - annual_operating_cost;
        cumulative += profit;
        cumulative_npv += profit / (1.0 + model.tpp_discount_rate).powi(year as i32);
        if break_even_year.is_none() && cumulative >= 0.0 {
            break_even_year = Some(year);
        }
        projections.push_back(YearProjection {
            year,
            revenue,
            operating_cost: annual_operating_cost,
            profit,
            cumulative_profit: cumulative,
        });
    }

    let score = match break_even_year {
        Some(year) => clamp_score(100.0 - (year as f64 - 1.0) * model.year_penalty),
        None => 0.0,
    };

    let components = TimeToProfitComponents {
        break_even_year,
        cumulative_npv,
        annual_operating_cost,
        first_year_revenue,
        projections,
    };
    let recommendations = recommend(input, &components);
    let summary = summarize(input, &components, score);

    TimeToProfitAnalysis {
        score,
        components,
        recommendations,
        confidence: report.confidence(),
        summary,
    }
}

fn summarize(input: &TimeToProfitInput, c: &TimeToProfitComponents, score: f64) -> String {
    match c.break_even_year {
        Some(year) => format!(
            "Break-even arrives in year {} of {}; cumulative NPV over the horizon is {:.0}. Score {:.0}/100.",
            year, input.horizon_years, c.cumulative_npv, score.round(),
        ),
        None => format!(
            "The venture does not break even within the {}-year horizon; cumulative NPV is {:.0}.",
            input.horizon_years, c.cumulative_npv,
        ),
    }
}

fn recommend(input: &TimeToProfitInput, c: &TimeToProfitComponents) -> Vector<String> {
    let mut recommendations = Vector::new();

    match c.break_even_year {
        None => recommendations.push_back(
            "No break-even within the horizon; rescale the investment or target a larger market"
                .to_string(),
        ),
        Some(year) if year > 5 => recommendations.push_back(format!(
            "Break-even in year {} is slow; front-load revenue or trim fixed costs",
            year
        )),
        Some(_) => {}
    }
    if c.first_year_revenue < c.annual_operating_cost {
        recommendations.push_back(
            "First-year revenue does not cover operating costs; plan bridge financing".to_string(),
        );
    }
    if input.growth_rate < 3.0 {
        recommendations.push_back(
            "Market growth is weak; profitability depends on capture share, not expansion"
                .to_string(),
        );
    }
    if c.cumulative_npv < 0.0 {
        recommendations.push_back(
            "Discounted cumulative profit is negative over the horizon; revisit the cost ratio"
                .to_string(),
        );
    }
    if recommendations.is_empty() {
        recommendations
            .push_back("Profitability horizon is attractive; commit to the plan".to_string());
    }

    recommendations
}

impl CompositeIndex for TimeToProfitAnalysis {
    fn name(&self) -> &'static str {
        "time_to_profit"
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
    fn projections_cover_the_whole_horizon() {
        let analysis = analyze(&raw(json!({
            "market_size": 8.0e8,
            "growth_rate": 6.0,
            "initial_investment": 2_000_000.0,
            "timeline": 8,
        })));
        assert_eq!(analysis.components.projections.len(), 8);
        let last = analysis.components.projections.last().unwrap();
        assert_eq!(last.year, 8);
    }

    #[test]
    fn cumulative_profit_starts_below_zero() {
        let analysis = analyze(&raw(json!({
            "market_size": 5.0e8,
            "initial_investment": 10_000_000.0,
            "timeline": 3,
        })));
        let first = &analysis.components.projections[0];
        assert!(first.cumulative_profit < 0.0);
    }

    #[test]
    fn strong_market_breaks_even_early_and_scores_high() {
        let analysis = analyze(&raw(json!({
            "market_size": 1.0e9,
            "growth_rate": 10.0,
            "initial_investment": 1_000_000.0,
            "timeline": 10,
        })));
        // Year-one revenue of 5M against 1.3M total outlay breaks even fast.
        assert_eq!(analysis.components.break_even_year, Some(1));
        assert_eq!(analysis.score, 100.0);
    }

    #[test]
    fn hopeless_venture_scores_zero() {
        let analysis = analyze(&raw(json!({
            "market_size": 1_000.0,
            "growth_rate": 0.0,
            "initial_investment": 10_000_000.0,
            "timeline": 10,
        })));
        assert_eq!(analysis.components.break_even_year, None);
        assert_eq!(analysis.score, 0.0);
        assert!(analysis
            .recommendations
            .iter()
            .any(|r| r.contains("No break-even")));
    }

    #[test]
    fn growth_rate_increase_never_lowers_the_score() {
        let base = json!({
            "market_size": 3.0e8,
            "initial_investment": 4_000_000.0,
            "timeline": 12,
        });
        let mut previous = -1.0;
        for growth in [0.0, 2.0, 5.0, 9.0, 15.0, 30.0] {
            let mut params = raw(base.clone());
            params.insert("growth_rate".to_string(), json!(growth));
            let analysis = analyze(&params);
            assert!(
                analysis.score >= previous,
                "score regressed at growth {}: {} < {}",
                growth,
                analysis.score,
                previous
            );
            previous = analysis.score;
        }
    }
}
