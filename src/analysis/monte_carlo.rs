//! Monte-Carlo sensitivity simulation.
//!
//! Runs N independent trials perturbing the expected return and the horizon
//! by a risk-proportional uniform factor, accumulating a discounted cash
//! flow per trial. Reports the sample distribution of NPV outcomes. All
//! randomness flows through an injected generator so seeded runs reproduce
//! bit-for-bit.

use im::Vector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::get_config;
use crate::core::inputs::{MonteCarloInput, NormalizationReport, RawParams};
use crate::core::{clamp_score, clamp_unit, CompositeIndex};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonteCarloComponents {
    pub iterations: u32,
    pub mean_npv: f64,
    pub std_dev: f64,
    /// 95% confidence interval for the mean (normal approximation).
    pub ci_low: f64,
    pub ci_high: f64,
    pub probability_positive: f64,
    pub best_npv: f64,
    pub worst_npv: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonteCarloAnalysis {
    pub score: f64,
    pub components: MonteCarloComponents,
    pub recommendations: Vector<String>,
    pub confidence: f64,
    pub summary: String,
}

/// Normalize raw params and simulate. `seed` pins the generator for
/// reproducible runs; `None` draws entropy from the OS.
pub fn analyze(raw: &RawParams, seed: Option<u64>) -> MonteCarloAnalysis {
    let (input, report) = MonteCarloInput::from_raw(raw);
    run(&input, &report, seed)
}

pub fn run(
    input: &MonteCarloInput,
    report: &NormalizationReport,
    seed: Option<u64>,
) -> MonteCarloAnalysis {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    simulate_with(input, report, &mut rng)
}

pub fn simulate_with<R: Rng>(
    input: &MonteCarloInput,
    report: &NormalizationReport,
    rng: &mut R,
) -> MonteCarloAnalysis {
    let model = &get_config().model;
    let discount_rate = model.base_discount_rate + input.risk_factor * model.risk_premium;

    let mut outcomes = Vec::with_capacity(input.iterations as usize);
    for _ in 0..input.iterations {
        outcomes.push(trial(input, discount_rate, rng));
    }

    let components = summarize_outcomes(&outcomes, input.iterations);
    let score = clamp_score(components.probability_positive * 100.0);
    let recommendations = recommend(&components);
    let summary = format!(
        "{} trials put mean NPV at {:.0} (σ {:.0}); {:.0}% of outcomes are profitable.",
        components.iterations,
        components.mean_npv,
        components.std_dev,
        components.probability_positive * 100.0,
    );

    MonteCarloAnalysis {
        score,
        components,
        recommendations,
        confidence: clamp_unit(report.confidence()),
        summary,
    }
}

fn trial<R: Rng>(input: &MonteCarloInput, discount_rate: f64, rng: &mut R) -> f64 {
    let roi = input.expected_roi * perturbation(input.risk_factor, rng);
    let horizon = (input.timeline_years as f64 * perturbation(input.risk_factor, rng))
        .round()
        .clamp(1.0, 50.0) as u32;

    let annual = input.initial_investment * roi / 100.0;
    let discounted: f64 = (1..=horizon)
        .map(|t| annual / (1.0 + discount_rate).powi(t as i32))
        .sum();
    discounted - input.initial_investment
}

/// Uniform multiplicative factor in [1 - risk, 1 + risk].
fn perturbation<R: Rng>(risk_factor: f64, rng: &mut R) -> f64 {
    1.0 + risk_factor * (2.0 * rng.random::<f64>() - 1.0)
}

fn summarize_outcomes(outcomes: &[f64], iterations: u32) -> MonteCarloComponents {
    let n = outcomes.len().max(1) as f64;
    let mean = outcomes.iter().sum::<f64>() / n;
    let variance = if outcomes.len() > 1 {
        outcomes.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
    } else {
        0.0
    };
    let std_dev = variance.sqrt();
    let half_width = 1.96 * std_dev / n.sqrt();
    let positive = outcomes.iter().filter(|v| **v > 0.0).count() as f64 / n;

    MonteCarloComponents {
        iterations,
        mean_npv: mean,
        std_dev,
        ci_low: mean - half_width,
        ci_high: mean + half_width,
        probability_positive: positive,
        best_npv: outcomes.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        worst_npv: outcomes.iter().cloned().fold(f64::INFINITY, f64::min),
    }
}

fn recommend(c: &MonteCarloComponents) -> Vector<String> {
    let mut recommendations = Vector::new();

    if c.probability_positive < 0.5 {
        recommendations.push_back(
            "Most simulated outcomes lose money; restructure before committing capital"
                .to_string(),
        );
    } else if c.probability_positive < 0.75 {
        recommendations.push_back(
            "Outcome distribution is mixed; negotiate downside protections".to_string(),
        );
    }
    if c.worst_npv.is_finite() && c.mean_npv > 0.0 && c.worst_npv < -0.5 * c.mean_npv.abs() {
        recommendations.push_back(
            "Tail losses are deep relative to the expected gain; cap exposure per tranche"
                .to_string(),
        );
    }
    if recommendations.is_empty() {
        recommendations.push_back(
            "Simulated outcomes are consistently profitable; sensitivity risk is acceptable"
                .to_string(),
        );
    }

    recommendations
}

impl CompositeIndex for MonteCarloAnalysis {
    fn name(&self) -> &'static str {
        "monte_carlo"
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
