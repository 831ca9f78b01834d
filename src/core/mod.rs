//! Core types shared across calculators, pipeline, and report assembly.

pub mod inputs;

use chrono::NaiveDate;
use im::Vector;
use serde::{Deserialize, Serialize};

/// Shared surface of every composite-index result.
///
/// Each calculator keeps its own typed component shape and exposes it here
/// as serialized JSON, so callers that only care about the uniform
/// `{score, components, recommendations, confidence, analysis}` contract can
/// treat results polymorphically without erasing the specific shapes.
pub trait CompositeIndex {
    /// Stable machine name of the index ("competitiveness", "roi", ...).
    fn name(&self) -> &'static str;

    /// Final score, always finite and within [0, 100].
    fn score(&self) -> f64;

    /// Confidence in the score, within [0, 1].
    fn confidence(&self) -> f64;

    /// Component sub-scores, serialized from the calculator's typed shape.
    fn components(&self) -> serde_json::Value;

    /// Qualitative, threshold-driven recommendations in priority order.
    fn recommendations(&self) -> Vector<String>;

    /// One-paragraph human-readable summary of the result.
    fn summary(&self) -> String;
}

/// A date-stamped numeric observation from a regional data source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub indicator: String,
    pub date: NaiveDate,
    pub value: f64,
}

/// Select the most recent observation by date.
pub fn latest(observations: &[Observation]) -> Option<&Observation> {
    observations.iter().max_by_key(|o| o.date)
}

/// The `{region, objective}` request shape every pipeline stage receives.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionRequest {
    pub region: String,
    pub objective: String,
}

/// An external partner considered for the ecosystem analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub name: String,
    pub sector: String,
    /// Operational strength on a 0-100 scale.
    pub strength: f64,
    /// Years active in the target region.
    pub maturity_years: u32,
}

/// Clamp a would-be score into [0, 100]; non-finite values collapse to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Clamp a ratio into [0, 1]; non-finite values collapse to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(indicator: &str, date: &str, value: f64) -> Observation {
        Observation {
            indicator: indicator.to_string(),
            date: date.parse().unwrap(),
            value,
        }
    }

    #[test]
    fn latest_selects_most_recent_by_date() {
        let series = vec![
            obs("gdp", "2022-01-01", 1.0),
            obs("gdp", "2024-01-01", 3.0),
            obs("gdp", "2023-01-01", 2.0),
        ];
        assert_eq!(latest(&series).unwrap().value, 3.0);
    }

    #[test]
    fn latest_on_empty_series_is_none() {
        assert!(latest(&[]).is_none());
    }

    #[test]
    fn clamp_score_handles_degenerate_values() {
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 0.0);
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(42.5), 42.5);
    }
}
