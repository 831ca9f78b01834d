//! In-memory indicator source for offline runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::core::Observation;
use crate::errors::Result;
use crate::sources::IndicatorSource;

#[derive(Default)]
pub struct FixtureSource {
    series: HashMap<(String, String), Vec<Observation>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add observations for one (region, indicator) pair from (date, value)
    /// tuples; invalid dates are skipped.
    pub fn with_indicator(
        mut self,
        region: &str,
        indicator: &str,
        points: &[(&str, f64)],
    ) -> Self {
        let observations = points
            .iter()
            .filter_map(|(date, value)| {
                date.parse::<NaiveDate>().ok().map(|date| Observation {
                    indicator: indicator.to_string(),
                    date,
                    value: *value,
                })
            })
            .collect();
        self.series
            .insert((region.to_string(), indicator.to_string()), observations);
        self
    }

    /// A plausible mid-sized-economy profile for any region name, used by
    /// `--offline` report runs.
    pub fn offline_profile(region: &str) -> Self {
        Self::new()
            .with_indicator(region, "gdp", &[("2023-12-31", 6.2e11), ("2024-12-31", 6.5e11)])
            .with_indicator(region, "gdp_growth", &[("2024-12-31", 3.4)])
            .with_indicator(region, "inflation", &[("2024-12-31", 4.1)])
            .with_indicator(region, "trade_balance", &[("2024-12-31", -1.8e9)])
            .with_indicator(region, "population", &[("2024-12-31", 3.1e7)])
    }
}

#[async_trait]
impl IndicatorSource for FixtureSource {
    async fn fetch(&self, region: &str, indicator: &str) -> Result<Vec<Observation>> {
        Ok(self
            .series
            .get(&(region.to_string(), indicator.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{coverage, gather_latest, REGIONAL_INDICATORS};

    #[tokio::test]
    async fn offline_profile_covers_all_regional_indicators() {
        let source = FixtureSource::offline_profile("veridia");
        let gathered = gather_latest(&source, "veridia", &REGIONAL_INDICATORS).await;
        assert!((coverage(&gathered) - 1.0).abs() < 1e-9);
        assert_eq!(gathered["gdp"], Some(6.5e11));
    }

    #[tokio::test]
    async fn unknown_region_yields_empty_series() {
        let source = FixtureSource::offline_profile("veridia");
        let series = source.fetch("elsewhere", "gdp").await.unwrap();
        assert!(series.is_empty());
    }
}
