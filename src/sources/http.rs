//! HTTP indicator source.
//!
//! Expects `GET {base}/regions/{region}/indicators/{indicator}` to return a
//! JSON array of `{date, value}` observations. The response is untyped and
//! parsed defensively: malformed entries are skipped rather than failing
//! the series.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;

use crate::config::SourcesConfig;
use crate::core::Observation;
use crate::errors::{AnalysisError, Result};
use crate::sources::IndicatorSource;

pub struct HttpIndicatorSource {
    client: Client,
    base_url: String,
}

impl HttpIndicatorSource {
    pub fn new(config: &SourcesConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::source("http", format!("client build failed: {e}")))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl IndicatorSource for HttpIndicatorSource {
    async fn fetch(&self, region: &str, indicator: &str) -> Result<Vec<Observation>> {
        let url = format!(
            "{}/regions/{}/indicators/{}",
            self.base_url, region, indicator
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AnalysisError::source("http", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::source(
                "http",
                format!("{} returned {}", url, status),
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::source("http", format!("invalid JSON: {e}")))?;

        Ok(parse_series(indicator, &body))
    }

    fn name(&self) -> &str {
        "http"
    }
}

fn parse_series(indicator: &str, body: &Value) -> Vec<Observation> {
    let Some(entries) = body.as_array() else {
        log::warn!("indicator '{}' response is not an array", indicator);
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| parse_observation(indicator, entry))
        .collect()
}

fn parse_observation(indicator: &str, entry: &Value) -> Option<Observation> {
    let obj = entry.as_object()?;
    let date: NaiveDate = obj.get("date")?.as_str()?.parse().ok()?;
    let value = obj.get("value")?.as_f64().filter(|v| v.is_finite())?;
    Some(Observation {
        indicator: indicator.to_string(),
        date,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_series_skips_malformed_entries() {
        let body = json!([
            { "date": "2024-03-01", "value": 2.1 },
            { "date": "not a date", "value": 3.0 },
            { "date": "2024-06-01" },
            { "date": "2024-09-01", "value": "high" },
            42,
            { "date": "2024-12-01", "value": 2.4 },
        ]);
        let series = parse_series("inflation", &body);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].value, 2.1);
        assert_eq!(series[1].value, 2.4);
    }

    #[test]
    fn parse_series_tolerates_non_array_bodies() {
        assert!(parse_series("gdp", &json!({"error": "oops"})).is_empty());
        assert!(parse_series("gdp", &json!(null)).is_empty());
    }
}
