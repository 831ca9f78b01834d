//! Regional data-source collaborators.
//!
//! Sources return date-stamped observations per (region, indicator); the
//! core only ever uses the most recent observation. Fetches for one stage
//! fan out concurrently and individual failures degrade to an absent value,
//! never failing the stage.

pub mod fixture;
pub mod http;
pub mod partners;

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::future::join_all;

use crate::core::{latest, Observation};
use crate::errors::Result;

pub use fixture::FixtureSource;
pub use http::HttpIndicatorSource;
pub use partners::{FilePartnerDirectory, FixturePartnerDirectory, PartnerDirectory};

/// Indicators the diagnose stage asks for.
pub const REGIONAL_INDICATORS: [&str; 5] =
    ["gdp", "gdp_growth", "inflation", "trade_balance", "population"];

#[async_trait]
pub trait IndicatorSource: Send + Sync {
    /// Full observation series for one indicator in one region.
    async fn fetch(&self, region: &str, indicator: &str) -> Result<Vec<Observation>>;

    fn name(&self) -> &str;
}

/// Fetch every indicator concurrently and keep the most recent observation
/// of each. A failed or empty fetch yields `None` for that indicator only.
pub async fn gather_latest(
    source: &dyn IndicatorSource,
    region: &str,
    indicators: &[&str],
) -> BTreeMap<String, Option<f64>> {
    let fetches = indicators.iter().map(|indicator| async move {
        let value = match source.fetch(region, indicator).await {
            Ok(series) => latest(&series).map(|o| o.value),
            Err(e) => {
                log::warn!(
                    "indicator '{}' unavailable from {} for {}: {}",
                    indicator,
                    source.name(),
                    region,
                    e
                );
                None
            }
        };
        (indicator.to_string(), value)
    });

    join_all(fetches).await.into_iter().collect()
}

/// Fraction of requested indicators that produced a value.
pub fn coverage(indicators: &BTreeMap<String, Option<f64>>) -> f64 {
    if indicators.is_empty() {
        return 0.0;
    }
    let present = indicators.values().filter(|v| v.is_some()).count();
    present as f64 / indicators.len() as f64
}
