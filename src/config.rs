//! Configuration with explicit defaults.
//!
//! All scoring weights, model constants, and collaborator endpoints live
//! here. Every field has a serde default so a partial `oppmap.toml` is
//! valid, and `validate()` enforces the weight invariants before a config
//! is installed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Weights for the six Regional Competitiveness Index sub-scores.
///
/// Invariant: the six weights sum to 1.0 (validated with a 0.001 tolerance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitivenessWeights {
    #[serde(default = "default_economic_weight")]
    pub economic: f64,
    #[serde(default = "default_infrastructure_weight")]
    pub infrastructure: f64,
    #[serde(default = "default_human_capital_weight")]
    pub human_capital: f64,
    #[serde(default = "default_institutions_weight")]
    pub institutions: f64,
    #[serde(default = "default_innovation_weight")]
    pub innovation: f64,
    #[serde(default = "default_market_access_weight")]
    pub market_access: f64,
}

fn default_economic_weight() -> f64 {
    0.25
}
fn default_infrastructure_weight() -> f64 {
    0.20
}
fn default_human_capital_weight() -> f64 {
    0.20
}
fn default_institutions_weight() -> f64 {
    0.15
}
fn default_innovation_weight() -> f64 {
    0.10
}
fn default_market_access_weight() -> f64 {
    0.10
}

impl Default for CompetitivenessWeights {
    fn default() -> Self {
        Self {
            economic: default_economic_weight(),
            infrastructure: default_infrastructure_weight(),
            human_capital: default_human_capital_weight(),
            institutions: default_institutions_weight(),
            innovation: default_innovation_weight(),
            market_access: default_market_access_weight(),
        }
    }
}

impl CompetitivenessWeights {
    fn as_array(&self) -> [f64; 6] {
        [
            self.economic,
            self.infrastructure,
            self.human_capital,
            self.institutions,
            self.innovation,
            self.market_access,
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_weight_set("competitiveness", &self.as_array())
    }
}

/// Weights for the six risk factors.
///
/// Invariant: the six weights sum to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskWeights {
    #[serde(default = "default_risk_economic_weight")]
    pub economic: f64,
    #[serde(default = "default_risk_market_weight")]
    pub market: f64,
    #[serde(default = "default_risk_currency_weight")]
    pub currency: f64,
    #[serde(default = "default_risk_political_weight")]
    pub political: f64,
    #[serde(default = "default_risk_regulatory_weight")]
    pub regulatory: f64,
    #[serde(default = "default_risk_operational_weight")]
    pub operational: f64,
}

fn default_risk_economic_weight() -> f64 {
    0.25
}
fn default_risk_market_weight() -> f64 {
    0.20
}
fn default_risk_currency_weight() -> f64 {
    0.15
}
fn default_risk_political_weight() -> f64 {
    0.15
}
fn default_risk_regulatory_weight() -> f64 {
    0.15
}
fn default_risk_operational_weight() -> f64 {
    0.10
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            economic: default_risk_economic_weight(),
            market: default_risk_market_weight(),
            currency: default_risk_currency_weight(),
            political: default_risk_political_weight(),
            regulatory: default_risk_regulatory_weight(),
            operational: default_risk_operational_weight(),
        }
    }
}

impl RiskWeights {
    fn as_array(&self) -> [f64; 6] {
        [
            self.economic,
            self.market,
            self.currency,
            self.political,
            self.regulatory,
            self.operational,
        ]
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_weight_set("risk", &self.as_array())
    }
}

fn validate_weight_set(name: &str, weights: &[f64]) -> Result<(), String> {
    for w in weights {
        if !(0.0..=1.0).contains(w) {
            return Err(format!("{} weights must be between 0.0 and 1.0", name));
        }
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > 0.001 {
        return Err(format!(
            "{} weights must sum to 1.0, but sum to {:.3}",
            name, sum
        ));
    }
    Ok(())
}

/// Model constants shared by the investment calculators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConstants {
    /// Base discount rate applied before the risk premium.
    #[serde(default = "default_base_discount_rate")]
    pub base_discount_rate: f64,
    /// Additional discount per unit of risk factor.
    #[serde(default = "default_risk_premium")]
    pub risk_premium: f64,
    /// Fixed discount rate for time-to-profit NPV.
    #[serde(default = "default_tpp_discount_rate")]
    pub tpp_discount_rate: f64,
    /// Annual operating cost as a fraction of principal.
    #[serde(default = "default_operating_cost_ratio")]
    pub operating_cost_ratio: f64,
    /// Fraction of the addressable market captured in year one.
    #[serde(default = "default_capture_rate")]
    pub capture_rate: f64,
    /// Score penalty per additional year before break-even.
    #[serde(default = "default_year_penalty")]
    pub year_penalty: f64,
    /// Economic output that maps the RCI economic sub-score to 100.
    #[serde(default = "default_economic_ceiling")]
    pub economic_ceiling: f64,
}

fn default_base_discount_rate() -> f64 {
    0.08
}
fn default_risk_premium() -> f64 {
    0.10
}
fn default_tpp_discount_rate() -> f64 {
    0.10
}
fn default_operating_cost_ratio() -> f64 {
    0.30
}
fn default_capture_rate() -> f64 {
    0.005
}
fn default_year_penalty() -> f64 {
    12.0
}
fn default_economic_ceiling() -> f64 {
    1.0e12
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            base_discount_rate: default_base_discount_rate(),
            risk_premium: default_risk_premium(),
            tpp_discount_rate: default_tpp_discount_rate(),
            operating_cost_ratio: default_operating_cost_ratio(),
            capture_rate: default_capture_rate(),
            year_penalty: default_year_penalty(),
            economic_ceiling: default_economic_ceiling(),
        }
    }
}

/// Fixed baseline risk levels for exposures with no live indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskBaselines {
    #[serde(default = "default_political_baseline")]
    pub political: f64,
    #[serde(default = "default_regulatory_baseline")]
    pub regulatory: f64,
    #[serde(default = "default_operational_baseline")]
    pub operational: f64,
}

fn default_political_baseline() -> f64 {
    50.0
}
fn default_regulatory_baseline() -> f64 {
    45.0
}
fn default_operational_baseline() -> f64 {
    40.0
}

impl Default for RiskBaselines {
    fn default() -> Self {
        Self {
            political: default_political_baseline(),
            regulatory: default_regulatory_baseline(),
            operational: default_operational_baseline(),
        }
    }
}

/// Orchestrator knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Deadline applied to each pipeline stage.
    #[serde(default = "default_stage_deadline_secs")]
    pub stage_deadline_secs: u64,
    /// Default Monte-Carlo trial count.
    #[serde(default = "default_monte_carlo_iterations")]
    pub monte_carlo_iterations: u32,
}

fn default_stage_deadline_secs() -> u64 {
    10
}
fn default_monte_carlo_iterations() -> u32 {
    1_000
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stage_deadline_secs: default_stage_deadline_secs(),
            monte_carlo_iterations: default_monte_carlo_iterations(),
        }
    }
}

/// Endpoint configuration for the indicator-source collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_sources_base_url")]
    pub base_url: String,
    #[serde(default = "default_sources_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_sources_base_url() -> String {
    "https://data.oppmap.dev/v1".to_string()
}
fn default_sources_timeout_secs() -> u64 {
    8
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            base_url: default_sources_base_url(),
            timeout_secs: default_sources_timeout_secs(),
        }
    }
}

/// Endpoint configuration for the text-generation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConfig {
    #[serde(default = "default_narrative_base_url")]
    pub base_url: String,
    #[serde(default = "default_narrative_model")]
    pub model: String,
    #[serde(default = "default_narrative_timeout_secs")]
    pub timeout_secs: u64,
    /// Environment variable holding the API key, if the service needs one.
    #[serde(default = "default_narrative_api_key_env")]
    pub api_key_env: String,
}

fn default_narrative_base_url() -> String {
    "https://llm.oppmap.dev/v1".to_string()
}
fn default_narrative_model() -> String {
    "oppmap-narrative-1".to_string()
}
fn default_narrative_timeout_secs() -> u64 {
    20
}
fn default_narrative_api_key_env() -> String {
    "OPPMAP_NARRATIVE_API_KEY".to_string()
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            base_url: default_narrative_base_url(),
            model: default_narrative_model(),
            timeout_secs: default_narrative_timeout_secs(),
            api_key_env: default_narrative_api_key_env(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OppmapConfig {
    #[serde(default)]
    pub competitiveness_weights: CompetitivenessWeights,
    #[serde(default)]
    pub risk_weights: RiskWeights,
    #[serde(default)]
    pub model: ModelConstants,
    #[serde(default)]
    pub risk_baselines: RiskBaselines,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub narrative: NarrativeConfig,
}

impl OppmapConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.competitiveness_weights.validate()?;
        self.risk_weights.validate()?;
        if self.model.operating_cost_ratio < 0.0 || self.model.operating_cost_ratio > 1.0 {
            return Err("operating_cost_ratio must be between 0.0 and 1.0".to_string());
        }
        if self.model.capture_rate <= 0.0 || self.model.capture_rate > 1.0 {
            return Err("capture_rate must be in (0.0, 1.0]".to_string());
        }
        if self.pipeline.stage_deadline_secs == 0 {
            return Err("stage_deadline_secs must be positive".to_string());
        }
        Ok(())
    }
}

const CONFIG_FILE_NAME: &str = "oppmap.toml";

static CONFIG: OnceLock<OppmapConfig> = OnceLock::new();

/// Process-wide configuration, loaded once. Searches for `oppmap.toml`
/// upward from the working directory; a missing file yields defaults, a
/// present-but-invalid file is reported and ignored.
pub fn get_config() -> &'static OppmapConfig {
    CONFIG.get_or_init(|| match load_from_current_dir() {
        Ok(Some(config)) => config,
        Ok(None) => OppmapConfig::default(),
        Err(message) => {
            log::warn!("ignoring invalid {}: {}", CONFIG_FILE_NAME, message);
            OppmapConfig::default()
        }
    })
}

fn load_from_current_dir() -> Result<Option<OppmapConfig>, String> {
    let cwd = std::env::current_dir().map_err(|e| e.to_string())?;
    match find_config_file(&cwd) {
        Some(path) => load_config_file(&path).map(Some),
        None => Ok(None),
    }
}

fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

pub fn load_config_file(path: &Path) -> Result<OppmapConfig, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let config: OppmapConfig = toml::from_str(&content).map_err(|e| e.to_string())?;
    config.validate()?;
    Ok(config)
}

/// Commented default config written by `oppmap init`.
pub fn default_config_toml() -> String {
    let config = OppmapConfig::default();
    let body = toml::to_string_pretty(&config).unwrap_or_default();
    format!(
        "# oppmap configuration\n\
         # Weight tables must each sum to 1.0.\n\
         {}",
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_competitiveness_weights_sum_to_one() {
        let weights = CompetitivenessWeights::default();
        assert!(weights.validate().is_ok());
        let sum: f64 = weights.as_array().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unbalanced_competitiveness_weights_fail_validation() {
        let weights = CompetitivenessWeights {
            economic: 0.40,
            ..Default::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn default_risk_weights_sum_to_one() {
        assert!(RiskWeights::default().validate().is_ok());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let toml_text = default_config_toml();
        let parsed: OppmapConfig = toml::from_str(&toml_text).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.pipeline.monte_carlo_iterations, 1_000);
    }

    #[test]
    fn partial_toml_fills_remaining_fields_with_defaults() {
        let parsed: OppmapConfig = toml::from_str(
            "[pipeline]\n\
             stage_deadline_secs = 3\n",
        )
        .unwrap();
        assert_eq!(parsed.pipeline.stage_deadline_secs, 3);
        assert_eq!(parsed.model.operating_cost_ratio, 0.30);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn zero_deadline_is_rejected() {
        let parsed: OppmapConfig = toml::from_str(
            "[pipeline]\n\
             stage_deadline_secs = 0\n",
        )
        .unwrap();
        assert!(parsed.validate().is_err());
    }
}
