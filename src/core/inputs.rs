//! Parameter normalization: raw field mappings into complete typed inputs.
//!
//! Every calculator reads a fixed set of named fields. Callers are not
//! required to supply all of them, and the values they do supply may be the
//! wrong JSON type or outside the field's domain. This module is the single
//! place where that gets resolved: missing, null, or mistyped fields degrade
//! to a documented default, out-of-domain numbers are clamped, and the
//! normalization report records what happened so calculators can derive
//! their confidence from input completeness. Normalization never fails.

use im::Vector;
use serde::Serialize;
use serde_json::Value;

use crate::core::Partner;

/// The untyped field mapping a calculator call arrives with.
pub type RawParams = serde_json::Map<String, Value>;

/// Record of what normalization had to do to produce a complete input.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NormalizationReport {
    /// Count of fields supplied in-type and in-domain.
    pub provided: usize,
    /// Fields that fell back to their documented default.
    pub defaulted: Vector<String>,
    /// Fields supplied as numbers but clamped into their domain.
    pub clamped: Vector<String>,
}

impl NormalizationReport {
    /// Deterministic confidence from input completeness: the fraction of
    /// fields provided as-given, mapped into [0.25, 0.95]. A fully supplied
    /// input never claims certainty; a fully defaulted one is still usable.
    pub fn confidence(&self) -> f64 {
        let total = self.provided + self.defaulted.len();
        if total == 0 {
            return 0.5;
        }
        let fraction = self.provided as f64 / total as f64;
        0.25 + 0.70 * fraction
    }
}

/// Cursor over a raw mapping that accumulates the normalization report.
struct FieldReader<'a> {
    raw: &'a RawParams,
    report: NormalizationReport,
}

impl<'a> FieldReader<'a> {
    fn new(raw: &'a RawParams) -> Self {
        Self {
            raw,
            report: NormalizationReport::default(),
        }
    }

    fn number(&mut self, key: &str, default: f64, min: f64, max: f64) -> f64 {
        match self.raw.get(key).and_then(Value::as_f64) {
            Some(v) if v.is_finite() => {
                self.report.provided += 1;
                if v < min || v > max {
                    self.report.clamped.push_back(key.to_string());
                    v.clamp(min, max)
                } else {
                    v
                }
            }
            _ => {
                self.report.defaulted.push_back(key.to_string());
                default
            }
        }
    }

    fn count(&mut self, key: &str, default: u32, min: u32, max: u32) -> u32 {
        match self.raw.get(key).and_then(Value::as_u64) {
            Some(v) => {
                self.report.provided += 1;
                let v = u32::try_from(v).unwrap_or(max);
                if v < min || v > max {
                    self.report.clamped.push_back(key.to_string());
                    v.clamp(min, max)
                } else {
                    v
                }
            }
            _ => {
                self.report.defaulted.push_back(key.to_string());
                default
            }
        }
    }

    fn finish(self) -> NormalizationReport {
        self.report
    }
}

/// Inputs to the Regional Competitiveness Index.
///
/// `economic_output` is an absolute magnitude (e.g. regional GDP in USD);
/// the five remaining fields are 0-100 sub-scores.
#[derive(Clone, Debug, Serialize)]
pub struct CompetitivenessInput {
    pub economic_output: f64,
    pub infrastructure: f64,
    pub human_capital: f64,
    pub institutions: f64,
    pub innovation: f64,
    pub market_access: f64,
}

impl CompetitivenessInput {
    pub fn from_raw(raw: &RawParams) -> (Self, NormalizationReport) {
        let mut r = FieldReader::new(raw);
        let input = Self {
            economic_output: r.number("economic", 1.0e11, 0.0, 1.0e15),
            infrastructure: r.number("infrastructure", 50.0, 0.0, 100.0),
            human_capital: r.number("human_capital", 50.0, 0.0, 100.0),
            institutions: r.number("institutions", 50.0, 0.0, 100.0),
            innovation: r.number("innovation", 50.0, 0.0, 100.0),
            market_access: r.number("market_access", 50.0, 0.0, 100.0),
        };
        (input, r.finish())
    }
}

/// Inputs to the return-on-investment analysis.
#[derive(Clone, Debug, Serialize)]
pub struct RoiInput {
    pub initial_investment: f64,
    /// Expected nominal annual return, percent of principal.
    pub expected_roi: f64,
    pub timeline_years: u32,
    /// Risk proportion in [0, 1]; conditions the discount rate.
    pub risk_factor: f64,
}

impl RoiInput {
    pub fn from_raw(raw: &RawParams) -> (Self, NormalizationReport) {
        let mut r = FieldReader::new(raw);
        let input = Self {
            initial_investment: r.number("initial_investment", 1_000_000.0, 1.0, 1.0e13),
            expected_roi: r.number("expected_roi", 10.0, 0.0, 200.0),
            timeline_years: r.count("timeline", 5, 1, 50),
            risk_factor: r.number("risk_factor", 0.2, 0.0, 1.0),
        };
        (input, r.finish())
    }
}

/// Inputs to the time-to-profit analysis.
#[derive(Clone, Debug, Serialize)]
pub struct TimeToProfitInput {
    /// Addressable market size in currency units.
    pub market_size: f64,
    /// Annual market growth, percent.
    pub growth_rate: f64,
    pub initial_investment: f64,
    /// Projection horizon in years.
    pub horizon_years: u32,
}

impl TimeToProfitInput {
    pub fn from_raw(raw: &RawParams) -> (Self, NormalizationReport) {
        let mut r = FieldReader::new(raw);
        let input = Self {
            market_size: r.number("market_size", 5.0e8, 0.0, 1.0e15),
            growth_rate: r.number("growth_rate", 5.0, 0.0, 100.0),
            initial_investment: r.number("initial_investment", 1_000_000.0, 1.0, 1.0e13),
            horizon_years: r.count("timeline", 10, 1, 30),
        };
        (input, r.finish())
    }
}

/// Inputs to the ecosystem synergy analysis.
///
/// The partner set normally comes from a [`PartnerDirectory`] collaborator;
/// `from_raw` additionally accepts an inline `partners` array so the
/// calculator can be exercised standalone. Malformed partner entries are
/// dropped, and partner strengths are clamped into 0-100.
///
/// [`PartnerDirectory`]: crate::sources::partners::PartnerDirectory
#[derive(Clone, Debug, Serialize)]
pub struct SynergyInput {
    pub partners: Vec<Partner>,
}

impl SynergyInput {
    pub fn new(partners: Vec<Partner>) -> Self {
        let partners = partners
            .into_iter()
            .map(|mut p| {
                p.strength = if p.strength.is_finite() {
                    p.strength.clamp(0.0, 100.0)
                } else {
                    50.0
                };
                p
            })
            .collect();
        Self { partners }
    }

    pub fn from_raw(raw: &RawParams) -> (Self, NormalizationReport) {
        let mut report = NormalizationReport::default();
        let partners = match raw.get("partners").and_then(Value::as_array) {
            Some(entries) => {
                report.provided += 1;
                entries.iter().filter_map(parse_partner).collect()
            }
            None => {
                report.defaulted.push_back("partners".to_string());
                Vec::new()
            }
        };
        (Self::new(partners), report)
    }
}

fn parse_partner(value: &Value) -> Option<Partner> {
    let obj = value.as_object()?;
    let name = obj.get("name")?.as_str()?.to_string();
    Some(Partner {
        name,
        sector: obj
            .get("sector")
            .and_then(Value::as_str)
            .unwrap_or("general")
            .to_string(),
        strength: obj.get("strength").and_then(Value::as_f64).unwrap_or(50.0),
        maturity_years: obj
            .get("maturity_years")
            .and_then(Value::as_u64)
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
            .unwrap_or(1),
    })
}

/// Inputs to the risk index.
#[derive(Clone, Debug, Serialize)]
pub struct RiskInput {
    /// Latest annual GDP growth, percent.
    pub gdp_growth: f64,
    /// Latest annual inflation, percent.
    pub inflation: f64,
    /// Trade balance in currency units; sign drives currency exposure.
    pub trade_balance: f64,
}

impl RiskInput {
    pub fn from_raw(raw: &RawParams) -> (Self, NormalizationReport) {
        let mut r = FieldReader::new(raw);
        let input = Self {
            gdp_growth: r.number("gdp_growth", 3.0, -20.0, 20.0),
            inflation: r.number("inflation", 2.5, -5.0, 50.0),
            trade_balance: r.number("trade_balance", 0.0, -1.0e13, 1.0e13),
        };
        (input, r.finish())
    }
}

/// Inputs to the Monte-Carlo sensitivity simulation.
#[derive(Clone, Debug, Serialize)]
pub struct MonteCarloInput {
    pub initial_investment: f64,
    pub expected_roi: f64,
    pub timeline_years: u32,
    pub risk_factor: f64,
    pub iterations: u32,
}

impl MonteCarloInput {
    pub fn from_raw(raw: &RawParams) -> (Self, NormalizationReport) {
        let mut r = FieldReader::new(raw);
        let input = Self {
            initial_investment: r.number("initial_investment", 1_000_000.0, 1.0, 1.0e13),
            expected_roi: r.number("expected_roi", 10.0, 0.0, 200.0),
            timeline_years: r.count("timeline", 5, 1, 50),
            risk_factor: r.number("risk_factor", 0.2, 0.0, 1.0),
            iterations: r.count("iterations", 1_000, 100, 100_000),
        };
        (input, r.finish())
    }
}
