//! Composite-index calculators.
//!
//! Each calculator is a pure function from a normalized input to a typed
//! result implementing [`CompositeIndex`](crate::core::CompositeIndex).
//! Scoring logic and the rule-based recommendation generator for each index
//! live together in that index's module.

pub mod competitiveness;
pub mod monte_carlo;
pub mod risk;
pub mod roi;
pub mod synergy;
pub mod time_to_profit;

pub use competitiveness::CompetitivenessAnalysis;
pub use monte_carlo::MonteCarloAnalysis;
pub use risk::{RiskAnalysis, RiskLevel};
pub use roi::RoiAnalysis;
pub use synergy::SynergyAnalysis;
pub use time_to_profit::TimeToProfitAnalysis;

/// How stochastic drivers are produced.
///
/// `Deterministic` derives every driver from actual input attributes.
/// `Illustrative` reproduces the reference behavior's synthesized drivers,
/// but from a seeded generator so runs are reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoringMode {
    Deterministic,
    Illustrative { seed: u64 },
}

impl Default for ScoringMode {
    fn default() -> Self {
        Self::Deterministic
    }
}
