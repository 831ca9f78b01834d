//! Ecosystem synergy analysis.
//!
//! Scores partner-ecosystem fit as a blend of ecosystem strength, partner
//! synergy, and partner diversity. The deterministic mode derives all three
//! drivers from the partner set; the illustrative mode reproduces the
//! synthesized drivers of the reference behavior from a seeded generator.

use std::collections::BTreeSet;

use im::Vector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::analysis::ScoringMode;
use crate::core::inputs::{NormalizationReport, RawParams, SynergyInput};
use crate::core::{clamp_score, CompositeIndex, Partner};

pub const STRENGTH_WEIGHT: f64 = 0.40;
pub const SYNERGY_WEIGHT: f64 = 0.35;
pub const DIVERSITY_WEIGHT: f64 = 0.25;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SynergyDrivers {
    pub ecosystem_strength: f64,
    pub partner_synergy: f64,
    pub partner_diversity: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SynergyComponents {
    pub drivers: SynergyDrivers,
    pub partner_count: usize,
    pub distinct_sectors: usize,
    /// True when drivers were synthesized rather than derived from the
    /// partner set.
    pub illustrative: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SynergyAnalysis {
    pub score: f64,
    pub components: SynergyComponents,
    pub recommendations: Vector<String>,
    pub confidence: f64,
    pub summary: String,
}

pub fn analyze(raw: &RawParams, mode: ScoringMode) -> SynergyAnalysis {
    let (input, report) = SynergyInput::from_raw(raw);
    compute(&input, &report, mode)
}

pub fn compute(
    input: &SynergyInput,
    report: &NormalizationReport,
    mode: ScoringMode,
) -> SynergyAnalysis {
    let partners = &input.partners;
    let distinct_sectors = sector_set(partners).len();

    let (drivers, illustrative) = match mode {
        ScoringMode::Deterministic => (derive_drivers(partners), false),
        ScoringMode::Illustrative { seed } => (illustrative_drivers(seed), true),
    };

    let score = if partners.is_empty() && !illustrative {
        0.0
    } else {
        clamp_score(
            STRENGTH_WEIGHT * drivers.ecosystem_strength
                + SYNERGY_WEIGHT * drivers.partner_synergy
                + DIVERSITY_WEIGHT * drivers.partner_diversity,
        )
    };

    let components = SynergyComponents {
        drivers,
        partner_count: partners.len(),
        distinct_sectors,
        illustrative,
    };
    let recommendations = recommend(partners, &components);
    let summary = summarize(&components, score);

    SynergyAnalysis {
        score,
        components,
        recommendations,
        confidence: report.confidence(),
        summary,
    }
}

fn sector_set(partners: &[Partner]) -> BTreeSet<&str> {
    partners.iter().map(|p| p.sector.as_str()).collect()
}

fn derive_drivers(partners: &[Partner]) -> SynergyDrivers {
    if partners.is_empty() {
        return SynergyDrivers {
            ecosystem_strength: 0.0,
            partner_synergy: 0.0,
            partner_diversity: 0.0,
        };
    }

    let n = partners.len() as f64;
    let ecosystem_strength = partners.iter().map(|p| p.strength).sum::<f64>() / n;
    let partner_diversity = clamp_score(sector_set(partners).len() as f64 / n * 100.0);
    let partner_synergy = pairwise_synergy(partners);

    SynergyDrivers {
        ecosystem_strength: clamp_score(ecosystem_strength),
        partner_synergy,
        partner_diversity,
    }
}

/// Mean complementarity over all partner pairs: a pair in different sectors
/// contributes more than a same-sector pair, and the weaker member bounds
/// how much a pairing can deliver.
fn pairwise_synergy(partners: &[Partner]) -> f64 {
    if partners.len() < 2 {
        // A single partner has nothing to combine with.
        return 30.0;
    }
    let mut total = 0.0;
    let mut pairs = 0u32;
    for (i, a) in partners.iter().enumerate() {
        for b in partners.iter().skip(i + 1) {
            let cross_sector = if a.sector != b.sector { 30.0 } else { 0.0 };
            let weaker = a.strength.min(b.strength);
            total += 50.0 + cross_sector + 0.2 * weaker;
            pairs += 1;
        }
    }
    clamp_score(total / pairs as f64)
}

/// Reference ranges for the synthesized drivers.
fn illustrative_drivers(seed: u64) -> SynergyDrivers {
    let mut rng = StdRng::seed_from_u64(seed);
    SynergyDrivers {
        ecosystem_strength: rng.random_range(60.0..90.0),
        partner_synergy: rng.random_range(60.0..90.0),
        partner_diversity: rng.random_range(60.0..90.0),
    }
}

fn summarize(c: &SynergyComponents, score: f64) -> String {
    if c.illustrative {
        format!(
            "Ecosystem fit scores {:.0}/100 using illustrative drivers (no partner data bound).",
            score.round()
        )
    } else {
        format!(
            "Ecosystem of {} partners across {} sectors scores {:.0}/100 on fit.",
            c.partner_count,
            c.distinct_sectors,
            score.round()
        )
    }
}

fn recommend(partners: &[Partner], c: &SynergyComponents) -> Vector<String> {
    let mut recommendations = Vector::new();

    if partners.is_empty() && !c.illustrative {
        recommendations.push_back(
            "No partners identified; build the ecosystem before committing to entry".to_string(),
        );
        return recommendations;
    }
    if c.drivers.partner_diversity < 50.0 {
        recommendations.push_back(
            "Partner set is concentrated in few sectors; broaden to reduce correlated failure"
                .to_string(),
        );
    }
    if c.drivers.ecosystem_strength < 60.0 {
        recommendations.push_back(
            "Average partner strength is low; anchor the ecosystem with an established player"
                .to_string(),
        );
    }
    if c.drivers.partner_synergy < 60.0 {
        recommendations.push_back(
            "Cross-partner synergy is weak; structure joint ventures around shared channels"
                .to_string(),
        );
    }
    if recommendations.is_empty() {
        recommendations.push_back(
            "Partner ecosystem is balanced; formalize agreements with the strongest fits"
                .to_string(),
        );
    }

    recommendations
}

impl CompositeIndex for SynergyAnalysis {
    fn name(&self) -> &'static str {
        "synergy"
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
