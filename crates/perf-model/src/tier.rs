//! Percentile-based performance tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Performance tier assigned from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PerformanceTier {
    Poor,
    Average,
    Good,
    Best,
}

impl PerformanceTier {
    /// All tiers from lowest to highest.
    pub const ALL: [PerformanceTier; 4] = [
        PerformanceTier::Poor,
        PerformanceTier::Average,
        PerformanceTier::Good,
        PerformanceTier::Best,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Average => "Average",
            Self::Good => "Good",
            Self::Best => "Best",
        }
    }

    /// Percentile of the score distribution that marks this tier's threshold.
    pub fn percentile(self) -> f64 {
        match self {
            Self::Poor => 30.0,
            Self::Average => 60.0,
            Self::Good => 80.0,
            Self::Best => 90.0,
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerformanceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown performance tier: {s}"))
    }
}

/// Score thresholds for each tier.
///
/// The `poor` threshold is reported for reference; classification only
/// compares against `average`, `good` and `best`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub poor: f64,
    pub average: f64,
    pub good: f64,
    pub best: f64,
}

impl TierThresholds {
    pub fn get(&self, tier: PerformanceTier) -> f64 {
        match tier {
            PerformanceTier::Poor => self.poor,
            PerformanceTier::Average => self.average,
            PerformanceTier::Good => self.good,
            PerformanceTier::Best => self.best,
        }
    }

    /// Thresholds paired with their tier, lowest first.
    pub fn iter(&self) -> impl Iterator<Item = (PerformanceTier, f64)> + '_ {
        PerformanceTier::ALL
            .into_iter()
            .map(move |tier| (tier, self.get(tier)))
    }

    /// Tier for a score.
    pub fn classify(&self, score: f64) -> PerformanceTier {
        if score >= self.best {
            PerformanceTier::Best
        } else if score >= self.good {
            PerformanceTier::Good
        } else if score >= self.average {
            PerformanceTier::Average
        } else {
            PerformanceTier::Poor
        }
    }
}

/// An employee with their assigned tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizedEmployee {
    pub employee_id: String,
    pub tier: PerformanceTier,
    pub score: f64,
}
