use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse risk bucket attached to every calculation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        };
        f.write_str(s)
    }
}

/// Shape of the futures curve relative to spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketCondition {
    /// Futures trade above spot.
    Contango,
    /// Futures trade below spot.
    Backwardation,
    /// The spread sits inside the neutral band.
    Neutral,
}

impl fmt::Display for MarketCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarketCondition::Contango => "CONTANGO",
            MarketCondition::Backwardation => "BACKWARDATION",
            MarketCondition::Neutral => "NEUTRAL",
        };
        f.write_str(s)
    }
}
