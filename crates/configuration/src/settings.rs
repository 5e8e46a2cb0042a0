use crate::error::ConfigError;
use core_types::DAYS_PER_YEAR;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// The root configuration structure for the calculator.
///
/// Every section falls back to its `Default`, so a partial (or absent) settings
/// file still yields a complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub validation: ValidationLimits,
    pub warnings: WarningThresholds,
    pub risk: RiskThresholds,
    pub analysis: AnalysisSettings,
    pub recalc: RecalcSettings,
}

/// Hard limits enforced by the input validator. Violations block calculation.
///
/// Rates are in percent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub max_interest_rate: Decimal,
    pub max_fee_rate: Decimal,
    /// Upper bound for the deposit and withdrawal loss rates.
    pub max_loss_rate: Decimal,
    pub max_leverage: Decimal,
    pub min_holding_days: i64,
    pub max_holding_days: i64,
    /// `|future - spot| / spot * 100` above this is rejected.
    pub max_price_divergence_pct: Decimal,
    /// `interest + 2 * fee` above this is rejected.
    pub max_total_cost_rate: Decimal,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_interest_rate: dec!(50),
            max_fee_rate: dec!(10),
            max_loss_rate: dec!(100),
            max_leverage: dec!(100),
            min_holding_days: 1,
            max_holding_days: 365,
            max_price_divergence_pct: dec!(50),
            max_total_cost_rate: dec!(30),
        }
    }
}

/// Soft thresholds that only produce advisory warnings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WarningThresholds {
    pub min_investment: Decimal,
    pub max_investment: Decimal,
    pub high_interest_rate: Decimal,
    pub high_fee_rate: Decimal,
    pub moderate_leverage: Decimal,
    pub high_leverage: Decimal,
    pub short_holding_days: i64,
    pub long_holding_days: i64,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            min_investment: dec!(1000),
            max_investment: dec!(10000000),
            high_interest_rate: dec!(20),
            high_fee_rate: dec!(1),
            moderate_leverage: dec!(5),
            high_leverage: dec!(10),
            short_holding_days: 7,
            long_holding_days: 180,
        }
    }
}

/// Cut-offs for the LOW / MEDIUM / HIGH risk classification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Any leverage strictly above this is HIGH risk regardless of return.
    pub max_unleveraged_ratio: Decimal,
    pub low_return_pct: Decimal,
    pub low_holding_days: i64,
    pub medium_return_pct: Decimal,
    pub medium_holding_days: i64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            max_unleveraged_ratio: dec!(1),
            low_return_pct: dec!(5),
            low_holding_days: 180,
            medium_return_pct: dec!(15),
            medium_holding_days: 90,
        }
    }
}

/// Parameters of the analysis engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Premiums within `±neutral_band_pct` percent are NEUTRAL.
    pub neutral_band_pct: Decimal,
    /// Percentage points added to the interest rate.
    pub interest_rate_bump: Decimal,
    /// Days removed from the maturity date.
    pub time_bump_days: i64,
    /// Factor applied to the spot price.
    pub price_bump_factor: Decimal,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            neutral_band_pct: dec!(0.5),
            interest_rate_bump: dec!(1),
            time_bump_days: 1,
            price_bump_factor: dec!(1.01),
        }
    }
}

/// Behaviour of the background recalculator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecalcSettings {
    /// Quiet period after the latest request before it is evaluated.
    pub debounce_ms: u64,
}

impl Default for RecalcSettings {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

impl Settings {
    /// Checks that the thresholds are internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.validation;
        if v.min_holding_days < 1
            || v.max_holding_days < v.min_holding_days
            || v.max_holding_days > DAYS_PER_YEAR
        {
            return Err(ConfigError::ValidationError(format!(
                "holding day limits must satisfy 1 <= min_holding_days <= max_holding_days <= {}",
                DAYS_PER_YEAR
            )));
        }
        if v.max_interest_rate < Decimal::ZERO
            || v.max_fee_rate < Decimal::ZERO
            || v.max_loss_rate < Decimal::ZERO
            || v.max_leverage <= Decimal::ZERO
        {
            return Err(ConfigError::ValidationError(
                "rate and leverage limits must not be negative".to_string(),
            ));
        }

        let w = &self.warnings;
        if w.min_investment > w.max_investment {
            return Err(ConfigError::ValidationError(
                "min_investment must not exceed max_investment".to_string(),
            ));
        }
        if w.moderate_leverage > w.high_leverage {
            return Err(ConfigError::ValidationError(
                "moderate_leverage must not exceed high_leverage".to_string(),
            ));
        }
        if w.short_holding_days > w.long_holding_days {
            return Err(ConfigError::ValidationError(
                "short_holding_days must not exceed long_holding_days".to_string(),
            ));
        }

        let r = &self.risk;
        if r.low_return_pct > r.medium_return_pct {
            return Err(ConfigError::ValidationError(
                "low_return_pct must not exceed medium_return_pct".to_string(),
            ));
        }

        let a = &self.analysis;
        if a.neutral_band_pct < Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "neutral_band_pct must not be negative".to_string(),
            ));
        }
        if a.price_bump_factor <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "price_bump_factor must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
