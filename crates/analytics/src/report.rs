use core_types::{CalculationResult, MarketCondition};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Prices at which the unleveraged position neither gains nor loses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakEven {
    /// Futures price that exactly covers carry and fees at the current spot.
    pub break_even_future_price: Decimal,
    /// Spot price that would make the current cost structure break even.
    pub break_even_spot_price: Decimal,
}

/// Change in annualized return (percentage points) after bumping one input.
///
/// A value is `None` when the bumped input cannot be calculated, for example
/// when shortening a one-day holding period by a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensitivity {
    pub interest_rate_sensitivity: Option<Decimal>,
    pub time_sensitivity: Option<Decimal>,
    pub price_sensitivity: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketConditionReport {
    pub condition: MarketCondition,
    /// Futures minus spot.
    pub premium: Decimal,
    /// Premium relative to spot, in percent.
    pub premium_percent: Decimal,
}

/// A calculation result extended with break-even, sensitivity and market data.
///
/// Serializes as one flat object: the calculation fields sit next to
/// `breakEven`, `sensitivity` and `marketCondition`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub result: CalculationResult,
    pub break_even: BreakEven,
    pub sensitivity: Sensitivity,
    pub market_condition: MarketConditionReport,
}
