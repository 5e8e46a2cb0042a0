use crate::enums::RiskLevel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cost and gain components of a calculation, always on the unleveraged
/// position so the breakdown stays comparable across leverage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    /// Gross gain from the futures/spot spread on the unleveraged quantity.
    pub price_difference: Decimal,
    /// Financing cost of carrying the spot leg until maturity.
    pub holding_cost: Decimal,
    /// Round-trip fees for both legs.
    pub transaction_cost: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_loss: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_loss: Option<Decimal>,
}

/// Extra figures reported when the position is leveraged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeverageMetrics {
    pub leverage_ratio: Decimal,
    /// Capital posted as margin (the unleveraged investment).
    pub margin_required: Decimal,
    /// Notional value controlled with that margin.
    pub contract_value: Decimal,
    /// Spot price at which losses consume the whole margin.
    pub liquidation_price: Decimal,
    /// Net profit of the leveraged position.
    pub leveraged_profit: Decimal,
}

/// The output of one arbitrage calculation.
///
/// When leverage is present, the top-level return and profit figures describe
/// the leveraged position while `breakdown` keeps the unleveraged components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Annualized return in percent.
    pub annualized_return: Decimal,
    /// Return over the holding period in percent.
    pub total_return: Decimal,
    pub holding_days: i64,
    pub actual_profit: Decimal,
    pub annualized_profit: Decimal,
    pub risk_level: RiskLevel,
    pub breakdown: Breakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leverage: Option<LeverageMetrics>,
}
