//! Carry-cost formulas shared by the calculator and the break-even analysis.
//!
//! All arithmetic is checked; a figure that leaves the `Decimal` range is an
//! `Overflow` error rather than a panic.

use crate::error::CalculatorError;
use core_types::{CalculationInput, DAYS_PER_YEAR};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fraction of capital consumed by financing over the holding period:
/// `(annual_rate / 100) * days / 365`.
pub fn holding_cost_rate(
    annual_interest_rate: Decimal,
    holding_days: i64,
) -> Result<Decimal, CalculatorError> {
    (annual_interest_rate / dec!(100))
        .checked_mul(Decimal::from(holding_days))
        .and_then(|v| v.checked_div(Decimal::from(DAYS_PER_YEAR)))
        .ok_or(CalculatorError::Overflow("holding_cost_rate"))
}

/// Round-trip fee as a fraction of capital. Both legs pay the same rate.
pub fn total_transaction_fee_rate(transaction_fee_rate: Decimal) -> Decimal {
    transaction_fee_rate / dec!(100) * dec!(2)
}

/// The cost components of a position, all charged on the unleveraged amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarryCosts {
    pub holding_cost: Decimal,
    pub transaction_cost: Decimal,
    pub deposit_loss: Option<Decimal>,
    pub withdrawal_loss: Option<Decimal>,
}

impl CarryCosts {
    pub fn new(input: &CalculationInput, holding_days: i64) -> Result<Self, CalculatorError> {
        let amount = input.investment_amount;
        let loss = |rate: Option<Decimal>, name: &'static str| {
            rate.map(|r| amount.checked_mul(r / dec!(100)).ok_or(CalculatorError::Overflow(name)))
                .transpose()
        };

        Ok(Self {
            holding_cost: amount
                .checked_mul(holding_cost_rate(input.annual_interest_rate, holding_days)?)
                .ok_or(CalculatorError::Overflow("holding_cost"))?,
            transaction_cost: amount
                .checked_mul(total_transaction_fee_rate(input.transaction_fee_rate))
                .ok_or(CalculatorError::Overflow("transaction_cost"))?,
            deposit_loss: loss(input.deposit_loss_rate, "deposit_loss")?,
            withdrawal_loss: loss(input.withdrawal_loss_rate, "withdrawal_loss")?,
        })
    }

    pub fn total(&self) -> Result<Decimal, CalculatorError> {
        [
            self.transaction_cost,
            self.deposit_loss.unwrap_or_default(),
            self.withdrawal_loss.unwrap_or_default(),
        ]
        .into_iter()
        .try_fold(self.holding_cost, |sum, cost| sum.checked_add(cost))
        .ok_or(CalculatorError::Overflow("total_cost"))
    }
}
