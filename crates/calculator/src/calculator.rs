use crate::costs::CarryCosts;
use crate::error::CalculatorError;
use crate::risk::RiskClassifier;
use configuration::Settings;
use core_types::{
    Breakdown, CalculationInput, CalculationResult, LeverageMetrics, DAYS_PER_YEAR,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A stateless calculator for the return of a cash-and-carry position.
#[derive(Debug, Clone)]
pub struct ArbitrageCalculator {
    classifier: RiskClassifier,
    max_holding_days: i64,
}

impl Default for ArbitrageCalculator {
    fn default() -> Self {
        Self::new(RiskClassifier::default(), DAYS_PER_YEAR)
    }
}

/// Return figures derived from a net profit.
struct Returns {
    net_profit: Decimal,
    total_return: Decimal,
    annualized_return: Decimal,
    annualized_profit: Decimal,
}

impl Returns {
    fn from_net_profit(
        net_profit: Decimal,
        amount: Decimal,
        holding_days: i64,
    ) -> Result<Self, CalculatorError> {
        let net_profit_rate = checked(net_profit.checked_div(amount), "net_profit_rate")?;
        let annualized_return = checked(
            net_profit_rate
                .checked_mul(Decimal::from(DAYS_PER_YEAR))
                .and_then(|v| v.checked_div(Decimal::from(holding_days)))
                .and_then(|v| v.checked_mul(dec!(100))),
            "annualized_return",
        )?;
        Ok(Self {
            net_profit,
            total_return: checked(net_profit_rate.checked_mul(dec!(100)), "total_return")?,
            annualized_return,
            annualized_profit: checked(
                amount
                    .checked_mul(annualized_return)
                    .and_then(|v| v.checked_div(dec!(100))),
                "annualized_profit",
            )?,
        })
    }
}

fn checked(value: Option<Decimal>, figure: &'static str) -> Result<Decimal, CalculatorError> {
    value.ok_or(CalculatorError::Overflow(figure))
}

impl ArbitrageCalculator {
    /// `max_holding_days` is capped at one year.
    pub fn new(classifier: RiskClassifier, max_holding_days: i64) -> Self {
        Self {
            classifier,
            max_holding_days: max_holding_days.min(DAYS_PER_YEAR),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            RiskClassifier::new(settings.risk.clone()),
            settings.validation.max_holding_days,
        )
    }

    /// The longest holding period `calculate` accepts.
    pub fn max_holding_days(&self) -> i64 {
        self.max_holding_days
    }

    /// Rejects holding periods outside `1..=max_holding_days`.
    pub fn check_holding_days(&self, holding_days: i64) -> Result<(), CalculatorError> {
        if holding_days <= 0 || holding_days > self.max_holding_days {
            return Err(CalculatorError::InvalidHoldingPeriod(
                holding_days,
                self.max_holding_days,
            ));
        }
        Ok(())
    }

    /// Computes the result of one arbitrage position.
    ///
    /// With leverage, the top-level profit and return figures describe the
    /// leveraged position while `breakdown` stays on the unleveraged amount.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidHoldingPeriod` when maturity is not 1 to
    /// `max_holding_days` days after the trade date, with `InvalidInput`
    /// for a non-positive spot price or investment amount, and with
    /// `Overflow` when a figure exceeds the `Decimal` range.
    pub fn calculate(&self, input: &CalculationInput) -> Result<CalculationResult, CalculatorError> {
        // --- 1. Defensive checks ---
        let holding_days = input.holding_days();
        self.check_holding_days(holding_days)?;
        if input.spot_price <= Decimal::ZERO {
            return Err(CalculatorError::InvalidInput(
                "spot_price",
                format!("must be greater than 0, got {}", input.spot_price),
            ));
        }
        if input.investment_amount <= Decimal::ZERO {
            return Err(CalculatorError::InvalidInput(
                "investment_amount",
                format!("must be greater than 0, got {}", input.investment_amount),
            ));
        }

        let amount = input.investment_amount;

        // --- 2. Gross spread on the unleveraged quantity ---
        let spot_quantity = checked(amount.checked_div(input.spot_price), "spot_quantity")?;
        let price_difference_per_unit = checked(
            input.future_price.checked_sub(input.spot_price),
            "price_difference",
        )?;
        let total_price_difference = checked(
            price_difference_per_unit.checked_mul(spot_quantity),
            "price_difference",
        )?;

        // --- 3. Costs, always on the unleveraged amount ---
        let costs = CarryCosts::new(input, holding_days)?;
        let total_cost = costs.total()?;
        let net_profit = checked(total_price_difference.checked_sub(total_cost), "net_profit")?;

        // --- 4. Leverage replaces the profit path, not the costs ---
        let (returns, leverage) = match input.effective_leverage() {
            Some(ratio) => {
                let contract_value = checked(amount.checked_mul(ratio), "contract_value")?;
                let leveraged_quantity = checked(
                    contract_value.checked_div(input.spot_price),
                    "leveraged_quantity",
                )?;
                let leveraged_net_profit = checked(
                    price_difference_per_unit
                        .checked_mul(leveraged_quantity)
                        .and_then(|v| v.checked_sub(total_cost)),
                    "leveraged_profit",
                )?;
                let metrics = LeverageMetrics {
                    leverage_ratio: ratio,
                    margin_required: checked(contract_value.checked_div(ratio), "margin_required")?,
                    contract_value,
                    liquidation_price: checked(
                        amount
                            .checked_div(leveraged_quantity)
                            .and_then(|v| input.spot_price.checked_sub(v)),
                        "liquidation_price",
                    )?,
                    leveraged_profit: leveraged_net_profit,
                };
                (
                    Returns::from_net_profit(leveraged_net_profit, amount, holding_days)?,
                    Some(metrics),
                )
            }
            None => (Returns::from_net_profit(net_profit, amount, holding_days)?, None),
        };

        // --- 5. Risk ---
        let risk_level = self.classifier.classify(
            input.effective_leverage(),
            returns.annualized_return,
            holding_days,
        );

        tracing::debug!(
            holding_days,
            %net_profit,
            annualized_return = %returns.annualized_return,
            ?risk_level,
            leveraged = leverage.is_some(),
            "Calculated arbitrage return."
        );

        Ok(CalculationResult {
            annualized_return: returns.annualized_return,
            total_return: returns.total_return,
            holding_days,
            actual_profit: returns.net_profit,
            annualized_profit: returns.annualized_profit,
            risk_level,
            breakdown: Breakdown {
                price_difference: total_price_difference,
                holding_cost: costs.holding_cost,
                transaction_cost: costs.transaction_cost,
                deposit_loss: costs.deposit_loss,
                withdrawal_loss: costs.withdrawal_loss,
            },
            leverage,
        })
    }
}
