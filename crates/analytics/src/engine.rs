use crate::error::AnalyticsError;
use crate::report::{AnalysisResult, BreakEven, MarketConditionReport, Sensitivity};
use calculator::costs::{holding_cost_rate, total_transaction_fee_rate};
use calculator::{ArbitrageCalculator, CalculatorError};
use chrono::Duration;
use configuration::{AnalysisSettings, Settings};
use core_types::{CalculationInput, CalculationResult, MarketCondition};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A stateless engine deriving secondary analytics from the arbitrage calculator.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    calculator: ArbitrageCalculator,
    settings: AnalysisSettings,
}

impl AnalysisEngine {
    pub fn new(calculator: ArbitrageCalculator, settings: AnalysisSettings) -> Self {
        Self {
            calculator,
            settings,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            ArbitrageCalculator::from_settings(settings),
            settings.analysis.clone(),
        )
    }

    /// The calculator used for the base case and every perturbation.
    pub fn calculator(&self) -> &ArbitrageCalculator {
        &self.calculator
    }

    /// The main entry point: the base calculation plus all three analyses.
    ///
    /// # Errors
    ///
    /// Fails when the base calculation itself fails. A failing perturbation
    /// only blanks the corresponding sensitivity.
    pub fn analyze(&self, input: &CalculationInput) -> Result<AnalysisResult, AnalyticsError> {
        let result = self.calculator.calculate(input)?;
        let break_even = self.break_even(input)?;
        let sensitivity = self.sensitivity(input, &result);
        let market_condition = self.market_condition(input.future_price, input.spot_price)?;

        Ok(AnalysisResult {
            result,
            break_even,
            sensitivity,
            market_condition,
        })
    }

    /// Break-even prices on the unleveraged cost structure.
    ///
    /// Loss rates and leverage are deliberately ignored: the break-even is
    /// defined by carry and round-trip fees only.
    pub fn break_even(&self, input: &CalculationInput) -> Result<BreakEven, AnalyticsError> {
        if input.spot_price <= Decimal::ZERO {
            return Err(AnalyticsError::InvalidInput(
                "spot_price",
                format!("must be greater than 0, got {}", input.spot_price),
            ));
        }
        self.calculator.check_holding_days(input.holding_days())?;

        let cost_factor = holding_cost_rate(input.annual_interest_rate, input.holding_days())?
            .checked_add(Decimal::ONE)
            .and_then(|v| v.checked_add(total_transaction_fee_rate(input.transaction_fee_rate)))
            .ok_or(CalculatorError::Overflow("cost_factor"))?;
        if cost_factor <= Decimal::ZERO {
            return Err(AnalyticsError::InvalidInput(
                "cost_factor",
                format!("must be greater than 0, got {}", cost_factor),
            ));
        }

        Ok(BreakEven {
            break_even_future_price: input
                .spot_price
                .checked_mul(cost_factor)
                .ok_or(CalculatorError::Overflow("break_even_future_price"))?,
            break_even_spot_price: input
                .spot_price
                .checked_div(cost_factor)
                .ok_or(CalculatorError::Overflow("break_even_spot_price"))?,
        })
    }

    /// Signed change of the annualized return when one input is bumped.
    ///
    /// Each bump starts from the same unperturbed `input`. A bump that cannot
    /// be applied or calculated leaves its sensitivity empty.
    pub fn sensitivity(&self, input: &CalculationInput, base: &CalculationResult) -> Sensitivity {
        let a = &self.settings;

        let rate_bumped = input
            .annual_interest_rate
            .checked_add(a.interest_rate_bump)
            .map(|annual_interest_rate| CalculationInput {
                annual_interest_rate,
                ..input.clone()
            });

        let time_bumped = input
            .maturity_date
            .checked_sub_signed(Duration::days(a.time_bump_days))
            .map(|maturity_date| CalculationInput {
                maturity_date,
                ..input.clone()
            });

        let price_bumped = input
            .spot_price
            .checked_mul(a.price_bump_factor)
            .map(|spot_price| CalculationInput {
                spot_price,
                ..input.clone()
            });

        Sensitivity {
            interest_rate_sensitivity: self.delta("interest_rate", rate_bumped.as_ref(), base),
            time_sensitivity: self.delta("time", time_bumped.as_ref(), base),
            price_sensitivity: self.delta("price", price_bumped.as_ref(), base),
        }
    }

    fn delta(
        &self,
        name: &'static str,
        bumped: Option<&CalculationInput>,
        base: &CalculationResult,
    ) -> Option<Decimal> {
        let Some(bumped) = bumped else {
            tracing::debug!(sensitivity = name, "Skipped sensitivity; the bump is out of range.");
            return None;
        };
        match self.calculator.calculate(bumped) {
            Ok(result) => result.annualized_return.checked_sub(base.annualized_return),
            Err(e) => {
                log_skipped(name, &e);
                None
            }
        }
    }

    /// Classifies the futures premium. Premiums strictly beyond the neutral
    /// band are CONTANGO or BACKWARDATION; the band edges are NEUTRAL.
    pub fn market_condition(
        &self,
        future_price: Decimal,
        spot_price: Decimal,
    ) -> Result<MarketConditionReport, AnalyticsError> {
        if spot_price <= Decimal::ZERO {
            return Err(AnalyticsError::InvalidInput(
                "spot_price",
                format!("must be greater than 0, got {}", spot_price),
            ));
        }

        let premium = future_price
            .checked_sub(spot_price)
            .ok_or(CalculatorError::Overflow("premium"))?;
        let premium_percent = premium
            .checked_div(spot_price)
            .and_then(|v| v.checked_mul(dec!(100)))
            .ok_or(CalculatorError::Overflow("premium_percent"))?;
        let band = self.settings.neutral_band_pct;

        let condition = if premium_percent > band {
            MarketCondition::Contango
        } else if premium_percent < -band {
            MarketCondition::Backwardation
        } else {
            MarketCondition::Neutral
        };

        Ok(MarketConditionReport {
            condition,
            premium,
            premium_percent,
        })
    }
}

fn log_skipped(name: &str, error: &CalculatorError) {
    tracing::debug!(sensitivity = name, %error, "Skipped sensitivity; bumped input is not calculable.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_exactly_on_the_band_is_neutral() {
        let engine = AnalysisEngine::default();
        let report = engine.market_condition(dec!(1005), dec!(1000)).unwrap();
        assert_eq!(report.premium_percent, dec!(0.5));
        assert_eq!(report.condition, MarketCondition::Neutral);

        let report = engine.market_condition(dec!(995), dec!(1000)).unwrap();
        assert_eq!(report.condition, MarketCondition::Neutral);
    }

    #[test]
    fn premium_just_beyond_the_band_is_classified() {
        let engine = AnalysisEngine::default();
        let report = engine.market_condition(dec!(1005.000001), dec!(1000)).unwrap();
        assert_eq!(report.premium_percent, dec!(0.5000001));
        assert_eq!(report.condition, MarketCondition::Contango);

        let report = engine.market_condition(dec!(994.999999), dec!(1000)).unwrap();
        assert_eq!(report.condition, MarketCondition::Backwardation);
    }

    #[test]
    fn break_even_rejects_a_negative_holding_period() {
        let input = CalculationInput {
            future_price: dec!(3050),
            spot_price: dec!(3000),
            current_date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            maturity_date: chrono::NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            annual_interest_rate: dec!(50),
            transaction_fee_rate: Decimal::ZERO,
            investment_amount: dec!(100000),
            deposit_loss_rate: None,
            withdrawal_loss_rate: None,
            leverage_ratio: None,
        };
        assert_eq!(
            AnalysisEngine::default().break_even(&input),
            Err(AnalyticsError::Calculation(CalculatorError::InvalidHoldingPeriod(-730, 365)))
        );
    }

    #[test]
    fn premium_beyond_decimal_range_is_an_overflow() {
        let engine = AnalysisEngine::default();
        assert_eq!(
            engine.market_condition(Decimal::MAX, dec!(0.0001)),
            Err(AnalyticsError::Calculation(CalculatorError::Overflow("premium_percent")))
        );
    }

    #[test]
    fn zero_spot_price_is_rejected() {
        let engine = AnalysisEngine::default();
        assert!(matches!(
            engine.market_condition(dec!(1), Decimal::ZERO),
            Err(AnalyticsError::InvalidInput("spot_price", _))
        ));
    }
}
