use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fully populated set of parameters for one cash-and-carry calculation.
///
/// Rates are expressed in percent (`3.5` means 3.5 %). The optional loss rates
/// and leverage are modelled as `Option` rather than sentinel values, so the
/// calculation core never has to deal with string parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub future_price: Decimal,
    pub spot_price: Decimal,
    pub current_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub annual_interest_rate: Decimal,
    pub transaction_fee_rate: Decimal,
    pub investment_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_loss_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_loss_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leverage_ratio: Option<Decimal>,
}

impl CalculationInput {
    /// Whole days between the trade date and maturity. Negative when maturity
    /// precedes the trade date.
    pub fn holding_days(&self) -> i64 {
        (self.maturity_date - self.current_date).num_days()
    }

    /// The leverage ratio, but only when it is actually usable (`> 0`).
    pub fn effective_leverage(&self) -> Option<Decimal> {
        self.leverage_ratio.filter(|l| *l > Decimal::ZERO)
    }
}

/// The pre-submit shape of a [`CalculationInput`]: any field may be missing.
///
/// This is what the validator inspects before a calculation is allowed to run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialInput {
    pub future_price: Option<Decimal>,
    pub spot_price: Option<Decimal>,
    pub current_date: Option<NaiveDate>,
    pub maturity_date: Option<NaiveDate>,
    pub annual_interest_rate: Option<Decimal>,
    pub transaction_fee_rate: Option<Decimal>,
    pub investment_amount: Option<Decimal>,
    pub deposit_loss_rate: Option<Decimal>,
    pub withdrawal_loss_rate: Option<Decimal>,
    pub leverage_ratio: Option<Decimal>,
}

impl PartialInput {
    /// Holding period in days, if both dates are present.
    pub fn holding_days(&self) -> Option<i64> {
        match (self.current_date, self.maturity_date) {
            (Some(current), Some(maturity)) => Some((maturity - current).num_days()),
            _ => None,
        }
    }

    /// Converts into a [`CalculationInput`], failing on the first missing
    /// required field. This does not apply any range checks.
    pub fn complete(&self) -> Result<CalculationInput, CoreError> {
        Ok(CalculationInput {
            future_price: self.future_price.ok_or(CoreError::MissingField("futurePrice"))?,
            spot_price: self.spot_price.ok_or(CoreError::MissingField("spotPrice"))?,
            current_date: self.current_date.ok_or(CoreError::MissingField("currentDate"))?,
            maturity_date: self.maturity_date.ok_or(CoreError::MissingField("maturityDate"))?,
            annual_interest_rate: self
                .annual_interest_rate
                .ok_or(CoreError::MissingField("annualInterestRate"))?,
            transaction_fee_rate: self
                .transaction_fee_rate
                .ok_or(CoreError::MissingField("transactionFeeRate"))?,
            investment_amount: self
                .investment_amount
                .ok_or(CoreError::MissingField("investmentAmount"))?,
            deposit_loss_rate: self.deposit_loss_rate,
            withdrawal_loss_rate: self.withdrawal_loss_rate,
            leverage_ratio: self.leverage_ratio,
        })
    }
}

impl From<&CalculationInput> for PartialInput {
    fn from(input: &CalculationInput) -> Self {
        Self {
            future_price: Some(input.future_price),
            spot_price: Some(input.spot_price),
            current_date: Some(input.current_date),
            maturity_date: Some(input.maturity_date),
            annual_interest_rate: Some(input.annual_interest_rate),
            transaction_fee_rate: Some(input.transaction_fee_rate),
            investment_amount: Some(input.investment_amount),
            deposit_loss_rate: input.deposit_loss_rate,
            withdrawal_loss_rate: input.withdrawal_loss_rate,
            leverage_ratio: input.leverage_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> CalculationInput {
        CalculationInput {
            future_price: dec!(3050),
            spot_price: dec!(3000),
            current_date: date(2024, 1, 1),
            maturity_date: date(2024, 4, 1),
            annual_interest_rate: dec!(3.5),
            transaction_fee_rate: dec!(0.05),
            investment_amount: dec!(100000),
            deposit_loss_rate: None,
            withdrawal_loss_rate: None,
            leverage_ratio: None,
        }
    }

    #[test]
    fn holding_days_counts_whole_days_across_leap_february() {
        assert_eq!(sample().holding_days(), 91);
    }

    #[test]
    fn holding_days_is_negative_when_maturity_precedes_trade_date() {
        let mut input = sample();
        input.maturity_date = date(2023, 12, 25);
        assert_eq!(input.holding_days(), -7);
    }

    #[test]
    fn zero_leverage_is_not_effective() {
        let mut input = sample();
        input.leverage_ratio = Some(Decimal::ZERO);
        assert_eq!(input.effective_leverage(), None);
        input.leverage_ratio = Some(dec!(3));
        assert_eq!(input.effective_leverage(), Some(dec!(3)));
    }

    #[test]
    fn partial_input_round_trips_through_complete() {
        let input = sample();
        let partial = PartialInput::from(&input);
        assert_eq!(partial.holding_days(), Some(91));
        assert_eq!(partial.complete().unwrap(), input);
    }

    #[test]
    fn complete_reports_first_missing_field() {
        let mut partial = PartialInput::from(&sample());
        partial.spot_price = None;
        partial.investment_amount = None;
        assert_eq!(partial.complete(), Err(CoreError::MissingField("spotPrice")));
    }

    #[test]
    fn deserializes_camel_case_without_optional_fields() {
        let json = r#"{
            "futurePrice": "3050", "spotPrice": "3000",
            "currentDate": "2024-01-01", "maturityDate": "2024-04-01",
            "annualInterestRate": "3.5", "transactionFeeRate": "0.05",
            "investmentAmount": "100000"
        }"#;
        let input: CalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, sample());
    }
}
