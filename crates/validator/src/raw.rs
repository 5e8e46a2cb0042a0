use crate::field::Field;
use crate::issue::ValidationIssue;
use chrono::NaiveDate;
use core_types::PartialInput;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Date format accepted for the two date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The string form of a calculation request, exactly as a user typed it.
///
/// Empty or whitespace-only strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInput {
    pub future_price: String,
    pub spot_price: String,
    pub current_date: String,
    pub maturity_date: String,
    pub annual_interest_rate: String,
    pub transaction_fee_rate: String,
    pub investment_amount: String,
    pub deposit_loss_rate: String,
    pub withdrawal_loss_rate: String,
    pub leverage_ratio: String,
}

impl RawInput {
    /// Replaces the raw value of one field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FuturePrice => &self.future_price,
            Field::SpotPrice => &self.spot_price,
            Field::CurrentDate => &self.current_date,
            Field::MaturityDate => &self.maturity_date,
            Field::AnnualInterestRate => &self.annual_interest_rate,
            Field::TransactionFeeRate => &self.transaction_fee_rate,
            Field::InvestmentAmount => &self.investment_amount,
            Field::DepositLossRate => &self.deposit_loss_rate,
            Field::WithdrawalLossRate => &self.withdrawal_loss_rate,
            Field::LeverageRatio => &self.leverage_ratio,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FuturePrice => &mut self.future_price,
            Field::SpotPrice => &mut self.spot_price,
            Field::CurrentDate => &mut self.current_date,
            Field::MaturityDate => &mut self.maturity_date,
            Field::AnnualInterestRate => &mut self.annual_interest_rate,
            Field::TransactionFeeRate => &mut self.transaction_fee_rate,
            Field::InvestmentAmount => &mut self.investment_amount,
            Field::DepositLossRate => &mut self.deposit_loss_rate,
            Field::WithdrawalLossRate => &mut self.withdrawal_loss_rate,
            Field::LeverageRatio => &mut self.leverage_ratio,
        }
    }

    /// Converts the strings into typed values.
    ///
    /// Values that fail to parse are left out of the returned `PartialInput`
    /// and reported as issues instead, so they are not also flagged as missing.
    pub fn parse(&self) -> (PartialInput, Vec<ValidationIssue>) {
        let mut issues = Vec::new();
        let mut number = |field: Field| parse_decimal(field, self.get(field), &mut issues);

        let future_price = number(Field::FuturePrice);
        let spot_price = number(Field::SpotPrice);
        let annual_interest_rate = number(Field::AnnualInterestRate);
        let transaction_fee_rate = number(Field::TransactionFeeRate);
        let investment_amount = number(Field::InvestmentAmount);
        let deposit_loss_rate = number(Field::DepositLossRate);
        let withdrawal_loss_rate = number(Field::WithdrawalLossRate);
        let leverage_ratio = number(Field::LeverageRatio);

        let current_date = parse_date(Field::CurrentDate, &self.current_date, &mut issues);
        let maturity_date = parse_date(Field::MaturityDate, &self.maturity_date, &mut issues);

        let partial = PartialInput {
            future_price,
            spot_price,
            current_date,
            maturity_date,
            annual_interest_rate,
            transaction_fee_rate,
            investment_amount,
            deposit_loss_rate,
            withdrawal_loss_rate,
            leverage_ratio,
        };
        (partial, issues)
    }

    /// Whether the raw value of `field` was provided at all.
    pub fn is_provided(&self, field: Field) -> bool {
        !self.get(field).trim().is_empty()
    }
}

fn parse_decimal(field: Field, raw: &str, issues: &mut Vec<ValidationIssue>) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    match Decimal::from_str(&cleaned).or_else(|_| Decimal::from_scientific(&cleaned)) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(field = %field, raw, error = %e, "Rejected non-numeric input.");
            issues.push(ValidationIssue::invalid_number(field));
            None
        }
    }
}

fn parse_date(field: Field, raw: &str, issues: &mut Vec<ValidationIssue>) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!(field = %field, raw, error = %e, "Rejected malformed date.");
            issues.push(ValidationIssue::invalid_date(field));
            None
        }
    }
}
