use crate::error::ValidatorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One input field of a calculation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FuturePrice,
    SpotPrice,
    CurrentDate,
    MaturityDate,
    AnnualInterestRate,
    TransactionFeeRate,
    InvestmentAmount,
    DepositLossRate,
    WithdrawalLossRate,
    LeverageRatio,
}

impl Field {
    /// Fields that must be present before a calculation can run.
    pub const REQUIRED: [Field; 7] = [
        Field::FuturePrice,
        Field::SpotPrice,
        Field::CurrentDate,
        Field::MaturityDate,
        Field::AnnualInterestRate,
        Field::TransactionFeeRate,
        Field::InvestmentAmount,
    ];

    pub const ALL: [Field; 10] = [
        Field::FuturePrice,
        Field::SpotPrice,
        Field::CurrentDate,
        Field::MaturityDate,
        Field::AnnualInterestRate,
        Field::TransactionFeeRate,
        Field::InvestmentAmount,
        Field::DepositLossRate,
        Field::WithdrawalLossRate,
        Field::LeverageRatio,
    ];

    /// The camelCase key used on the wire and in `field=value` edits.
    pub fn key(self) -> &'static str {
        match self {
            Field::FuturePrice => "futurePrice",
            Field::SpotPrice => "spotPrice",
            Field::CurrentDate => "currentDate",
            Field::MaturityDate => "maturityDate",
            Field::AnnualInterestRate => "annualInterestRate",
            Field::TransactionFeeRate => "transactionFeeRate",
            Field::InvestmentAmount => "investmentAmount",
            Field::DepositLossRate => "depositLossRate",
            Field::WithdrawalLossRate => "withdrawalLossRate",
            Field::LeverageRatio => "leverageRatio",
        }
    }

    /// Display label used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::FuturePrice => "期货价格",
            Field::SpotPrice => "现货价格",
            Field::CurrentDate => "当前日期",
            Field::MaturityDate => "到期日期",
            Field::AnnualInterestRate => "年化利率",
            Field::TransactionFeeRate => "交易手续费率",
            Field::InvestmentAmount => "投资金额",
            Field::DepositLossRate => "入金损耗率",
            Field::WithdrawalLossRate => "出金损耗率",
            Field::LeverageRatio => "杠杆倍数",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = ValidatorError;

    /// Accepts the camelCase key, its snake_case spelling, or a short alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        let field = match normalized.as_str() {
            "futureprice" | "future" => Field::FuturePrice,
            "spotprice" | "spot" => Field::SpotPrice,
            "currentdate" | "current" => Field::CurrentDate,
            "maturitydate" | "maturity" => Field::MaturityDate,
            "annualinterestrate" | "interestrate" | "rate" => Field::AnnualInterestRate,
            "transactionfeerate" | "feerate" | "fee" => Field::TransactionFeeRate,
            "investmentamount" | "amount" => Field::InvestmentAmount,
            "depositlossrate" | "depositloss" => Field::DepositLossRate,
            "withdrawallossrate" | "withdrawalloss" => Field::WithdrawalLossRate,
            "leverageratio" | "leverage" => Field::LeverageRatio,
            _ => return Err(ValidatorError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}
