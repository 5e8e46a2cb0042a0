use crate::field::Field;
use crate::issue::{IssueKind, ValidationIssue, ValidationReport};
use crate::raw::RawInput;
use configuration::{Settings, ValidationLimits, WarningThresholds};
use core_types::PartialInput;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Runs the blocking rules and advisory checks over a calculation request.
///
/// The validator is stateless apart from its thresholds and can be shared
/// freely between threads.
#[derive(Debug, Clone, Default)]
pub struct InputValidator {
    limits: ValidationLimits,
    warnings: WarningThresholds,
}

impl InputValidator {
    pub fn new(limits: ValidationLimits, warnings: WarningThresholds) -> Self {
        Self { limits, warnings }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.validation.clone(), settings.warnings.clone())
    }

    /// Validates a structured, possibly incomplete input.
    ///
    /// All rules run; every violation is collected.
    pub fn validate(&self, input: &PartialInput) -> ValidationReport {
        let mut errors = Vec::new();
        self.check_required(input, &mut errors);
        self.check_ranges(input, &mut errors);
        self.check_relationships(input, &mut errors);
        let warnings = self.collect_warnings(input);

        let report = ValidationReport::new(errors, warnings);
        tracing::debug!(
            is_valid = report.is_valid,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "Validated calculation input."
        );
        report
    }

    /// Parses and validates a raw form in one pass.
    ///
    /// Parse failures are reported alongside rule violations; the parsed
    /// `PartialInput` is returned so a valid form can be calculated directly.
    pub fn validate_raw(&self, raw: &RawInput) -> (ValidationReport, PartialInput) {
        let (partial, mut parse_issues) = raw.parse();
        let report = self.validate(&partial);

        // A field that failed to parse is absent from `partial`; don't also
        // report it as missing.
        let mut errors: Vec<ValidationIssue> = report
            .errors
            .into_iter()
            .filter(|issue| {
                !(issue.kind == IssueKind::MissingField
                    && issue.field.is_some_and(|f| raw.is_provided(f)))
            })
            .collect();
        parse_issues.append(&mut errors);

        (ValidationReport::new(parse_issues, report.warnings), partial)
    }

    fn check_required(&self, input: &PartialInput, errors: &mut Vec<ValidationIssue>) {
        for field in Field::REQUIRED {
            let present = match field {
                Field::FuturePrice => input.future_price.is_some(),
                Field::SpotPrice => input.spot_price.is_some(),
                Field::CurrentDate => input.current_date.is_some(),
                Field::MaturityDate => input.maturity_date.is_some(),
                Field::AnnualInterestRate => input.annual_interest_rate.is_some(),
                Field::TransactionFeeRate => input.transaction_fee_rate.is_some(),
                Field::InvestmentAmount => input.investment_amount.is_some(),
                _ => true,
            };
            if !present {
                errors.push(ValidationIssue::missing(field));
            }
        }
    }

    fn check_ranges(&self, input: &PartialInput, errors: &mut Vec<ValidationIssue>) {
        let positive = [
            (Field::FuturePrice, input.future_price),
            (Field::SpotPrice, input.spot_price),
            (Field::InvestmentAmount, input.investment_amount),
        ];
        for (field, value) in positive {
            if value.is_some_and(|v| v <= Decimal::ZERO) {
                errors.push(ValidationIssue::not_positive(field));
            }
        }

        let percents = [
            (Field::AnnualInterestRate, input.annual_interest_rate, self.limits.max_interest_rate),
            (Field::TransactionFeeRate, input.transaction_fee_rate, self.limits.max_fee_rate),
            (Field::DepositLossRate, input.deposit_loss_rate, self.limits.max_loss_rate),
            (Field::WithdrawalLossRate, input.withdrawal_loss_rate, self.limits.max_loss_rate),
        ];
        for (field, value, max) in percents {
            if value.is_some_and(|v| v < Decimal::ZERO || v > max) {
                errors.push(ValidationIssue::percent_out_of_range(field, max));
            }
        }

        if let Some(leverage) = input.leverage_ratio {
            if leverage <= Decimal::ZERO {
                errors.push(ValidationIssue::not_positive(Field::LeverageRatio));
            } else if leverage > self.limits.max_leverage {
                errors.push(ValidationIssue::leverage_too_high(self.limits.max_leverage));
            }
        }
    }

    fn check_relationships(&self, input: &PartialInput, errors: &mut Vec<ValidationIssue>) {
        if let Some(days) = input.holding_days() {
            if days <= 0 {
                errors.push(ValidationIssue::maturity_not_after_current());
            } else if days < self.limits.min_holding_days || days > self.limits.max_holding_days {
                errors.push(ValidationIssue::holding_days_out_of_range(
                    self.limits.min_holding_days,
                    self.limits.max_holding_days,
                ));
            }
        }

        if let (Some(future), Some(spot)) = (input.future_price, input.spot_price) {
            if spot > Decimal::ZERO {
                let divergence_pct = (future - spot).abs() / spot * dec!(100);
                if divergence_pct > self.limits.max_price_divergence_pct {
                    errors.push(ValidationIssue::price_divergence(
                        self.limits.max_price_divergence_pct,
                    ));
                }
            }
        }

        if let (Some(rate), Some(fee)) = (input.annual_interest_rate, input.transaction_fee_rate) {
            if rate + fee * dec!(2) > self.limits.max_total_cost_rate {
                errors.push(ValidationIssue::total_cost_rate(self.limits.max_total_cost_rate));
            }
        }
    }

    fn collect_warnings(&self, input: &PartialInput) -> Vec<String> {
        let w = &self.warnings;
        let mut warnings = Vec::new();

        if let Some(amount) = input.investment_amount.filter(|a| *a > Decimal::ZERO) {
            if amount < w.min_investment {
                warnings.push("投资金额较小，交易成本占比可能偏高".to_string());
            } else if amount > w.max_investment {
                warnings.push("投资金额较大，请注意市场流动性和冲击成本".to_string());
            }
        }

        if input.annual_interest_rate.is_some_and(|r| r > w.high_interest_rate) {
            warnings.push("年化利率偏高，请确认输入是否正确".to_string());
        }
        if input.transaction_fee_rate.is_some_and(|f| f > w.high_fee_rate) {
            warnings.push("交易手续费率偏高，请确认输入是否正确".to_string());
        }

        if let Some(leverage) = input.leverage_ratio {
            if leverage > w.high_leverage {
                warnings.push("杠杆倍数过高，存在较大爆仓风险".to_string());
            } else if leverage > w.moderate_leverage {
                warnings.push("杠杆会同时放大收益和风险，请谨慎操作".to_string());
            }
        }

        if let Some(days) = input.holding_days().filter(|d| *d > 0) {
            if days < w.short_holding_days {
                warnings.push("持有期较短，收益率可能受短期价格波动影响较大".to_string());
            } else if days > w.long_holding_days {
                warnings.push("持有期较长，请注意资金占用和利率变动风险".to_string());
            }
        }

        warnings
    }
}
