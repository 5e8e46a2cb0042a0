use crate::field::Field;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// The category of a blocking validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    /// A required input is absent or empty.
    MissingField,
    /// A raw value could not be read as a number.
    InvalidNumber,
    /// A raw value could not be read as a calendar date.
    InvalidDate,
    /// A present value violates its numeric bound.
    OutOfRange,
    /// A rule spanning several fields failed.
    InvalidRelationship,
}

/// A single blocking error, with a ready-to-display message.
///
/// There is exactly one message per (field, rule) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// The offending field; `None` for relationship rules spanning several fields.
    pub field: Option<Field>,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl ValidationIssue {
    fn new(kind: IssueKind, field: Option<Field>, message: String) -> Self {
        Self { kind, field, message }
    }

    pub fn missing(field: Field) -> Self {
        Self::new(
            IssueKind::MissingField,
            Some(field),
            format!("{}不能为空", field.label()),
        )
    }

    pub fn invalid_number(field: Field) -> Self {
        Self::new(
            IssueKind::InvalidNumber,
            Some(field),
            format!("{}必须是有效的数字", field.label()),
        )
    }

    pub fn invalid_date(field: Field) -> Self {
        Self::new(
            IssueKind::InvalidDate,
            Some(field),
            format!("{}格式无效，应为YYYY-MM-DD", field.label()),
        )
    }

    pub fn not_positive(field: Field) -> Self {
        Self::new(
            IssueKind::OutOfRange,
            Some(field),
            format!("{}必须大于0", field.label()),
        )
    }

    pub fn percent_out_of_range(field: Field, max: Decimal) -> Self {
        Self::new(
            IssueKind::OutOfRange,
            Some(field),
            format!("{}必须在0%到{}%之间", field.label(), max.normalize()),
        )
    }

    pub fn leverage_too_high(max: Decimal) -> Self {
        Self::new(
            IssueKind::OutOfRange,
            Some(Field::LeverageRatio),
            format!("{}不能超过{}倍", Field::LeverageRatio.label(), max.normalize()),
        )
    }

    pub fn maturity_not_after_current() -> Self {
        Self::new(
            IssueKind::InvalidRelationship,
            Some(Field::MaturityDate),
            "到期日期必须晚于当前日期".to_string(),
        )
    }

    pub fn holding_days_out_of_range(min: i64, max: i64) -> Self {
        Self::new(
            IssueKind::InvalidRelationship,
            Some(Field::MaturityDate),
            format!("持有天数必须在{}到{}天之间", min, max),
        )
    }

    pub fn price_divergence(max_pct: Decimal) -> Self {
        Self::new(
            IssueKind::InvalidRelationship,
            None,
            format!("期货价格与现货价格差异过大（超过{}%）", max_pct.normalize()),
        )
    }

    pub fn total_cost_rate(max_pct: Decimal) -> Self {
        Self::new(
            IssueKind::InvalidRelationship,
            None,
            format!(
                "总成本率过高（年化利率 + 2 × 交易手续费率超过{}%）",
                max_pct.normalize()
            ),
        )
    }
}

/// The outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Builds a report, dropping repeated messages while keeping first-seen order.
    pub fn new(errors: Vec<ValidationIssue>, warnings: Vec<String>) -> Self {
        let mut seen = HashSet::new();
        let errors: Vec<ValidationIssue> = errors
            .into_iter()
            .filter(|issue| seen.insert(issue.message.clone()))
            .collect();

        let mut seen = HashSet::new();
        let warnings: Vec<String> = warnings
            .into_iter()
            .filter(|w| seen.insert(w.clone()))
            .collect();

        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// The error messages as plain strings, ready for display.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Whether any error of the given kind was reported.
    pub fn has(&self, kind: IssueKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    /// Whether any error concerns the given field.
    pub fn has_field(&self, field: Field) -> bool {
        self.errors.iter().any(|e| e.field == Some(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn duplicates_are_removed_in_order() {
        let report = ValidationReport::new(
            vec![
                ValidationIssue::missing(Field::SpotPrice),
                ValidationIssue::not_positive(Field::FuturePrice),
                ValidationIssue::missing(Field::SpotPrice),
            ],
            vec!["a".to_string(), "b".to_string(), "a".to_string()],
        );
        assert!(!report.is_valid);
        assert_eq!(
            report.error_messages(),
            vec!["现货价格不能为空".to_string(), "期货价格必须大于0".to_string()]
        );
        assert_eq!(report.warnings, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn empty_report_is_valid() {
        let report = ValidationReport::new(vec![], vec!["注意".to_string()]);
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn bounds_are_rendered_without_trailing_zeros() {
        let issue = ValidationIssue::percent_out_of_range(Field::TransactionFeeRate, dec!(10.00));
        assert_eq!(issue.message, "交易手续费率必须在0%到10%之间");
        assert_eq!(issue.kind, IssueKind::OutOfRange);
    }
}
