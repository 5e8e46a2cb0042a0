use configuration::RiskThresholds;
use core_types::RiskLevel;
use rust_decimal::Decimal;

/// Buckets a calculation into LOW / MEDIUM / HIGH risk.
///
/// Rules are evaluated in priority order and the first match wins:
/// 1. leverage above `max_unleveraged_ratio` is HIGH;
/// 2. a small annualized return or a long holding period is LOW;
/// 3. a moderate annualized return or a medium holding period is MEDIUM;
/// 4. everything else is HIGH.
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    thresholds: RiskThresholds,
}

impl RiskClassifier {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(
        &self,
        leverage_ratio: Option<Decimal>,
        annualized_return: Decimal,
        holding_days: i64,
    ) -> RiskLevel {
        let t = &self.thresholds;
        if leverage_ratio.is_some_and(|l| l > t.max_unleveraged_ratio) {
            return RiskLevel::High;
        }

        let magnitude = annualized_return.abs();
        if magnitude < t.low_return_pct || holding_days > t.low_holding_days {
            RiskLevel::Low
        } else if magnitude < t.medium_return_pct || holding_days > t.medium_holding_days {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}
