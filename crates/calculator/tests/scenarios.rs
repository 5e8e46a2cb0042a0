use calculator::{ArbitrageCalculator, CalculatorError, RiskClassifier};
use chrono::NaiveDate;
use core_types::{CalculationInput, RiskLevel};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn reference_input() -> CalculationInput {
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

fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

#[test]
fn unleveraged_reference_scenario() {
    let result = ArbitrageCalculator::default()
        .calculate(&reference_input())
        .unwrap();

    assert_eq!(result.holding_days, 91);
    assert_close(result.breakdown.price_difference, dec!(1666.67), dec!(0.01));
    assert_close(result.breakdown.holding_cost, dec!(872.60), dec!(0.01));
    assert_eq!(result.breakdown.transaction_cost, dec!(100));
    assert_eq!(result.breakdown.deposit_loss, None);
    assert_eq!(result.breakdown.withdrawal_loss, None);
    assert_close(result.actual_profit, dec!(694.07), dec!(0.01));
    assert_close(result.annualized_return, dec!(2.78), dec!(0.01));
    assert_close(result.total_return, dec!(0.694), dec!(0.001));
    assert_close(result.annualized_profit, dec!(2783.9), dec!(0.1));
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert!(result.leverage.is_none());
}

#[test]
fn leveraged_reference_scenario_keeps_unleveraged_breakdown() {
    let mut input = reference_input();
    input.leverage_ratio = Some(dec!(3));
    let result = ArbitrageCalculator::default().calculate(&input).unwrap();

    let leverage = result.leverage.as_ref().expect("leverage metrics");
    assert_eq!(leverage.leverage_ratio, dec!(3));
    assert_eq!(leverage.contract_value, dec!(300000));
    assert_eq!(leverage.margin_required, dec!(100000));
    assert_eq!(leverage.liquidation_price, dec!(2000));
    assert_close(leverage.leveraged_profit, dec!(4027.40), dec!(0.01));

    assert_eq!(result.actual_profit, leverage.leveraged_profit);
    assert_close(result.annualized_return, dec!(16.15), dec!(0.01));
    assert_eq!(result.risk_level, RiskLevel::High);

    // The breakdown still reports the unleveraged spread.
    assert_close(result.breakdown.price_difference, dec!(1666.67), dec!(0.01));
    assert_close(result.breakdown.holding_cost, dec!(872.60), dec!(0.01));
}

#[test]
fn deposit_and_withdrawal_losses_reduce_profit() {
    let mut input = reference_input();
    input.deposit_loss_rate = Some(dec!(0.1));
    input.withdrawal_loss_rate = Some(dec!(0.2));
    let base = ArbitrageCalculator::default()
        .calculate(&reference_input())
        .unwrap();
    let result = ArbitrageCalculator::default().calculate(&input).unwrap();

    assert_eq!(result.breakdown.deposit_loss, Some(dec!(100)));
    assert_eq!(result.breakdown.withdrawal_loss, Some(dec!(200)));
    assert_close(base.actual_profit - result.actual_profit, dec!(300), dec!(0.000000001));
}

#[test]
fn backwardation_produces_a_loss() {
    let mut input = reference_input();
    input.future_price = dec!(2950);
    let result = ArbitrageCalculator::default().calculate(&input).unwrap();
    assert!(result.actual_profit < Decimal::ZERO);
    assert!(result.annualized_return < Decimal::ZERO);
}

#[test]
fn maturity_before_trade_date_fails() {
    let mut input = reference_input();
    input.maturity_date = date(2023, 12, 1);
    let err = ArbitrageCalculator::default().calculate(&input).unwrap_err();
    assert_eq!(err, CalculatorError::InvalidHoldingPeriod(-31, 365));
}

#[test]
fn holding_period_bounds() {
    let calculator = ArbitrageCalculator::default();
    let mut input = reference_input();

    input.maturity_date = input.current_date;
    assert!(calculator.calculate(&input).is_err());

    input.maturity_date = date(2024, 1, 2);
    assert_eq!(calculator.calculate(&input).unwrap().holding_days, 1);

    input.maturity_date = date(2024, 12, 31);
    assert_eq!(calculator.calculate(&input).unwrap().holding_days, 365);

    input.maturity_date = date(2025, 1, 1);
    assert!(matches!(
        calculator.calculate(&input),
        Err(CalculatorError::InvalidHoldingPeriod(366, 365))
    ));
}

#[test]
fn non_positive_spot_price_is_rejected_instead_of_dividing_by_zero() {
    let mut input = reference_input();
    input.spot_price = Decimal::ZERO;
    assert!(matches!(
        ArbitrageCalculator::default().calculate(&input),
        Err(CalculatorError::InvalidInput("spot_price", _))
    ));
}

#[test]
fn leveraged_contract_beyond_decimal_range_is_an_overflow() {
    let mut input = reference_input();
    input.investment_amount = Decimal::from_scientific("1e27").unwrap();
    input.leverage_ratio = Some(dec!(100));
    assert_eq!(
        ArbitrageCalculator::default().calculate(&input),
        Err(CalculatorError::Overflow("contract_value"))
    );
}

#[test]
fn spot_quantity_beyond_decimal_range_is_an_overflow() {
    let mut input = reference_input();
    input.investment_amount = Decimal::from_scientific("1e25").unwrap();
    input.spot_price = dec!(0.0001);
    input.future_price = dec!(0.0001);
    assert_eq!(
        ArbitrageCalculator::default().calculate(&input),
        Err(CalculatorError::Overflow("spot_quantity"))
    );
}

#[test]
fn holding_limit_cannot_be_raised_past_one_year() {
    let calculator = ArbitrageCalculator::new(RiskClassifier::default(), 400);
    assert_eq!(calculator.max_holding_days(), 365);

    let mut input = reference_input();
    input.maturity_date = date(2025, 1, 1);
    assert_eq!(
        calculator.calculate(&input),
        Err(CalculatorError::InvalidHoldingPeriod(366, 365))
    );
}

#[test]
fn numerically_equal_inputs_give_equal_results() {
    let mut scaled = reference_input();
    scaled.spot_price = dec!(3000.00);
    scaled.investment_amount = dec!(100000.000);
    scaled.annual_interest_rate = dec!(3.50);

    let calculator = ArbitrageCalculator::default();
    let a = calculator.calculate(&reference_input()).unwrap();
    let b = calculator.calculate(&scaled).unwrap();
    assert_eq!(a.holding_days, b.holding_days);
    assert_eq!(a.risk_level, b.risk_level);
    assert_eq!(a.annualized_return.round_dp(12), b.annualized_return.round_dp(12));
    assert_eq!(a.actual_profit.round_dp(12), b.actual_profit.round_dp(12));
}

prop_compose! {
    fn arb_input()(
        spot in 100u32..100_000,
        spread_bp in -500i32..500,
        days in 1i64..=365,
        rate_bp in 0u32..2_000,
        fee_bp in 0u32..100,
        amount in 1_000u32..10_000_000,
    ) -> CalculationInput {
        let spot = Decimal::from(spot);
        let current = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        CalculationInput {
            future_price: spot + spot * Decimal::new(spread_bp as i64, 4),
            spot_price: spot,
            current_date: current,
            maturity_date: current + chrono::Duration::days(days),
            annual_interest_rate: Decimal::new(rate_bp as i64, 2),
            transaction_fee_rate: Decimal::new(fee_bp as i64, 2),
            investment_amount: Decimal::from(amount),
            deposit_loss_rate: None,
            withdrawal_loss_rate: None,
            leverage_ratio: None,
        }
    }
}

proptest! {
    #[test]
    fn calculation_is_a_pure_function(input in arb_input()) {
        let calculator = ArbitrageCalculator::default();
        let first = calculator.calculate(&input).unwrap();
        let second = calculator.calculate(&input.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn without_leverage_the_profit_is_the_unleveraged_net(input in arb_input()) {
        let result = ArbitrageCalculator::default().calculate(&input).unwrap();
        prop_assert!(result.leverage.is_none());
        let b = &result.breakdown;
        let expected = b.price_difference - b.holding_cost - b.transaction_cost;
        prop_assert!((result.actual_profit - expected).abs() < dec!(0.000000001));
        prop_assert_eq!(result.holding_days, input.holding_days());
    }

    #[test]
    fn leverage_above_one_is_always_high_risk(
        input in arb_input(),
        leverage_tenths in 11u32..1_000,
    ) {
        let mut input = input;
        input.leverage_ratio = Some(Decimal::new(leverage_tenths as i64, 1));
        let result = ArbitrageCalculator::default().calculate(&input).unwrap();
        prop_assert_eq!(result.risk_level, RiskLevel::High);
        prop_assert!(result.leverage.is_some());
    }
}
