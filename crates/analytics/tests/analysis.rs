use analytics::{AnalysisEngine, AnalyticsError};
use calculator::CalculatorError;
use chrono::NaiveDate;
use core_types::{CalculationInput, MarketCondition};
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
fn analysis_extends_the_base_calculation() {
    let engine = AnalysisEngine::default();
    let input = reference_input();
    let analysis = engine.analyze(&input).unwrap();
    let base = engine.calculator().calculate(&input).unwrap();
    assert_eq!(analysis.result, base);
    assert_eq!(analysis.market_condition.condition, MarketCondition::Contango);
    assert_eq!(analysis.market_condition.premium, dec!(50));
    assert_close(analysis.market_condition.premium_percent, dec!(1.6667), dec!(0.0001));
}

#[test]
fn break_even_prices_bracket_the_spot() {
    let analysis = AnalysisEngine::default().analyze(&reference_input()).unwrap();
    // 3000 * (1 + 0.035 * 91 / 365 + 0.001)
    assert_close(analysis.break_even.break_even_future_price, dec!(3029.178), dec!(0.001));
    assert_close(analysis.break_even.break_even_spot_price, dec!(2971.103), dec!(0.001));
}

#[test]
fn feeding_the_break_even_future_price_back_gives_zero_return() {
    let engine = AnalysisEngine::default();
    let mut input = reference_input();
    let break_even = engine.break_even(&input).unwrap();

    input.future_price = break_even.break_even_future_price;
    let result = engine.calculator().calculate(&input).unwrap();
    assert_close(result.annualized_return, Decimal::ZERO, dec!(0.0000001));
    assert_close(result.actual_profit, Decimal::ZERO, dec!(0.0000001));
}

#[test]
fn break_even_ignores_leverage() {
    let engine = AnalysisEngine::default();
    let mut leveraged = reference_input();
    leveraged.leverage_ratio = Some(dec!(5));
    assert_eq!(
        engine.break_even(&leveraged).unwrap(),
        engine.break_even(&reference_input()).unwrap()
    );
}

#[test]
fn sensitivities_have_the_expected_sign_and_size() {
    let analysis = AnalysisEngine::default().analyze(&reference_input()).unwrap();
    let s = analysis.sensitivity;

    // One more point of financing costs exactly one point of annualized return.
    assert_close(s.interest_rate_sensitivity.unwrap(), dec!(-1), dec!(0.0000001));
    // A higher spot price shrinks the premium.
    assert!(s.price_sensitivity.unwrap() < Decimal::ZERO);
    // The same profit over fewer days annualizes higher.
    assert!(s.time_sensitivity.unwrap() > Decimal::ZERO);
}

#[test]
fn sensitivity_is_blank_when_the_bumped_period_is_empty() {
    let mut input = reference_input();
    input.maturity_date = date(2024, 1, 2);
    let analysis = AnalysisEngine::default().analyze(&input).unwrap();
    assert_eq!(analysis.result.holding_days, 1);
    assert_eq!(analysis.sensitivity.time_sensitivity, None);
    assert!(analysis.sensitivity.interest_rate_sensitivity.is_some());
    assert!(analysis.sensitivity.price_sensitivity.is_some());
}

#[test]
fn invalid_holding_period_fails_the_analysis() {
    let mut input = reference_input();
    input.maturity_date = date(2023, 12, 31);
    assert_eq!(
        AnalysisEngine::default().analyze(&input).unwrap_err(),
        AnalyticsError::Calculation(CalculatorError::InvalidHoldingPeriod(-1, 365))
    );
}

#[test]
fn serializes_as_one_flat_camel_case_object() {
    let mut input = reference_input();
    input.leverage_ratio = Some(dec!(3));
    let analysis = AnalysisEngine::default().analyze(&input).unwrap();
    let json = serde_json::to_value(&analysis).unwrap();

    assert_eq!(json["holdingDays"], 91);
    assert_eq!(json["riskLevel"], "HIGH");
    assert_eq!(json["marketCondition"]["condition"], "CONTANGO");
    assert!(json["breakEven"]["breakEvenFuturePrice"].is_string());
    assert!(json["leverage"]["liquidationPrice"].is_string());
    assert!(json["breakdown"].get("depositLoss").is_none());
}
