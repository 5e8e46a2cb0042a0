//! Terminal rendering of evaluations and validation reports.

use analytics::AnalysisResult;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use events::Evaluation;
use rust_decimal::Decimal;
use validator::{ValidationIssue, ValidationReport};

fn money(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

fn percent(value: Decimal) -> String {
    format!("{}%", value.round_dp(4))
}

fn points(value: Option<Decimal>) -> String {
    match value {
        Some(v) if v > Decimal::ZERO => format!("+{} pp", v.round_dp(4)),
        Some(v) => format!("{} pp", v.round_dp(4)),
        None => "n/a".to_string(),
    }
}

fn table(header: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![Cell::new(header), Cell::new("Value")]);
    table
}

/// Renders any evaluation outcome, including its warnings.
pub fn evaluation(evaluation: &Evaluation) -> String {
    let mut out = match evaluation {
        Evaluation::Completed { analysis, .. } => analysis_tables(analysis),
        Evaluation::Rejected { errors, .. } => issues(errors),
        Evaluation::Failed { message, .. } => format!("Calculation failed: {message}"),
    };
    for warning in evaluation.warnings() {
        out.push_str(&format!("\nwarning: {warning}"));
    }
    out
}

/// Renders a validation report on its own.
pub fn validation(report: &ValidationReport) -> String {
    let mut out = if report.is_valid {
        "Input is valid.".to_string()
    } else {
        issues(&report.errors)
    };
    for warning in &report.warnings {
        out.push_str(&format!("\nwarning: {warning}"));
    }
    out
}

fn issues(errors: &[ValidationIssue]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Kind", "Field", "Message"]);
    for issue in errors {
        table.add_row(vec![
            format!("{:?}", issue.kind),
            issue.field.map(|f| f.to_string()).unwrap_or_else(|| "-".to_string()),
            issue.message.clone(),
        ]);
    }
    format!("Input rejected:\n{table}")
}

fn analysis_tables(analysis: &AnalysisResult) -> String {
    let r = &analysis.result;

    let mut summary = table("Result");
    summary.add_row(vec!["Annualized return".to_string(), percent(r.annualized_return)]);
    summary.add_row(vec!["Total return".to_string(), percent(r.total_return)]);
    summary.add_row(vec!["Holding days".to_string(), r.holding_days.to_string()]);
    summary.add_row(vec!["Actual profit".to_string(), money(r.actual_profit)]);
    summary.add_row(vec!["Annualized profit".to_string(), money(r.annualized_profit)]);
    summary.add_row(vec!["Risk level".to_string(), r.risk_level.to_string()]);

    let b = &r.breakdown;
    let mut breakdown = table("Breakdown (unleveraged)");
    breakdown.add_row(vec!["Price difference".to_string(), money(b.price_difference)]);
    breakdown.add_row(vec!["Holding cost".to_string(), money(b.holding_cost)]);
    breakdown.add_row(vec!["Transaction cost".to_string(), money(b.transaction_cost)]);
    if let Some(loss) = b.deposit_loss {
        breakdown.add_row(vec!["Deposit loss".to_string(), money(loss)]);
    }
    if let Some(loss) = b.withdrawal_loss {
        breakdown.add_row(vec!["Withdrawal loss".to_string(), money(loss)]);
    }

    let mut analysis_table = table("Analysis");
    let be = &analysis.break_even;
    let s = &analysis.sensitivity;
    let m = &analysis.market_condition;
    analysis_table.add_row(vec!["Break-even future price".to_string(), money(be.break_even_future_price)]);
    analysis_table.add_row(vec!["Break-even spot price".to_string(), money(be.break_even_spot_price)]);
    analysis_table.add_row(vec!["Rate +1pp".to_string(), points(s.interest_rate_sensitivity)]);
    analysis_table.add_row(vec!["Maturity -1 day".to_string(), points(s.time_sensitivity)]);
    analysis_table.add_row(vec!["Spot +1%".to_string(), points(s.price_sensitivity)]);
    analysis_table.add_row(vec!["Market condition".to_string(), m.condition.to_string()]);
    analysis_table.add_row(vec!["Premium".to_string(), money(m.premium)]);
    analysis_table.add_row(vec!["Premium %".to_string(), percent(m.premium_percent)]);

    let mut out = format!("{summary}\n{breakdown}\n{analysis_table}");

    if let Some(l) = &r.leverage {
        let mut leverage = table("Leverage");
        leverage.add_row(vec!["Leverage ratio".to_string(), l.leverage_ratio.normalize().to_string()]);
        leverage.add_row(vec!["Margin required".to_string(), money(l.margin_required)]);
        leverage.add_row(vec!["Contract value".to_string(), money(l.contract_value)]);
        leverage.add_row(vec!["Liquidation price".to_string(), money(l.liquidation_price)]);
        leverage.add_row(vec!["Leveraged profit".to_string(), money(l.leveraged_profit)]);
        out.push_str(&format!("\n{leverage}"));
    }
    out
}
