use clap::{Args, Parser, Subcommand};
use engine::Pipeline;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use validator::RawInput;

mod render;
mod watch;

/// The main entry point for the carry arbitrage calculator.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // CARRY_* overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let settings = configuration::load_config(cli.config.as_deref())?;
    let pipeline = Pipeline::from_settings(&settings);

    let success = match cli.command {
        Commands::Calc(args) => handle_calc(&pipeline, args),
        Commands::Validate(args) => handle_validate(&pipeline, args),
        Commands::Watch(args) => {
            let debounce = args.debounce_ms.unwrap_or(settings.recalc.debounce_ms);
            watch::run(pipeline, args.form.into(), debounce, args.json).await?;
            true
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Annualized return of a cash-and-carry (spot-futures) arbitrage position.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to ./carry.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the inputs and, if they pass, run the full analysis.
    Calc(CalcArgs),
    /// Only validate the inputs and list errors and warnings.
    Validate(FormArgs),
    /// Read `field=value` edits from stdin and recalculate as they arrive.
    Watch(WatchArgs),
}

/// The calculation form. Values are taken verbatim and parsed by the validator,
/// so malformed values are reported rather than rejected by the CLI parser.
#[derive(Args, Debug, Default)]
struct FormArgs {
    /// Futures price.
    #[arg(long)]
    future_price: Option<String>,
    /// Spot price.
    #[arg(long)]
    spot_price: Option<String>,
    /// Trade date (YYYY-MM-DD).
    #[arg(long)]
    current_date: Option<String>,
    /// Futures maturity date (YYYY-MM-DD).
    #[arg(long)]
    maturity_date: Option<String>,
    /// Annual financing rate in percent.
    #[arg(long, visible_alias = "rate")]
    interest_rate: Option<String>,
    /// Fee per leg in percent.
    #[arg(long, visible_alias = "fee")]
    fee_rate: Option<String>,
    /// Capital committed to the position.
    #[arg(long)]
    amount: Option<String>,
    /// Loss on depositing funds, in percent.
    #[arg(long)]
    deposit_loss: Option<String>,
    /// Loss on withdrawing funds, in percent.
    #[arg(long)]
    withdrawal_loss: Option<String>,
    /// Leverage ratio.
    #[arg(long)]
    leverage: Option<String>,
}

impl From<FormArgs> for RawInput {
    fn from(args: FormArgs) -> Self {
        RawInput {
            future_price: args.future_price.unwrap_or_default(),
            spot_price: args.spot_price.unwrap_or_default(),
            current_date: args.current_date.unwrap_or_default(),
            maturity_date: args.maturity_date.unwrap_or_default(),
            annual_interest_rate: args.interest_rate.unwrap_or_default(),
            transaction_fee_rate: args.fee_rate.unwrap_or_default(),
            investment_amount: args.amount.unwrap_or_default(),
            deposit_loss_rate: args.deposit_loss.unwrap_or_default(),
            withdrawal_loss_rate: args.withdrawal_loss.unwrap_or_default(),
            leverage_ratio: args.leverage.unwrap_or_default(),
        }
    }
}

#[derive(Args)]
struct CalcArgs {
    #[command(flatten)]
    form: FormArgs,
    /// Print the outcome as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct WatchArgs {
    /// Initial values of the form.
    #[command(flatten)]
    form: FormArgs,
    /// Quiet period before recalculating (overrides the settings file).
    #[arg(long)]
    debounce_ms: Option<u64>,
    /// Print each outcome as one JSON line.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_calc(pipeline: &Pipeline, args: CalcArgs) -> bool {
    let raw: RawInput = args.form.into();
    let evaluation = pipeline.evaluate_raw(&raw);

    if args.json {
        match serde_json::to_string_pretty(&evaluation) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize the outcome: {e}");
                return false;
            }
        }
    } else {
        println!("{}", render::evaluation(&evaluation));
    }
    evaluation.is_completed()
}

fn handle_validate(pipeline: &Pipeline, args: FormArgs) -> bool {
    let raw: RawInput = args.into();
    let (report, _) = pipeline.validator().validate_raw(&raw);
    println!("{}", render::validation(&report));
    report.is_valid
}
