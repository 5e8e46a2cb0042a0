//! The `watch` command: an edit-driven recalculation loop on stdin.

use crate::render;
use engine::{Pipeline, Recalculator};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use validator::{Field, RawInput};

/// Applies `field=value` lines from stdin to the form and prints every
/// surfaced outcome until stdin closes.
pub async fn run(
    pipeline: Pipeline,
    mut form: RawInput,
    debounce_ms: u64,
    json: bool,
) -> anyhow::Result<()> {
    let recalculator = Recalculator::spawn(pipeline, Duration::from_millis(debounce_ms));
    let mut outcomes = recalculator.subscribe();

    let printer = tokio::spawn(async move {
        while outcomes.changed().await.is_ok() {
            let Some(outcome) = outcomes.borrow_and_update().clone() else {
                continue;
            };
            if json {
                match outcome.to_json() {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::error!(error = %e, "Failed to serialize outcome."),
                }
            } else {
                println!("--- #{} ---", outcome.sequence);
                println!("{}", render::evaluation(&outcome.evaluation));
            }
        }
    });

    if Field::ALL.iter().any(|f| form.is_provided(*f)) {
        recalculator.submit(form.clone());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_edit(line) {
            Ok((field, value)) => {
                form.set(field, value);
                recalculator.submit(form.clone());
            }
            Err(message) => eprintln!("{message}"),
        }
    }

    recalculator.shutdown().await?;
    printer.await?;
    Ok(())
}

fn parse_edit(line: &str) -> Result<(Field, &str), String> {
    let Some((key, value)) = line.split_once('=') else {
        return Err(format!("expected field=value, got `{line}`"));
    };
    let field = key.parse::<Field>().map_err(|e| e.to_string())?;
    Ok((field, value.trim()))
}
