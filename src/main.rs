//! Amort - a terminal mortgage calculator with live-formatted money inputs.
//!
//! # Usage
//!
//! ```bash
//! amort
//! amort --price 8500000 --down 1500000 --years 20 --rate 10.5
//! amort --installment --price 1500000 --down 300000 --years 2 --export plan.csv
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use amort::app::App;
use amort::export::write_schedule_csv;
use amort::mortgage::{MortgageTerms, calculate, format_money, parse_amount};

/// A terminal mortgage calculator with live-formatted money inputs
#[derive(Parser, Debug)]
#[command(name = "amort", version, about, long_about = None)]
struct Cli {
    /// Pre-fill the home price
    #[arg(long, value_name = "AMOUNT")]
    price: Option<String>,

    /// Pre-fill the down payment
    #[arg(long, value_name = "AMOUNT")]
    down: Option<String>,

    /// Pre-fill the loan term in years
    #[arg(long, value_name = "YEARS")]
    years: Option<String>,

    /// Pre-fill the annual interest rate in percent
    #[arg(long, value_name = "PERCENT")]
    rate: Option<String>,

    /// Installment mode: zero interest, rate field disabled
    #[arg(long)]
    installment: bool,

    /// Write the amortization schedule to this CSV file.
    /// With all terms supplied on the command line, exports without
    /// starting the interactive UI.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
}

impl Cli {
    /// Terms parsed entirely from command-line flags, if all are present.
    fn headless_terms(&self) -> Option<Result<MortgageTerms>> {
        let price = self.price.as_deref()?;
        let down = self.down.as_deref()?;
        let years = self.years.as_deref()?;
        let rate = if self.installment {
            "0"
        } else {
            self.rate.as_deref()?
        };
        Some(parse_terms(price, down, years, rate))
    }
}

fn parse_terms(price: &str, down: &str, years: &str, rate: &str) -> Result<MortgageTerms> {
    Ok(MortgageTerms {
        home_price: parse_amount("home price", price)?,
        down_payment: parse_amount("down payment", down)?,
        years: parse_amount("loan term", years)?,
        annual_rate_percent: parse_amount("interest rate", rate)?,
    })
}

/// Compute and export without entering the TUI.
fn run_headless(terms: &MortgageTerms, path: &PathBuf) -> Result<()> {
    let (summary, schedule) = calculate(terms)?;
    write_schedule_csv(path, Some(terms), Some(&summary), &schedule)
        .with_context(|| format!("Failed to export {}", path.display()))?;
    println!(
        "Monthly payment {}  total {}  overpayment {} ({}%)",
        format_money(summary.monthly_payment),
        format_money(summary.total_paid),
        format_money(summary.overpayment),
        summary.overpayment_percent,
    );
    println!("Schedule written to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Some(path) = &cli.export
        && let Some(terms) = cli.headless_terms()
    {
        return run_headless(&terms?, path);
    }

    let mut app = App::new()
        .with_price(cli.price)
        .with_down_payment(cli.down)
        .with_years(cli.years)
        .with_rate(cli.rate)
        .with_installment(cli.installment);
    if let Some(path) = cli.export {
        app = app.with_export_path(path);
    }

    app.run().context("Application error")
}
