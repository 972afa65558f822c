//! CSV export of the amortization schedule.
//!
//! The file starts with a key/value preamble (terms and summary figures),
//! then a blank line, then the month-by-month table. Amounts are written as
//! plain decimals so the file loads cleanly into a spreadsheet.

use std::path::Path;

use anyhow::{Context, Result};

use crate::mortgage::{MortgageSummary, MortgageTerms, ScheduleRow};

/// Write the schedule (and, when available, terms and summary) to `path`.
pub fn write_schedule_csv(
    path: &Path,
    terms: Option<&MortgageTerms>,
    summary: Option<&MortgageSummary>,
    schedule: &[ScheduleRow],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    if let Some(terms) = terms {
        writer.write_record(["home price", terms.home_price.to_string().as_str()])?;
        writer.write_record(["down payment", terms.down_payment.to_string().as_str()])?;
        writer.write_record(["term, years", terms.years.to_string().as_str()])?;
        writer.write_record(["rate, % annual", terms.annual_rate_percent.to_string().as_str()])?;
    }
    if let Some(summary) = summary {
        writer.write_record(["monthly payment", summary.monthly_payment.to_string().as_str()])?;
        writer.write_record(["total paid", summary.total_paid.to_string().as_str()])?;
        writer.write_record(["overpayment", summary.overpayment.to_string().as_str()])?;
        writer.write_record([
            "overpayment, %",
            summary.overpayment_percent.to_string().as_str(),
        ])?;
    }
    if terms.is_some() || summary.is_some() {
        writer.write_record([""])?;
    }

    writer.write_record(["month", "payment", "interest", "principal", "balance"])?;
    for row in schedule {
        writer.write_record([
            row.month.to_string(),
            row.payment.to_string(),
            row.interest.to_string(),
            row.principal.to_string(),
            row.balance.to_string(),
        ])?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))
}
