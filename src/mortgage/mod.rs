//! Mortgage terms, validation, annuity math, and the amortization schedule.
//!
//! All money amounts are [`Decimal`] and every published figure is rounded
//! half-up to two decimal places. The final scheduled payment settles the
//! exact remaining balance, so the principal parts always sum to the loan
//! principal.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::money::group_thousands;

/// Validation and parsing failures for mortgage input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MortgageError {
    #[error("{0} is empty")]
    EmptyValue(&'static str),
    #[error("{0} is not a valid number")]
    InvalidNumber(&'static str),
    #[error("home price must be greater than 0")]
    HomePriceNotPositive,
    #[error("down payment cannot be negative")]
    DownPaymentNegative,
    #[error("down payment must be less than the home price")]
    DownPaymentTooLarge,
    #[error("loan term must be greater than 0")]
    TermNotPositive,
    #[error("loan term must be a whole number of months (e.g. 15 or 12.5 years)")]
    TermNotWholeMonths,
    #[error("interest rate cannot be negative")]
    RateNegative,
}

/// The four inputs of a mortgage calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MortgageTerms {
    pub home_price: Decimal,
    pub down_payment: Decimal,
    /// Term in years; may be fractional as long as it is a whole number of
    /// months (12.5 years = 150 months).
    pub years: Decimal,
    pub annual_rate_percent: Decimal,
}

/// Headline figures of a calculation, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MortgageSummary {
    pub monthly_payment: Decimal,
    pub total_paid: Decimal,
    pub overpayment: Decimal,
    pub overpayment_percent: Decimal,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRow {
    pub month: u32,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    pub balance: Decimal,
}

/// Parse a user-typed amount: trimmed, grouping spaces stripped, comma
/// accepted as the decimal separator.
///
/// `field` names the input in error messages.
pub fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal, MortgageError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Err(MortgageError::EmptyValue(field));
    }
    cleaned
        .parse::<Decimal>()
        .map_err(|_| MortgageError::InvalidNumber(field))
}

/// Validate terms and compute the summary plus the full schedule.
pub fn calculate(
    terms: &MortgageTerms,
) -> Result<(MortgageSummary, Vec<ScheduleRow>), MortgageError> {
    if terms.home_price <= Decimal::ZERO {
        return Err(MortgageError::HomePriceNotPositive);
    }
    if terms.down_payment < Decimal::ZERO {
        return Err(MortgageError::DownPaymentNegative);
    }
    if terms.down_payment >= terms.home_price {
        return Err(MortgageError::DownPaymentTooLarge);
    }
    if terms.years <= Decimal::ZERO {
        return Err(MortgageError::TermNotPositive);
    }
    if terms.annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::RateNegative);
    }

    let months_exact = terms.years * Decimal::from(12);
    if !months_exact.fract().is_zero() {
        return Err(MortgageError::TermNotWholeMonths);
    }
    let months = months_exact
        .trunc()
        .to_u32()
        .ok_or(MortgageError::TermNotWholeMonths)?;

    let principal = terms.home_price - terms.down_payment;
    let zero_rate = terms.annual_rate_percent.is_zero();

    let (monthly, total_paid) = if zero_rate {
        let monthly = round2(principal / Decimal::from(months));
        (monthly, monthly * Decimal::from(months))
    } else {
        let r = monthly_rate(terms.annual_rate_percent);
        let monthly = match pow_int(Decimal::ONE + r, months) {
            Some(growth) => round2(principal * (r * growth) / (growth - Decimal::ONE)),
            // (1+r)^n exceeded the decimal range; the annuity formula's
            // limit for large n is interest-only.
            None => round2(principal * r),
        };
        (monthly, round2(monthly * Decimal::from(months)))
    };

    let overpayment = round2(total_paid - principal);
    let overpayment_percent = round2(overpayment / principal * Decimal::ONE_HUNDRED);

    let schedule = build_schedule(principal, monthly, months, terms.annual_rate_percent);

    Ok((
        MortgageSummary {
            monthly_payment: monthly,
            total_paid,
            overpayment,
            overpayment_percent,
        },
        schedule,
    ))
}

/// Month-by-month breakdown. The last payment settles the exact balance
/// instead of the rounded annuity amount.
fn build_schedule(
    principal: Decimal,
    monthly: Decimal,
    months: u32,
    annual_rate_percent: Decimal,
) -> Vec<ScheduleRow> {
    let zero_rate = annual_rate_percent.is_zero();
    let r = monthly_rate(annual_rate_percent);

    let mut schedule = Vec::with_capacity(months as usize);
    let mut balance = principal;

    for month in 1..=months {
        let last = month == months;
        let interest = if zero_rate {
            Decimal::ZERO
        } else {
            round2(balance * r)
        };
        let principal_part = if last {
            balance
        } else if zero_rate {
            monthly
        } else {
            round2(monthly - interest)
        };
        let payment = if last {
            round2(interest + principal_part)
        } else {
            monthly
        };

        balance = round2(balance - principal_part);
        if balance < Decimal::ZERO {
            balance = Decimal::ZERO;
        }

        schedule.push(ScheduleRow {
            month,
            payment,
            interest,
            principal: principal_part,
            balance,
        });
    }

    schedule
}

/// Format an amount for display: fixed two decimal places, integer digits
/// grouped by thousands (`1 234 567.89`).
pub fn format_money(amount: Decimal) -> String {
    let fixed = format!("{:.2}", round2(amount));
    match fixed.split_once('.') {
        Some((int_part, frac)) => format!("{}.{frac}", group_thousands(int_part)),
        None => group_thousands(&fixed),
    }
}

/// Round half-up to two decimal places.
fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(12)
}

/// Integer exponentiation by squaring. `None` when the result exceeds the
/// decimal range.
fn pow_int(base: Decimal, mut exp: u32) -> Option<Decimal> {
    let mut acc = Decimal::ONE;
    let mut base = base;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc.checked_mul(base)?;
        }
        exp >>= 1;
        if exp > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn terms(price: &str, down: &str, years: &str, rate: &str) -> MortgageTerms {
        MortgageTerms {
            home_price: dec(price),
            down_payment: dec(down),
            years: dec(years),
            annual_rate_percent: dec(rate),
        }
    }

    // --- parse_amount ---

    #[test]
    fn test_parse_amount_accepts_grouped_and_comma_input() {
        assert_eq!(parse_amount("price", "1 234,56"), Ok(dec("1234.56")));
        assert_eq!(parse_amount("price", "  8 500 000 "), Ok(dec("8500000")));
        assert_eq!(parse_amount("price", "42"), Ok(dec("42")));
    }

    #[test]
    fn test_parse_amount_rejects_empty_and_garbage() {
        assert_eq!(parse_amount("price", ""), Err(MortgageError::EmptyValue("price")));
        assert_eq!(parse_amount("price", "   "), Err(MortgageError::EmptyValue("price")));
        assert_eq!(
            parse_amount("price", "12x"),
            Err(MortgageError::InvalidNumber("price"))
        );
    }

    // --- Validation ---

    #[test]
    fn test_rejects_invalid_terms() {
        assert_eq!(
            calculate(&terms("0", "0", "10", "5")),
            Err(MortgageError::HomePriceNotPositive)
        );
        assert_eq!(
            calculate(&terms("100", "-1", "10", "5")),
            Err(MortgageError::DownPaymentNegative)
        );
        assert_eq!(
            calculate(&terms("100", "100", "10", "5")),
            Err(MortgageError::DownPaymentTooLarge)
        );
        assert_eq!(
            calculate(&terms("100", "0", "0", "5")),
            Err(MortgageError::TermNotPositive)
        );
        assert_eq!(
            calculate(&terms("100", "0", "10", "-1")),
            Err(MortgageError::RateNegative)
        );
        assert_eq!(
            calculate(&terms("100", "0", "0.01", "5")),
            Err(MortgageError::TermNotWholeMonths)
        );
    }

    #[test]
    fn test_accepts_fractional_years_on_month_boundary() {
        // 12.5 years = 150 months
        let (_, schedule) = calculate(&terms("150000", "0", "12.5", "0")).unwrap();
        assert_eq!(schedule.len(), 150);
    }

    // --- Zero-rate (installment) path ---

    #[test]
    fn test_zero_rate_splits_principal_evenly() {
        let (summary, schedule) = calculate(&terms("1500", "300", "1", "0")).unwrap();
        assert_eq!(summary.monthly_payment, dec("100.00"));
        assert_eq!(summary.total_paid, dec("1200.00"));
        assert_eq!(summary.overpayment, dec("0.00"));
        assert_eq!(summary.overpayment_percent, dec("0.00"));

        assert_eq!(schedule.len(), 12);
        assert!(schedule.iter().all(|row| row.interest.is_zero()));
        assert_eq!(schedule[0].payment, dec("100.00"));
        assert_eq!(schedule[0].balance, dec("1100.00"));
        assert_eq!(schedule[11].balance, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_last_payment_settles_rounding_remainder() {
        // 1000 over 3 months: 333.33, 333.33, then the exact 333.34 left.
        let (summary, schedule) = calculate(&terms("1000", "0", "0.25", "0")).unwrap();
        assert_eq!(summary.monthly_payment, dec("333.33"));
        assert_eq!(schedule[0].principal, dec("333.33"));
        assert_eq!(schedule[2].principal, dec("333.34"));
        assert_eq!(schedule[2].balance, Decimal::ZERO);
    }

    // --- Annuity path ---

    #[test]
    fn test_annuity_textbook_case() {
        // 1000 principal, 12% annual, 12 months: the classic 88.85 payment.
        let (summary, schedule) = calculate(&terms("1000", "0", "1", "12")).unwrap();
        assert_eq!(summary.monthly_payment, dec("88.85"));
        assert_eq!(summary.total_paid, dec("1066.20"));
        assert_eq!(summary.overpayment, dec("66.20"));
        assert_eq!(summary.overpayment_percent, dec("6.62"));

        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].interest, dec("10.00"));
        assert_eq!(schedule[0].principal, dec("78.85"));
        assert_eq!(schedule[0].balance, dec("921.15"));
    }

    #[test]
    fn test_schedule_principal_parts_sum_to_principal() {
        let (_, schedule) = calculate(&terms("5000000", "1000000", "20", "10")).unwrap();
        let paid: Decimal = schedule.iter().map(|row| row.principal).sum();
        assert_eq!(paid, dec("4000000"));
        assert_eq!(schedule.last().unwrap().balance, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_balance_is_monotonically_decreasing() {
        let (_, schedule) = calculate(&terms("300000", "60000", "15", "6.5")).unwrap();
        let mut prev = dec("240000");
        for row in &schedule {
            assert!(row.balance < prev, "month {} did not reduce balance", row.month);
            prev = row.balance;
        }
    }

    // --- Display formatting ---

    #[test]
    fn test_format_money_groups_and_pads() {
        assert_eq!(format_money(dec("1234567.89")), "1 234 567.89");
        assert_eq!(format_money(dec("5")), "5.00");
        assert_eq!(format_money(dec("0.5")), "0.50");
        assert_eq!(format_money(dec("999.999")), "1 000.00");
    }

    // --- pow_int ---

    #[test]
    fn test_pow_int_small_cases() {
        assert_eq!(pow_int(dec("1.01"), 0), Some(Decimal::ONE));
        assert_eq!(pow_int(dec("1.01"), 1), Some(dec("1.01")));
        assert_eq!(pow_int(dec("1.01"), 2), Some(dec("1.0201")));
        assert_eq!(pow_int(dec("2"), 10), Some(dec("1024")));
    }

    #[test]
    fn test_pow_int_overflow_is_none() {
        assert_eq!(pow_int(dec("10"), 40), None);
    }
}
