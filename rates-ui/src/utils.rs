use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// commas (thousands separator) and a leading dollar sign.
fn normalize_decimal_input(s: &str) -> String {
    s.trim().trim_start_matches('$').replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Error returned by [`parse_income`].
#[derive(Debug, Error)]
pub enum ParseIncomeError {
    #[error(transparent)]
    Invalid(#[from] ParseDecimalError),

    #[error("income cannot be negative: {0}")]
    Negative(Decimal),
}

/// Like [`parse_decimal`], but rejects negative amounts.
pub fn parse_income(s: &str) -> Result<Decimal, ParseIncomeError> {
    let income = parse_decimal(s)?;
    if income < Decimal::ZERO {
        return Err(ParseIncomeError::Negative(income));
    }
    Ok(income)
}

/// Parses a string into an optional [`Decimal`].
///
/// Returns `None` for empty input or anything that does not parse; backend
/// display strings are allowed to be non-numeric, so no warning is logged.
pub fn parse_optional_decimal(s: &str) -> Option<Decimal> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        None
    } else {
        normalized.parse().ok()
    }
}

/// Inserts a comma every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `$12,345` for whole amounts, `$12,345.60` otherwise.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let cents = ((abs - whole) * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);
    let grouped = group_thousands(&whole.to_u128().unwrap_or(0).to_string());

    if cents == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{cents:02}")
    }
}

/// Shows a backend amount string as currency when it is numeric, verbatim
/// otherwise.
pub fn format_amount_text(s: &str) -> String {
    match parse_optional_decimal(s) {
        Some(amount) => format_currency(amount),
        None => s.to_string(),
    }
}

/// Shows a backend rate string with a percent sign, adding one to bare
/// numbers.
pub fn format_rate_text(s: &str) -> String {
    let trimmed = s.trim();
    if !trimmed.ends_with('%') && parse_optional_decimal(trimmed).is_some() {
        format!("{trimmed}%")
    } else {
        trimmed.to_string()
    }
}

/// Value-axis formatter for rate series: `37` becomes `37%`.
pub fn format_percent(value: f64) -> String {
    format!("{value}%")
}
