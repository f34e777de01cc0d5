//! USD formatting
//!
//! Two display conventions are used on the dashboard: fixed two-decimal amounts
//! for balances and transactions, and grouped amounts for spending totals and
//! chart ticks.

use rust_decimal::Decimal;

/// Convert a float amount to cents precision. Non-finite values become zero.
pub fn to_cents(amount: f64) -> Decimal {
    Decimal::from_f64_retain(amount)
        .unwrap_or_default()
        .round_dp(2)
}

/// `$1234.50`, `-$300.00`. Callers wanting an unsigned figure pass `abs()`.
pub fn usd_fixed(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}${:.2}", sign, amount.abs())
}

/// `$13,500`, `$2,450.5`, `-$1,200`. At most two fraction digits, trailing
/// zeros dropped.
pub fn usd_grouped(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let grouped = format_num::format_num!(",.2", amount.abs());
    let grouped = grouped.trim_end_matches('0').trim_end_matches('.');
    format!("{}${}", sign, grouped)
}
