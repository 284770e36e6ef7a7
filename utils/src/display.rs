//! Amount formatting helpers.

use agc_types::{CreditAmount, CREDIT_UNIT};

/// Format a credit amount as whole credits with a fractional part.
///
/// Trailing zeros in the fraction are trimmed; whole amounts print without
/// a decimal point.
pub fn format_credits(amount: CreditAmount) -> String {
    let raw = amount.raw();
    let whole = raw / CREDIT_UNIT;
    let frac = raw % CREDIT_UNIT;
    if frac == 0 {
        return format!("{whole} AGC");
    }
    let digits = CREDIT_UNIT.ilog10() as usize;
    let frac_str = format!("{frac:0>width$}", width = digits);
    format!("{whole}.{} AGC", frac_str.trim_end_matches('0'))
}
