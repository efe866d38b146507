//! Display strings derived from a portfolio snapshot.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::portfolio::valuation::PortfolioSnapshot;

/// The "share performance" text for a snapshot.
///
/// A flat day reads as "up".
pub fn share_message(snapshot: &PortfolioSnapshot) -> String {
    let direction = if snapshot.is_up() { "up" } else { "down" };
    format!(
        "My Minifolio is {} {}% today! 📈",
        direction,
        fixed(snapshot.daily_change_percent.abs())
    )
}

/// `$1,234.56`, or `-$1,234.56` for negative amounts.
pub fn format_usd(value: Decimal) -> String {
    let rounded = fixed(value.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let sign = if value.is_sign_negative() && rounded != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{}${}.{}", sign, group_thousands(whole), fraction)
}

/// Signed percentage with two decimals, e.g. `+10.00%` or `-2.35%`.
pub fn format_percent_change(percent: Decimal) -> String {
    let sign = if percent >= Decimal::ZERO { "+" } else { "-" };
    format!("{}{}%", sign, fixed(percent.abs()))
}

fn fixed(value: Decimal) -> String {
    let precision = DISPLAY_DECIMAL_PRECISION;
    let mut rounded =
        value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(precision);
    rounded.to_string()
}

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
