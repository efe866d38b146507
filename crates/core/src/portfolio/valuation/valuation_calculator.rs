use log::warn;
use rust_decimal::Decimal;

use crate::holdings::Holding;
use crate::portfolio::valuation::{
    HoldingValuation, HoldingValuationStatus, PortfolioSnapshot, PortfolioValuation,
};
use minifolio_market_data::{normalize_symbol, PriceQuote, QuoteMap};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Values every holding against the latest quotes and sums the totals.
///
/// Pure and deterministic: identical inputs give identical output.
///
/// The portfolio daily change is monetary: each priced holding contributes
/// `value - value / (1 + pct / 100)` dollars, and the portfolio percentage is
/// the summed dollar change over yesterday's total value. Percentages are
/// never averaged, so a single-asset portfolio reports exactly its asset's
/// 24h change.
///
/// Holdings without a quote, or whose value would overflow the running total,
/// contribute zero and come back flagged
/// [`HoldingValuationStatus::PriceUnavailable`].
pub fn recompute(holdings: &[Holding], quotes: &QuoteMap) -> PortfolioValuation {
    let mut total_value = Decimal::ZERO;
    let mut total_change = Decimal::ZERO;

    let lines: Vec<HoldingValuation> = holdings
        .iter()
        .map(|holding| {
            let mut status = quotes
                .get(&normalize_symbol(&holding.token_symbol))
                .and_then(|quote| value_holding(holding, quote))
                .unwrap_or(HoldingValuationStatus::PriceUnavailable);

            if let HoldingValuationStatus::Priced {
                value_usd,
                daily_change_usd,
                ..
            } = &status
            {
                match (
                    total_value.checked_add(*value_usd),
                    total_change.checked_add(*daily_change_usd),
                ) {
                    (Some(value), Some(change)) => {
                        total_value = value;
                        total_change = change;
                    }
                    _ => {
                        warn!(
                            "Portfolio total overflows at holding {}, marking it unpriced",
                            holding.id
                        );
                        status = HoldingValuationStatus::PriceUnavailable;
                    }
                }
            }

            HoldingValuation {
                holding_id: holding.id.clone(),
                token_symbol: holding.token_symbol.clone(),
                quantity: holding.quantity,
                status,
            }
        })
        .collect();

    PortfolioValuation {
        snapshot: PortfolioSnapshot {
            total_value_usd: total_value,
            daily_change_usd: total_change,
            daily_change_percent: portfolio_change_percent(total_value, total_change),
        },
        holdings: lines,
    }
}

/// Dollar change of a position that is worth `value` now after moving
/// `change_percent` over the day.
///
/// A move of -100% or worse has no meaningful previous value; it counts as
/// no change.
pub fn daily_change_usd(value: Decimal, change_percent: Decimal) -> Decimal {
    let factor = Decimal::ONE + change_percent / HUNDRED;
    if factor <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match value.checked_div(factor) {
        Some(previous_value) => value - previous_value,
        None => Decimal::ZERO,
    }
}

/// `change / (total - change) * 100`, or zero when yesterday's value is zero
/// or out of range.
pub fn portfolio_change_percent(total_value: Decimal, total_change: Decimal) -> Decimal {
    let previous_total = match total_value.checked_sub(total_change) {
        Some(previous_total) if !previous_total.is_zero() => previous_total,
        _ => return Decimal::ZERO,
    };
    total_change
        .checked_div(previous_total)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

fn value_holding(holding: &Holding, quote: &PriceQuote) -> Option<HoldingValuationStatus> {
    let Some(value) = holding.quantity.checked_mul(quote.current_price_usd) else {
        warn!(
            "Value of holding {} ({} x {}) overflows, treating price as unavailable",
            holding.id, holding.quantity, quote.current_price_usd
        );
        return None;
    };

    Some(HoldingValuationStatus::Priced {
        price_usd: quote.current_price_usd,
        value_usd: value,
        daily_change_usd: daily_change_usd(value, quote.daily_change_percent),
        daily_change_percent: quote.daily_change_percent,
    })
}
