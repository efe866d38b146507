//! Property-based tests for portfolio valuation and holdings persistence.

use std::sync::Arc;

use minifolio_core::holdings::HoldingsStore;
use minifolio_core::portfolio::valuation::recompute;
use minifolio_core::storage::MemoryStore;
use minifolio_core::Holding;
use minifolio_market_data::{PriceQuote, QuoteMap};
use proptest::prelude::*;
use rust_decimal::Decimal;

const SYMBOLS: [&str; 6] = ["ETH", "BTC", "SOL", "USDC", "DEGEN", "PEPE"];

// =============================================================================
// Generators
// =============================================================================

/// Positive quantities with up to 20 significant digits and 18 decimals, as
/// discovered ERC-20 balances produce.
fn arb_quantity() -> impl Strategy<Value = Decimal> {
    (1i128..100_000_000_000_000_000_000, 0u32..=18)
        .prop_map(|(mantissa, scale)| Decimal::from_i128_with_scale(mantissa, scale))
}

fn arb_price() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|n| Decimal::new(n, 2))
}

fn arb_change_percent() -> impl Strategy<Value = Decimal> {
    (-9_900i64..50_000).prop_map(|n| Decimal::new(n, 2))
}

fn arb_holdings() -> impl Strategy<Value = Vec<Holding>> {
    prop::collection::vec(
        (prop::sample::select(SYMBOLS.to_vec()), arb_quantity()),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (symbol, quantity))| Holding::with_id(format!("h{i}"), symbol, quantity))
            .collect()
    })
}

/// Quotes for a random subset of the symbol universe.
fn arb_quotes() -> impl Strategy<Value = QuoteMap> {
    prop::collection::vec(
        (
            prop::sample::select(SYMBOLS.to_vec()),
            arb_price(),
            arb_change_percent(),
        ),
        0..SYMBOLS.len(),
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(symbol, price, pct)| {
                (
                    symbol.to_string(),
                    PriceQuote::new(symbol, price, pct, "MANUAL"),
                )
            })
            .collect()
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_total_is_sum_of_priced_holdings(holdings in arb_holdings(), quotes in arb_quotes()) {
        let valuation = recompute(&holdings, &quotes);

        let expected: Decimal = holdings
            .iter()
            .filter_map(|h| quotes.get(&h.token_symbol).map(|q| h.quantity * q.current_price_usd))
            .sum();
        prop_assert_eq!(valuation.snapshot.total_value_usd, expected);
    }

    #[test]
    fn prop_unpriced_holdings_are_flagged(holdings in arb_holdings(), quotes in arb_quotes()) {
        let valuation = recompute(&holdings, &quotes);

        prop_assert_eq!(valuation.holdings.len(), holdings.len());
        for (line, holding) in valuation.holdings.iter().zip(&holdings) {
            prop_assert_eq!(&line.holding_id, &holding.id);
            prop_assert_eq!(
                line.is_price_unavailable(),
                !quotes.contains_key(&holding.token_symbol)
            );
        }
    }

    #[test]
    fn prop_recompute_is_idempotent(holdings in arb_holdings(), quotes in arb_quotes()) {
        prop_assert_eq!(recompute(&holdings, &quotes), recompute(&holdings, &quotes));
    }

    #[test]
    fn prop_single_asset_recovers_its_change(
        quantity in arb_quantity(),
        price in (100i64..10_000_000).prop_map(|n| Decimal::new(n, 2)),
        pct in arb_change_percent(),
    ) {
        let holdings = vec![Holding::with_id("h0", "ETH", quantity)];
        let mut quotes = QuoteMap::new();
        quotes.insert("ETH".to_string(), PriceQuote::new("ETH", price, pct, "MANUAL"));

        let snapshot = recompute(&holdings, &quotes).snapshot;

        let error = (snapshot.daily_change_percent - pct).abs();
        prop_assert!(
            error < Decimal::new(1, 6),
            "got {} for {}",
            snapshot.daily_change_percent,
            pct
        );
    }

    #[test]
    fn prop_persistence_round_trips(rows in prop::collection::vec(
        (prop::sample::select(SYMBOLS.to_vec()), arb_quantity()),
        0..10,
    )) {
        let storage = Arc::new(MemoryStore::new());
        let mut store = HoldingsStore::new(storage.clone());
        for (symbol, quantity) in &rows {
            store.add(symbol, *quantity).unwrap();
        }

        let reloaded = HoldingsStore::load(storage);

        prop_assert_eq!(reloaded.holdings(), store.holdings());
    }
}
