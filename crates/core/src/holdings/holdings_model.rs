use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use minifolio_market_data::normalize_symbol;

/// A quantity of one token held by the user.
///
/// The id is opaque and stable: edits change the quantity in place and keep
/// both id and symbol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    /// Upper-case token symbol
    pub token_symbol: String,
    /// Always strictly positive. Written as an exact JSON number; token
    /// balances carry more digits than an `f64` holds.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub quantity: Decimal,
}

impl Holding {
    /// Create a holding with a fresh id. Inputs are assumed to be validated.
    pub fn new(token_symbol: &str, quantity: Decimal) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            token_symbol: normalize_symbol(token_symbol),
            quantity,
        }
    }

    /// Create a holding with a caller-chosen id (e.g. a token contract address).
    pub fn with_id(id: impl Into<String>, token_symbol: &str, quantity: Decimal) -> Self {
        Self {
            id: id.into(),
            token_symbol: normalize_symbol(token_symbol),
            quantity,
        }
    }
}

/// The document written to durable storage after every holdings mutation.
///
/// Wire shape: `{"holdings": [{"id", "tokenSymbol", "quantity"}], "lastUpdated": <epoch ms>}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedPortfolio {
    pub holdings: Vec<Holding>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_holding_normalizes_symbol_and_assigns_id() {
        let a = Holding::new(" eth", dec!(2));
        let b = Holding::new("ETH", dec!(2));
        assert_eq!(a.token_symbol, "ETH");
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_persisted_portfolio_wire_format() {
        let portfolio = PersistedPortfolio {
            holdings: vec![Holding::with_id("h1", "ETH", dec!(2.5))],
            last_updated: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
            wallet_address: None,
            fid: None,
        };

        let json = serde_json::to_value(&portfolio).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "holdings": [{"id": "h1", "tokenSymbol": "ETH", "quantity": 2.5}],
                "lastUpdated": 1_700_000_000_123i64
            })
        );
    }

    #[test]
    fn test_persisted_portfolio_accepts_extra_fields() {
        let json = r#"{
            "fid": "1234",
            "walletAddress": "0xabc",
            "holdings": [{"id": "1", "tokenSymbol": "BTC", "quantity": 0.5}],
            "lastUpdated": 1700000000000
        }"#;
        let portfolio: PersistedPortfolio = serde_json::from_str(json).unwrap();
        assert_eq!(portfolio.holdings.len(), 1);
        assert_eq!(portfolio.holdings[0].quantity, dec!(0.5));
        assert_eq!(portfolio.wallet_address.as_deref(), Some("0xabc"));
        assert_eq!(portfolio.fid.as_deref(), Some("1234"));
    }
}
