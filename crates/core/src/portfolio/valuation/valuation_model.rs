use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio-wide totals.
///
/// Derived from holdings and quotes; never mutated on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    /// Sum of the value of every priced holding, in USD
    #[serde(rename = "totalValueUSD")]
    pub total_value_usd: Decimal,
    /// Sum of every priced holding's 24h change, in USD
    #[serde(rename = "dailyChangeUSD")]
    pub daily_change_usd: Decimal,
    /// Monetary 24h change relative to yesterday's value, in percent
    pub daily_change_percent: Decimal,
}

impl PortfolioSnapshot {
    pub fn zero() -> Self {
        Self {
            total_value_usd: Decimal::ZERO,
            daily_change_usd: Decimal::ZERO,
            daily_change_percent: Decimal::ZERO,
        }
    }

    pub fn is_up(&self) -> bool {
        self.daily_change_percent >= Decimal::ZERO
    }
}

impl Default for PortfolioSnapshot {
    fn default() -> Self {
        Self::zero()
    }
}

/// How one holding was valued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum HoldingValuationStatus {
    #[serde(rename_all = "camelCase")]
    Priced {
        #[serde(rename = "priceUSD")]
        price_usd: Decimal,
        #[serde(rename = "valueUSD")]
        value_usd: Decimal,
        #[serde(rename = "dailyChangeUSD")]
        daily_change_usd: Decimal,
        daily_change_percent: Decimal,
    },
    /// No quote for the symbol; contributes nothing to the totals.
    PriceUnavailable,
}

/// Per-holding line of a portfolio valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub holding_id: String,
    pub token_symbol: String,
    pub quantity: Decimal,
    #[serde(flatten)]
    pub status: HoldingValuationStatus,
}

impl HoldingValuation {
    pub fn is_price_unavailable(&self) -> bool {
        matches!(self.status, HoldingValuationStatus::PriceUnavailable)
    }

    /// Value in USD; zero when the price is unavailable.
    pub fn value_usd(&self) -> Decimal {
        match &self.status {
            HoldingValuationStatus::Priced { value_usd, .. } => *value_usd,
            HoldingValuationStatus::PriceUnavailable => Decimal::ZERO,
        }
    }
}

/// The summary handed to the presentation layer: totals plus one line per
/// holding, in holdings order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioValuation {
    pub snapshot: PortfolioSnapshot,
    pub holdings: Vec<HoldingValuation>,
}

impl PortfolioValuation {
    /// Holdings flagged "price unavailable".
    pub fn unpriced(&self) -> impl Iterator<Item = &HoldingValuation> {
        self.holdings.iter().filter(|h| h.is_price_unavailable())
    }
}
