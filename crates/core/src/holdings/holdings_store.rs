use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use rust_decimal::Decimal;

use super::holdings_input::{validate_quantity, validate_symbol};
use super::holdings_model::{Holding, PersistedPortfolio};
use crate::constants::PORTFOLIO_STORAGE_KEY;
use crate::errors::{Result, StorageError};
use crate::storage::KeyValueStore;
use minifolio_market_data::normalize_symbol;

/// What a bulk replacement changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsDiff {
    /// Inserted, or existing with a new quantity
    pub upserted: Vec<Holding>,
    pub removed: Vec<Holding>,
}

impl HoldingsDiff {
    pub fn is_empty(&self) -> bool {
        self.upserted.is_empty() && self.removed.is_empty()
    }

    /// Ids of every holding touched, upserted first.
    pub fn ids(&self) -> Vec<String> {
        self.upserted
            .iter()
            .chain(&self.removed)
            .map(|h| h.id.clone())
            .collect()
    }
}

/// The user's holdings, kept in sync with durable storage.
///
/// Every successful mutation writes the full holdings list plus a fresh
/// `lastUpdated` timestamp before returning. A failed write is logged and the
/// in-memory change stands.
pub struct HoldingsStore {
    storage: Arc<dyn KeyValueStore>,
    holdings: Vec<Holding>,
    last_updated: Option<DateTime<Utc>>,
    wallet_address: Option<String>,
    fid: Option<String>,
}

impl HoldingsStore {
    /// An empty store that has not read anything from `storage`.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            holdings: Vec::new(),
            last_updated: None,
            wallet_address: None,
            fid: None,
        }
    }

    /// Read the persisted portfolio.
    ///
    /// Fails soft: absent, unreadable or schema-mismatched data yields an
    /// empty store. Individual rows that could never have passed input
    /// validation are dropped.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self::new(storage);

        let raw = match store.storage.get(PORTFOLIO_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted portfolio found, starting empty");
                return store;
            }
            Err(e) => {
                warn!("Failed to read persisted portfolio, starting empty: {}", e);
                return store;
            }
        };

        let persisted: PersistedPortfolio = match serde_json::from_str(&raw) {
            Ok(persisted) => persisted,
            Err(e) => {
                let error = StorageError::Corrupt {
                    key: PORTFOLIO_STORAGE_KEY.to_string(),
                    message: e.to_string(),
                };
                warn!("{}, starting empty", error);
                return store;
            }
        };

        let mut seen_ids = HashSet::new();
        store.holdings = persisted
            .holdings
            .into_iter()
            .filter_map(|mut holding| {
                holding.token_symbol = normalize_symbol(&holding.token_symbol);
                if holding.token_symbol.is_empty() || holding.quantity <= Decimal::ZERO {
                    warn!("Dropping invalid persisted holding {}", holding.id);
                    return None;
                }
                if !seen_ids.insert(holding.id.clone()) {
                    warn!("Dropping duplicate persisted holding {}", holding.id);
                    return None;
                }
                Some(holding)
            })
            .collect();
        store.last_updated = Some(persisted.last_updated);
        store.wallet_address = persisted.wallet_address;
        store.fid = persisted.fid;

        info!("Loaded {} holdings from storage", store.holdings.len());
        store
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn get(&self, id: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.id == id)
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Distinct symbols across all holdings, sorted.
    pub fn symbols(&self) -> Vec<String> {
        self.holdings
            .iter()
            .map(|h| h.token_symbol.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Timestamp of the last successful mutation, or of the loaded document.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    /// Append a new holding and persist.
    ///
    /// Fails with a validation error (and leaves the store untouched) if the
    /// symbol is empty or the quantity is not strictly positive.
    pub fn add(&mut self, symbol: &str, quantity: Decimal) -> Result<Holding> {
        let symbol = validate_symbol(symbol)?;
        let quantity = validate_quantity(quantity)?;

        let holding = Holding::new(&symbol, quantity);
        debug!("Adding holding {} ({} {})", holding.id, quantity, symbol);
        self.holdings.push(holding.clone());
        self.persist();
        Ok(holding)
    }

    /// Remove the holding with `id`.
    ///
    /// Returns the removed holding. An unknown id is a no-op: nothing changes
    /// and nothing is written.
    pub fn remove(&mut self, id: &str) -> Option<Holding> {
        let index = self.holdings.iter().position(|h| h.id == id)?;
        let removed = self.holdings.remove(index);
        debug!("Removed holding {} ({})", removed.id, removed.token_symbol);
        self.persist();
        Some(removed)
    }

    /// Replace the quantity of the holding with `id`, keeping id and symbol.
    ///
    /// Returns `Ok(None)` when no holding has that id; the store is unchanged
    /// and nothing is written.
    pub fn update(&mut self, id: &str, quantity: Decimal) -> Result<Option<Holding>> {
        let quantity = validate_quantity(quantity)?;

        let Some(holding) = self.holdings.iter_mut().find(|h| h.id == id) else {
            debug!("Update for unknown holding {} ignored", id);
            return Ok(None);
        };
        holding.quantity = quantity;
        let updated = holding.clone();
        self.persist();
        Ok(Some(updated))
    }

    /// Insert each holding, or overwrite the quantity of the existing holding
    /// with the same id. Persists once.
    ///
    /// Rows that fail validation are skipped. Returns the holdings that were
    /// inserted or changed.
    pub fn upsert_all(&mut self, incoming: Vec<Holding>) -> Vec<Holding> {
        let changed = self.merge(incoming);
        if !changed.is_empty() {
            debug!("Upserted {} holdings", changed.len());
            self.persist();
        }
        changed
    }

    /// Make the holdings selected by `is_owned` match `incoming` exactly.
    ///
    /// Rows of `incoming` are upserted as in [`upsert_all`](Self::upsert_all);
    /// owned holdings that `incoming` no longer contains are removed. Holdings
    /// outside `is_owned` are never touched. Persists once if anything changed.
    pub fn replace_owned(
        &mut self,
        incoming: Vec<Holding>,
        is_owned: impl Fn(&str) -> bool,
    ) -> HoldingsDiff {
        let keep: HashSet<String> = incoming.iter().map(|h| h.id.clone()).collect();
        let upserted = self.merge(incoming);

        let holdings = std::mem::take(&mut self.holdings);
        let (removed, retained): (Vec<_>, Vec<_>) = holdings
            .into_iter()
            .partition(|h| is_owned(&h.id) && !keep.contains(&h.id));
        self.holdings = retained;

        let diff = HoldingsDiff { upserted, removed };
        if !diff.is_empty() {
            debug!(
                "Replaced owned holdings: {} upserted, {} removed",
                diff.upserted.len(),
                diff.removed.len()
            );
            self.persist();
        }
        diff
    }

    fn merge(&mut self, incoming: Vec<Holding>) -> Vec<Holding> {
        let mut changed = Vec::new();
        for holding in incoming {
            let (Ok(symbol), Ok(quantity)) = (
                validate_symbol(&holding.token_symbol),
                validate_quantity(holding.quantity),
            ) else {
                warn!("Skipping invalid holding {}", holding.id);
                continue;
            };

            match self.holdings.iter().position(|h| h.id == holding.id) {
                Some(index) if self.holdings[index].quantity == quantity => {}
                Some(index) => {
                    self.holdings[index].quantity = quantity;
                    changed.push(self.holdings[index].clone());
                }
                None => {
                    let holding = Holding::with_id(holding.id, &symbol, quantity);
                    self.holdings.push(holding.clone());
                    changed.push(holding);
                }
            }
        }
        changed
    }

    /// Drop every holding and delete the persisted document.
    pub fn clear(&mut self) {
        self.holdings.clear();
        self.last_updated = None;
        if let Err(e) = self.storage.remove(PORTFOLIO_STORAGE_KEY) {
            error!("Failed to clear persisted portfolio: {}", e);
        }
    }

    /// Remember the connected wallet alongside the holdings.
    pub fn set_wallet_address(&mut self, address: Option<String>) {
        if self.wallet_address != address {
            self.wallet_address = address;
            self.persist();
        }
    }

    /// The document as it would be (or was last) persisted.
    pub fn to_persisted(&self) -> PersistedPortfolio {
        PersistedPortfolio {
            holdings: self.holdings.clone(),
            last_updated: self.last_updated.unwrap_or_else(Utc::now),
            wallet_address: self.wallet_address.clone(),
            fid: self.fid.clone(),
        }
    }

    fn persist(&mut self) {
        self.last_updated = Some(Utc::now());
        let document = self.to_persisted();

        let json = match serde_json::to_string(&document) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize portfolio: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(PORTFOLIO_STORAGE_KEY, &json) {
            error!("Failed to persist portfolio: {}", e);
        }
    }
}
