use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use rust_decimal::Decimal;

use crate::discovery::{is_discovered_id, normalize_balances, BalanceSource};
use crate::errors::Result;
use crate::events::{PortfolioEvent, PortfolioEventSink};
use crate::holdings::{parse_quantity, Holding, HoldingsDiff, HoldingsStore};
use crate::portfolio::valuation::{recompute, PortfolioValuation};
use crate::quotes::{QuoteBook, QuoteSource};
use minifolio_market_data::QuoteMap;

/// Keeps a valuation of the user's holdings current.
///
/// Every holdings mutation is persisted, announced and followed by a quote
/// refresh. Refreshes may overlap; the one that started last wins (see
/// [`QuoteBook`]). Locks are never held across an await.
pub struct PortfolioTracker {
    store: RwLock<HoldingsStore>,
    quote_source: Arc<dyn QuoteSource>,
    quote_book: Mutex<QuoteBook>,
    event_sink: Arc<dyn PortfolioEventSink>,
}

impl PortfolioTracker {
    pub fn new(
        store: HoldingsStore,
        quote_source: Arc<dyn QuoteSource>,
        event_sink: Arc<dyn PortfolioEventSink>,
    ) -> Self {
        Self {
            store: RwLock::new(store),
            quote_source,
            quote_book: Mutex::new(QuoteBook::new()),
            event_sink,
        }
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.read_store().holdings().to_vec()
    }

    pub fn wallet_address(&self) -> Option<String> {
        self.read_store().wallet_address().map(str::to_string)
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.book().last_refreshed_at()
    }

    /// Add a holding, then refresh.
    pub async fn add_holding(&self, symbol: &str, quantity: Decimal) -> Result<Holding> {
        let holding = self.write_store().add(symbol, quantity)?;
        self.holdings_changed(vec![holding.id.clone()]).await;
        Ok(holding)
    }

    /// Like [`add_holding`](Self::add_holding), with the quantity as typed by
    /// the user.
    pub async fn add_holding_from_input(&self, symbol: &str, quantity: &str) -> Result<Holding> {
        let quantity = parse_quantity(quantity)?;
        self.add_holding(symbol, quantity).await
    }

    /// Remove a holding, then refresh. Unknown ids are a no-op.
    pub async fn remove_holding(&self, id: &str) -> Option<Holding> {
        let removed = self.write_store().remove(id)?;
        self.holdings_changed(vec![removed.id.clone()]).await;
        Some(removed)
    }

    /// Change a holding's quantity, then refresh.
    ///
    /// `Ok(None)` when no holding has that id; nothing is refreshed.
    pub async fn update_holding(&self, id: &str, quantity: Decimal) -> Result<Option<Holding>> {
        let Some(updated) = self.write_store().update(id, quantity)? else {
            return Ok(None);
        };
        self.holdings_changed(vec![updated.id.clone()]).await;
        Ok(Some(updated))
    }

    /// Read the wallet's on-chain balances and make the discovered holdings
    /// match them.
    ///
    /// Discovered holdings are keyed by contract address, so syncing the same
    /// wallet again updates quantities instead of adding duplicates. Tokens that
    /// are gone from the wallet, or have fallen to dust, are removed. Manually
    /// entered holdings are left alone.
    pub async fn sync_wallet(
        &self,
        balance_source: &dyn BalanceSource,
        address: &str,
    ) -> Result<HoldingsDiff> {
        let balances = balance_source.balances(address).await?;
        let discovered = normalize_balances(&balances);
        debug!(
            "Discovered {} holdings from {} balances of {}",
            discovered.len(),
            balances.len(),
            address
        );

        let diff = {
            let mut store = self.write_store();
            store.set_wallet_address(Some(address.to_string()));
            store.replace_owned(discovered, is_discovered_id)
        };

        if !diff.is_empty() {
            self.holdings_changed(diff.ids()).await;
        }
        Ok(diff)
    }

    /// Fetch quotes for every held symbol, apply them unless a newer refresh
    /// has started, and return the resulting valuation.
    pub async fn refresh(&self) -> PortfolioValuation {
        let symbols = self.read_store().symbols();
        let ticket = self.book().begin_refresh();

        let quotes = if symbols.is_empty() {
            QuoteMap::new()
        } else {
            self.quote_source.fetch_quotes(&symbols).await
        };

        let (priced, missing): (Vec<String>, Vec<String>) = symbols
            .into_iter()
            .partition(|symbol| quotes.contains_key(symbol));

        let applied = self.book().apply(ticket, quotes);
        if !applied {
            return self.valuation();
        }

        if !missing.is_empty() {
            info!("No price available for {}", missing.join(", "));
        }
        self.event_sink.emit(PortfolioEvent::quotes_refreshed(
            ticket.generation(),
            priced,
            missing,
        ));

        let valuation = self.valuation();
        self.event_sink
            .emit(PortfolioEvent::valuation_updated(valuation.clone()));
        valuation
    }

    /// Value the current holdings against the last applied quotes.
    pub fn valuation(&self) -> PortfolioValuation {
        let store = self.read_store();
        let book = self.book();
        recompute(store.holdings(), book.quotes())
    }

    /// Refresh every `interval` until `shutdown` resolves.
    ///
    /// The next tick is scheduled only after the previous refresh settles, so
    /// periodic refreshes never overlap each other.
    pub async fn run<F>(&self, interval: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!("Refreshing portfolio every {:?}", interval);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                valuation = self.refresh() => {
                    debug!(
                        "Portfolio value {} USD ({}%)",
                        valuation.snapshot.total_value_usd.round_dp(2),
                        valuation.snapshot.daily_change_percent.round_dp(2)
                    );
                }
            }

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }

        info!("Portfolio refresh loop stopped");
    }

    async fn holdings_changed(&self, holding_ids: Vec<String>) {
        self.event_sink
            .emit(PortfolioEvent::holdings_changed(holding_ids));
        self.refresh().await;
    }

    fn read_store(&self) -> RwLockReadGuard<'_, HoldingsStore> {
        self.store.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, HoldingsStore> {
        self.store.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn book(&self) -> MutexGuard<'_, QuoteBook> {
        self.quote_book.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
