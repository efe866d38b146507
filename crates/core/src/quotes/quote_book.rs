use chrono::{DateTime, Utc};
use log::debug;

use minifolio_market_data::QuoteMap;

/// Handed out when a refresh starts; presented again when it settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The latest applied quotes, guarded by a refresh-generation counter.
///
/// Every refresh takes a ticket with a strictly increasing generation. When
/// its fetch settles, the result is applied only if no newer refresh has
/// started in the meantime, so a slow response can never overwrite a newer
/// one.
#[derive(Debug, Default)]
pub struct QuoteBook {
    issued: u64,
    applied: Option<u64>,
    quotes: QuoteMap,
    last_refreshed_at: Option<DateTime<Utc>>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket {
            generation: self.issued,
        }
    }

    /// Replace the current quotes with `quotes` if `ticket` is the newest
    /// issued. Returns whether the result was applied.
    pub fn apply(&mut self, ticket: RefreshTicket, quotes: QuoteMap) -> bool {
        if ticket.generation != self.issued {
            debug!(
                "Dropping stale refresh result (generation {}, latest {})",
                ticket.generation, self.issued
            );
            return false;
        }
        self.quotes = quotes;
        self.applied = Some(ticket.generation);
        self.last_refreshed_at = Some(Utc::now());
        true
    }

    pub fn quotes(&self) -> &QuoteMap {
        &self.quotes
    }

    /// Generation of the last applied refresh, if any.
    pub fn applied_generation(&self) -> Option<u64> {
        self.applied
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed_at
    }
}
