//! Quotes as seen by the tracker: where they come from and which refresh
//! result is current.

mod quote_book;
mod quote_source;

pub use quote_book::{QuoteBook, RefreshTicket};
pub use quote_source::{BatchedQuoteSource, QuoteSource};
