//! Portfolio event sink trait and implementations.

use std::sync::{Arc, Mutex, MutexGuard};

use super::PortfolioEvent;

/// Receives portfolio events.
///
/// - `emit()` must be fast and non-blocking
/// - Failure to deliver must not affect the tracker (best-effort)
pub trait PortfolioEventSink: Send + Sync {
    fn emit(&self, event: PortfolioEvent);

    /// Default implementation calls `emit()` for each event.
    fn emit_batch(&self, events: Vec<PortfolioEvent>) {
        for event in events {
            self.emit(event);
        }
    }
}

/// Discards every event.
#[derive(Clone, Default)]
pub struct NoOpPortfolioEventSink;

impl PortfolioEventSink for NoOpPortfolioEventSink {
    fn emit(&self, _event: PortfolioEvent) {}
}

/// Collects emitted events for inspection.
#[derive(Clone, Default)]
pub struct MockPortfolioEventSink {
    events: Arc<Mutex<Vec<PortfolioEvent>>>,
}

impl MockPortfolioEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<PortfolioEvent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PortfolioEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PortfolioEventSink for MockPortfolioEventSink {
    fn emit(&self, event: PortfolioEvent) {
        self.lock().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink_does_not_panic() {
        let sink = NoOpPortfolioEventSink;
        sink.emit(PortfolioEvent::holdings_changed(vec!["h1".to_string()]));
        sink.emit_batch(vec![
            PortfolioEvent::holdings_changed(vec!["h2".to_string()]),
            PortfolioEvent::holdings_changed(vec!["h3".to_string()]),
        ]);
    }

    #[test]
    fn test_mock_sink_collects_events() {
        let sink = MockPortfolioEventSink::new();
        assert!(sink.is_empty());

        sink.emit(PortfolioEvent::holdings_changed(vec!["h1".to_string()]));
        assert_eq!(sink.len(), 1);

        sink.emit_batch(vec![
            PortfolioEvent::holdings_changed(vec!["h2".to_string()]),
            PortfolioEvent::holdings_changed(vec!["h3".to_string()]),
        ]);
        assert_eq!(sink.events().len(), 3);

        sink.clear();
        assert!(sink.is_empty());
    }
}
