//! Last-request-wins sequencing of fetch cycles.
//!
//! Each [`FetchSession::begin`] hands out a ticket carrying a fresh
//! generation. Only the completion holding the newest ticket may change the
//! view state; older completions are dropped, so a slow response for a
//! previous ticker can never overwrite the current one.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::data_source::{FetchError, NotFoundReason, StockDataSource};
use crate::StockDataBundle;

/// What the presentation layer should show.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    /// No search issued yet.
    #[default]
    Idle,
    Loading {
        symbol: String,
    },
    Failed {
        symbol: String,
        error: FetchError,
    },
    Ready(Arc<StockDataBundle>),
}

impl ViewState {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn bundle(&self) -> Option<&Arc<StockDataBundle>> {
        match self {
            Self::Ready(bundle) => Some(bundle),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Handle for one issued fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    ticker: String,
}

impl FetchTicket {
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }
}

#[derive(Debug, Default)]
struct SessionInner {
    generation: u64,
    state: ViewState,
}

/// Thread-safe owner of the current view state.
#[derive(Debug, Default)]
pub struct FetchSession {
    inner: Mutex<SessionInner>,
}

impl FetchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a cycle for `ticker`, superseding any cycle still in flight.
    pub fn begin(&self, ticker: &str) -> FetchTicket {
        let ticker = ticker.trim().to_ascii_uppercase();
        let mut inner = self.inner.lock().expect("fetch session lock is not poisoned");
        inner.generation = inner.generation.wrapping_add(1);
        inner.state = ViewState::Loading {
            symbol: ticker.clone(),
        };
        FetchTicket {
            generation: inner.generation,
            ticker,
        }
    }

    /// Apply a cycle result. Returns `false` when the ticket is stale and the
    /// result was discarded.
    ///
    /// A bundle without a single price point is reported as not found.
    pub fn complete(
        &self,
        ticket: &FetchTicket,
        result: Result<StockDataBundle, FetchError>,
    ) -> bool {
        let mut inner = self.inner.lock().expect("fetch session lock is not poisoned");
        if ticket.generation != inner.generation {
            debug!(
                ticker = %ticket.ticker,
                stale = ticket.generation,
                current = inner.generation,
                "discarding stale fetch result"
            );
            return false;
        }

        inner.state = match result {
            Ok(bundle) if bundle.price.is_empty() => ViewState::Failed {
                error: FetchError::not_found(NotFoundReason::NoPricePoints, &bundle.symbol),
                symbol: ticket.ticker.clone(),
            },
            Ok(bundle) => ViewState::Ready(Arc::new(bundle)),
            Err(error) => ViewState::Failed {
                symbol: ticket.ticker.clone(),
                error,
            },
        };
        true
    }

    /// Run the cycle behind `ticket` and apply its result.
    pub async fn fetch(
        &self,
        source: &dyn StockDataSource,
        ticket: &FetchTicket,
        api_key: &str,
    ) -> bool {
        let result = source.fetch_stock_data(&ticket.ticker, api_key).await;
        self.complete(ticket, result)
    }

    /// Return to idle and invalidate any cycle in flight.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().expect("fetch session lock is not poisoned");
        inner.generation = inner.generation.wrapping_add(1);
        inner.state = ViewState::Idle;
    }

    pub fn state(&self) -> ViewState {
        self.inner
            .lock()
            .expect("fetch session lock is not poisoned")
            .state
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchErrorKind, PricePoint, Symbol};

    fn bundle(symbol: &str, with_price: bool) -> StockDataBundle {
        let mut bundle = StockDataBundle::empty(Symbol::parse(symbol).expect("valid"));
        if with_price {
            bundle.price.push(PricePoint {
                date: crate::parse_iso_date("2024-05-01").expect("valid"),
                price: 10.0,
            });
        }
        bundle
    }

    #[test]
    fn starts_idle_and_moves_to_loading() {
        let session = FetchSession::new();
        assert_eq!(session.state(), ViewState::Idle);

        let ticket = session.begin(" msft ");
        assert_eq!(ticket.ticker(), "MSFT");
        assert!(session.state().is_loading());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let session = FetchSession::new();
        let first = session.begin("AAPL");
        let second = session.begin("MSFT");

        assert!(session.complete(&second, Ok(bundle("MSFT", true))));
        assert!(!session.complete(&first, Ok(bundle("AAPL", true))));

        let state = session.state();
        assert_eq!(state.bundle().expect("ready").symbol.as_str(), "MSFT");
    }

    #[test]
    fn empty_price_series_becomes_not_found() {
        let session = FetchSession::new();
        let ticket = session.begin("ZZZZ");

        session.complete(&ticket, Ok(bundle("ZZZZ", false)));

        let state = session.state();
        let error = state.error().expect("failed");
        assert_eq!(
            error.kind(),
            FetchErrorKind::NotFound(NotFoundReason::NoPricePoints)
        );
    }

    #[test]
    fn reset_invalidates_in_flight_cycles() {
        let session = FetchSession::new();
        let ticket = session.begin("IBM");
        session.reset();

        assert!(!session.complete(&ticket, Ok(bundle("IBM", true))));
        assert_eq!(session.state(), ViewState::Idle);
    }
}
