//! Behavior tests for last-request-wins sequencing of overlapping searches.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use stockboard_core::{
    parse_iso_date, FetchError, FetchErrorKind, FetchSession, NotFoundReason, PricePoint,
    StockDataBundle, StockDataSource, Symbol, ViewState,
};
use tokio::sync::oneshot;

type FetchResult = Result<StockDataBundle, FetchError>;

/// Holds each ticker's fetch open until the test releases it.
#[derive(Default)]
struct GatedSource {
    gates: Mutex<HashMap<String, oneshot::Receiver<FetchResult>>>,
}

impl GatedSource {
    fn gate(&self, ticker: &str) -> oneshot::Sender<FetchResult> {
        let (sender, receiver) = oneshot::channel();
        self.gates
            .lock()
            .expect("gate map should not be poisoned")
            .insert(ticker.to_owned(), receiver);
        sender
    }
}

impl StockDataSource for GatedSource {
    fn fetch_stock_data<'a>(
        &'a self,
        ticker: &'a str,
        _api_key: &'a str,
    ) -> Pin<Box<dyn Future<Output = FetchResult> + Send + 'a>> {
        let receiver = self
            .gates
            .lock()
            .expect("gate map should not be poisoned")
            .remove(ticker);
        Box::pin(async move {
            match receiver {
                Some(receiver) => receiver.await.unwrap_or_else(|_| Err(FetchError::transport())),
                None => Err(FetchError::transport()),
            }
        })
    }
}

fn bundle(ticker: &str, close: f64) -> StockDataBundle {
    let mut bundle = StockDataBundle::empty(Symbol::parse(ticker).expect("valid"));
    bundle.price = vec![PricePoint {
        date: parse_iso_date("2026-10-16").expect("valid"),
        price: close,
    }];
    bundle
}

fn spawn_fetch(
    session: &Arc<FetchSession>,
    source: &Arc<GatedSource>,
    ticker: &str,
) -> tokio::task::JoinHandle<bool> {
    let ticket = session.begin(ticker);
    let session = Arc::clone(session);
    let source = Arc::clone(source);
    tokio::spawn(async move { session.fetch(source.as_ref(), &ticket, "key").await })
}

#[tokio::test]
async fn when_older_search_resolves_last_newer_result_stays_on_screen() {
    // Given: Searches for AAA then BBB, both still in flight
    let session = Arc::new(FetchSession::new());
    let source = Arc::new(GatedSource::default());
    let release_a = source.gate("AAA");
    let release_b = source.gate("BBB");
    let fetch_a = spawn_fetch(&session, &source, "AAA");
    let fetch_b = spawn_fetch(&session, &source, "BBB");

    // When: BBB resolves first, then AAA
    release_b.send(Ok(bundle("BBB", 20.0))).expect("receiver alive");
    assert!(fetch_b.await.expect("task completes"), "newest result applies");
    release_a.send(Ok(bundle("AAA", 10.0))).expect("receiver alive");
    let applied_a = fetch_a.await.expect("task completes");

    // Then: The stale AAA result is discarded and BBB remains
    assert!(!applied_a, "stale result must be discarded");
    let state = session.state();
    let shown = state.bundle().expect("ready");
    assert_eq!(shown.symbol.as_str(), "BBB");
}

#[tokio::test]
async fn when_older_search_resolves_first_view_keeps_loading_newer_ticker() {
    // Given: Searches for AAA then BBB
    let session = Arc::new(FetchSession::new());
    let source = Arc::new(GatedSource::default());
    let release_a = source.gate("AAA");
    let release_b = source.gate("BBB");
    let fetch_a = spawn_fetch(&session, &source, "AAA");
    let fetch_b = spawn_fetch(&session, &source, "BBB");

    // When: AAA resolves while BBB is still pending
    release_a.send(Ok(bundle("AAA", 10.0))).expect("receiver alive");
    assert!(!fetch_a.await.expect("task completes"));

    // Then: The view still shows BBB loading
    assert_eq!(
        session.state(),
        ViewState::Loading {
            symbol: String::from("BBB")
        }
    );

    // And: BBB's result is applied once it arrives
    release_b.send(Ok(bundle("BBB", 20.0))).expect("receiver alive");
    assert!(fetch_b.await.expect("task completes"));
    assert_eq!(
        session.state().bundle().map(|bundle| bundle.symbol.to_string()),
        Some(String::from("BBB"))
    );
}

#[tokio::test]
async fn when_stale_search_fails_error_is_not_shown() {
    let session = Arc::new(FetchSession::new());
    let source = Arc::new(GatedSource::default());
    let release_a = source.gate("AAA");
    let release_b = source.gate("BBB");
    let fetch_a = spawn_fetch(&session, &source, "AAA");
    let fetch_b = spawn_fetch(&session, &source, "BBB");

    release_b.send(Ok(bundle("BBB", 20.0))).expect("receiver alive");
    fetch_b.await.expect("task completes");
    release_a
        .send(Err(FetchError::transport()))
        .expect("receiver alive");
    fetch_a.await.expect("task completes");

    assert!(session.state().error().is_none());
    assert!(session.state().bundle().is_some());
}

#[tokio::test]
async fn when_session_is_reset_in_flight_result_is_dropped() {
    let session = Arc::new(FetchSession::new());
    let source = Arc::new(GatedSource::default());
    let release = source.gate("AAA");
    let fetch = spawn_fetch(&session, &source, "AAA");

    session.reset();
    release.send(Ok(bundle("AAA", 10.0))).expect("receiver alive");

    assert!(!fetch.await.expect("task completes"));
    assert_eq!(session.state(), ViewState::Idle);
}

#[tokio::test]
async fn when_fetch_yields_no_prices_view_reports_not_found() {
    // Given: A source that answers with an empty price series
    let session = Arc::new(FetchSession::new());
    let source = Arc::new(GatedSource::default());
    let release = source.gate("ZZZZ");
    let fetch = spawn_fetch(&session, &source, "zzzz");

    // When: The cycle completes
    let mut empty = bundle("ZZZZ", 1.0);
    empty.price.clear();
    release.send(Ok(empty)).expect("receiver alive");
    fetch.await.expect("task completes");

    // Then: The view shows a not-found error naming the ticker
    let state = session.state();
    let error = state.error().expect("failed state");
    assert_eq!(
        error.kind(),
        FetchErrorKind::NotFound(NotFoundReason::NoPricePoints)
    );
    assert!(error.message().contains("ZZZZ"));
}
