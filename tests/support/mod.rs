//! Shared fakes for the behavior suites.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use stockboard_core::{Endpoint, HttpClient, HttpError, HttpRequest, HttpResponse};

pub const API_KEY: &str = "SECRETKEY123";

/// Recorded IBM payload for one endpoint.
pub fn fixture(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::DailyPrices => include_str!("../fixtures/ibm/daily.json"),
        Endpoint::IncomeStatement => include_str!("../fixtures/ibm/income.json"),
        Endpoint::CashFlow => include_str!("../fixtures/ibm/cash_flow.json"),
        Endpoint::BalanceSheet => include_str!("../fixtures/ibm/balance_sheet.json"),
        Endpoint::Overview => include_str!("../fixtures/ibm/overview.json"),
        Endpoint::InsiderTransactions => include_str!("../fixtures/ibm/insider.json"),
        Endpoint::Earnings => include_str!("../fixtures/ibm/earnings.json"),
    }
}

/// Serves the IBM fixtures unless an endpoint is overridden, and records
/// every request it sees.
#[derive(Debug, Default)]
pub struct FixtureHttpClient {
    overrides: BTreeMap<&'static str, Result<HttpResponse, HttpError>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FixtureHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, endpoint: Endpoint, response: HttpResponse) -> Self {
        self.overrides.insert(endpoint.function(), Ok(response));
        self
    }

    pub fn body(self, endpoint: Endpoint, body: &str) -> Self {
        self.respond(endpoint, HttpResponse::ok_json(body))
    }

    pub fn fail(mut self, endpoint: Endpoint, message: &str) -> Self {
        self.overrides
            .insert(endpoint.function(), Err(HttpError::new(message)));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .clone()
    }
}

impl HttpClient for FixtureHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let function = request.query_param("function").unwrap_or_default();
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .push(request);

        let response = match self.overrides.get(function.as_str()) {
            Some(response) => response.clone(),
            None => match Endpoint::from_function(&function) {
                Some(endpoint) => Ok(HttpResponse::ok_json(fixture(endpoint))),
                None => Ok(HttpResponse::with_status(404, "")),
            },
        };
        Box::pin(async move { response })
    }
}
