//! Fakes shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use stockwidgets_core::provider::{LookupFuture, SearchFuture};
use stockwidgets_core::{
    AlphaVantageClient, HttpClient, HttpError, HttpRequest, HttpResponse, Quote, QuoteError,
    QuoteProvider, SearchMatch, Symbol, WidgetConfig,
};
use tokio::sync::oneshot;

pub type LookupOutcome = Result<Quote, QuoteError>;

pub fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

pub fn quote(raw: &str, price: f64) -> Quote {
    Quote::new(symbol(raw), price).expect("valid quote")
}

pub fn global_quote_body(raw: &str, price: &str) -> String {
    format!(r#"{{"Global Quote": {{"01. symbol": "{raw}", "05. price": "{price}"}}}}"#)
}

/// HTTP fake answering by `function` + `symbol`/`keywords` query values.
#[derive(Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<HashMap<String, HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn quote(&self, raw: &str, response: HttpResponse) {
        self.route(format!("GLOBAL_QUOTE:{raw}"), response);
    }

    pub fn search(&self, keywords: &str, response: HttpResponse) {
        self.route(format!("SYMBOL_SEARCH:{keywords}"), response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn quote_requests_for(&self, raw: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| {
                request.query_value("function") == Some("GLOBAL_QUOTE")
                    && request.query_value("symbol") == Some(raw)
            })
            .count()
    }

    fn route(&self, key: String, response: HttpResponse) {
        self.routes.lock().expect("routes lock").insert(key, response);
    }

    fn key_for(request: &HttpRequest) -> String {
        let function = request.query_value("function").unwrap_or_default();
        let argument = request
            .query_value("symbol")
            .or_else(|| request.query_value("keywords"))
            .unwrap_or_default();
        format!("{function}:{argument}")
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let key = Self::key_for(&request);
        self.requests.lock().expect("requests lock").push(request);
        let response = self
            .routes
            .lock()
            .expect("routes lock")
            .get(&key)
            .cloned()
            .ok_or_else(|| HttpError::new(format!("no scripted route for {key}")));
        Box::pin(async move { response })
    }
}

pub fn alphavantage(http: Arc<ScriptedHttpClient>) -> AlphaVantageClient {
    AlphaVantageClient::with_http_client(http, WidgetConfig::default().with_api_key("test-key"))
}

/// Provider whose lookups finish only when the test releases them.
#[derive(Default)]
pub struct GatedProvider {
    gates: Mutex<HashMap<String, Vec<oneshot::Receiver<LookupOutcome>>>>,
    calls: Mutex<Vec<String>>,
    matches: Mutex<Vec<SearchMatch>>,
}

impl GatedProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers one pending lookup for `raw`; send on the returned handle to finish it.
    pub fn gate(&self, raw: &str) -> oneshot::Sender<LookupOutcome> {
        let (sender, receiver) = oneshot::channel();
        self.gates
            .lock()
            .expect("gates lock")
            .entry(raw.to_owned())
            .or_default()
            .push(receiver);
        sender
    }

    /// Registers a lookup for `raw` that finishes as soon as it is issued.
    pub fn ready(&self, raw: &str, outcome: LookupOutcome) {
        let _ = self.gate(raw).send(outcome);
    }

    pub fn set_matches(&self, matches: Vec<SearchMatch>) {
        *self.matches.lock().expect("matches lock") = matches;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl QuoteProvider for GatedProvider {
    fn lookup_price<'a>(&'a self, symbol: &'a Symbol) -> LookupFuture<'a> {
        self.calls
            .lock()
            .expect("calls lock")
            .push(symbol.as_str().to_owned());
        let gate = {
            let mut gates = self.gates.lock().expect("gates lock");
            gates.get_mut(symbol.as_str()).and_then(|queue| {
                if queue.is_empty() {
                    None
                } else {
                    Some(queue.remove(0))
                }
            })
        };

        Box::pin(async move {
            match gate {
                Some(receiver) => receiver
                    .await
                    .unwrap_or_else(|_| Err(QuoteError::transport("gate dropped"))),
                None => std::future::pending().await,
            }
        })
    }

    fn search_symbols<'a>(&'a self, _query: &'a str) -> SearchFuture<'a> {
        let matches = self.matches.lock().expect("matches lock").clone();
        Box::pin(async move { Ok(matches) })
    }
}
