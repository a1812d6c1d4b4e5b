//! Stock search widget: finds candidate symbols and hands the chosen one to
//! the rest of the page as a `symbol-selected` event.

use std::sync::{Arc, Mutex};

use crate::events::{EventBus, PageEvent};
use crate::provider::QuoteProvider;
use crate::widgets::Component;
use crate::SearchMatch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchMatch>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchContent {
    Spinner,
    List(Vec<SearchMatch>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub query: String,
    pub content: SearchContent,
}

#[derive(Debug, Default)]
struct SearchInner {
    state: SearchState,
    generation: u64,
}

pub struct SearchWidget {
    provider: Arc<dyn QuoteProvider>,
    inner: Mutex<SearchInner>,
    bus: Option<EventBus>,
}

impl SearchWidget {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self {
            provider,
            inner: Mutex::new(SearchInner::default()),
            bus: None,
        }
    }

    pub fn state(&self) -> SearchState {
        self.lock().state.clone()
    }

    pub fn results(&self) -> Vec<SearchMatch> {
        self.lock().state.results.clone()
    }

    pub fn on_user_input(&self, text: impl Into<String>) {
        self.lock().state.query = text.into();
    }

    /// Runs the typed query.
    ///
    /// Failures are logged and leave the previous results in place. Only the
    /// most recent search may touch the results or clear the loading flag;
    /// replies to superseded searches are dropped.
    pub async fn find(&self) -> SearchState {
        let (query, generation) = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.state.loading = true;
            (inner.state.query.clone(), inner.generation)
        };

        let outcome = self.provider.search_symbols(&query).await;

        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::debug!(query = %query, generation, "discarding superseded symbol search");
            return inner.state.clone();
        }

        match outcome {
            Ok(results) => {
                tracing::debug!(query = %query, matches = results.len(), "symbol search finished");
                inner.state.results = results;
            }
            Err(error) => {
                tracing::warn!(query = %query, %error, "symbol search failed; keeping previous results");
            }
        }
        inner.state.loading = false;
        inner.state.clone()
    }

    /// Types `query` and runs it.
    pub async fn search(&self, query: &str) -> SearchState {
        self.on_user_input(query);
        self.find().await
    }

    /// Picks the result at `index`; returns how many listeners were notified.
    pub fn select(&self, index: usize) -> usize {
        let symbol = match self.lock().state.results.get(index) {
            Some(result) => result.symbol.clone(),
            None => return 0,
        };
        self.select_symbol(&symbol)
    }

    pub fn select_symbol(&self, symbol: &str) -> usize {
        match &self.bus {
            Some(bus) => bus.publish(&PageEvent::SymbolSelected(symbol.to_owned())),
            None => {
                tracing::debug!(symbol, "selection ignored; search widget is not mounted");
                0
            }
        }
    }

    pub fn render(&self) -> SearchView {
        let inner = self.lock();
        let state = &inner.state;
        SearchView {
            query: state.query.clone(),
            content: if state.loading {
                SearchContent::Spinner
            } else {
                SearchContent::List(state.results.clone())
            },
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SearchInner> {
        self.inner
            .lock()
            .expect("search state lock should not be poisoned")
    }
}

impl Component for SearchWidget {
    fn mount(&mut self, bus: &EventBus) {
        self.bus = Some(bus.clone());
    }

    fn dispose(&mut self) {
        self.bus = None;
    }

    fn is_mounted(&self) -> bool {
        self.bus.is_some()
    }
}
