//! Stock price widget.
//!
//! [`PriceModel`] is the synchronous state machine: it decides when a lookup
//! starts and whether a finished lookup may still change what is shown.
//! [`PriceWidget`] wraps it with a quote provider, a tokio runtime, and the
//! page event bus.
//!
//! ```text
//!            submit / symbol-selected
//!   Idle ──────────────────────────────▶ Loading ──▶ Success(quote)
//!                                          ▲    └──▶ Error(message)
//!                                          └──────────────┘ new submission
//! ```
//!
//! Every lookup carries a [`LookupTicket`]. Only the ticket of the most recent
//! submission may resolve the state; anything older is discarded on arrival.

use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::events::{EventBus, PageEvent, Subscription};
use crate::provider::{QuoteError, QuoteProvider};
use crate::widgets::spinner::Spinner;
use crate::widgets::Component;
use crate::{Quote, Symbol, ValidationError};

pub const PROMPT_TEXT: &str = "Please enter a symbol!";

/// What the widget is showing. Replaced wholesale on every transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success(Quote),
    Error(String),
}

impl LookupState {
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn price(&self) -> Option<f64> {
        match self {
            Self::Success(quote) => Some(quote.price),
            _ => None,
        }
    }
}

/// Stamp handed out when a lookup starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    symbol: Symbol,
}

impl LookupTicket {
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Lookup state machine for one widget instance.
#[derive(Debug, Clone, Default)]
pub struct PriceModel {
    stock_symbol: Option<Symbol>,
    input: String,
    generation: u64,
    state: LookupState,
}

impl PriceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model whose `stockSymbol` attribute was set before mounting.
    pub fn with_stock_symbol(symbol: Symbol) -> Self {
        Self {
            input: symbol.as_str().to_owned(),
            stock_symbol: Some(symbol),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn stock_symbol(&self) -> Option<&Symbol> {
        self.stock_symbol.as_ref()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn on_user_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// The fetch button is enabled only for non-blank input and no lookup in flight.
    pub fn submit_enabled(&self) -> bool {
        !self.input.trim().is_empty() && !self.state.is_loading()
    }

    /// Fetch button press. Always re-fetches, even for the symbol already shown.
    pub fn submit(&mut self) -> Option<LookupTicket> {
        if !self.submit_enabled() {
            return None;
        }
        let symbol = Symbol::parse(&self.input).ok()?;
        self.input = symbol.as_str().to_owned();
        Some(self.begin(symbol))
    }

    /// Attribute setter: starts a lookup only when the value actually changes.
    pub fn set_stock_symbol(&mut self, symbol: Symbol) -> Option<LookupTicket> {
        if self.stock_symbol.as_ref() == Some(&symbol) {
            return None;
        }
        self.input = symbol.as_str().to_owned();
        Some(self.begin(symbol))
    }

    /// Handler for a page-wide symbol selection.
    pub fn on_symbol_selected(&mut self, selected: &str) -> Option<LookupTicket> {
        let symbol = Symbol::parse(selected).ok()?;
        self.set_stock_symbol(symbol)
    }

    /// Starts the first lookup for a symbol preset before mounting.
    pub fn load_initial(&mut self) -> Option<LookupTicket> {
        if self.state != LookupState::Idle {
            return None;
        }
        let symbol = self.stock_symbol.clone()?;
        Some(self.begin(symbol))
    }

    pub fn is_current(&self, ticket: &LookupTicket) -> bool {
        ticket.generation == self.generation && self.stock_symbol.as_ref() == Some(&ticket.symbol)
    }

    /// Applies a finished lookup. Returns `false` when the ticket is stale.
    pub fn resolve(&mut self, ticket: &LookupTicket, outcome: Result<Quote, QuoteError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.state = match outcome {
            Ok(quote) => LookupState::Success(quote),
            Err(error) => LookupState::Error(error.user_message().to_owned()),
        };
        true
    }

    pub fn render(&self) -> PriceView {
        let content = match &self.state {
            LookupState::Idle => PriceContent::Prompt,
            LookupState::Loading => PriceContent::Spinner,
            LookupState::Error(message) => PriceContent::Error(message.clone()),
            LookupState::Success(quote) => PriceContent::Price(quote.display_price()),
        };

        PriceView {
            input: self.input.clone(),
            submit_enabled: self.submit_enabled(),
            host_class: if self.state.is_error() {
                "stock-price stock-price--error"
            } else {
                "stock-price"
            },
            content,
        }
    }

    fn begin(&mut self, symbol: Symbol) -> LookupTicket {
        self.generation += 1;
        self.stock_symbol = Some(symbol.clone());
        self.state = LookupState::Loading;
        LookupTicket {
            generation: self.generation,
            symbol,
        }
    }
}

/// Body of the rendered widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceContent {
    Prompt,
    Spinner,
    Error(String),
    Price(String),
}

impl Display for PriceContent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prompt => f.write_str(PROMPT_TEXT),
            Self::Spinner => f.write_str(Spinner::render()),
            Self::Error(message) | Self::Price(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceView {
    pub input: String,
    pub submit_enabled: bool,
    pub host_class: &'static str,
    pub content: PriceContent,
}

struct PriceShared {
    provider: Arc<dyn QuoteProvider>,
    runtime: Handle,
    lookup_timeout: Option<Duration>,
    model: Mutex<PriceModel>,
    state_tx: watch::Sender<LookupState>,
}

impl PriceShared {
    fn update<R>(&self, change: impl FnOnce(&mut PriceModel) -> R) -> R {
        let mut model = self
            .model
            .lock()
            .expect("price model lock should not be poisoned");
        let result = change(&mut model);
        let next = model.state().clone();
        self.state_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
        result
    }

    fn spawn_lookup(self: &Arc<Self>, ticket: LookupTicket) -> JoinHandle<()> {
        tracing::debug!(
            symbol = %ticket.symbol(),
            generation = ticket.generation(),
            "starting quote lookup"
        );
        let shared = Arc::clone(self);
        self.runtime.spawn(async move {
            let outcome = shared.lookup(ticket.symbol()).await;
            if let Err(error) = &outcome {
                tracing::info!(symbol = %ticket.symbol(), %error, "quote lookup failed");
            }
            if !shared.update(|model| model.resolve(&ticket, outcome)) {
                tracing::debug!(
                    symbol = %ticket.symbol(),
                    generation = ticket.generation(),
                    "discarding stale quote lookup"
                );
            }
        })
    }

    async fn lookup(&self, symbol: &Symbol) -> Result<Quote, QuoteError> {
        let request = self.provider.lookup_price(symbol);
        match self.lookup_timeout {
            Some(limit) => tokio::time::timeout(limit, request)
                .await
                .unwrap_or_else(|_| {
                    Err(QuoteError::transport(format!(
                        "lookup timed out after {}ms",
                        limit.as_millis()
                    )))
                }),
            None => request.await,
        }
    }
}

/// Builder for [`PriceWidget`].
pub struct PriceWidgetBuilder {
    provider: Arc<dyn QuoteProvider>,
    stock_symbol: Option<Symbol>,
    lookup_timeout: Option<Duration>,
}

impl PriceWidgetBuilder {
    pub fn stock_symbol(mut self, symbol: Symbol) -> Self {
        self.stock_symbol = Some(symbol);
        self
    }

    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = Some(timeout);
        self
    }

    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; lookups are spawned on it.
    pub fn build(self) -> PriceWidget {
        let model = match self.stock_symbol {
            Some(symbol) => PriceModel::with_stock_symbol(symbol),
            None => PriceModel::new(),
        };
        let (state_tx, _) = watch::channel(model.state().clone());

        PriceWidget {
            shared: Arc::new(PriceShared {
                provider: self.provider,
                runtime: Handle::current(),
                lookup_timeout: self.lookup_timeout,
                model: Mutex::new(model),
                state_tx,
            }),
            subscription: None,
        }
    }
}

/// Price widget bound to a provider and, once mounted, to a page bus.
pub struct PriceWidget {
    shared: Arc<PriceShared>,
    subscription: Option<Subscription>,
}

impl PriceWidget {
    pub fn builder(provider: Arc<dyn QuoteProvider>) -> PriceWidgetBuilder {
        PriceWidgetBuilder {
            provider,
            stock_symbol: None,
            lookup_timeout: None,
        }
    }

    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self::builder(provider).build()
    }

    pub fn state(&self) -> LookupState {
        self.with_model(|model| model.state().clone())
    }

    pub fn stock_symbol(&self) -> Option<Symbol> {
        self.with_model(|model| model.stock_symbol().cloned())
    }

    pub fn render(&self) -> PriceView {
        self.with_model(PriceModel::render)
    }

    pub fn submit_enabled(&self) -> bool {
        self.with_model(PriceModel::submit_enabled)
    }

    /// Receiver that observes every state transition.
    pub fn watch(&self) -> watch::Receiver<LookupState> {
        self.shared.state_tx.subscribe()
    }

    pub fn on_user_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.shared.update(|model| model.on_user_input(text));
    }

    /// Fetch button press; `None` when the button is disabled.
    pub fn submit(&self) -> Option<JoinHandle<()>> {
        let ticket = self.shared.update(PriceModel::submit)?;
        Some(self.shared.spawn_lookup(ticket))
    }

    /// Sets the `stockSymbol` attribute from outside the widget.
    pub fn set_stock_symbol(&self, raw: &str) -> Result<Option<JoinHandle<()>>, ValidationError> {
        let symbol = Symbol::parse(raw)?;
        let ticket = self.shared.update(|model| model.set_stock_symbol(symbol));
        Ok(ticket.map(|ticket| self.shared.spawn_lookup(ticket)))
    }

    /// Waits until no lookup is in flight and returns the settled state.
    pub async fn wait_until_settled(&self) -> LookupState {
        let mut receiver = self.watch();
        let settled = match receiver.wait_for(|state| !state.is_loading()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    fn with_model<R>(&self, read: impl FnOnce(&PriceModel) -> R) -> R {
        let model = self
            .shared
            .model
            .lock()
            .expect("price model lock should not be poisoned");
        read(&model)
    }
}

impl Component for PriceWidget {
    fn mount(&mut self, bus: &EventBus) {
        let weak: Weak<PriceShared> = Arc::downgrade(&self.shared);
        self.subscription = Some(bus.subscribe(move |event| {
            let PageEvent::SymbolSelected(selected) = event else {
                return;
            };
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if let Some(ticket) = shared.update(|model| model.on_symbol_selected(selected)) {
                shared.spawn_lookup(ticket);
            }
        }));

        if let Some(ticket) = self.shared.update(PriceModel::load_initial) {
            self.shared.spawn_lookup(ticket);
        }
    }

    fn dispose(&mut self) {
        self.subscription = None;
    }

    fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }
}
