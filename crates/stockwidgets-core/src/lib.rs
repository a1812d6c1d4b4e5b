//! # Stockwidgets Core
//!
//! Headless stock widgets backed by the Alpha Vantage quote API.
//!
//! ## Overview
//!
//! - **Quote provider client** issuing one GET per lookup and classifying the result
//! - **Page event bus** replacing DOM event bubbling between widgets
//! - **Price widget** with a lookup state machine that ignores stale responses
//! - **Search widget** that hands the chosen symbol to the price widget
//! - **Tooltip, side drawer, spinner** presentational leaves
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | API key, endpoint, and timeout configuration |
//! | [`domain`] | Symbol, Quote, SearchMatch |
//! | [`error`] | Validation and configuration errors |
//! | [`events`] | Page-scoped notification bus |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`provider`] | Quote provider contract and Alpha Vantage client |
//! | [`widgets`] | Price, search, tooltip, drawer, spinner |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockwidgets_core::{AlphaVantageClient, Component, EventBus, PriceWidget, WidgetConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(AlphaVantageClient::new(WidgetConfig::from_env()?));
//!     let bus = EventBus::new();
//!
//!     let mut price = PriceWidget::new(provider);
//!     price.mount(&bus);
//!     price.set_stock_symbol("IBM")?;
//!
//!     price.wait_until_settled().await;
//!     println!("{}", price.render().content);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐  symbol-selected  ┌───────────────┐
//! │ SearchWidget  │──────EventBus────▶│  PriceWidget  │
//! └───────┬───────┘                   └───────┬───────┘
//!         │ search_symbols                    │ lookup_price
//!         ▼                                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │        QuoteProvider (AlphaVantageClient)           │
//! └──────────────────────────┬──────────────────────────┘
//!                            ▼
//!                 HttpClient (reqwest)
//! ```
//!
//! ## Error Handling
//!
//! Provider failures never escape a widget. The price widget turns a
//! [`QuoteError`] into its error state; the search widget logs it and keeps
//! its previous results.
//!
//! ## Security
//!
//! - The API key travels only as the `apikey` query parameter and is never logged

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod http_client;
pub mod provider;
pub mod widgets;

pub use config::WidgetConfig;

pub use domain::{Quote, SearchMatch, Symbol};

pub use error::{ConfigError, ValidationError};

pub use events::{EventBus, Key, PageEvent, Subscription, SYMBOL_SELECTED};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use provider::{AlphaVantageClient, QuoteError, QuoteProvider};

pub use widgets::{
    Component, DrawerTab, LookupState, LookupTicket, PriceContent, PriceModel, PriceView,
    PriceWidget, SearchContent, SearchState, SearchView, SearchWidget, SideDrawer, Spinner,
    Tooltip,
};
