mod price;
mod search;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use stockwidgets_core::{
    AlphaVantageClient, ConfigError, LookupState, PriceWidget, Quote, QuoteProvider, SearchMatch,
    WidgetConfig,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Everything a command produced, ready for rendering.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<SearchMatch>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceReport>,
}

impl Report {
    /// True when the price widget ended in its error state.
    pub fn failed(&self) -> bool {
        self.price
            .as_ref()
            .is_some_and(|price| price.status == PriceStatus::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStatus {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct PriceReport {
    pub symbol: Option<String>,
    pub status: PriceStatus,
    /// Text the widget displays.
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
}

impl PriceReport {
    pub fn from_widget(widget: &PriceWidget) -> Self {
        let (status, quote) = match widget.state() {
            LookupState::Idle => (PriceStatus::Idle, None),
            LookupState::Loading => (PriceStatus::Loading, None),
            LookupState::Success(quote) => (PriceStatus::Success, Some(quote)),
            LookupState::Error(_) => (PriceStatus::Error, None),
        };

        Self {
            symbol: widget.stock_symbol().map(String::from),
            status,
            display: widget.render().content.to_string(),
            quote,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    let client = AlphaVantageClient::new(resolve_config(cli)?);
    let config = client.config();
    tracing::debug!(
        base_url = %config.base_url,
        timeout_ms = config.request_timeout_ms,
        "resolved provider configuration"
    );
    let lookup_timeout = Duration::from_millis(config.request_timeout_ms);
    let provider: Arc<dyn QuoteProvider> = Arc::new(client);

    match &cli.command {
        Command::Price(args) => price::run(args, provider, lookup_timeout).await,
        Command::Search(args) => search::run(args, provider, lookup_timeout).await,
    }
}

fn resolve_config(cli: &Cli) -> Result<WidgetConfig, CliError> {
    let mut config = WidgetConfig::from_env()?;
    if let Some(api_key) = &cli.api_key {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ConfigError::EmptyValue { name: "--api-key" }.into());
        }
        config = config.with_api_key(api_key);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        if timeout_ms == 0 {
            return Err(CliError::Command(String::from(
                "--timeout-ms must be greater than zero",
            )));
        }
        config = config.with_request_timeout_ms(timeout_ms);
    }
    Ok(config)
}

fn price_widget(provider: Arc<dyn QuoteProvider>, lookup_timeout: Duration) -> PriceWidget {
    PriceWidget::builder(provider)
        .lookup_timeout(lookup_timeout)
        .build()
}
