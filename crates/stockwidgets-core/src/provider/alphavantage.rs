use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};
use time::macros::format_description;
use time::Date;

use crate::http_client::{HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::provider::{LookupFuture, QuoteError, QuoteProvider, SearchFuture};
use crate::{Quote, SearchMatch, Symbol, WidgetConfig};

const GLOBAL_QUOTE_FUNCTION: &str = "GLOBAL_QUOTE";
const SYMBOL_SEARCH_FUNCTION: &str = "SYMBOL_SEARCH";
const RATE_LIMIT_FIELDS: [&str; 2] = ["Note", "Information"];

/// Alpha Vantage client for the `GLOBAL_QUOTE` and `SYMBOL_SEARCH` endpoints.
#[derive(Clone)]
pub struct AlphaVantageClient {
    http_client: Arc<dyn HttpClient>,
    config: WidgetConfig,
}

impl AlphaVantageClient {
    pub fn new(config: WidgetConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: WidgetConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    fn request(&self, function: &str) -> HttpRequest {
        HttpRequest::get(&self.config.base_url)
            .with_header("Accept", "application/json")
            .with_query("function", function)
            .with_timeout_ms(self.config.request_timeout_ms)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, QuoteError> {
        let request = request.with_query("apikey", self.config.api_key.as_str());
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| QuoteError::transport(error.message()))?;

        if !response.is_success() {
            return Err(QuoteError::status(response.status));
        }

        Ok(response)
    }

    async fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, QuoteError> {
        tracing::debug!(symbol = %symbol, "requesting global quote");
        let request = self
            .request(GLOBAL_QUOTE_FUNCTION)
            .with_query("symbol", symbol.as_str());
        let response = self.send(request).await?;
        parse_global_quote(symbol, &response.body)
    }

    async fn fetch_matches(&self, query: &str) -> Result<Vec<SearchMatch>, QuoteError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(query, "requesting symbol search");
        let request = self
            .request(SYMBOL_SEARCH_FUNCTION)
            .with_query("keywords", query);
        let response = self.send(request).await?;
        parse_symbol_search(&response.body)
    }
}

impl QuoteProvider for AlphaVantageClient {
    fn lookup_price<'a>(&'a self, symbol: &'a Symbol) -> LookupFuture<'a> {
        Box::pin(self.fetch_quote(symbol))
    }

    fn search_symbols<'a>(&'a self, query: &'a str) -> SearchFuture<'a> {
        Box::pin(self.fetch_matches(query))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GlobalQuotePayload {
    #[serde(rename = "02. open", default)]
    open: Option<String>,
    #[serde(rename = "03. high", default)]
    high: Option<String>,
    #[serde(rename = "04. low", default)]
    low: Option<String>,
    #[serde(rename = "05. price", default)]
    price: Option<String>,
    #[serde(rename = "06. volume", default)]
    volume: Option<String>,
    #[serde(rename = "07. latest trading day", default)]
    latest_trading_day: Option<String>,
    #[serde(rename = "08. previous close", default)]
    previous_close: Option<String>,
    #[serde(rename = "09. change", default)]
    change: Option<String>,
    #[serde(rename = "10. change percent", default)]
    change_percent: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchMatchPayload {
    #[serde(rename = "1. symbol", default)]
    symbol: Option<String>,
    #[serde(rename = "2. name", default)]
    name: Option<String>,
}

fn parse_global_quote(symbol: &Symbol, body: &str) -> Result<Quote, QuoteError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| QuoteError::malformed(format!("quote body is not json: {e}")))?;
    let object = payload
        .as_object()
        .ok_or_else(|| QuoteError::malformed("quote body is not a json object"))?;

    if let Some(notice) = rate_limit_notice(object) {
        return Err(QuoteError::RateLimited { notice });
    }

    let not_found = || QuoteError::SymbolNotFound {
        symbol: symbol.as_str().to_owned(),
    };

    let raw = object.get("Global Quote").cloned().ok_or_else(not_found)?;
    let raw: GlobalQuotePayload = serde_json::from_value(raw)
        .map_err(|e| QuoteError::malformed(format!("unexpected 'Global Quote' shape: {e}")))?;

    let price_text = raw
        .price
        .as_deref()
        .map(str::trim)
        .filter(|price| !price.is_empty())
        .ok_or_else(not_found)?;
    let price = price_text
        .parse::<f64>()
        .map_err(|_| QuoteError::malformed(format!("price '{price_text}' is not a number")))?;

    let mut quote = Quote::new(symbol.clone(), price)
        .map_err(|e| QuoteError::malformed(e.to_string()))?;
    quote.open = parse_decimal(raw.open.as_deref());
    quote.high = parse_decimal(raw.high.as_deref());
    quote.low = parse_decimal(raw.low.as_deref());
    quote.previous_close = parse_decimal(raw.previous_close.as_deref());
    quote.change = parse_decimal(raw.change.as_deref());
    quote.change_percent = raw
        .change_percent
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty());
    quote.volume = raw
        .volume
        .as_deref()
        .and_then(|value| value.trim().parse::<u64>().ok());
    quote.latest_trading_day = raw.latest_trading_day.as_deref().and_then(parse_trading_day);

    Ok(quote)
}

fn parse_symbol_search(body: &str) -> Result<Vec<SearchMatch>, QuoteError> {
    let payload: Value = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(error) => {
            tracing::debug!(%error, "search body is not json; treating as no matches");
            return Ok(Vec::new());
        }
    };

    let Some(object) = payload.as_object() else {
        return Ok(Vec::new());
    };

    if let Some(notice) = rate_limit_notice(object) {
        return Err(QuoteError::RateLimited { notice });
    }

    let Some(matches) = object.get("bestMatches").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let results = matches
        .iter()
        .filter_map(|entry| serde_json::from_value::<SearchMatchPayload>(entry.clone()).ok())
        .filter_map(|entry| {
            let symbol = entry.symbol?.trim().to_owned();
            if symbol.is_empty() {
                return None;
            }
            Some(SearchMatch::new(symbol, entry.name.unwrap_or_default()))
        })
        .collect();

    Ok(results)
}

fn rate_limit_notice(object: &Map<String, Value>) -> Option<String> {
    RATE_LIMIT_FIELDS.iter().find_map(|field| match object.get(*field)? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    })
}

fn parse_decimal(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn parse_trading_day(value: &str) -> Option<Date> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).ok()
}
