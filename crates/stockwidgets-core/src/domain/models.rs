use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Symbol, ValidationError};

/// Latest price for a symbol at lookup time, plus whatever extra figures the
/// provider returned alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<String>,
    pub volume: Option<u64>,
    pub latest_trading_day: Option<Date>,
}

impl Quote {
    pub fn new(symbol: Symbol, price: f64) -> Result<Self, ValidationError> {
        if !price.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "price" });
        }

        Ok(Self {
            symbol,
            price,
            open: None,
            high: None,
            low: None,
            previous_close: None,
            change: None,
            change_percent: None,
            volume: None,
            latest_trading_day: None,
        })
    }

    /// Price as shown to the user, e.g. `Price: $130.57`.
    pub fn display_price(&self) -> String {
        format!("Price: ${}", self.price)
    }
}

/// One candidate returned by a symbol search, in provider ranking order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub symbol: String,
    pub name: String,
}

impl SearchMatch {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}
