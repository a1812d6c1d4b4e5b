use std::sync::Arc;
use std::time::Duration;

use stockwidgets_core::{Component, EventBus, QuoteProvider};

use crate::cli::PriceArgs;
use crate::error::CliError;

use super::{price_widget, PriceReport, Report};

pub async fn run(
    args: &PriceArgs,
    provider: Arc<dyn QuoteProvider>,
    lookup_timeout: Duration,
) -> Result<Report, CliError> {
    let bus = EventBus::new();
    let mut widget = price_widget(provider, lookup_timeout);
    widget.mount(&bus);

    widget.set_stock_symbol(&args.symbol)?;
    widget.wait_until_settled().await;

    let report = Report {
        matches: None,
        price: Some(PriceReport::from_widget(&widget)),
    };
    widget.dispose();
    Ok(report)
}
