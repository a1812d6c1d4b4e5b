use std::sync::Arc;
use std::time::Duration;

use stockwidgets_core::{Component, EventBus, QuoteProvider, SearchWidget};

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::{price_widget, PriceReport, Report};

pub async fn run(
    args: &SearchArgs,
    provider: Arc<dyn QuoteProvider>,
    lookup_timeout: Duration,
) -> Result<Report, CliError> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(CliError::Command(String::from("query must not be empty")));
    }

    let bus = EventBus::new();
    let mut finder = SearchWidget::new(provider.clone());
    let mut price = price_widget(provider, lookup_timeout);
    finder.mount(&bus);
    price.mount(&bus);

    let state = finder.search(query).await;
    let mut report = Report {
        matches: Some(state.results.clone()),
        price: None,
    };

    if let Some(position) = args.select {
        if position == 0 || position > state.results.len() {
            return Err(CliError::Command(format!(
                "--select must be between 1 and {} for this search",
                state.results.len()
            )));
        }
        finder.select(position - 1);
        price.wait_until_settled().await;
        report.price = Some(PriceReport::from_widget(&price));
    }

    finder.dispose();
    price.dispose();
    Ok(report)
}
