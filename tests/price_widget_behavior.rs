//! Behavior-driven tests for the price widget lookup lifecycle.
//!
//! These tests verify WHAT the user sees after submissions, notifications,
//! and out-of-order network completions.

mod support;

use std::time::Duration;

use stockwidgets_core::{
    Component, EventBus, HttpResponse, LookupState, PageEvent, PriceContent, PriceWidget,
    QuoteError,
};
use support::{alphavantage, global_quote_body, quote, symbol, GatedProvider, ScriptedHttpClient};

// =============================================================================
// Price Widget: Provider Outcomes
// =============================================================================

#[tokio::test]
async fn when_provider_returns_a_price_widget_shows_it() {
    for (raw, price_text, expected) in [
        ("IBM", "130.5700", 130.57),
        ("AAPL", "150.0000", 150.0),
        ("BRK.A", "512345.1200", 512345.12),
    ] {
        // Given: a provider that knows the symbol
        let http = ScriptedHttpClient::new();
        http.quote(raw, HttpResponse::ok_json(global_quote_body(raw, price_text)));
        let widget = PriceWidget::new(std::sync::Arc::new(alphavantage(http)));

        // When: the user types the symbol and presses fetch
        widget.on_user_input(raw);
        let lookup = widget.submit().expect("submit should be enabled");
        lookup.await.expect("lookup task should finish");

        // Then: the price is displayed
        assert_eq!(widget.state().price(), Some(expected), "{raw}");
        assert_eq!(
            widget.render().content,
            PriceContent::Price(format!("Price: ${expected}"))
        );
    }
}

#[tokio::test]
async fn when_provider_has_no_price_widget_reports_invalid_symbol() {
    let http = ScriptedHttpClient::new();
    http.quote("NOPE", HttpResponse::ok_json(r#"{"Global Quote": {}}"#));
    let widget = PriceWidget::new(std::sync::Arc::new(alphavantage(http)));

    widget.on_user_input("NOPE");
    widget.submit().expect("enabled").await.expect("task finishes");

    assert_eq!(widget.state(), LookupState::Error(String::from("Invalid symbol!")));
    assert_eq!(widget.render().host_class, "stock-price stock-price--error");
}

#[tokio::test]
async fn when_provider_rate_limits_widget_asks_user_to_wait_even_with_a_price() {
    let http = ScriptedHttpClient::new();
    http.quote(
        "IBM",
        HttpResponse::ok_json(
            r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute", "Global Quote": {"05. price": "130.57"}}"#,
        ),
    );
    let widget = PriceWidget::new(std::sync::Arc::new(alphavantage(http)));

    widget.on_user_input("IBM");
    widget.submit().expect("enabled").await.expect("task finishes");

    let content = widget.render().content.to_string();
    assert!(content.starts_with("Please wait!"), "{content}");
    assert!(widget.state().is_error());
}

#[tokio::test]
async fn when_transport_fails_widget_reports_invalid() {
    let http = ScriptedHttpClient::new();
    http.quote("IBM", HttpResponse::new(500, "upstream exploded"));
    let widget = PriceWidget::new(std::sync::Arc::new(alphavantage(http)));

    widget.on_user_input("IBM");
    widget.submit().expect("enabled").await.expect("task finishes");

    assert_eq!(widget.state(), LookupState::Error(String::from("Invalid!")));
}

#[tokio::test]
async fn when_a_new_lookup_succeeds_the_previous_error_is_cleared() {
    let provider = GatedProvider::new();
    provider.ready("NOPE", Err(QuoteError::SymbolNotFound { symbol: String::from("NOPE") }));
    provider.ready("IBM", Ok(quote("IBM", 130.57)));
    let widget = PriceWidget::new(provider);

    widget.set_stock_symbol("NOPE").expect("valid").expect("lookup starts").await.expect("done");
    assert!(widget.state().is_error());

    widget.set_stock_symbol("IBM").expect("valid").expect("lookup starts").await.expect("done");
    assert_eq!(widget.state().price(), Some(130.57));
    assert_eq!(widget.render().host_class, "stock-price");
}

// =============================================================================
// Price Widget: Stale Responses
// =============================================================================

#[tokio::test]
async fn when_older_lookup_finishes_last_the_newer_result_stays_visible() {
    // Given: IBM then AAPL submitted back to back
    let provider = GatedProvider::new();
    let ibm = provider.gate("IBM");
    let aapl = provider.gate("AAPL");
    let bus = EventBus::new();
    let mut widget = PriceWidget::new(provider.clone());
    widget.mount(&bus);

    let ibm_lookup = widget
        .set_stock_symbol("IBM")
        .expect("valid")
        .expect("lookup starts");
    bus.publish(&PageEvent::SymbolSelected(String::from("AAPL")));
    assert!(widget.state().is_loading());

    // When: AAPL answers first, then IBM
    aapl.send(Ok(quote("AAPL", 150.0))).expect("aapl lookup waiting");
    let settled = widget.wait_until_settled().await;
    ibm.send(Ok(quote("IBM", 130.0))).expect("ibm lookup waiting");
    ibm_lookup.await.expect("ibm task finishes");

    // Then: AAPL's price is shown, IBM's late answer is ignored
    assert_eq!(settled.price(), Some(150.0));
    assert_eq!(widget.state().price(), Some(150.0));
    assert_eq!(widget.stock_symbol(), Some(symbol("AAPL")));
    assert_eq!(provider.calls(), vec!["IBM", "AAPL"]);
}

#[tokio::test]
async fn when_older_lookup_fails_last_the_newer_success_is_not_overwritten() {
    let provider = GatedProvider::new();
    let ibm = provider.gate("IBM");
    provider.ready("MSFT", Ok(quote("MSFT", 410.0)));
    let widget = PriceWidget::new(provider);

    let ibm_lookup = widget.set_stock_symbol("IBM").expect("valid").expect("starts");
    let msft_lookup = widget.set_stock_symbol("MSFT").expect("valid").expect("starts");
    msft_lookup.await.expect("msft finishes");

    ibm.send(Err(QuoteError::status(500))).expect("ibm waiting");
    ibm_lookup.await.expect("ibm finishes");

    assert_eq!(widget.state().price(), Some(410.0));
}

#[tokio::test]
async fn newer_lookup_still_pending_keeps_the_spinner_up() {
    let provider = GatedProvider::new();
    provider.ready("IBM", Ok(quote("IBM", 130.0)));
    let _aapl = provider.gate("AAPL");
    let widget = PriceWidget::new(provider);

    let ibm_lookup = widget.set_stock_symbol("IBM").expect("valid").expect("starts");
    widget.set_stock_symbol("AAPL").expect("valid").expect("starts");
    ibm_lookup.await.expect("ibm finishes");

    assert!(widget.state().is_loading());
    assert_eq!(widget.render().content, PriceContent::Spinner);
    assert!(!widget.submit_enabled());
}

// =============================================================================
// Price Widget: Input Gating and Notifications
// =============================================================================

#[tokio::test]
async fn fetch_button_is_disabled_for_blank_input_or_while_loading() {
    let provider = GatedProvider::new();
    let release = provider.gate("AAPL");
    let widget = PriceWidget::new(provider);

    widget.on_user_input("");
    assert!(!widget.submit_enabled());
    widget.on_user_input("  ");
    assert!(!widget.submit_enabled());
    assert!(widget.submit().is_none());

    widget.on_user_input("AAPL");
    assert!(widget.submit_enabled());
    let lookup = widget.submit().expect("enabled");
    assert!(!widget.submit_enabled());
    assert!(widget.submit().is_none(), "second press while loading is ignored");

    release.send(Ok(quote("AAPL", 1.0))).expect("waiting");
    lookup.await.expect("finishes");
    assert!(widget.submit_enabled());
}

#[tokio::test]
async fn same_symbol_notification_is_ignored_and_different_one_fetches_once() {
    let provider = GatedProvider::new();
    provider.ready("IBM", Ok(quote("IBM", 130.0)));
    provider.ready("MSFT", Ok(quote("MSFT", 410.0)));
    let bus = EventBus::new();
    let mut widget = PriceWidget::new(provider.clone());
    widget.mount(&bus);

    widget.set_stock_symbol("IBM").expect("valid").expect("starts").await.expect("done");
    assert!(widget.set_stock_symbol("IBM").expect("valid").is_none());

    bus.publish(&PageEvent::SymbolSelected(String::from("IBM")));
    assert!(!widget.state().is_loading(), "same symbol must not start a lookup");

    bus.publish(&PageEvent::SymbolSelected(String::from("MSFT")));
    assert!(widget.state().is_loading());
    assert_eq!(widget.render().input, "MSFT");
    let settled = widget.wait_until_settled().await;

    assert_eq!(settled.price(), Some(410.0));
    assert_eq!(provider.calls(), vec!["IBM", "MSFT"]);
}

#[tokio::test]
async fn disposed_widget_ignores_notifications() {
    let provider = GatedProvider::new();
    let bus = EventBus::new();
    let mut widget = PriceWidget::new(provider.clone());
    widget.mount(&bus);
    widget.dispose();

    assert_eq!(bus.publish(&PageEvent::SymbolSelected(String::from("AAPL"))), 0);
    assert_eq!(widget.state(), LookupState::Idle);
    assert!(!widget.is_mounted());
}

#[tokio::test]
async fn preset_symbol_is_fetched_on_mount() {
    let provider = GatedProvider::new();
    provider.ready("IBM", Ok(quote("IBM", 130.57)));
    let bus = EventBus::new();
    let mut widget = PriceWidget::builder(provider.clone())
        .stock_symbol(symbol("IBM"))
        .build();
    assert_eq!(widget.render().input, "IBM");
    assert_eq!(widget.state(), LookupState::Idle);

    widget.mount(&bus);
    let settled = widget.wait_until_settled().await;

    assert_eq!(settled.price(), Some(130.57));
    assert_eq!(provider.calls(), vec!["IBM"]);
}

#[tokio::test]
async fn hung_lookup_ends_in_error_after_timeout() {
    let provider = GatedProvider::new();
    let widget = PriceWidget::builder(provider)
        .lookup_timeout(Duration::from_millis(20))
        .build();

    widget
        .set_stock_symbol("SLOW")
        .expect("valid")
        .expect("starts")
        .await
        .expect("finishes");

    assert_eq!(widget.state(), LookupState::Error(String::from("Invalid!")));
}

#[tokio::test]
async fn watch_receiver_observes_loading_then_result() {
    let provider = GatedProvider::new();
    let release = provider.gate("IBM");
    let widget = PriceWidget::new(provider);
    let mut states = widget.watch();

    widget.set_stock_symbol("IBM").expect("valid");
    states.changed().await.expect("sender alive");
    assert!(states.borrow_and_update().is_loading());

    release.send(Ok(quote("IBM", 99.5))).expect("waiting");
    states.changed().await.expect("sender alive");
    assert_eq!(states.borrow().price(), Some(99.5));
}
