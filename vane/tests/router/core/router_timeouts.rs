use std::time::Duration;

use vane::Vane;
use vane_mock::{MockBehavior, MockConnector};

use crate::helpers::{inst, ok_quote};

#[tokio::test(start_paused = true)]
async fn hanging_source_times_out_and_falls_back() {
    let slow = MockConnector::builder("slow")
        .quote_default(MockBehavior::Hang)
        .timeout(Duration::from_millis(100))
        .build();
    let fast = MockConnector::builder("fast").quote_default(ok_quote(7.0)).build();

    let vane = Vane::builder()
        .with_connector(slow)
        .with_connector(fast)
        .build()
        .unwrap();

    let start = tokio::time::Instant::now();
    let q = vane.quote(&inst("X")).await.unwrap();
    assert_eq!(q.source.as_deref(), Some("fast"));
    crate::helpers::assert_elapsed(start, Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn builder_default_applies_when_connector_declares_none() {
    let slow = MockConnector::builder("slow")
        .quote_default(MockBehavior::Hang)
        .build();

    let vane = Vane::builder()
        .with_connector(slow)
        .provider_timeout(Duration::from_millis(250))
        .build()
        .unwrap();

    let start = tokio::time::Instant::now();
    let err = vane.quote(&inst("X")).await.unwrap_err();
    crate::helpers::assert_elapsed(start, Duration::from_millis(250));
    assert!(err.last_cause().is_timeout());
    assert_eq!(
        err.to_string(),
        "no data available for X: slow timed out after 250ms"
    );
}

#[tokio::test(start_paused = true)]
async fn delayed_answer_within_budget_is_kept() {
    let slowish = MockConnector::builder("slowish")
        .quote_default(ok_quote(3.0))
        .delay(Duration::from_millis(90))
        .timeout(Duration::from_millis(100))
        .build();

    let vane = Vane::builder().with_connector(slowish).build().unwrap();
    let q = vane.quote(&inst("X")).await.unwrap();
    assert_eq!(q.price, 3.0);
    assert!(q.error_message.is_none());
}
