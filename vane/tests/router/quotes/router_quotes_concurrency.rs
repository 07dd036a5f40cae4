use std::time::Duration;

use vane::{Capability, Vane};
use vane_mock::{MockBehavior, MockConnector};

use crate::helpers::{inst, ok_quote};

#[tokio::test(start_paused = true)]
async fn misses_resolve_concurrently() {
    let batch = MockConnector::builder("batch").batch_returns([]).build();
    let single = MockConnector::builder("single")
        .quote_default(ok_quote(1.0))
        .delay(Duration::from_millis(100))
        .build();

    let vane = Vane::builder()
        .with_connector(batch)
        .with_connector(single.clone())
        .build()
        .unwrap();

    let start = tokio::time::Instant::now();
    let out = vane.quotes(&[inst("A"), inst("B"), inst("C")]).await;
    assert_eq!(out.len(), 3);
    assert_eq!(single.calls(Capability::Quote), 3);
    crate::helpers::assert_elapsed(start, Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn one_stalled_symbol_does_not_hold_the_others_past_its_chain() {
    let stalled = MockConnector::builder("stalled")
        .quote_for("SLOW", MockBehavior::Hang)
        .quote_default(ok_quote(2.0))
        .timeout(Duration::from_millis(500))
        .build();
    let backup = MockConnector::builder("backup").quote_default(ok_quote(3.0)).build();

    let vane = Vane::builder()
        .with_connector(stalled)
        .with_connector(backup)
        .build()
        .unwrap();

    let start = tokio::time::Instant::now();
    let out = vane.quotes(&[inst("FAST"), inst("SLOW")]).await;
    assert_eq!(out[0].source.as_deref(), Some("stalled"));
    assert_eq!(out[1].source.as_deref(), Some("backup"));
    crate::helpers::assert_elapsed(start, Duration::from_millis(500));
}
