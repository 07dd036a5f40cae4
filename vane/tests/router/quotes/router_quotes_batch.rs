use std::time::Duration;

use vane::{Capability, Vane, VaneError};
use vane_mock::fixtures::quote;
use vane_mock::MockConnector;

use crate::helpers::{fail, inst, ok_quote};

#[tokio::test]
async fn batch_misses_are_filled_by_fallback() {
    let batch = MockConnector::builder("batch")
        .batch_returns([quote("A", 10.0), quote("C", 30.0)])
        .build();
    let single = MockConnector::builder("single").quote_default(ok_quote(20.0)).build();

    let vane = Vane::builder()
        .with_connector(batch.clone())
        .with_connector(single.clone())
        .build()
        .unwrap();

    let out = vane.quotes(&[inst("A"), inst("B"), inst("C")]).await;

    let symbols: Vec<_> = out.iter().map(|q| q.symbol.as_str()).collect();
    assert_eq!(symbols, ["A", "B", "C"]);
    let prices: Vec<_> = out.iter().map(|q| q.price).collect();
    assert_eq!(prices, [10.0, 20.0, 30.0]);
    let sources: Vec<_> = out.iter().map(|q| q.source.as_deref()).collect();
    assert_eq!(sources, [Some("batch"), Some("single"), Some("batch")]);

    assert_eq!(batch.calls(Capability::QuoteBatch), 1);
    assert_eq!(single.calls(Capability::Quote), 1);
    assert_eq!(single.quote_calls_for("B"), 1);
    assert_eq!(vane::join_sources(out.iter().map(|q| q.source.as_deref())), "batch+single");
}

#[tokio::test]
async fn whole_batch_failure_falls_through_per_symbol() {
    let batch = MockConnector::builder("batch")
        .batch_fails(VaneError::http("batch", 503))
        .build();
    let single = MockConnector::builder("single").quote_default(ok_quote(5.0)).build();

    let vane = Vane::builder()
        .with_connector(batch.clone())
        .with_connector(single.clone())
        .build()
        .unwrap();

    let out = vane.quotes(&[inst("A"), inst("B")]).await;
    assert!(out.iter().all(|q| q.source.as_deref() == Some("single")));
    assert_eq!(batch.calls(Capability::QuoteBatch), 1);
    assert_eq!(single.calls(Capability::Quote), 2);
}

#[tokio::test]
async fn implausible_batch_rows_are_treated_as_misses() {
    let batch = MockConnector::builder("batch")
        .batch_returns([quote("A", 0.0), quote("B", 12.0)])
        .build();
    let single = MockConnector::builder("single").quote_default(ok_quote(9.0)).build();

    let vane = Vane::builder()
        .with_connector(batch)
        .with_connector(single.clone())
        .build()
        .unwrap();

    let out = vane.quotes(&[inst("A"), inst("B")]).await;
    assert_eq!(out[0].price, 9.0);
    assert_eq!(out[1].price, 12.0);
    assert_eq!(single.quote_calls_for("A"), 1);
    assert_eq!(single.quote_calls_for("B"), 0);
}

#[tokio::test(start_paused = true)]
async fn hanging_batch_is_cut_by_the_batch_timeout() {
    let batch = MockConnector::builder("batch").batch_hangs().build();
    let single = MockConnector::builder("single").quote_default(ok_quote(1.0)).build();

    let vane = Vane::builder()
        .with_connector(batch)
        .with_connector(single)
        .batch_timeout(Duration::from_millis(300))
        .build()
        .unwrap();

    let start = tokio::time::Instant::now();
    let out = vane.quotes(&[inst("A")]).await;
    crate::helpers::assert_elapsed(start, Duration::from_millis(300));
    assert_eq!(out[0].source.as_deref(), Some("single"));
}

#[tokio::test]
async fn unresolved_symbols_become_placeholders() {
    let batch = MockConnector::builder("batch")
        .batch_returns([quote("A", 10.0)])
        .build();
    let single = MockConnector::builder("single").quote_default(fail("single", 500)).build();

    let vane = Vane::builder()
        .with_connector(batch)
        .with_connector(single)
        .build()
        .unwrap();

    let universe = [inst("A"), inst("B")];
    let out = vane.quotes(&universe).await;
    assert_eq!(out.len(), 2);
    assert!(!out[0].is_placeholder());

    let b = &out[1];
    assert!(b.is_placeholder());
    assert_eq!(b.symbol, "B");
    assert_eq!(b.price, 0.0);
    assert_eq!(b.change, 0.0);
    assert_eq!(b.open, None);
    assert_eq!(
        b.error_message.as_deref(),
        Some("no data available for B: HTTP 500 from single")
    );
}

#[tokio::test]
async fn empty_input_makes_no_calls() {
    let batch = MockConnector::builder("batch").batch_returns([]).build();
    let single = MockConnector::builder("single").quote_default(ok_quote(1.0)).build();

    let vane = Vane::builder()
        .with_connector(batch.clone())
        .with_connector(single.clone())
        .build()
        .unwrap();

    assert!(vane.quotes(&[]).await.is_empty());
    assert_eq!(batch.calls(Capability::QuoteBatch), 0);
    assert_eq!(single.calls(Capability::Quote), 0);
}

#[tokio::test]
async fn without_a_batch_source_every_symbol_resolves_singly() {
    let single = MockConnector::builder("single").quote_default(ok_quote(4.0)).build();
    let vane = Vane::builder().with_connector(single.clone()).build().unwrap();

    let out = vane.quotes(&[inst("A"), inst("B"), inst("C")]).await;
    assert_eq!(out.len(), 3);
    assert_eq!(single.calls(Capability::Quote), 3);
}
