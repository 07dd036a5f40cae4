use vane::Vane;
use vane_mock::{CallLog, MockConnector};

use crate::helpers::{as_dyn, fail, inst, ok_quote};

#[tokio::test]
async fn registration_order_is_the_fallback_order() {
    let log = CallLog::new();
    let a = MockConnector::builder("a").quote_default(fail("a", 500)).log_to(&log).build();
    let b = MockConnector::builder("b").quote_default(fail("b", 502)).log_to(&log).build();
    let c = MockConnector::builder("c").quote_default(ok_quote(42.0)).log_to(&log).build();

    let vane = Vane::builder()
        .with_connector(a)
        .with_connector(b)
        .with_connector(c)
        .build()
        .unwrap();

    let q = vane.quote(&inst("X")).await.unwrap();
    assert_eq!(q.price, 42.0);
    assert_eq!(q.source.as_deref(), Some("c"));
    assert_eq!(log.entries(), ["a", "b", "c"]);
}

#[tokio::test]
async fn first_success_stops_the_chain() {
    let a = MockConnector::builder("a").quote_default(ok_quote(1.0)).build();
    let b = MockConnector::builder("b").quote_default(ok_quote(2.0)).build();

    let vane = Vane::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .build()
        .unwrap();

    let q = vane.quote(&inst("X")).await.unwrap();
    assert_eq!(q.price, 1.0);
    assert_eq!(a.quote_calls_for("X"), 1);
    assert_eq!(b.quote_calls_for("X"), 0);
}

#[tokio::test]
async fn per_symbol_preference_reorders_only_that_symbol() {
    let log = CallLog::new();
    let a = MockConnector::builder("a").quote_default(ok_quote(1.0)).log_to(&log).build();
    let b = MockConnector::builder("b").quote_default(ok_quote(2.0)).log_to(&log).build();

    let vane = Vane::builder()
        .with_connector(a.clone())
        .with_connector(b.clone())
        .prefer_symbol("PREF", &[as_dyn(&b)])
        .build()
        .unwrap();

    assert_eq!(vane.quote(&inst("PREF")).await.unwrap().price, 2.0);
    assert_eq!(vane.quote(&inst("OTHER")).await.unwrap().price, 1.0);
    assert_eq!(log.entries(), ["b", "a"]);
}
