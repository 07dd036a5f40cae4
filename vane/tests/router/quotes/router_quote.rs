use vane::{Market, Vane, VaneError};
use vane_mock::{CallLog, MockBehavior, MockConnector};

use crate::helpers::{fail, inst, intl, ok_quote};

#[tokio::test]
async fn exhausted_keeps_every_attempt_in_order() {
    let a = MockConnector::builder("a").quote_default(fail("a", 500)).build();
    let b = MockConnector::builder("b")
        .quote_default(MockBehavior::Fail(VaneError::network("b", "connection refused")))
        .build();

    let vane = Vane::builder().with_connector(a).with_connector(b).build().unwrap();
    let err = vane.quote(&inst("X")).await.unwrap_err();

    match &err {
        VaneError::Exhausted { errors, .. } => {
            assert_eq!(
                errors,
                &vec![
                    VaneError::http("a", 500),
                    VaneError::network("b", "connection refused"),
                ]
            );
        }
        other => panic!("expected Exhausted, got {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "no data available for X: b network error: connection refused"
    );
}

#[tokio::test]
async fn connectors_outside_the_market_are_skipped() {
    let log = CallLog::new();
    let domestic = MockConnector::builder("domestic")
        .markets(&[Market::Domestic])
        .quote_default(ok_quote(1.0))
        .log_to(&log)
        .build();
    let global = MockConnector::builder("global")
        .quote_default(ok_quote(2.0))
        .log_to(&log)
        .build();

    let vane = Vane::builder()
        .with_connector(domestic)
        .with_connector(global)
        .build()
        .unwrap();

    let q = vane.quote(&intl("^DJI")).await.unwrap();
    assert_eq!(q.source.as_deref(), Some("global"));
    assert_eq!(log.entries(), ["global"]);
}

#[tokio::test]
async fn no_quote_capable_connector_is_unsupported() {
    let weather_only = MockConnector::builder("w")
        .weather(MockBehavior::Return(vane_mock::fixtures::snapshot(10.0)))
        .build();
    let vane = Vane::builder().with_connector(weather_only).build().unwrap();
    let err = vane.quote(&inst("X")).await.unwrap_err();
    assert!(matches!(err, VaneError::Unsupported { .. }));
}

#[tokio::test]
async fn per_symbol_rules_win_over_the_default() {
    let m = MockConnector::builder("m")
        .quote_default(ok_quote(1.0))
        .quote_for("BAD", fail("m", 404))
        .build();
    let vane = Vane::builder().with_connector(m).build().unwrap();
    assert!(vane.quote(&inst("GOOD")).await.is_ok());
    let err = vane.quote(&inst("BAD")).await.unwrap_err();
    assert_eq!(err.last_cause(), &VaneError::http("m", 404));
}
