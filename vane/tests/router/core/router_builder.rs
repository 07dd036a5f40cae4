use std::time::Duration;

use vane::{Vane, VaneError};
use vane_mock::MockConnector;

use crate::helpers::ok_quote;

#[test]
fn build_requires_a_connector() {
    let err = Vane::builder().build().err().expect("empty builder must fail");
    assert!(matches!(err, VaneError::InvalidArg(_)));
}

#[test]
fn build_rejects_zero_timeouts() {
    let m = MockConnector::builder("m").quote_default(ok_quote(1.0)).build();
    let err = Vane::builder()
        .with_connector(m.clone())
        .provider_timeout(Duration::ZERO)
        .build()
        .err()
        .expect("zero provider timeout must fail");
    assert!(matches!(err, VaneError::InvalidArg(_)));

    let err = Vane::builder()
        .with_connector(m)
        .batch_timeout(Duration::ZERO)
        .build()
        .err()
        .expect("zero batch timeout must fail");
    assert!(matches!(err, VaneError::InvalidArg(_)));
}

#[test]
fn connector_names_follow_registration() {
    let a = MockConnector::builder("a").quote_default(ok_quote(1.0)).build();
    let b = MockConnector::builder("b").quote_default(ok_quote(1.0)).build();
    let vane = Vane::builder()
        .with_connector(b)
        .with_connector(a)
        .provider_timeout(Duration::from_secs(3))
        .build()
        .unwrap();
    assert_eq!(vane.connector_names(), ["b", "a"]);
    assert_eq!(vane.config().provider_timeout, Duration::from_secs(3));
}
