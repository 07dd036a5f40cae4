use std::time::Duration;

use vane::{CurrencyCode, Vane, VaneError};
use vane_mock::fixtures::rate_table;
use vane_mock::{MockBehavior, MockConnector};

#[tokio::test]
async fn rates_fall_back_and_pass_the_table_through() {
    let a = MockConnector::builder("a")
        .rates(MockBehavior::Fail(VaneError::network("a", "reset")))
        .build();
    let b = MockConnector::builder("b")
        .rates(MockBehavior::Return(rate_table("CNY", 0.14)))
        .build();

    let vane = Vane::builder().with_connector(a).with_connector(b).build().unwrap();
    let base = CurrencyCode::parse("cny").unwrap();
    let table = vane.rates(&base).await.unwrap();
    assert_eq!(table.rate("USD"), Some(0.14));
    assert_eq!(table.as_value()["base"], "CNY");
}

#[tokio::test(start_paused = true)]
async fn rates_exhaustion_after_timeouts() {
    let a = MockConnector::builder("a")
        .rates(MockBehavior::Hang)
        .timeout(Duration::from_millis(50))
        .build();
    let b = MockConnector::builder("b")
        .rates(MockBehavior::Hang)
        .timeout(Duration::from_millis(70))
        .build();

    let vane = Vane::builder().with_connector(a).with_connector(b).build().unwrap();
    let start = tokio::time::Instant::now();
    let err = vane.rates(&CurrencyCode::parse("USD").unwrap()).await.unwrap_err();

    crate::helpers::assert_elapsed(start, Duration::from_millis(120));
    assert_eq!(err.clone().flatten().len(), 2);
    assert_eq!(err.to_string(), "no data available for rates for USD: b timed out after 70ms");
}
