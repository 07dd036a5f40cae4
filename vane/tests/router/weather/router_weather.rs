use vane::{Capability, Coordinates, Vane, VaneError};
use vane_mock::fixtures::snapshot;
use vane_mock::{CallLog, MockBehavior, MockConnector};

fn shanghai() -> Coordinates {
    Coordinates::new(31.23, 121.47).unwrap()
}

#[tokio::test]
async fn weather_falls_back_to_the_next_source() {
    let log = CallLog::new();
    let primary = MockConnector::builder("primary")
        .weather(MockBehavior::Fail(VaneError::http("primary", 503)))
        .log_to(&log)
        .build();
    let alternate = MockConnector::builder("alternate")
        .weather(MockBehavior::Return(snapshot(18.0)))
        .log_to(&log)
        .build();

    let vane = Vane::builder()
        .with_connector(primary)
        .with_connector(alternate)
        .build()
        .unwrap();

    let w = vane.weather(shanghai()).await.unwrap();
    assert_eq!(w.current.temperature, 18.0);
    assert_eq!(w.source.as_deref(), Some("alternate"));
    assert_eq!(w.daily.len(), 3);
    assert_eq!(log.entries(), ["primary", "alternate"]);
}

#[tokio::test]
async fn quote_only_connectors_are_not_asked_for_weather() {
    let quotes = MockConnector::builder("quotes")
        .quote_default(MockBehavior::Return(vane_mock::fixtures::quote("X", 1.0)))
        .build();
    let weather = MockConnector::builder("weather")
        .weather(MockBehavior::Return(snapshot(5.0)))
        .build();

    let vane = Vane::builder()
        .with_connector(quotes.clone())
        .with_connector(weather)
        .build()
        .unwrap();

    assert!(vane.weather(shanghai()).await.is_ok());
    assert_eq!(quotes.calls(Capability::Weather), 0);
}

#[tokio::test]
async fn weather_exhaustion_names_the_coordinates() {
    let a = MockConnector::builder("a")
        .weather(MockBehavior::Fail(VaneError::parse("a", "missing current")))
        .build();
    let vane = Vane::builder().with_connector(a).build().unwrap();

    let err = vane.weather(shanghai()).await.unwrap_err();
    assert!(matches!(err, VaneError::Exhausted { .. }));
    assert!(err.to_string().contains("31.23,121.47"));
    assert!(err.to_string().ends_with("a returned an unexpected payload: missing current"));
}

#[tokio::test]
async fn weather_without_a_provider_is_unsupported() {
    let m = MockConnector::builder("m")
        .quote_default(MockBehavior::Return(vane_mock::fixtures::quote("X", 1.0)))
        .build();
    let vane = Vane::builder().with_connector(m).build().unwrap();
    assert!(matches!(
        vane.weather(shanghai()).await,
        Err(VaneError::Unsupported { .. })
    ));
}
