use proptest::prelude::*;
use vane::Vane;
use vane_mock::fixtures::quote;
use vane_mock::{MockBehavior, MockConnector};

use crate::helpers::{fail, inst};

proptest! {
    #![proptest_config(ProptestConfig { cases: 30, .. ProptestConfig::default() })]

    #[test]
    fn output_matches_input_length_and_order(
        hits in proptest::collection::vec(any::<bool>(), 0..12),
        fallback_ok in any::<bool>(),
    ) {
        tokio_test::block_on(async move {
            tokio::time::pause();

            let symbols: Vec<String> = (0..hits.len()).map(|i| format!("S{i}")).collect();
            let batch_rows = symbols
                .iter()
                .zip(&hits)
                .filter(|(_, hit)| **hit)
                .map(|(s, _)| quote(s, 10.0));
            let batch = MockConnector::builder("batch").batch_returns(batch_rows).build();
            let behavior = if fallback_ok {
                MockBehavior::Return(quote("ANY", 20.0))
            } else {
                fail("single", 500)
            };
            let single = MockConnector::builder("single").quote_default(behavior).build();

            let vane = Vane::builder()
                .with_connector(batch)
                .with_connector(single)
                .build()
                .unwrap();

            let universe: Vec<_> = symbols.iter().map(|s| inst(s)).collect();
            let out = vane.quotes(&universe).await;

            assert_eq!(out.len(), universe.len());
            for ((q, s), hit) in out.iter().zip(&symbols).zip(&hits) {
                assert_eq!(&q.symbol, s);
                let expect_placeholder = !hit && !fallback_ok;
                assert_eq!(q.is_placeholder(), expect_placeholder);
            }
        });
    }
}
