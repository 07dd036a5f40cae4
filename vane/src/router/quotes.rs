use vane_core::{Capability, Instrument, Quote, VaneError};

use crate::Vane;

fn placeholder_message(inst: &Instrument, e: &VaneError) -> String {
    format!("no data available for {}: {}", inst.symbol(), e.last_cause())
}

impl Vane {
    /// Fetch a point-in-time quote for a single instrument.
    ///
    /// Tries every quote-capable connector that supports the instrument's market,
    /// in per-symbol preference order, one at a time.
    ///
    /// # Errors
    /// `Exhausted` when every attempt failed, `Unsupported` when no connector can
    /// quote this instrument.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "vane::router",
            skip(self),
            fields(symbol = %inst.symbol()),
        )
    )]
    pub async fn quote(&self, inst: &Instrument) -> Result<Quote, VaneError> {
        let market = inst.market();
        self.resolve(
            Capability::Quote,
            inst.symbol(),
            self.ordered(Some(inst.symbol())),
            |c| {
                if !c.supports_market(market) || c.as_quote_provider().is_none() {
                    return None;
                }
                let inst = inst.clone();
                Some(async move {
                    match c.as_quote_provider() {
                        Some(p) => p.quote(&inst).await,
                        None => Err(VaneError::unsupported(Capability::Quote.as_str())),
                    }
                })
            },
        )
        .await
    }

    /// Fetch quotes for a tracked list: one batch request, then concurrent
    /// per-symbol fallback for whatever the batch did not deliver.
    ///
    /// Behavior:
    /// - The output has the same length and order as `instruments`.
    /// - The first registered batch-capable connector is called exactly once. If
    ///   it fails as a whole, every item falls through to per-symbol resolution.
    /// - Missing items resolve concurrently; one slow symbol does not delay the
    ///   others beyond its own chain.
    /// - Items no connector could resolve become placeholders carrying an
    ///   `error_message`; this method itself never fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "vane::router",
            skip(self, instruments),
            fields(count = instruments.len()),
        )
    )]
    pub async fn quotes(&self, instruments: &[Instrument]) -> Vec<Quote> {
        if instruments.is_empty() {
            return vec![];
        }

        let batch = self.batch_quotes(instruments).await;

        let tasks = instruments.iter().zip(batch).map(|(inst, hit)| async move {
            if let Some(q) = hit {
                return q;
            }
            match self.quote(inst).await {
                Ok(q) => q,
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(symbol = %inst.symbol(), error = %e, "no source resolved symbol");
                    Quote::placeholder(inst, placeholder_message(inst, &e))
                }
            }
        });

        futures::future::join_all(tasks).await
    }

    async fn batch_quotes(&self, instruments: &[Instrument]) -> Vec<Option<Quote>> {
        let absent = || vec![None; instruments.len()];
        let Some(c) = self
            .connectors
            .iter()
            .find(|c| c.as_quote_batch_provider().is_some())
            .cloned()
        else {
            return absent();
        };
        let Some(p) = c.as_quote_batch_provider() else {
            return absent();
        };
        let timeout = self
            .cfg
            .batch_timeout
            .unwrap_or_else(|| self.timeout_for(c.as_ref()));

        match Self::provider_call_with_timeout(
            c.name(),
            Capability::QuoteBatch,
            timeout,
            p.quote_batch(instruments),
        )
        .await
        {
            Ok(rows) if rows.len() == instruments.len() => rows
                .into_iter()
                .map(|r| r.filter(|q| q.price.is_finite() && q.price > 0.0))
                .collect(),
            Ok(_rows) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    connector = c.name(),
                    expected = instruments.len(),
                    got = _rows.len(),
                    "batch row count mismatch; discarding batch"
                );
                absent()
            }
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(connector = c.name(), error = %_e, "batch request failed");
                absent()
            }
        }
    }
}
