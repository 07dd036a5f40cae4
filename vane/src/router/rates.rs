use vane_core::{Capability, CurrencyCode, RateTable, VaneError};

use crate::Vane;

impl Vane {
    /// Fetch the currency rate table for `base`.
    ///
    /// # Errors
    /// `Exhausted` when every rates connector failed, `Unsupported` when none
    /// is registered.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "vane::router", skip(self), fields(base = %base))
    )]
    pub async fn rates(&self, base: &CurrencyCode) -> Result<RateTable, VaneError> {
        let what = format!("rates for {base}");
        self.resolve(Capability::Rates, &what, self.ordered(None), |c| {
            c.as_rates_provider()?;
            let base = base.clone();
            Some(async move {
                match c.as_rates_provider() {
                    Some(p) => p.rates(&base).await,
                    None => Err(VaneError::unsupported(Capability::Rates.as_str())),
                }
            })
        })
        .await
    }
}
