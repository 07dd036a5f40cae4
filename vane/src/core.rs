use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use vane_core::connector::ConnectorKey;
use vane_core::{Capability, VaneConfig, VaneConnector, VaneError};

use crate::router::util::collapse_errors;

/// Orchestrator that routes requests across registered connectors.
pub struct Vane {
    pub(crate) connectors: Vec<Arc<dyn VaneConnector>>,
    pub(crate) cfg: VaneConfig,
    pub(crate) per_symbol_priority: HashMap<String, Vec<ConnectorKey>>,
}

/// Builder for constructing a `Vane` orchestrator with custom configuration.
pub struct VaneBuilder {
    connectors: Vec<Arc<dyn VaneConnector>>,
    cfg: VaneConfig,
    per_symbol_priority: HashMap<String, Vec<ConnectorKey>>,
}

impl Default for VaneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VaneBuilder {
    /// Create a new builder with no connectors and a 10 s default provider timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: VaneConfig::default(),
            per_symbol_priority: HashMap::new(),
        }
    }

    /// Register a connector.
    ///
    /// Registration order is the fallback order for every capability unless a
    /// symbol has an explicit preference. The first registered batch-capable
    /// connector is the primary batch source.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn VaneConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set preferred connectors for one symbol.
    ///
    /// Listed connectors are tried first, in the given order; unlisted but
    /// capable connectors still follow in registration order.
    #[must_use]
    pub fn prefer_symbol(mut self, symbol: &str, connectors: &[Arc<dyn VaneConnector>]) -> Self {
        let keys = connectors.iter().map(|c| c.key()).collect();
        self.per_symbol_priority.insert(symbol.to_string(), keys);
        self
    }

    /// Per-call budget for connectors that declare no timeout of their own.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Budget for the batch request, overriding the batch connector's own.
    #[must_use]
    pub const fn batch_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.batch_timeout = Some(timeout);
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no connector is registered or a timeout is zero.
    pub fn build(self) -> Result<Vane, VaneError> {
        if self.connectors.is_empty() {
            return Err(VaneError::InvalidArg(
                "at least one connector must be registered".into(),
            ));
        }
        if self.cfg.provider_timeout.is_zero() || self.cfg.batch_timeout.is_some_and(|t| t.is_zero())
        {
            return Err(VaneError::InvalidArg("timeouts must be positive".into()));
        }
        Ok(Vane {
            connectors: self.connectors,
            cfg: self.cfg,
            per_symbol_priority: self.per_symbol_priority,
        })
    }
}

impl Vane {
    /// Start building a new `Vane` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use vane_providers::{SinaConnector, YahooConnector};
    ///
    /// let sina = Arc::new(SinaConnector::new());
    /// let yahoo = Arc::new(YahooConnector::new());
    ///
    /// let vane = vane::Vane::builder()
    ///     .with_connector(sina)
    ///     .with_connector(yahoo)
    ///     .provider_timeout(std::time::Duration::from_secs(8))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> VaneBuilder {
        VaneBuilder::new()
    }

    /// Names of the registered connectors in registration order.
    #[must_use]
    pub fn connector_names(&self) -> Vec<&'static str> {
        self.connectors.iter().map(|c| c.name()).collect()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &VaneConfig {
        &self.cfg
    }

    pub(crate) fn ordered(&self, symbol: Option<&str>) -> Vec<Arc<dyn VaneConnector>> {
        let mut out: Vec<(usize, Arc<dyn VaneConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();
        if let Some(pref) = symbol.and_then(|s| self.per_symbol_priority.get(s)) {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, k)| (k.as_str(), i))
                .collect();
            out.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
        }
        out.into_iter().map(|(_, c)| c).collect()
    }

    pub(crate) fn timeout_for(&self, c: &dyn VaneConnector) -> Duration {
        c.timeout().unwrap_or(self.cfg.provider_timeout)
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "vane::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, VaneError>
    where
        Fut: core::future::Future<Output = Result<T, VaneError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(VaneError::timeout(connector_name, timeout)))
    }

    /// Sequential fallback over `connectors`: first success wins.
    ///
    /// `call` returns `None` for connectors that cannot serve the query; they are
    /// skipped without counting as an attempt. Each attempt is bounded by the
    /// connector's timeout. When every attempt fails the result is `Exhausted`
    /// carrying all attempt errors in order; with no attempt it is `Unsupported`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "vane::core::resolve",
            skip(self, connectors, call),
            fields(capability = %capability, what = %what),
        )
    )]
    pub(crate) async fn resolve<T, F, Fut>(
        &self,
        capability: Capability,
        what: &str,
        connectors: Vec<Arc<dyn VaneConnector>>,
        call: F,
    ) -> Result<T, VaneError>
    where
        F: Fn(Arc<dyn VaneConnector>) -> Option<Fut>,
        Fut: core::future::Future<Output = Result<T, VaneError>>,
    {
        let mut attempted_any = false;
        let mut errors: Vec<VaneError> = Vec::new();

        for c in connectors {
            let Some(fut) = call(c.clone()) else {
                continue;
            };
            attempted_any = true;
            let timeout = self.timeout_for(c.as_ref());
            match Self::provider_call_with_timeout(c.name(), capability, timeout, fut).await {
                Ok(v) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(connector = c.name(), "attempt succeeded");
                    return Ok(v);
                }
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        connector = c.name(),
                        error = %e,
                        item_level = e.is_item_level(),
                        "attempt failed; falling back"
                    );
                    errors.push(e);
                }
            }
        }

        Err(collapse_errors(capability, what, attempted_any, errors))
    }
}
