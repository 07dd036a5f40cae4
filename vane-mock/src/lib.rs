//! Scripted mock connectors for vane tests and examples.
//!
//! A [`MockConnector`] advertises only the capabilities it was scripted with,
//! counts every call per capability, and can append its name to a shared
//! [`CallLog`] so tests can assert the order sources were tried.

pub mod fixtures;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use vane_core::connector::{
    QuoteBatchProvider, QuoteProvider, RatesProvider, VaneConnector, WeatherProvider,
};
use vane_core::{
    Capability, Coordinates, CurrencyCode, Instrument, Market, Quote, RateTable, VaneError,
    WeatherSnapshot,
};

/// Instruction for how a method should behave.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value.
    Return(T),
    /// Fail with the provided error.
    Fail(VaneError),
    /// Hang indefinitely (simulate a stalled upstream).
    Hang,
}

/// Shared, ordered record of connector names as they are called.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    /// Empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, name: &'static str) {
        if let Ok(mut v) = self.0.lock() {
            v.push(name);
        }
    }

    /// Names in call order.
    #[must_use]
    pub fn entries(&self) -> Vec<&'static str> {
        self.0.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[derive(Default)]
struct Counters {
    batch: AtomicUsize,
    quote: AtomicUsize,
    weather: AtomicUsize,
    rates: AtomicUsize,
    per_symbol: Mutex<HashMap<String, usize>>,
}

/// Connector whose every capability is scripted up front.
pub struct MockConnector {
    name: &'static str,
    delay: Duration,
    timeout: Option<Duration>,
    markets: Option<Vec<Market>>,
    batch: Option<MockBehavior<HashMap<String, Quote>>>,
    quote_rules: HashMap<String, MockBehavior<Quote>>,
    quote_default: Option<MockBehavior<Quote>>,
    weather: Option<MockBehavior<WeatherSnapshot>>,
    rates: Option<MockBehavior<RateTable>>,
    log: Option<CallLog>,
    counters: Counters,
}

/// Builder for [`MockConnector`].
pub struct MockConnectorBuilder {
    inner: MockConnector,
}

impl MockConnector {
    /// Start scripting a connector called `name`.
    #[must_use]
    pub fn builder(name: &'static str) -> MockConnectorBuilder {
        MockConnectorBuilder {
            inner: Self {
                name,
                delay: Duration::ZERO,
                timeout: None,
                markets: None,
                batch: None,
                quote_rules: HashMap::new(),
                quote_default: None,
                weather: None,
                rates: None,
                log: None,
                counters: Counters::default(),
            },
        }
    }

    /// Number of calls made for `capability`.
    #[must_use]
    pub fn calls(&self, capability: Capability) -> usize {
        let c = match capability {
            Capability::QuoteBatch => &self.counters.batch,
            Capability::Quote => &self.counters.quote,
            Capability::Weather => &self.counters.weather,
            Capability::Rates => &self.counters.rates,
            _ => return 0,
        };
        c.load(Ordering::SeqCst)
    }

    /// Number of single-quote calls made for `symbol`.
    #[must_use]
    pub fn quote_calls_for(&self, symbol: &str) -> usize {
        self.counters
            .per_symbol
            .lock()
            .map(|m| m.get(symbol).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    async fn enter(&self, counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
        if let Some(log) = &self.log {
            log.push(self.name);
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    async fn play<T: Clone>(behavior: Option<&MockBehavior<T>>, capability: Capability) -> Result<T, VaneError> {
        match behavior {
            Some(MockBehavior::Return(v)) => Ok(v.clone()),
            Some(MockBehavior::Fail(e)) => Err(e.clone()),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(VaneError::unsupported(capability.as_str())),
        }
    }
}

impl MockConnectorBuilder {
    /// Sleep this long at the start of every call.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.inner.delay = delay;
        self
    }

    /// Declare a per-call timeout, as a provider spec would.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.inner.timeout = Some(timeout);
        self
    }

    /// Restrict quote support to these markets.
    #[must_use]
    pub fn markets(mut self, markets: &[Market]) -> Self {
        self.inner.markets = Some(markets.to_vec());
        self
    }

    /// Serve a batch that returns these quotes by symbol; other symbols are absent.
    #[must_use]
    pub fn batch_returns(mut self, quotes: impl IntoIterator<Item = Quote>) -> Self {
        let rows = quotes.into_iter().map(|q| (q.symbol.clone(), q)).collect();
        self.inner.batch = Some(MockBehavior::Return(rows));
        self
    }

    /// Serve a batch that fails as a whole.
    #[must_use]
    pub fn batch_fails(mut self, error: VaneError) -> Self {
        self.inner.batch = Some(MockBehavior::Fail(error));
        self
    }

    /// Serve a batch that never answers.
    #[must_use]
    pub fn batch_hangs(mut self) -> Self {
        self.inner.batch = Some(MockBehavior::Hang);
        self
    }

    /// Script single-quote behavior for one symbol.
    #[must_use]
    pub fn quote_for(mut self, symbol: &str, behavior: MockBehavior<Quote>) -> Self {
        self.inner.quote_rules.insert(symbol.to_string(), behavior);
        self
    }

    /// Script single-quote behavior for symbols without their own rule.
    ///
    /// A returned quote is re-labelled with the requested symbol.
    #[must_use]
    pub fn quote_default(mut self, behavior: MockBehavior<Quote>) -> Self {
        self.inner.quote_default = Some(behavior);
        self
    }

    /// Script weather behavior.
    #[must_use]
    pub fn weather(mut self, behavior: MockBehavior<WeatherSnapshot>) -> Self {
        self.inner.weather = Some(behavior);
        self
    }

    /// Script rates behavior.
    #[must_use]
    pub fn rates(mut self, behavior: MockBehavior<RateTable>) -> Self {
        self.inner.rates = Some(behavior);
        self
    }

    /// Append this connector's name to `log` on every call.
    #[must_use]
    pub fn log_to(mut self, log: &CallLog) -> Self {
        self.inner.log = Some(log.clone());
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(self.inner)
    }
}

impl VaneConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn supports_market(&self, market: Market) -> bool {
        self.markets.as_ref().is_none_or(|m| m.contains(&market))
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn as_quote_batch_provider(&self) -> Option<&dyn QuoteBatchProvider> {
        self.batch.as_ref().map(|_| self as &dyn QuoteBatchProvider)
    }

    fn as_quote_provider(&self) -> Option<&dyn QuoteProvider> {
        if self.quote_rules.is_empty() && self.quote_default.is_none() {
            return None;
        }
        Some(self as &dyn QuoteProvider)
    }

    fn as_weather_provider(&self) -> Option<&dyn WeatherProvider> {
        self.weather.as_ref().map(|_| self as &dyn WeatherProvider)
    }

    fn as_rates_provider(&self) -> Option<&dyn RatesProvider> {
        self.rates.as_ref().map(|_| self as &dyn RatesProvider)
    }
}

#[async_trait]
impl QuoteBatchProvider for MockConnector {
    async fn quote_batch(
        &self,
        instruments: &[Instrument],
    ) -> Result<Vec<Option<Quote>>, VaneError> {
        self.enter(&self.counters.batch).await;
        let rows = Self::play(self.batch.as_ref(), Capability::QuoteBatch).await?;
        Ok(instruments
            .iter()
            .map(|i| {
                rows.get(i.symbol())
                    .cloned()
                    .map(|q| q.with_source(self.name))
            })
            .collect())
    }
}

#[async_trait]
impl QuoteProvider for MockConnector {
    async fn quote(&self, instrument: &Instrument) -> Result<Quote, VaneError> {
        if let Ok(mut m) = self.counters.per_symbol.lock() {
            *m.entry(instrument.symbol().to_string()).or_default() += 1;
        }
        self.enter(&self.counters.quote).await;
        let behavior = self
            .quote_rules
            .get(instrument.symbol())
            .or(self.quote_default.as_ref());
        let mut q = Self::play(behavior, Capability::Quote).await?;
        instrument.symbol().clone_into(&mut q.symbol);
        Ok(q.with_source(self.name))
    }
}

#[async_trait]
impl WeatherProvider for MockConnector {
    async fn weather(&self, _coords: Coordinates) -> Result<WeatherSnapshot, VaneError> {
        self.enter(&self.counters.weather).await;
        Self::play(self.weather.as_ref(), Capability::Weather)
            .await
            .map(|s| s.with_source(self.name))
    }
}

#[async_trait]
impl RatesProvider for MockConnector {
    async fn rates(&self, _base: &CurrencyCode) -> Result<RateTable, VaneError> {
        self.enter(&self.counters.rates).await;
        Self::play(self.rates.as_ref(), Capability::Rates).await
    }
}
