use vane_types::{Instrument, ProviderKind, Quote, change_percent};

use super::NormalizeError;

/// Canonical quote numbers before instrument metadata is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteFields {
    /// Last price.
    pub price: f64,
    /// Absolute change.
    pub change: f64,
    /// Percentage change.
    pub change_percent: f64,
    /// Session open, if published.
    pub open: Option<f64>,
    /// Session high, if published.
    pub high: Option<f64>,
    /// Session low, if published.
    pub low: Option<f64>,
}

impl QuoteFields {
    /// Build from a price and previous close, deriving change and percentage.
    #[must_use]
    pub fn from_previous_close(
        price: f64,
        previous_close: f64,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
    ) -> Self {
        let change = price - previous_close;
        Self {
            price,
            change,
            change_percent: change_percent(change, previous_close),
            open: open.and_then(published),
            high: high.and_then(published),
            low: low.and_then(published),
        }
    }

    /// Parse one positional row using the layout for `kind`.
    ///
    /// # Errors
    /// Returns an error when the row is short, a numeric column is not a finite
    /// number, or `kind` has no positional layout.
    pub fn from_columns(kind: ProviderKind, columns: &[&str]) -> Result<Self, NormalizeError> {
        match kind {
            ProviderKind::DomesticMarket => DomesticRow::from_columns(columns).map(Into::into),
            ProviderKind::RegionalMarket => RegionalRow::from_columns(columns).map(Into::into),
            ProviderKind::InternationalMarket => {
                InternationalRow::from_columns(columns).map(Into::into)
            }
            other => Err(NormalizeError::NoRowLayout(other)),
        }
    }
}

// Upstream fills OHLC with 0 before the session opens.
fn published(v: f64) -> Option<f64> {
    (v.is_finite() && v > 0.0).then_some(v)
}

fn number(columns: &[&str], column: usize) -> Result<f64, NormalizeError> {
    let raw = columns.get(column).copied().unwrap_or_default();
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| NormalizeError::NotNumeric {
            column,
            value: raw.to_string(),
        })
}

const fn require(columns: &[&str], expected: usize) -> Result<(), NormalizeError> {
    if columns.len() < expected {
        return Err(NormalizeError::TooShort {
            expected,
            found: columns.len(),
        });
    }
    Ok(())
}

/// Mainland row: `name, open, previous close, price, high, low, ...`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomesticRow {
    /// Session open.
    pub open: f64,
    /// Previous close.
    pub previous_close: f64,
    /// Last price.
    pub price: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
}

impl DomesticRow {
    const OPEN: usize = 1;
    const PREVIOUS_CLOSE: usize = 2;
    const PRICE: usize = 3;
    const HIGH: usize = 4;
    const LOW: usize = 5;
    const MIN_COLUMNS: usize = 6;

    /// Parse a split row.
    ///
    /// # Errors
    /// Short rows and non-numeric columns.
    pub fn from_columns(columns: &[&str]) -> Result<Self, NormalizeError> {
        require(columns, Self::MIN_COLUMNS)?;
        Ok(Self {
            open: number(columns, Self::OPEN)?,
            previous_close: number(columns, Self::PREVIOUS_CLOSE)?,
            price: number(columns, Self::PRICE)?,
            high: number(columns, Self::HIGH)?,
            low: number(columns, Self::LOW)?,
        })
    }
}

impl From<DomesticRow> for QuoteFields {
    fn from(r: DomesticRow) -> Self {
        Self::from_previous_close(r.price, r.previous_close, Some(r.open), Some(r.high), Some(r.low))
    }
}

/// Hong Kong row: `code, name, open, previous close, high, low, price, ...`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionalRow {
    /// Session open.
    pub open: f64,
    /// Previous close.
    pub previous_close: f64,
    /// Session high.
    pub high: f64,
    /// Session low.
    pub low: f64,
    /// Last price.
    pub price: f64,
}

impl RegionalRow {
    const OPEN: usize = 2;
    const PREVIOUS_CLOSE: usize = 3;
    const HIGH: usize = 4;
    const LOW: usize = 5;
    const PRICE: usize = 6;
    const MIN_COLUMNS: usize = 7;

    /// Parse a split row.
    ///
    /// # Errors
    /// Short rows and non-numeric columns.
    pub fn from_columns(columns: &[&str]) -> Result<Self, NormalizeError> {
        require(columns, Self::MIN_COLUMNS)?;
        Ok(Self {
            open: number(columns, Self::OPEN)?,
            previous_close: number(columns, Self::PREVIOUS_CLOSE)?,
            high: number(columns, Self::HIGH)?,
            low: number(columns, Self::LOW)?,
            price: number(columns, Self::PRICE)?,
        })
    }
}

impl From<RegionalRow> for QuoteFields {
    fn from(r: RegionalRow) -> Self {
        Self::from_previous_close(r.price, r.previous_close, Some(r.open), Some(r.high), Some(r.low))
    }
}

/// Overseas row: `name, price, time, change, change percent`. No OHLC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternationalRow {
    /// Last price.
    pub price: f64,
    /// Absolute change.
    pub change: f64,
    /// Percentage change as published.
    pub change_percent: f64,
}

impl InternationalRow {
    const PRICE: usize = 1;
    const CHANGE: usize = 3;
    const CHANGE_PERCENT: usize = 4;
    const MIN_COLUMNS: usize = 5;

    /// Parse a split row.
    ///
    /// # Errors
    /// Short rows and non-numeric columns.
    pub fn from_columns(columns: &[&str]) -> Result<Self, NormalizeError> {
        require(columns, Self::MIN_COLUMNS)?;
        Ok(Self {
            price: number(columns, Self::PRICE)?,
            change: number(columns, Self::CHANGE)?,
            change_percent: number(columns, Self::CHANGE_PERCENT)?,
        })
    }
}

impl From<InternationalRow> for QuoteFields {
    fn from(r: InternationalRow) -> Self {
        Self {
            price: r.price,
            change: r.change,
            change_percent: r.change_percent,
            open: None,
            high: None,
            low: None,
        }
    }
}

/// Attach instrument metadata to canonical fields, rejecting implausible prices.
///
/// Returns `None` unless the price is finite and positive and the change
/// figures are finite.
#[must_use]
pub fn normalize_quote(instrument: &Instrument, fields: QuoteFields) -> Option<Quote> {
    if !fields.price.is_finite() || fields.price <= 0.0 {
        return None;
    }
    if !fields.change.is_finite() || !fields.change_percent.is_finite() {
        return None;
    }
    Some(Quote {
        symbol: instrument.symbol().to_string(),
        display_name: instrument.name().to_string(),
        flag: instrument.flag().map(str::to_string),
        price: fields.price,
        change: fields.change,
        change_percent: fields.change_percent,
        open: fields.open,
        high: fields.high,
        low: fields.low,
        error_message: None,
        source: None,
    })
}
