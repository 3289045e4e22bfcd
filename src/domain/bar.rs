//! Price bar representation.

use chrono::NaiveDateTime;

/// One observation in a price series. `price` is the close.
///
/// `high` and `low` are optional; range-based indicators read them through
/// [`Bar::effective_high`] / [`Bar::effective_low`], which fall back to
/// `price` so a bar without a range contributes a zero-width range.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub price: f64,
    pub volume: Option<f64>,
}

impl Bar {
    /// A close-only bar with no range, open or volume.
    pub fn from_price(timestamp: NaiveDateTime, price: f64) -> Self {
        Self {
            timestamp,
            open: None,
            high: None,
            low: None,
            price,
            volume: None,
        }
    }

    pub fn effective_high(&self) -> f64 {
        self.high.unwrap_or(self.price)
    }

    pub fn effective_low(&self) -> f64 {
        self.low.unwrap_or(self.price)
    }
}

/// One bar annotated with every indicator output at its position.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedBar {
    pub bar: Bar,
    pub indicators: IndicatorSnapshot,
}

/// Indicator outputs at a single index. `None` means the lookback window
/// for that indicator is not yet satisfied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndicatorSnapshot {
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub williams_r: Option<f64>,
}
