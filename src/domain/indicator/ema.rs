//! Exponential Moving Average indicator.
//!
//! k = 2/(n+1), EMA[0] = price[0], then EMA[i] = (price[i] - EMA[i-1]) * k + EMA[i-1],
//! rounded to 2 decimals at every step (the rounded value feeds the next step).
//!
//! No warmup: the first bar seeds the recurrence directly rather than with an
//! SMA of the first n closes. MACD depends on this exact seeding.

use crate::domain::bar::Bar;
use crate::domain::indicator::{IndicatorType, SimpleSeries};
use crate::domain::indicator_helpers::round2;

pub const DEFAULT_PERIOD: usize = 20;

pub fn calculate_ema(bars: &[Bar], period: usize) -> SimpleSeries {
    if period == 0 {
        return SimpleSeries {
            indicator_type: IndicatorType::Ema(period),
            values: vec![None; bars.len()],
        };
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut values = Vec::with_capacity(bars.len());
    let mut prev: Option<f64> = None;

    for bar in bars {
        let ema = match prev {
            None => bar.price,
            Some(p) => round2((bar.price - p) * k + p),
        };
        values.push(Some(ema));
        prev = Some(ema);
    }

    SimpleSeries {
        indicator_type: IndicatorType::Ema(period),
        values,
    }
}

/// EMA values with the `Option` stripped. Every position is populated for a
/// non-zero period, so this is a plain `Vec<f64>` of the input's length.
pub(crate) fn ema_values(bars: &[Bar], period: usize) -> Vec<f64> {
    calculate_ema(bars, period)
        .values
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect()
}
