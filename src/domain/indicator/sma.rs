//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = mean(price[i-n+1..=i]), rounded to 2 decimals.
//! Warmup: first (n-1) bars hold no value.

use crate::domain::bar::Bar;
use crate::domain::indicator::{IndicatorType, SimpleSeries};
use crate::domain::indicator_helpers::{mean_price, round2, trailing_window};

pub const DEFAULT_PERIOD: usize = 20;

pub fn calculate_sma(bars: &[Bar], period: usize) -> SimpleSeries {
    let values = (0..bars.len())
        .map(|i| trailing_window(bars, i, period).map(|w| round2(mean_price(w))))
        .collect();

    SimpleSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}
