//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (2 × StdDev)
//! - Lower: Middle - (2 × StdDev)
//!
//! Where StdDev is population standard deviation (divides by N, not N-1).
//! All three bands are computed from the unrounded mean, then rounded to 2 decimals.
//!
//! Default period: 20
//! Warmup: first (period-1) bars hold no value.

use crate::domain::bar::Bar;
use crate::domain::indicator::{BollingerBands, IndicatorSeries, IndicatorType};
use crate::domain::indicator_helpers::{mean_price, round2, trailing_window};

pub const DEFAULT_PERIOD: usize = 20;
pub const BAND_WIDTH: f64 = 2.0;

pub fn calculate_bollinger(bars: &[Bar], period: usize) -> IndicatorSeries<Option<BollingerBands>> {
    let values = (0..bars.len())
        .map(|i| {
            trailing_window(bars, i, period).map(|window| {
                let middle = mean_price(window);
                let variance = window
                    .iter()
                    .map(|b| {
                        let diff = b.price - middle;
                        diff * diff
                    })
                    .sum::<f64>()
                    / period as f64;
                let stddev = variance.sqrt();

                BollingerBands {
                    upper: round2(middle + BAND_WIDTH * stddev),
                    middle: round2(middle),
                    lower: round2(middle - BAND_WIDTH * stddev),
                }
            })
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Bollinger(period),
        values,
    }
}
