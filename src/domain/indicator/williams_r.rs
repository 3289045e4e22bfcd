//! Williams %R.
//!
//! %R = (highest_high - price[i]) / (highest_high - lowest_low) * -100 over
//! the trailing n-bar window, rounded to 2 decimals. Range is [-100, 0];
//! a flat window yields the neutral -50.
//!
//! Warmup: first (n-1) bars hold no value.

use crate::domain::bar::Bar;
use crate::domain::indicator::{IndicatorType, SimpleSeries};
use crate::domain::indicator_helpers::{round2, trailing_window, window_range};

pub const DEFAULT_PERIOD: usize = 14;
pub const NEUTRAL_R: f64 = -50.0;

pub fn calculate_williams_r(bars: &[Bar], period: usize) -> SimpleSeries {
    let values = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let window = trailing_window(bars, i, period)?;
            let (highest, lowest) = window_range(window);
            if highest == lowest {
                Some(NEUTRAL_R)
            } else {
                Some(round2((highest - bar.price) / (highest - lowest) * -100.0))
            }
        })
        .collect();

    SimpleSeries {
        indicator_type: IndicatorType::WilliamsR(period),
        values,
    }
}
