//! Stochastic Oscillator (%K / %D).
//!
//! %K = (price[i] - lowest_low) / (highest_high - lowest_low) * 100 over the
//! trailing k_period window, rounded to 2 decimals. A flat window (highest ==
//! lowest) yields the neutral 50.
//!
//! %D = mean of the d_period most recent %K values, available from index
//! k_period + d_period - 1. On a flat-window index %D stays empty even when
//! enough %K history exists.

use crate::domain::bar::Bar;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, StochasticPoint};
use crate::domain::indicator_helpers::{round2, trailing_window, window_range};

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;
pub const NEUTRAL_K: f64 = 50.0;

pub fn calculate_stochastic(
    bars: &[Bar],
    k_period: usize,
    d_period: usize,
) -> IndicatorSeries<StochasticPoint> {
    let indicator_type = IndicatorType::Stochastic { k_period, d_period };

    if d_period == 0 {
        return IndicatorSeries {
            indicator_type,
            values: vec![StochasticPoint::default(); bars.len()],
        };
    }

    let d_warmup = k_period + d_period - 1;
    let mut k_values: Vec<Option<f64>> = Vec::with_capacity(bars.len());
    let mut values = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let Some(window) = trailing_window(bars, i, k_period) else {
            k_values.push(None);
            values.push(StochasticPoint::default());
            continue;
        };

        let (highest, lowest) = window_range(window);
        if highest == lowest {
            k_values.push(Some(NEUTRAL_K));
            values.push(StochasticPoint {
                k: Some(NEUTRAL_K),
                d: None,
            });
            continue;
        }

        let k = round2((bar.price - lowest) / (highest - lowest) * 100.0);
        k_values.push(Some(k));

        let d = if i >= d_warmup {
            let recent = &k_values[i + 1 - d_period..=i];
            let sum: f64 = recent.iter().flatten().sum();
            Some(round2(sum / d_period as f64))
        } else {
            None
        };

        values.push(StochasticPoint { k: Some(k), d });
    }

    IndicatorSeries {
        indicator_type,
        values,
    }
}
