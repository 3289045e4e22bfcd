//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! MACD Line = EMA(fast) - EMA(slow), rounded to 2 decimals
//! Signal Line = simple mean of the `signal` most recent MACD line values
//! Histogram = MACD Line - unrounded Signal, rounded to 2 decimals
//!
//! The EMAs are the first-price-seeded, per-step-rounded EMAs from
//! [`crate::domain::indicator::ema`]. The signal line is a plain moving
//! average of the line, not an EMA of it.
//!
//! Default parameters: fast=12, slow=26, signal=9
//! Warmup: line from max(fast, slow) - 1 (25); signal and histogram from
//! max(fast, slow) - 1 + signal - 1 (33).

use crate::domain::bar::Bar;
use crate::domain::indicator::ema::ema_values;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, MacdPoint};
use crate::domain::indicator_helpers::round2;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    bars: &[Bar],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> IndicatorSeries<MacdPoint> {
    let indicator_type = IndicatorType::Macd {
        fast,
        slow,
        signal: signal_period,
    };

    if fast == 0 || slow == 0 || signal_period == 0 {
        return IndicatorSeries {
            indicator_type,
            values: vec![MacdPoint::default(); bars.len()],
        };
    }

    let ema_fast = ema_values(bars, fast);
    let ema_slow = ema_values(bars, slow);
    let line_warmup = fast.max(slow) - 1;

    let line: Vec<Option<f64>> = (0..bars.len())
        .map(|i| (i >= line_warmup).then(|| round2(ema_fast[i] - ema_slow[i])))
        .collect();

    let signal_warmup = line_warmup + signal_period - 1;

    let values = (0..bars.len())
        .map(|i| {
            let Some(macd) = line[i] else {
                return MacdPoint::default();
            };
            if i < signal_warmup {
                return MacdPoint {
                    line: Some(macd),
                    ..MacdPoint::default()
                };
            }

            let recent: Vec<f64> = line[i + 1 - signal_period..=i]
                .iter()
                .flatten()
                .copied()
                .collect();
            if recent.len() != signal_period {
                return MacdPoint {
                    line: Some(macd),
                    ..MacdPoint::default()
                };
            }

            let signal = recent.iter().sum::<f64>() / signal_period as f64;
            MacdPoint {
                line: Some(macd),
                signal: Some(round2(signal)),
                histogram: Some(round2(macd - signal)),
            }
        })
        .collect();

    IndicatorSeries {
        indicator_type,
        values,
    }
}

pub fn calculate_macd_default(bars: &[Bar]) -> IndicatorSeries<MacdPoint> {
    calculate_macd(bars, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
