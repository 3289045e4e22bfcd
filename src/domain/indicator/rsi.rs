//! RSI (Relative Strength Index) indicator.
//!
//! Simple-average variant, recomputed over the full window at every index
//! (no Wilder smoothing carried between points):
//! - gains/losses summed over the n price changes ending at i
//! - avg_gain = gains / n, avg_loss = losses / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss)), rounded to 2 decimals.
//! If avg_loss == 0: RSI = 100 (including the flat case where avg_gain is also 0).
//!
//! Warmup: first n bars hold no value (need n price changes).

use crate::domain::bar::Bar;
use crate::domain::indicator::{IndicatorType, SimpleSeries};
use crate::domain::indicator_helpers::round2;

pub const DEFAULT_PERIOD: usize = 14;

pub fn calculate_rsi(bars: &[Bar], period: usize) -> SimpleSeries {
    let values = (0..bars.len())
        .map(|i| {
            if period == 0 || i < period {
                return None;
            }
            let (gains, losses) = bars[i - period..=i].windows(2).fold(
                (0.0, 0.0),
                |(gains, losses), pair| {
                    let change = pair[1].price - pair[0].price;
                    if change > 0.0 {
                        (gains + change, losses)
                    } else {
                        (gains, losses - change)
                    }
                },
            );

            let avg_gain = gains / period as f64;
            let avg_loss = losses / period as f64;

            if avg_loss == 0.0 {
                Some(100.0)
            } else {
                Some(round2(100.0 - (100.0 / (1.0 + avg_gain / avg_loss))))
            }
        })
        .collect();

    SimpleSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn make_bar(date: &str, price: f64) -> Bar {
        let ts = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Bar::from_price(ts, price)
    }

    fn make_series(prices: impl IntoIterator<Item = f64>) -> Vec<Bar> {
        prices
            .into_iter()
            .enumerate()
            .map(|(i, p)| make_bar(&format!("2024-01-{:02}", i + 1), p))
            .collect()
    }

    #[test]
    fn rsi_empty_bars() {
        let series = calculate_rsi(&[], DEFAULT_PERIOD);
        assert_eq!(series.values.len(), 0);
    }

    #[test]
    fn rsi_single_bar() {
        let bars = vec![make_bar("2024-01-01", 100.0)];
        let series = calculate_rsi(&bars, DEFAULT_PERIOD);
        assert_eq!(series.values, vec![None]);
    }

    #[test]
    fn rsi_warmup_period() {
        let bars = make_series((1..=15).map(|i| 100.0 + (i as f64 % 5.0) * 2.0));
        let series = calculate_rsi(&bars, 14);

        assert_eq!(series.values.len(), 15);
        for i in 0..14 {
            assert!(series.values[i].is_none(), "Bar {} should be empty", i);
        }
        assert!(series.values[14].is_some(), "Bar 14 should have a value");
    }

    #[test]
    fn rsi_all_gains_no_losses() {
        let bars = make_series((0..15).map(|i| 100.0 + i as f64));
        let series = calculate_rsi(&bars, 14);
        assert_eq!(series.values[14], Some(100.0));
    }

    #[test]
    fn rsi_all_losses_no_gains() {
        let bars = make_series((0..15).map(|i| 100.0 - i as f64));
        let series = calculate_rsi(&bars, 14);
        assert_eq!(series.values[14], Some(0.0));
    }

    #[test]
    fn rsi_flat_prices_resolve_to_100() {
        let bars = make_series(std::iter::repeat_n(100.0, 20));
        let series = calculate_rsi(&bars, 14);
        for v in &series.values[14..] {
            assert_eq!(*v, Some(100.0));
        }
    }

    #[test]
    fn rsi_uses_only_window_changes() {
        // A large drop before the window must not affect index 3 with period 2.
        let bars = make_series([100.0, 50.0, 51.0, 53.0]);
        let series = calculate_rsi(&bars, 2);
        assert_eq!(series.values[3], Some(100.0));
        // Index 2 sees changes -50 and +1: avg_gain 0.5, avg_loss 25.
        let expected = round2(100.0 - 100.0 / (1.0 + 0.5 / 25.0));
        assert_abs_diff_eq!(series.values[2].unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn rsi_is_not_wilder_smoothed() {
        // Period 2: changes +2, -1, +1. Index 3 window = (-1, +1).
        let bars = make_series([10.0, 12.0, 11.0, 12.0]);
        let series = calculate_rsi(&bars, 2);
        assert_eq!(series.values[3], Some(50.0));
        // Index 2 window = (+2, -1): rs = 2, rsi = 66.67
        assert_eq!(series.values[2], Some(66.67));
    }

    #[test]
    fn rsi_in_range() {
        let bars = make_series((1..=20).map(|i| 100.0 + (i as f64 % 7.0 - 3.0) * 2.0));
        let series = calculate_rsi(&bars, 14);

        for rsi in series.values.iter().flatten() {
            assert!((0.0..=100.0).contains(rsi), "RSI {} out of range", rsi);
        }
    }

    #[test]
    fn rsi_zero_period() {
        let bars = vec![make_bar("2024-01-01", 100.0), make_bar("2024-01-02", 101.0)];
        let series = calculate_rsi(&bars, 0);
        assert_eq!(series.values, vec![None, None]);
    }

    #[test]
    fn rsi_indicator_type() {
        let bars = vec![make_bar("2024-01-01", 100.0)];
        let series = calculate_rsi(&bars, 14);
        assert_eq!(series.indicator_type, IndicatorType::Rsi(14));
    }
}
