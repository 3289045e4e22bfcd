//! Shared helper functions for indicator calculations.

use crate::domain::bar::Bar;

/// Round to 2 decimal places using the exact decimal value of the double,
/// the same rule as JavaScript's `Number.prototype.toFixed(2)` followed by
/// `parseFloat`.
///
/// `1.045` is stored as `1.04499999...` and so rounds down to `1.04`. Only
/// doubles whose stored value is exactly a half cent (the odd multiples of
/// 1/8, such as `0.125`) are ties; those round away from zero. Never returns
/// `-0.0`.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let magnitude = value.abs();
    let eighths = magnitude * 8.0;
    let rounded = if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        ((magnitude * 100.0).floor() + 1.0) / 100.0
    } else {
        // `{:.2}` rounds the exact decimal expansion; only exact ties differ
        // from toFixed, and those are handled above.
        format!("{:.2}", magnitude).parse().unwrap_or(magnitude)
    };
    let signed = rounded.copysign(value);
    if signed == 0.0 { 0.0 } else { signed }
}

/// Arithmetic mean of the closes in `window`. Caller guarantees non-empty.
pub fn mean_price(window: &[Bar]) -> f64 {
    window.iter().map(|b| b.price).sum::<f64>() / window.len() as f64
}

/// (highest effective high, lowest effective low) over `window`.
pub fn window_range(window: &[Bar]) -> (f64, f64) {
    window.iter().fold(
        (f64::NEG_INFINITY, f64::INFINITY),
        |(hi, lo), bar| (hi.max(bar.effective_high()), lo.min(bar.effective_low())),
    )
}

/// The closed window `[i + 1 - period, i]`, or `None` while `i < period - 1`.
pub fn trailing_window(bars: &[Bar], i: usize, period: usize) -> Option<&[Bar]> {
    if period == 0 || i + 1 < period || i >= bars.len() {
        return None;
    }
    Some(&bars[i + 1 - period..=i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| Bar::from_price(start + chrono::Duration::minutes(i as i64), p))
            .collect()
    }

    #[test]
    fn round2_basic() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.236), 1.24);
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(-3.14159), -3.14);
    }

    #[test]
    fn round2_ties_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(1.125), 1.13);
        assert_eq!(round2(2.5), 2.5);
    }

    // Expected values are what `(x).toFixed(2)` prints for the same doubles.
    #[test]
    fn round2_uses_exact_decimal_value() {
        assert_eq!(round2(1.045), 1.04);
        assert_eq!(round2(0.045), 0.04);
        assert_eq!(round2(-1.045), -1.04);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(2.09 / 2.0), 1.04);
    }

    #[test]
    fn round2_is_idempotent_on_cents() {
        for cents in [0_i64, 1, 5, 99, 1045, 16672, -250, 123456] {
            let v = cents as f64 / 100.0;
            assert_eq!(round2(v), v);
        }
    }

    #[test]
    fn round2_normalises_negative_zero() {
        let r = round2(-0.001);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn mean_price_of_window() {
        let bars = make_bars(&[10.0, 20.0, 30.0]);
        assert!((mean_price(&bars) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn window_range_uses_fallback() {
        let mut bars = make_bars(&[10.0, 20.0, 15.0]);
        bars[1].high = Some(25.0);
        bars[2].low = Some(5.0);
        assert_eq!(window_range(&bars), (25.0, 5.0));
    }

    #[test]
    fn trailing_window_boundaries() {
        let bars = make_bars(&[1.0, 2.0, 3.0, 4.0]);
        assert!(trailing_window(&bars, 1, 3).is_none());
        let w = trailing_window(&bars, 2, 3).unwrap();
        assert_eq!(w.len(), 3);
        assert_eq!(w[0].price, 1.0);
        let w = trailing_window(&bars, 3, 3).unwrap();
        assert_eq!(w[0].price, 2.0);
        assert!(trailing_window(&bars, 3, 0).is_none());
        assert!(trailing_window(&bars, 4, 1).is_none());
    }
}
