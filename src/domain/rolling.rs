//! Fixed-capacity rolling window of bars.
//!
//! Appending past capacity evicts the oldest bar. Indicators are never
//! updated incrementally: [`RollingWindow::enriched`] re-runs the engine over
//! whatever the window holds at that moment.

use std::collections::VecDeque;

use crate::domain::bar::{Bar, EnrichedBar};
use crate::domain::engine::{compute, IndicatorConfig};
use crate::domain::error::ChartwiseError;

pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct RollingWindow {
    capacity: usize,
    bars: VecDeque<Bar>,
    config: IndicatorConfig,
}

impl RollingWindow {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize, config: IndicatorConfig) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            bars: VecDeque::with_capacity(capacity),
            config,
        }
    }

    /// Seed from an existing series, keeping only its newest `capacity` bars.
    pub fn from_bars(bars: Vec<Bar>, capacity: usize, config: IndicatorConfig) -> Self {
        let mut window = Self::new(capacity, config);
        let skip = bars.len().saturating_sub(window.capacity);
        window.bars.extend(bars.into_iter().skip(skip));
        window
    }

    /// Append a bar, returning the evicted oldest bar if the window was full.
    pub fn push(&mut self, bar: Bar) -> Option<Bar> {
        let evicted = if self.bars.len() == self.capacity {
            self.bars.pop_front()
        } else {
            None
        };
        self.bars.push_back(bar);
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> Vec<Bar> {
        self.bars.iter().cloned().collect()
    }

    pub fn enriched(&self) -> Result<Vec<EnrichedBar>, ChartwiseError> {
        compute(&self.bars(), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(i: usize, price: f64) -> Bar {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Bar::from_price(start + chrono::Duration::seconds(5 * i as i64), price)
    }

    #[test]
    fn push_below_capacity_keeps_everything() {
        let mut window = RollingWindow::new(3, IndicatorConfig::default());
        assert!(window.push(bar(0, 1.0)).is_none());
        assert!(window.push(bar(1, 2.0)).is_none());
        assert_eq!(window.len(), 2);
    }

    #[test]
    fn push_at_capacity_evicts_oldest() {
        let mut window = RollingWindow::new(2, IndicatorConfig::default());
        window.push(bar(0, 1.0));
        window.push(bar(1, 2.0));
        let evicted = window.push(bar(2, 3.0)).unwrap();
        assert_eq!(evicted.price, 1.0);
        let prices: Vec<f64> = window.bars().iter().map(|b| b.price).collect();
        assert_eq!(prices, vec![2.0, 3.0]);
    }

    #[test]
    fn from_bars_keeps_newest() {
        let bars: Vec<Bar> = (0..10).map(|i| bar(i, i as f64)).collect();
        let window = RollingWindow::from_bars(bars, 4, IndicatorConfig::default());
        let prices: Vec<f64> = window.bars().iter().map(|b| b.price).collect();
        assert_eq!(prices, vec![6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn zero_capacity_holds_one_bar() {
        let mut window = RollingWindow::new(0, IndicatorConfig::default());
        window.push(bar(0, 1.0));
        window.push(bar(1, 2.0));
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn enriched_matches_fresh_compute_over_window() {
        let config = IndicatorConfig::default();
        let mut window = RollingWindow::new(DEFAULT_CAPACITY, config);
        for i in 0..60 {
            window.push(bar(i, 100.0 + (i % 9) as f64));
        }
        let enriched = window.enriched().unwrap();
        assert_eq!(enriched.len(), DEFAULT_CAPACITY);

        let expected = compute(&window.bars(), &config).unwrap();
        assert_eq!(enriched, expected);
        // Warm-up restarts at the window's first bar.
        assert!(enriched[18].indicators.sma.is_none());
        assert!(enriched[19].indicators.sma.is_some());
    }
}
