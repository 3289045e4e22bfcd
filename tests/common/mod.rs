#![allow(dead_code)]

use chartwise::domain::bar::EnrichedBar;
use chartwise::domain::error::ChartwiseError;
pub use chartwise::domain::bar::Bar;
use chartwise::ports::data_port::SeriesSource;
use chartwise::ports::sink_port::SeriesSink;
use chrono::{NaiveDate, NaiveDateTime};
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockSeriesSource {
    pub data: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockSeriesSource {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl SeriesSource for MockSeriesSource {
    fn fetch_series(&self, symbol: &str) -> Result<Vec<Bar>, ChartwiseError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(ChartwiseError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartwiseError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

/// Sink that keeps whatever it was handed.
#[derive(Default)]
pub struct CollectingSink {
    pub written: RefCell<Vec<EnrichedBar>>,
}

impl SeriesSink for CollectingSink {
    fn write(&self, series: &[EnrichedBar]) -> Result<(), ChartwiseError> {
        self.written.borrow_mut().extend_from_slice(series);
        Ok(())
    }
}

pub fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// Close-only bars two seconds apart.
pub fn bars_from_prices(prices: &[f64]) -> Vec<Bar> {
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| Bar::from_price(start() + chrono::Duration::seconds(2 * i as i64), p))
        .collect()
}

/// Bars with a symmetric high/low range around each close.
pub fn bars_with_range(prices: &[f64], spread: f64) -> Vec<Bar> {
    bars_from_prices(prices)
        .into_iter()
        .map(|b| Bar {
            open: Some(b.price),
            high: Some(b.price + spread),
            low: Some(b.price - spread),
            volume: Some(750_000.0),
            ..b
        })
        .collect()
}

pub fn flat(n: usize, price: f64) -> Vec<Bar> {
    bars_from_prices(&vec![price; n])
}

pub fn rising(n: usize, start_price: f64) -> Vec<Bar> {
    let prices: Vec<f64> = (0..n).map(|i| start_price + i as f64).collect();
    bars_from_prices(&prices)
}

/// Deterministic oscillating series.
pub fn wave(n: usize) -> Vec<Bar> {
    let prices: Vec<f64> = (0..n)
        .map(|i| 150.0 + 5.0 * ((i as f64) * 0.7).sin() + (i % 5) as f64 * 0.3)
        .collect();
    bars_from_prices(&prices)
}
