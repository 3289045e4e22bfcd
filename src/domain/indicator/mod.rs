//! Technical indicator implementations.
//!
//! This module provides types for representing indicator output:
//! - `IndicatorType`: indicator identity + parameters (serves as HashMap key)
//! - `IndicatorSeries`: one output per input bar, positionally aligned
//! - `BollingerBands`, `MacdPoint`, `StochasticPoint`: multi-value outputs
//!
//! Every calculator returns a series with exactly one entry per input bar.
//! Positions whose lookback window is not yet satisfied hold `None`.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod williams_r;

pub use bollinger::calculate_bollinger;
pub use ema::calculate_ema;
pub use macd::{calculate_macd, calculate_macd_default};
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
pub use stochastic::calculate_stochastic;
pub use williams_r::calculate_williams_r;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Bollinger(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    WilliamsR(usize),
}

impl IndicatorType {
    /// First index at which the indicator can hold a value.
    ///
    /// For multi-output indicators this is the earliest primary output
    /// (MACD line, stochastic %K); see [`IndicatorType::full_warmup`] for
    /// the index where every output is populated.
    pub fn warmup(&self) -> usize {
        match *self {
            IndicatorType::Sma(n)
            | IndicatorType::Bollinger(n)
            | IndicatorType::WilliamsR(n) => n.saturating_sub(1),
            IndicatorType::Ema(_) => 0,
            IndicatorType::Rsi(n) => n,
            IndicatorType::Macd { fast, slow, .. } => fast.max(slow).saturating_sub(1),
            IndicatorType::Stochastic { k_period, .. } => k_period.saturating_sub(1),
        }
    }

    /// First index at which every output of the indicator can be populated.
    pub fn full_warmup(&self) -> usize {
        match *self {
            IndicatorType::Macd { signal, .. } => self.warmup() + signal.saturating_sub(1),
            IndicatorType::Stochastic { k_period, d_period } => {
                (k_period + d_period).saturating_sub(1)
            }
            _ => self.warmup(),
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Bollinger(period) => write!(f, "BOLLINGER({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
            IndicatorType::Stochastic { k_period, d_period } => {
                write!(f, "STOCHASTIC({},{})", k_period, d_period)
            }
            IndicatorType::WilliamsR(period) => write!(f, "WILLIAMS_R({})", period),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries<T> {
    pub indicator_type: IndicatorType,
    pub values: Vec<T>,
}

/// Series of single optional values (SMA, EMA, RSI, Williams %R).
pub type SimpleSeries = IndicatorSeries<Option<f64>>;

impl<T> IndicatorSeries<T> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MacdPoint {
    pub line: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StochasticPoint {
    pub k: Option<f64>,
    pub d: Option<f64>,
}
