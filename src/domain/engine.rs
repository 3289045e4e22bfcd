//! Indicator engine: runs every calculator over a series and merges the
//! outputs positionally onto the bars.
//!
//! The engine is a pure function of (bars, config). It keeps no state between
//! calls; callers maintaining a rolling window re-invoke [`compute`] over the
//! adjusted window (see [`crate::domain::rolling`]).

use crate::domain::bar::{Bar, EnrichedBar, IndicatorSnapshot};
use crate::domain::error::ChartwiseError;
use crate::domain::indicator::{
    bollinger, calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    calculate_stochastic, calculate_williams_r, ema, macd, rsi, sma, stochastic, williams_r,
    IndicatorType,
};
use tracing::debug;

/// Lookback periods for every indicator the engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorConfig {
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub stochastic_period: usize,
    pub stochastic_d_period: usize,
    pub williams_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_period: sma::DEFAULT_PERIOD,
            ema_period: ema::DEFAULT_PERIOD,
            rsi_period: rsi::DEFAULT_PERIOD,
            bollinger_period: bollinger::DEFAULT_PERIOD,
            macd_fast: macd::DEFAULT_FAST,
            macd_slow: macd::DEFAULT_SLOW,
            macd_signal: macd::DEFAULT_SIGNAL,
            stochastic_period: stochastic::DEFAULT_K_PERIOD,
            stochastic_d_period: stochastic::DEFAULT_D_PERIOD,
            williams_period: williams_r::DEFAULT_PERIOD,
        }
    }
}

impl IndicatorConfig {
    pub fn indicator_types(&self) -> Vec<IndicatorType> {
        vec![
            IndicatorType::Sma(self.sma_period),
            IndicatorType::Ema(self.ema_period),
            IndicatorType::Rsi(self.rsi_period),
            IndicatorType::Bollinger(self.bollinger_period),
            IndicatorType::Macd {
                fast: self.macd_fast,
                slow: self.macd_slow,
                signal: self.macd_signal,
            },
            IndicatorType::Stochastic {
                k_period: self.stochastic_period,
                d_period: self.stochastic_d_period,
            },
            IndicatorType::WilliamsR(self.williams_period),
        ]
    }

    /// Bars needed before every output of every indicator can be populated.
    pub fn longest_warmup(&self) -> usize {
        self.indicator_types()
            .iter()
            .map(IndicatorType::full_warmup)
            .max()
            .unwrap_or(0)
            + 1
    }
}

/// Reject bars whose numeric fields cannot take part in arithmetic.
pub fn validate_bars(bars: &[Bar]) -> Result<(), ChartwiseError> {
    for (index, bar) in bars.iter().enumerate() {
        let fields = [
            ("price", Some(bar.price)),
            ("high", bar.high),
            ("low", bar.low),
        ];
        for (field, value) in fields {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                return Err(ChartwiseError::InvalidBar {
                    index,
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// Annotate every bar with every indicator output at its position.
///
/// The output has exactly one entry per input bar, in input order.
pub fn compute(bars: &[Bar], config: &IndicatorConfig) -> Result<Vec<EnrichedBar>, ChartwiseError> {
    validate_bars(bars)?;
    if bars.is_empty() {
        return Ok(Vec::new());
    }

    debug!(bars = bars.len(), ?config, "computing indicators");

    let sma = calculate_sma(bars, config.sma_period);
    let ema = calculate_ema(bars, config.ema_period);
    let rsi = calculate_rsi(bars, config.rsi_period);
    let bands = calculate_bollinger(bars, config.bollinger_period);
    let macd = calculate_macd(bars, config.macd_fast, config.macd_slow, config.macd_signal);
    let stoch = calculate_stochastic(bars, config.stochastic_period, config.stochastic_d_period);
    let williams = calculate_williams_r(bars, config.williams_period);

    let enriched = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let band = bands.values[i];
            EnrichedBar {
                bar: bar.clone(),
                indicators: IndicatorSnapshot {
                    sma: sma.values[i],
                    ema: ema.values[i],
                    rsi: rsi.values[i],
                    bb_upper: band.map(|b| b.upper),
                    bb_middle: band.map(|b| b.middle),
                    bb_lower: band.map(|b| b.lower),
                    macd_line: macd.values[i].line,
                    macd_signal: macd.values[i].signal,
                    macd_histogram: macd.values[i].histogram,
                    stoch_k: stoch.values[i].k,
                    stoch_d: stoch.values[i].d,
                    williams_r: williams.values[i],
                },
            }
        })
        .collect();

    Ok(enriched)
}

pub fn compute_default(bars: &[Bar]) -> Result<Vec<EnrichedBar>, ChartwiseError> {
    compute(bars, &IndicatorConfig::default())
}
