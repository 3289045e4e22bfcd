//! CSV output for enriched series.
//!
//! Column names follow the charting client's field names (`bbUpper`,
//! `macdSignal`, ...). Indicator values are written with two decimals and an
//! empty cell where no value exists. A value the engine left unrounded (the
//! EMA seed, which is the first close as-is) is written in full.

use crate::domain::bar::EnrichedBar;
use crate::domain::error::ChartwiseError;
use crate::domain::indicator_helpers::round2;
use crate::ports::sink_port::SeriesSink;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

pub const HEADER: [&str; 18] = [
    "timestamp",
    "open",
    "high",
    "low",
    "price",
    "volume",
    "sma",
    "ema",
    "rsi",
    "bbUpper",
    "bbMiddle",
    "bbLower",
    "macdLine",
    "macdSignal",
    "macdHistogram",
    "stochK",
    "stochD",
    "williamsR",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Writes to a file when a path is given, otherwise to stdout.
pub struct CsvSinkAdapter {
    destination: Option<PathBuf>,
}

impl CsvSinkAdapter {
    pub fn to_file(path: PathBuf) -> Self {
        Self {
            destination: Some(path),
        }
    }

    pub fn to_stdout() -> Self {
        Self { destination: None }
    }
}

impl SeriesSink for CsvSinkAdapter {
    fn write(&self, series: &[EnrichedBar]) -> Result<(), ChartwiseError> {
        match &self.destination {
            Some(path) => write_enriched(File::create(path)?, series),
            None => write_enriched(std::io::stdout().lock(), series),
        }
    }
}

pub fn write_enriched<W: Write>(writer: W, series: &[EnrichedBar]) -> Result<(), ChartwiseError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER).map_err(csv_error)?;
    for row in series {
        wtr.write_record(to_record(row)).map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

fn to_record(row: &EnrichedBar) -> Vec<String> {
    let bar = &row.bar;
    let ind = &row.indicators;
    let raw = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    let cents = |v: Option<f64>| {
        v.map(|x| {
            if round2(x) == x {
                format!("{:.2}", x)
            } else {
                x.to_string()
            }
        })
        .unwrap_or_default()
    };

    vec![
        bar.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        raw(bar.open),
        raw(bar.high),
        raw(bar.low),
        bar.price.to_string(),
        raw(bar.volume),
        cents(ind.sma),
        cents(ind.ema),
        cents(ind.rsi),
        cents(ind.bb_upper),
        cents(ind.bb_middle),
        cents(ind.bb_lower),
        cents(ind.macd_line),
        cents(ind.macd_signal),
        cents(ind.macd_histogram),
        cents(ind.stoch_k),
        cents(ind.stoch_d),
        cents(ind.williams_r),
    ]
}

fn csv_error(e: csv::Error) -> ChartwiseError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => ChartwiseError::Io(io),
        other => ChartwiseError::DataSource {
            reason: format!("CSV write error: {:?}", other),
        },
    }
}
