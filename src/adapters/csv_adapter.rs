//! CSV file series source.
//!
//! Each symbol lives in `<base>/<SYMBOL>.csv` with a header row. Columns are
//! located by name, so extra columns and any column order are accepted:
//! - timestamp: `timestamp`, `time`, `datetime` or `date` (required)
//! - close: `price` or `close` (required)
//! - `open`, `high`, `low`, `volume` (optional; blank cells are absent)

use crate::domain::bar::Bar;
use crate::domain::error::ChartwiseError;
use crate::ports::data_port::SeriesSource;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug)]
pub struct CsvSeriesAdapter {
    base_path: PathBuf,
}

impl CsvSeriesAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// `<base>/<SYMBOL>.csv`, or the file whose stem is `symbol` and whose
    /// extension is `csv` in any case (`AAPL.CSV`).
    fn csv_path(&self, symbol: &str) -> PathBuf {
        let exact = self.base_path.join(format!("{}.csv", symbol));
        if exact.is_file() {
            return exact;
        }
        fs::read_dir(&self.base_path)
            .ok()
            .and_then(|entries| {
                entries
                    .flatten()
                    .map(|entry| entry.path())
                    .find(|path| is_csv(path) && path.file_stem().is_some_and(|s| s == symbol))
            })
            .unwrap_or(exact)
    }
}

/// True when `path` has a `.csv` extension, compared case-insensitively.
pub fn is_csv(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

impl SeriesSource for CsvSeriesAdapter {
    fn fetch_series(&self, symbol: &str) -> Result<Vec<Bar>, ChartwiseError> {
        read_bars_from_path(&self.csv_path(symbol))
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartwiseError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| ChartwiseError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ChartwiseError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if is_csv(&path) {
                if let Some(stem) = path.file_stem() {
                    symbols.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }
}

/// Read a bar series from a single CSV file.
pub fn read_bars_from_path(path: &Path) -> Result<Vec<Bar>, ChartwiseError> {
    let file = fs::File::open(path).map_err(|e| ChartwiseError::DataSource {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    debug!(path = %path.display(), "reading bars");
    read_bars(file)
}

/// Parse a bar series from CSV text with a header row.
///
/// Rows are returned in timestamp order. Out-of-order input is logged and
/// stably sorted, so bars sharing a timestamp keep their file order.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<Bar>, ChartwiseError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr.headers().map_err(|e| ChartwiseError::DataSource {
        reason: format!("CSV header error: {}", e),
    })?;
    let columns = Columns::locate(headers)?;

    let mut bars = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| ChartwiseError::DataSource {
            reason: format!("CSV parse error: {}", e),
        })?;
        bars.push(columns.parse_record(&record, row + 1)?);
    }

    if !bars.is_sorted_by_key(|b| b.timestamp) {
        warn!(rows = bars.len(), "bars are not in timestamp order; sorting");
        bars.sort_by_key(|b| b.timestamp);
    }
    Ok(bars)
}

pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

struct Columns {
    timestamp: usize,
    price: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    volume: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, ChartwiseError> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };

        let timestamp =
            find(&["timestamp", "time", "datetime", "date"]).ok_or_else(|| {
                ChartwiseError::DataSource {
                    reason: "missing timestamp column".into(),
                }
            })?;
        let price = find(&["price", "close"]).ok_or_else(|| ChartwiseError::DataSource {
            reason: "missing price column".into(),
        })?;

        Ok(Self {
            timestamp,
            price,
            open: find(&["open"]),
            high: find(&["high"]),
            low: find(&["low"]),
            volume: find(&["volume"]),
        })
    }

    fn parse_record(&self, record: &csv::StringRecord, row: usize) -> Result<Bar, ChartwiseError> {
        let raw_ts = record.get(self.timestamp).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| ChartwiseError::DataSource {
            reason: format!("row {}: invalid timestamp '{}'", row, raw_ts),
        })?;

        let price = parse_optional(record, Some(self.price), "price", row)?.ok_or_else(|| {
            ChartwiseError::DataSource {
                reason: format!("row {}: missing price", row),
            }
        })?;

        Ok(Bar {
            timestamp,
            open: parse_optional(record, self.open, "open", row)?,
            high: parse_optional(record, self.high, "high", row)?,
            low: parse_optional(record, self.low, "low", row)?,
            price,
            volume: parse_optional(record, self.volume, "volume", row)?,
        })
    }
}

fn parse_optional(
    record: &csv::StringRecord,
    column: Option<usize>,
    name: &str,
    row: usize,
) -> Result<Option<f64>, ChartwiseError> {
    let Some(raw) = column.and_then(|c| record.get(c)).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.parse::<f64>()
        .map(Some)
        .map_err(|e| ChartwiseError::DataSource {
            reason: format!("row {}: invalid {} value '{}': {}", row, name, raw, e),
        })
}
