//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::{is_csv, CsvSeriesAdapter};
use crate::adapters::csv_sink::CsvSinkAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::bar::Bar;
use crate::domain::config_validation::{
    validate_indicator_config, validate_window_config, INDICATORS_SECTION, PERIOD_KEYS,
    WINDOW_SECTION,
};
use crate::domain::engine::{compute, IndicatorConfig};
use crate::domain::error::ChartwiseError;
use crate::domain::rolling::{RollingWindow, DEFAULT_CAPACITY};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::SeriesSource;
use crate::ports::sink_port::SeriesSink;

#[derive(Parser, Debug)]
#[command(name = "chartwise", about = "Technical indicator engine for price series")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute indicators for a series and write the enriched CSV
    Compute {
        /// CSV file holding the series
        #[arg(short, long, conflicts_with = "symbol")]
        input: Option<PathBuf>,
        /// Symbol to load from --data-dir
        #[arg(long, requires = "data_dir")]
        symbol: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output CSV (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Keep only the newest N bars before computing
        #[arg(short, long)]
        window: Option<usize>,
    },
    /// List symbols available in a data directory
    ListSymbols {
        #[arg(long)]
        data_dir: PathBuf,
    },
    /// Validate an indicator configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show series length and indicator readiness
    Info {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Compute {
            input,
            symbol,
            data_dir,
            config,
            output,
            window,
        } => run_compute(
            input.as_deref(),
            symbol.as_deref(),
            data_dir.as_deref(),
            config.as_deref(),
            output,
            window,
        ),
        Command::ListSymbols { data_dir } => run_list_symbols(&data_dir),
        Command::Validate { config } => run_validate(&config),
        Command::Info { input, config } => run_info(&input, config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ChartwiseError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| ChartwiseError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_optional_config(path: Option<&Path>) -> Result<FileConfigAdapter, ChartwiseError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Validate and resolve `[indicators]`, filling absent keys with defaults.
pub fn build_indicator_config(adapter: &dyn ConfigPort) -> Result<IndicatorConfig, ChartwiseError> {
    validate_indicator_config(adapter)?;

    let defaults = IndicatorConfig::default();
    let period = |key: &str, default: usize| {
        adapter.get_int(INDICATORS_SECTION, key, default as i64) as usize
    };

    Ok(IndicatorConfig {
        sma_period: period("sma_period", defaults.sma_period),
        ema_period: period("ema_period", defaults.ema_period),
        rsi_period: period("rsi_period", defaults.rsi_period),
        bollinger_period: period("bollinger_period", defaults.bollinger_period),
        macd_fast: period("macd_fast", defaults.macd_fast),
        macd_slow: period("macd_slow", defaults.macd_slow),
        macd_signal: period("macd_signal", defaults.macd_signal),
        stochastic_period: period("stochastic_period", defaults.stochastic_period),
        stochastic_d_period: period("stochastic_d_period", defaults.stochastic_d_period),
        williams_period: period("williams_period", defaults.williams_period),
    })
}

/// Rolling window capacity: the CLI override wins, then `[window] capacity`.
/// `None` means the whole series is used.
pub fn resolve_window(
    override_capacity: Option<usize>,
    adapter: &dyn ConfigPort,
) -> Result<Option<usize>, ChartwiseError> {
    if let Some(capacity) = override_capacity {
        if capacity == 0 {
            return Err(ChartwiseError::ConfigInvalid {
                section: WINDOW_SECTION.into(),
                key: "capacity".into(),
                reason: "--window must be positive".into(),
            });
        }
        return Ok(Some(capacity));
    }

    validate_window_config(adapter)?;
    if adapter.has_key(WINDOW_SECTION, "capacity") {
        let capacity = adapter.get_int(WINDOW_SECTION, "capacity", DEFAULT_CAPACITY as i64);
        return Ok(Some(capacity as usize));
    }
    Ok(None)
}

/// Split a CSV path into the directory and symbol the CSV source expects.
pub fn source_for_file(path: &Path) -> Result<(CsvSeriesAdapter, String), ChartwiseError> {
    let symbol = path.file_stem().map(|s| s.to_string_lossy().into_owned());
    match (is_csv(path), symbol) {
        (true, Some(symbol)) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            Ok((CsvSeriesAdapter::new(dir.to_path_buf()), symbol))
        }
        _ => Err(ChartwiseError::DataSource {
            reason: format!("{} is not a .csv file", path.display()),
        }),
    }
}

/// Apply the rolling window (if any) to a freshly loaded series.
pub fn apply_window(bars: Vec<Bar>, capacity: Option<usize>, config: IndicatorConfig) -> Vec<Bar> {
    match capacity {
        Some(capacity) => RollingWindow::from_bars(bars, capacity, config).bars(),
        None => bars,
    }
}

/// Fetch, window, compute and write one symbol. Returns the number of rows written.
pub fn run_compute_pipeline(
    source: &dyn SeriesSource,
    symbol: &str,
    config: &IndicatorConfig,
    window: Option<usize>,
    sink: &dyn SeriesSink,
) -> Result<usize, ChartwiseError> {
    let bars = source.fetch_series(symbol)?;
    info!("Loaded {} bars for {}", bars.len(), symbol);

    let bars = apply_window(bars, window, *config);
    if let Some(capacity) = window {
        info!("Using rolling window of {} bars ({} kept)", capacity, bars.len());
    }

    let shortfall = config.longest_warmup().saturating_sub(bars.len());
    if shortfall > 0 {
        info!(
            "Series is {} bars short of full indicator coverage; early values stay empty",
            shortfall
        );
    }

    let enriched = compute(&bars, config)?;
    sink.write(&enriched)?;
    Ok(enriched.len())
}

fn run_compute(
    input: Option<&Path>,
    symbol: Option<&str>,
    data_dir: Option<&Path>,
    config_path: Option<&Path>,
    output: Option<PathBuf>,
    window: Option<usize>,
) -> Result<(), ChartwiseError> {
    // Stage 1: Load and validate config
    let adapter = load_optional_config(config_path)?;
    let config = build_indicator_config(&adapter)?;
    let window = resolve_window(window, &adapter)?;

    // Stage 2: Resolve the series source
    let (source, symbol) = match (input, symbol, data_dir) {
        (Some(path), _, _) => source_for_file(path)?,
        (None, Some(symbol), Some(dir)) => {
            (CsvSeriesAdapter::new(dir.to_path_buf()), symbol.to_string())
        }
        _ => {
            return Err(ChartwiseError::DataSource {
                reason: "either --input or --symbol with --data-dir is required".into(),
            });
        }
    };

    // Stage 3: Compute and write
    let sink = match &output {
        Some(path) => CsvSinkAdapter::to_file(path.clone()),
        None => CsvSinkAdapter::to_stdout(),
    };
    let rows = run_compute_pipeline(&source, &symbol, &config, window, &sink)?;

    match output {
        Some(path) => info!("Wrote {} rows to {}", rows, path.display()),
        None => info!("Wrote {} rows", rows),
    }
    Ok(())
}

fn run_list_symbols(data_dir: &Path) -> Result<(), ChartwiseError> {
    let source = CsvSeriesAdapter::new(data_dir.to_path_buf());
    let symbols = source.list_symbols()?;

    if symbols.is_empty() {
        info!("No symbols found in {}", data_dir.display());
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        info!("{} symbols found", symbols.len());
    }
    Ok(())
}

/// One `key = value` line per period, marking values taken from defaults.
pub fn describe_config(adapter: &dyn ConfigPort, config: &IndicatorConfig) -> Vec<String> {
    let values = [
        config.sma_period,
        config.ema_period,
        config.rsi_period,
        config.bollinger_period,
        config.macd_fast,
        config.macd_slow,
        config.macd_signal,
        config.stochastic_period,
        config.stochastic_d_period,
        config.williams_period,
    ];

    PERIOD_KEYS
        .iter()
        .zip(values)
        .map(|(key, value)| {
            if adapter.has_key(INDICATORS_SECTION, key) {
                format!("{key} = {value}")
            } else {
                format!("{key} = {value} (default)")
            }
        })
        .collect()
}

fn run_validate(config_path: &Path) -> Result<(), ChartwiseError> {
    let adapter = load_config(config_path)?;
    let config = build_indicator_config(&adapter)?;
    let window = resolve_window(None, &adapter)?;

    println!("[{}]", INDICATORS_SECTION);
    for line in describe_config(&adapter, &config) {
        println!("  {}", line);
    }
    match window {
        Some(capacity) => println!("[{}]\n  capacity = {}", WINDOW_SECTION, capacity),
        None => println!("[{}]\n  (whole series)", WINDOW_SECTION),
    }

    println!("\nIndicators:");
    for indicator in config.indicator_types() {
        println!("  {}", indicator);
    }

    info!("Configuration is valid");
    Ok(())
}

/// Readiness line for each configured indicator given a series length.
pub fn readiness_report(config: &IndicatorConfig, bars: usize) -> Vec<String> {
    config
        .indicator_types()
        .iter()
        .map(|indicator| {
            let needed = indicator.full_warmup() + 1;
            if bars >= needed {
                format!(
                    "{}: ready from bar {} ({} values)",
                    indicator,
                    needed,
                    bars - indicator.full_warmup()
                )
            } else {
                format!("{}: needs {} bars, have {}", indicator, needed, bars)
            }
        })
        .collect()
}

fn run_info(input: &Path, config_path: Option<&Path>) -> Result<(), ChartwiseError> {
    let adapter = load_optional_config(config_path)?;
    let config = build_indicator_config(&adapter)?;

    let (source, symbol) = source_for_file(input)?;
    let bars = source.fetch_series(&symbol)?;

    println!("{}: {} bars", symbol, bars.len());
    if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
        println!("  {} to {}", first.timestamp, last.timestamp);
    }
    for line in readiness_report(&config, bars.len()) {
        println!("  {}", line);
    }
    Ok(())
}
