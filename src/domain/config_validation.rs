//! Configuration validation.
//!
//! Validates every `[indicators]` and `[window]` value before the engine runs.
//! Absent keys are valid and fall back to defaults.

use crate::domain::error::ChartwiseError;
use crate::ports::config_port::ConfigPort;

pub const INDICATORS_SECTION: &str = "indicators";
pub const WINDOW_SECTION: &str = "window";

/// Every period key accepted in `[indicators]`.
pub const PERIOD_KEYS: [&str; 10] = [
    "sma_period",
    "ema_period",
    "rsi_period",
    "bollinger_period",
    "macd_fast",
    "macd_slow",
    "macd_signal",
    "stochastic_period",
    "stochastic_d_period",
    "williams_period",
];

pub fn validate_indicator_config(config: &dyn ConfigPort) -> Result<(), ChartwiseError> {
    for key in PERIOD_KEYS {
        validate_positive_int(config, INDICATORS_SECTION, key)?;
    }
    validate_macd_order(config)?;
    Ok(())
}

pub fn validate_window_config(config: &dyn ConfigPort) -> Result<(), ChartwiseError> {
    validate_positive_int(config, WINDOW_SECTION, "capacity")
}

fn validate_positive_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), ChartwiseError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(v) if v > 0 => Ok(()),
        Ok(_) => Err(ChartwiseError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{key} must be positive"),
        }),
        Err(_) => Err(ChartwiseError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{key} must be an integer, got '{}'", raw.trim()),
        }),
    }
}

fn validate_macd_order(config: &dyn ConfigPort) -> Result<(), ChartwiseError> {
    let fast = config.get_int(INDICATORS_SECTION, "macd_fast", 12);
    let slow = config.get_int(INDICATORS_SECTION, "macd_slow", 26);
    if fast >= slow {
        return Err(ChartwiseError::ConfigInvalid {
            section: INDICATORS_SECTION.to_string(),
            key: "macd_fast".to_string(),
            reason: format!("macd_fast ({fast}) must be less than macd_slow ({slow})"),
        });
    }
    Ok(())
}
