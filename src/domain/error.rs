//! Domain error types.

/// Top-level error type for chartwise.
#[derive(Debug, thiserror::Error)]
pub enum ChartwiseError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("invalid bar at index {index}: {field} is {value}")]
    InvalidBar {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ChartwiseError> for std::process::ExitCode {
    fn from(err: &ChartwiseError) -> Self {
        let code: u8 = match err {
            ChartwiseError::Io(_) => 1,
            ChartwiseError::ConfigParse { .. } | ChartwiseError::ConfigInvalid { .. } => 2,
            ChartwiseError::DataSource { .. } => 3,
            ChartwiseError::InvalidBar { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bar_message_names_field_and_index() {
        let err = ChartwiseError::InvalidBar {
            index: 7,
            field: "price",
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "invalid bar at index 7: price is NaN");
    }

    #[test]
    fn config_invalid_message() {
        let err = ChartwiseError::ConfigInvalid {
            section: "indicators".into(),
            key: "sma_period".into(),
            reason: "must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [indicators] sma_period: must be positive"
        );
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ChartwiseError = io.into();
        assert!(matches!(err, ChartwiseError::Io(_)));
    }
}
