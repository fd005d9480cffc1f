//! Domain error types.
//!
//! The pure engine never fails; these errors come from configuration loading,
//! bar sources and report writers.

/// Top-level error type for scalper.
#[derive(Debug, thiserror::Error)]
pub enum ScalperError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("bar data parse error at line {line}: {reason}")]
    DataParse { line: u64, reason: String },

    #[error("insufficient data for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScalperError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        ScalperError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&ScalperError> for std::process::ExitCode {
    fn from(err: &ScalperError) -> Self {
        let code: u8 = match err {
            ScalperError::Io(_) => 1,
            ScalperError::ConfigParse { .. }
            | ScalperError::ConfigMissing { .. }
            | ScalperError::ConfigInvalid { .. } => 2,
            ScalperError::DataSource { .. } | ScalperError::DataParse { .. } => 3,
            ScalperError::InsufficientData { .. } => 5,
            ScalperError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
