use std::{fmt, io};

/// Crate-wide `Result` type using [`PicklineError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, PicklineError>;

/// Top-level error type for pickline operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum PicklineError {
    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// The user cancelled the prompt (Ctrl-C).
    Interrupted,

    /// The user closed the input stream (Ctrl-D on an empty buffer).
    Eof,

    /// Generic error with a free-form message.
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Generic configuration error.
    Generic(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for PicklineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PicklineError::Config(e) => write!(f, "Configuration error: {e}"),
            PicklineError::Io(e) => write!(f, "I/O error: {e}"),
            PicklineError::Interrupted => write!(f, "Interrupted"),
            PicklineError::Eof => write!(f, "End of input"),
            PicklineError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PicklineError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to PicklineError ========================= */

impl From<io::Error> for PicklineError {
    fn from(err: io::Error) -> Self {
        PicklineError::Io(err)
    }
}

impl From<ConfigError> for PicklineError {
    fn from(err: ConfigError) -> Self {
        PicklineError::Config(err)
    }
}

impl From<String> for PicklineError {
    fn from(msg: String) -> Self {
        PicklineError::Generic(msg)
    }
}

impl From<&str> for PicklineError {
    fn from(msg: &str) -> Self {
        PicklineError::Generic(msg.to_owned())
    }
}

impl From<rustyline::error::ReadlineError> for PicklineError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        use rustyline::error::ReadlineError;

        match err {
            // Cancellation is part of the blocking-call contract, not a failure
            ReadlineError::Interrupted => PicklineError::Interrupted,
            ReadlineError::Eof => PicklineError::Eof,
            ReadlineError::Io(e) => PicklineError::Io(e),
            other => PicklineError::Generic(format!("Readline error: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_interrupted() {
        assert_eq!(PicklineError::Interrupted.to_string(), "Interrupted");
        assert_eq!(PicklineError::Eof.to_string(), "End of input");
    }

    #[test]
    fn test_display_config_error() {
        let err = PicklineError::Config(ConfigError::InvalidValue {
            field: "max_candidates".to_string(),
            value: "-1".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value '-1' for field 'max_candidates'"
        );
    }

    #[test]
    fn test_readline_error_mapping() {
        use rustyline::error::ReadlineError;

        assert!(matches!(
            PicklineError::from(ReadlineError::Interrupted),
            PicklineError::Interrupted
        ));
        assert!(matches!(
            PicklineError::from(ReadlineError::Eof),
            PicklineError::Eof
        ));
    }

    #[test]
    fn test_from_str() {
        let err = PicklineError::from("boom");
        assert_eq!(err.to_string(), "boom");
    }
}
