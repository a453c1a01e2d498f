use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploaderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Document could not be read: {message}")]
    DocumentError { message: String },

    #[error("Config file parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unexpected server response ({status}): {message}")]
    ServerError { status: u16, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl UploaderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            UploaderError::HttpError(_) | UploaderError::ServerError { .. } => {
                ErrorCategory::Network
            }
            UploaderError::CsvError(_)
            | UploaderError::SerializationError(_)
            | UploaderError::ZipError(_)
            | UploaderError::DocumentError { .. } => ErrorCategory::Data,
            UploaderError::TomlError(_)
            | UploaderError::ConfigError { .. }
            | UploaderError::MissingConfigError { .. }
            | UploaderError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            UploaderError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            UploaderError::HttpError(_) => "Could not reach the upload server".to_string(),
            UploaderError::ServerError { status, message } => {
                format!("Server answered {}: {}", status, message)
            }
            UploaderError::IoError(e) => format!("File access failed: {}", e),
            UploaderError::CsvError(_) | UploaderError::SerializationError(_) => {
                "Could not write the candidate report".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the endpoint URL and that the server is running",
            ErrorCategory::Data => "Check the input files and output destination",
            ErrorCategory::Configuration => "Fix the config file or command line flags",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, UploaderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_high_severity() {
        let err = UploaderError::MissingConfigError {
            field: "server.base_url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("server.base_url"));
    }

    #[test]
    fn every_category_maps_to_an_exit_severity() {
        let unreadable = UploaderError::DocumentError {
            message: "PDF text extraction failed".to_string(),
        };
        assert_eq!(unreadable.category(), ErrorCategory::Data);
        assert_eq!(unreadable.severity(), ErrorSeverity::High);

        let io = UploaderError::IoError(std::io::Error::other("disk gone"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert!(io.severity() > unreadable.severity());
    }

    #[test]
    fn server_error_message_mentions_status() {
        let err = UploaderError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.user_friendly_message(), "Server answered 503: unavailable");
    }
}
