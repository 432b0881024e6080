use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("ItemError: {0}")]
    Item(#[from] ItemError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Invalid filter '{input}': {reason}")]
    InvalidFilter { input: String, reason: String },
    #[error("Invalid order '{input}': expected <field>:<direction>")]
    InvalidOrder { input: String },
    #[error("Output failed: {0}")]
    Output(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authentication failed")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
    #[error("Unexpected response from {endpoint}: expected {expected}")]
    UnexpectedShape { endpoint: String, expected: String },
}

#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Field '{field}' is not a valid date: {value}")]
    InvalidDate { field: String, value: String },
    #[error("Expected a JSON object, found {found}")]
    NotAnObject { found: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "CRITICAL",
            ErrorSeverity::High => "ERROR",
            ErrorSeverity::Medium => "WARNING",
            ErrorSeverity::Low => "NOTICE",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Api(ApiError::Unauthorized { .. }) => ErrorSeverity::Critical,
            AppError::Api(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::High,
            AppError::Item(_) => ErrorSeverity::Medium,
            AppError::Cli(_) => ErrorSeverity::Low,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your network connection or raise the timeout with 'tpq config set --timeout <secs>'".to_string())
            }
            AppError::Api(ApiError::Unauthorized { .. }) => {
                Some("The endpoint rejected the request; check that it is publicly readable".to_string())
            }
            AppError::Api(ApiError::UnexpectedShape { .. }) => {
                Some("Use --items-key to name the array that holds the results".to_string())
            }
            AppError::Cli(CliError::InvalidArguments(_)) => {
                Some("Set the API base URL with 'tpq config set --url <url>' or TPQ_URL".to_string())
            }
            AppError::Storage(StorageError::ConfigParseError { .. }) => {
                Some("Fix or remove the configuration file and try again".to_string())
            }
            _ => None,
        }
    }
}
