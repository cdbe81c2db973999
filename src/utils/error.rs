use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttendanceError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Period not found: {reference}")]
    PeriodNotFound { reference: String },

    #[error("Cannot query a future period: {requested} (current year is {current})")]
    FuturePeriod { requested: i32, current: i32 },

    #[error("Malformed session text: {text:?}")]
    MalformedSessionText { text: String },

    #[error("Unknown month name: {month:?}")]
    UnknownMonth { month: String },

    #[error("Malformed row {row} in {table} table: column {column} has {value:?}")]
    MalformedRow {
        table: &'static str,
        row: usize,
        column: usize,
        value: String,
    },

    #[error("Malformed attendance summary: {field} has {value:?}")]
    MalformedSummary { field: &'static str, value: String },

    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Parsing,
    Configuration,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AttendanceError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn period_not_found(reference: impl ToString) -> Self {
        Self::PeriodNotFound {
            reference: reference.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } | Self::FuturePeriod { .. } => ErrorCategory::Input,
            Self::PeriodNotFound { .. } => ErrorCategory::Lookup,
            Self::MalformedSessionText { .. }
            | Self::UnknownMonth { .. }
            | Self::MalformedRow { .. }
            | Self::MalformedSummary { .. } => ErrorCategory::Parsing,
            Self::InvalidConfig { .. } | Self::Toml(_) => ErrorCategory::Configuration,
            Self::Http(_) | Self::HttpStatus { .. } => ErrorCategory::Network,
            Self::Io(_) | Self::Serialization(_) | Self::Csv(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input
            | ErrorCategory::Lookup
            | ErrorCategory::Parsing
            | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => {
                "Use a legislature id, a year (e.g. 2014) or a date (YYYY-MM-DD) and a non-empty senator id and name"
            }
            Self::PeriodNotFound { .. } => {
                "Check the period table in the configuration; date or legislature id lookups are more precise than years"
            }
            Self::FuturePeriod { .. } => "Query the current year or an earlier one",
            Self::MalformedSessionText { .. } | Self::UnknownMonth { .. } => {
                "The session detail page format may have changed; inspect the page and update the parser"
            }
            Self::MalformedRow { .. } | Self::MalformedSummary { .. } => {
                "The attendance table format may have changed; inspect the page and update the parser"
            }
            Self::InvalidConfig { .. } | Self::Toml(_) => "Fix the configuration file and try again",
            Self::Http(_) | Self::HttpStatus { .. } => {
                "Check network connectivity and that the record-keeping website is reachable, then retry"
            }
            Self::Io(_) | Self::Serialization(_) | Self::Csv(_) => {
                "Check file permissions and available disk space"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::PeriodNotFound { reference } => {
                format!("No legislative period matches {}", reference)
            }
            Self::FuturePeriod { requested, .. } => {
                format!("{} is in the future, there is no attendance to report yet", requested)
            }
            Self::HttpStatus { status, .. } => {
                format!("The website answered with HTTP status {}", status)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AttendanceError>;
