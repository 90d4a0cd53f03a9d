use thiserror::Error;

#[derive(Error, Debug)]
pub enum DealError {
    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error, status = {status}")]
    Response { status: u16 },

    #[error("Please enter a game name to search for deals.")]
    EmptyInput,

    #[error("Malformed deals payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Template rendering error: {0}")]
    Render(#[from] askama::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Input,
    Presentation,
    Configuration,
    System,
}

impl DealError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DealError::Transport(_) | DealError::Response { .. } | DealError::Decode(_) => {
                ErrorCategory::Fetch
            }
            DealError::EmptyInput => ErrorCategory::Input,
            DealError::Render(_) => ErrorCategory::Presentation,
            DealError::InvalidUrl(_)
            | DealError::Config { .. }
            | DealError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            DealError::Io(_) => ErrorCategory::System,
        }
    }

    /// Short message safe to show to an end user.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Fetch => {
                "An error occurred while fetching data. Please try again later.".to_string()
            }
            ErrorCategory::Input => self.to_string(),
            ErrorCategory::Presentation => "The deals could not be displayed.".to_string(),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DealError::Transport(_) => "Check your network connection and try again",
            DealError::Response { status } if *status >= 500 => {
                "The deals service is having trouble, try again later"
            }
            DealError::Response { .. } => "Check the base URL and query parameters",
            DealError::EmptyInput => "Enter a game name before searching",
            DealError::Decode(_) => "Verify that the base URL points at the deals API",
            DealError::Render(_) => "Check the presentation templates",
            DealError::InvalidUrl(_)
            | DealError::Config { .. }
            | DealError::InvalidConfigValue { .. } => "Fix the configuration file or CLI flags",
            DealError::Io(_) => "Check file permissions and the output path",
        }
    }
}

pub type Result<T> = std::result::Result<T, DealError>;
