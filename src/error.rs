use reqwest::StatusCode;
use thiserror::Error;

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("No product loaded")]
    NoProductLoaded,

    #[error("Unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("Transport error")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response body")]
    Decode(#[from] serde_json::Error),
}

impl AppError {
    pub fn incomplete_form() -> Self {
        AppError::Validation(FILL_ALL_FIELDS.to_string())
    }

    /// Local rejections never reach the network.
    pub fn is_local(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NoProductLoaded)
    }
}

pub type AppResult<T> = Result<T, AppError>;
