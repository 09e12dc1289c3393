use axum::http::StatusCode;
use chrono::NaiveDate;

/// Contract violations in a series handed to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    #[error("malformed series: {date} at index {index} does not follow {previous}")]
    MalformedSeries {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },
}

/// Failures reported by, or while reading from, the data source. These are
/// passed through unchanged and never turned into an empty result.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream rejected the request: {0}")]
    Rejected(String),

    #[error("invalid upstream payload: {0}")]
    InvalidPayload(String),

    #[error("no data for account {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        let status = match &err {
            UpstreamError::NotFound(_) => StatusCode::NOT_FOUND,
            UpstreamError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            UpstreamError::Rejected(_) => StatusCode::BAD_GATEWAY,
            UpstreamError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
