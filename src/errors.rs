use axum::http::StatusCode;

use crate::api::ApiError;
use crate::metrics::MetricsError;
use crate::models::InvalidDeal;

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

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match &err {
            // An upstream 401 means the session token is stale, everything
            // else upstream is a gateway problem from the dashboard's view.
            ApiError::Status { status, .. } if *status == StatusCode::UNAUTHORIZED => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            _ => Self::bad_gateway(err.to_string()),
        }
    }
}

impl From<MetricsError> for AppError {
    fn from(err: MetricsError) -> Self {
        match err {
            // Corrupt upstream data fails the render pass, not the app.
            MetricsError::InvalidDeal(inner) => Self::from(inner),
            MetricsError::InvalidWindow { .. } => Self::bad_request(err.to_string()),
        }
    }
}

impl From<InvalidDeal> for AppError {
    fn from(err: InvalidDeal) -> Self {
        Self::bad_gateway(format!("backend sent a malformed deal: {err}"))
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
