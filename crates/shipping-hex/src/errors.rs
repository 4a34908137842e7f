use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use shipping_types::ports::rate_service::RateError;

/// Fixed text shown when code exchange or token persistence fails.
pub const AUTH_ERROR_MESSAGE: &str = "An error occurred while authenticating your store against the Tienda Nube API. Please contact the administrator.";

/// Fixed text shown when carrier or option registration fails after a
/// successful authentication.
pub const SETUP_ERROR_MESSAGE: &str = "An error occurred while setting up the application in your store. Please contact the administrator.";

/// Install-flow failures. The variant picks the fixed user-facing message;
/// the payload is the internal cause, for logging only.
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("store setup failed: {0}")]
    Setup(String),
}

impl InstallError {
    pub fn user_message(&self) -> &'static str {
        match self {
            InstallError::Auth(_) => AUTH_ERROR_MESSAGE,
            InstallError::Setup(_) => SETUP_ERROR_MESSAGE,
        }
    }
}

/// Quote-flow failures. Carrier per-service rejections reject the whole
/// request with a bare 400; transport problems are a bare 500.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("carrier rejected one or more requested services")]
    CarrierService,

    #[error(transparent)]
    Rate(#[from] RateError),
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        match self {
            QuoteError::CarrierService => StatusCode::BAD_REQUEST.into_response(),
            QuoteError::Rate(e) => {
                tracing::error!(error = %e, "rate service call failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
