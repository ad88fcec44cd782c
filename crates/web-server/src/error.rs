use analytics::error::AnalyticsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ledger::LedgerError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Validation, not-found, and already-closed surface with their own status
/// codes and messages; store trouble is logged in full and answered with a
/// generic 500 so internals never leak to a client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Ledger(LedgerError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Ledger(LedgerError::NotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("Trade not found: {id}"))
            }
            AppError::Ledger(LedgerError::AlreadyClosed(id)) => {
                (StatusCode::CONFLICT, format!("Trade already closed: {id}"))
            }
            AppError::Ledger(ledger_err) => {
                tracing::error!(error = ?ledger_err, "Ledger error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal storage error occurred".to_string(),
                )
            }
            AppError::Analytics(AnalyticsError::Ledger(ledger_err)) => {
                return AppError::Ledger(ledger_err).into_response();
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
