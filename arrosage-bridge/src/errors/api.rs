use axum::http::StatusCode;

use super::DispatchError;

/// Failures surfaced to HTTP clients. Messages are part of the wire contract.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Token d'authentification manquant")]
    MissingAuthorization,

    #[error("{0}")]
    SensorUnavailable(String),

    #[error("Erreur lors de l'arrosage manuel global")]
    StartFailed(#[source] DispatchError),

    #[error("Erreur lors de l'arrêt de l'arrosage")]
    StopFailed(#[source] DispatchError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingAuthorization => StatusCode::UNAUTHORIZED,
            ApiError::SensorUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StartFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StopFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
