pub mod api;
pub mod dispatch;
pub mod frame;
pub mod schedule;
pub mod transport;

pub use api::ApiError;
pub use dispatch::DispatchError;
pub use frame::FrameError;
pub use schedule::ScheduleFetchError;
pub use transport::TransportError;

use arrosage_api::{SensorErrorResponse, WateringFailureResponse};
use axum::Json;
use axum::response::{IntoResponse, Response};

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::MissingAuthorization => {
                tracing::debug!("rejected request without authorization header");
                let body = WateringFailureResponse::new(self.to_string(), None);
                (status, Json(body)).into_response()
            }
            ApiError::SensorUnavailable(reason) => {
                tracing::error!("sensor read failed: {}", reason);
                (status, Json(SensorErrorResponse::new(reason.clone()))).into_response()
            }
            ApiError::StartFailed(e) => {
                tracing::error!("manual start failed: {}", e);
                let body = WateringFailureResponse::new(self.to_string(), Some(e.to_string()));
                (status, Json(body)).into_response()
            }
            ApiError::StopFailed(e) => {
                tracing::error!("manual stop failed: {}", e);
                let body = WateringFailureResponse::new(self.to_string(), None);
                (status, Json(body)).into_response()
            }
        }
    }
}
