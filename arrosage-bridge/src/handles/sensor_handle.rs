use std::sync::Arc;

use arrosage_api::SensorResponse;
use axum::Json;
use axum::extract::State;

use crate::errors::ApiError;
use crate::services::DeviceState;

#[derive(Clone)]
pub struct SensorState {
    pub device_state: Arc<DeviceState>,
}

/// `no_data` is a normal answer, only a faulted serial link is an error.
pub async fn get_sensor_data(
    State(state): State<SensorState>,
) -> Result<Json<SensorResponse>, ApiError> {
    let status = state.device_state.status();

    if let Some(fault) = status.link_fault {
        return Err(ApiError::SensorUnavailable(fault));
    }

    Ok(Json(SensorResponse::from(status.reading)))
}
