use std::sync::Arc;

use arrosage_api::{CommandStatusResponse, ManualWateringResponse, StopWateringResponse};
use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::errors::ApiError;
use crate::models::{ActuatorCommand, CommandOrigin};
use crate::services::{ActuatorService, DeviceState};

#[derive(Clone)]
pub struct WateringState {
    pub actuator_service: Arc<ActuatorService>,
    pub device_state: Arc<DeviceState>,
}

pub async fn start_manual_watering(
    State(state): State<WateringState>,
) -> Result<Json<ManualWateringResponse>, ApiError> {
    tracing::info!("manual watering requested");

    state.actuator_service
        .submit(ActuatorCommand::Start, CommandOrigin::Manual)
        .await
        .map_err(ApiError::StartFailed)?;

    Ok(Json(ManualWateringResponse::single_pump(
        "Arrosage manuel global déclenché avec succès",
    )))
}

pub async fn stop_watering(
    State(state): State<WateringState>,
) -> Result<Json<StopWateringResponse>, ApiError> {
    tracing::info!("watering stop requested");

    state.actuator_service
        .submit(ActuatorCommand::Stop, CommandOrigin::Manual)
        .await
        .map_err(ApiError::StopFailed)?;

    Ok(Json(StopWateringResponse {
        success: true,
        message: String::from("Arrosage arrêté avec succès"),
    }))
}

pub async fn get_command_status(State(state): State<WateringState>) -> Response {
    match state.device_state.last_command() {
        Some(record) => Json(CommandStatusResponse::from(&record)).into_response(),
        None => Json(json!({ "status": "no_command" })).into_response(),
    }
}
