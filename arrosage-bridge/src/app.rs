use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::configs::Settings;
use crate::handles::*;
use crate::middlewares::require_authorization;
use crate::services::{
    ActuatorService, BackgroundTask, DeviceState, FrameParser, HttpScheduleSource,
    ScheduleService, SensorService, SerialTransport,
};

/// Shared services behind the HTTP surface.
pub struct Bridge {
    pub device_state: Arc<DeviceState>,
    pub actuator_service: Arc<ActuatorService>,
    pub sensor_service: Arc<SensorService>,
}

impl Bridge {
    pub fn new(transport: SerialTransport, parser: FrameParser) -> Self {
        let transport = Arc::new(Mutex::new(transport));
        let device_state = Arc::new(DeviceState::new());

        let actuator_service = Arc::new(ActuatorService::new(
            transport.clone(),
            device_state.clone(),
        ));
        let sensor_service = Arc::new(SensorService::new(
            transport.clone(),
            device_state.clone(),
            parser,
        ));

        Self {
            device_state,
            actuator_service,
            sensor_service,
        }
    }

    /// Starts the sensor reader and, when enabled, the schedule reconciliation loop.
    pub fn start_tasks(&self, settings: &Settings) -> anyhow::Result<Vec<BackgroundTask>> {
        let mut tasks = vec![self.sensor_service.clone().start(settings.embedded.poll_interval())];

        if settings.scheduler.enabled {
            let source = HttpScheduleSource::new(&settings.scheduler)?;
            tracing::info!("polling scheduler at {}", source.endpoint());

            let schedule_service = Arc::new(ScheduleService::new(
                Arc::new(source),
                self.actuator_service.clone(),
                settings.scheduler.timeout(),
            ));
            tasks.push(schedule_service.start(settings.scheduler.interval()));
        } else {
            tracing::warn!("schedule reconciliation disabled");
        }

        Ok(tasks)
    }

    pub fn router(&self) -> Router {
        create_app(self.device_state.clone(), self.actuator_service.clone())
    }
}

pub fn create_app(device_state: Arc<DeviceState>, actuator_service: Arc<ActuatorService>) -> Router {
    let sensors = Router::new()
        .route("/api/capteurs", get(get_sensor_data))
        .with_state(SensorState {
            device_state: device_state.clone(),
        });

    let watering = Router::new()
        .route("/api/arrosage/manuel/global", post(start_manual_watering))
        .route("/api/arrosage/stop", post(stop_watering))
        .route_layer(middleware::from_fn(require_authorization))
        .route("/api/arrosage/status", get(get_command_status))
        .with_state(WateringState {
            actuator_service,
            device_state,
        });

    Router::new()
        .merge(sensors)
        .merge(watering)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
