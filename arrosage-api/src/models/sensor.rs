use serde::{Deserialize, Serialize};

pub const STATUS_NO_DATA: &str = "no_data";
pub const STATUS_ERROR: &str = "error";

/// Latest frame reported by the rig, as served on `GET /api/capteurs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorResponse {
    /// Soil humidity
    #[serde(rename = "humidite")]
    pub humidity: u32,
    /// Ambient light
    #[serde(rename = "lumiere")]
    pub light: u32,
    /// Tank water level
    #[serde(rename = "niveau_eau")]
    pub water_level: u32,
    /// Pump state, 0 (off) or 1 (on)
    #[serde(rename = "etat_pompe")]
    pub pump_state: u8,
    /// Device operating mode, `AUTO` or `MANUAL`
    pub mode: String,
    /// Only present when no frame has been received yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl SensorResponse {
    pub fn no_data() -> Self {
        Self {
            humidity: 0,
            light: 0,
            water_level: 0,
            pump_state: 0,
            mode: String::from("AUTO"),
            status: Some(STATUS_NO_DATA.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorErrorResponse {
    pub error: String,
    pub status: String,
}

impl SensorErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: STATUS_ERROR.to_string(),
        }
    }
}
