use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Body of a successful `POST /api/arrosage/manuel/global`.
///
/// The rig drives a single pump, so the result always lists one plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualWateringResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "nombrePlantes")]
    pub plant_count: u32,
    #[serde(rename = "resultats")]
    pub results: Vec<WateringResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WateringResult {
    #[serde(rename = "plante")]
    pub plant: PlantSummary,
    #[serde(rename = "arrosage")]
    pub watering: WateringSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantSummary {
    pub id: i32,
    #[serde(rename = "nom")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WateringSummary {
    /// Always `manuel` for waterings triggered over HTTP
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "actif")]
    pub active: bool,
}

impl ManualWateringResponse {
    pub fn single_pump(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            plant_count: 1,
            results: vec![WateringResult {
                plant: PlantSummary {
                    id: 1,
                    name: String::from("Plante"),
                },
                watering: WateringSummary {
                    kind: String::from("manuel"),
                    active: true,
                },
            }],
        }
    }
}

/// Body of a successful `POST /api/arrosage/stop`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopWateringResponse {
    pub success: bool,
    pub message: String,
}

/// Failure body shared by the watering endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WateringFailureResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl WateringFailureResponse {
    pub fn new(message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            details,
        }
    }
}

/// Last command pushed to the pump, served on `GET /api/arrosage/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandStatusResponse {
    pub id: Uuid,
    /// Serial line sent to the rig, `ON` or `OFF`
    #[serde(rename = "commande")]
    pub command: String,
    /// `manual` or `schedule`
    #[serde(rename = "origine")]
    pub origin: String,
    #[serde(rename = "succes")]
    pub success: bool,
    #[serde(rename = "erreur")]
    pub error: Option<String>,
    #[serde(rename = "horodatage", with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
}
