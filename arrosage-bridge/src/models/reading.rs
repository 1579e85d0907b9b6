use std::fmt;

use arrosage_api::SensorResponse;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Operating mode reported by the rig, independent of how the bridge drives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Auto,
    Manual,
}

impl Mode {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "AUTO" => Some(Mode::Auto),
            "MANUAL" => Some(Mode::Manual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Auto => "AUTO",
            Mode::Manual => "MANUAL",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded sensor frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReading {
    pub humidity: u32,
    pub light: u32,
    pub water_level: u32,
    /// 0 or 1
    pub pump_state: u8,
    pub mode: Mode,
    pub captured_at: OffsetDateTime,
}

/// What readers get back from the device state.
///
/// `NoDataYet` is never rendered internally as a zeroed reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorSnapshot {
    #[default]
    NoDataYet,
    Reading(SensorReading),
}

impl SensorSnapshot {
    pub fn reading(&self) -> Option<&SensorReading> {
        match self {
            SensorSnapshot::Reading(reading) => Some(reading),
            SensorSnapshot::NoDataYet => None,
        }
    }
}

impl From<SensorSnapshot> for SensorResponse {
    fn from(snapshot: SensorSnapshot) -> Self {
        match snapshot {
            SensorSnapshot::NoDataYet => SensorResponse::no_data(),
            SensorSnapshot::Reading(reading) => SensorResponse {
                humidity: reading.humidity,
                light: reading.light,
                water_level: reading.water_level,
                pump_state: reading.pump_state,
                mode: reading.mode.to_string(),
                status: None,
            },
        }
    }
}

/// Frame shapes a rig is allowed to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameLayout {
    /// `humidity,light,waterLevel`
    Minimal,
    /// `humidity,light,waterLevel,pumpState,mode`
    Feedback,
    /// Either of the above
    #[default]
    Auto,
}

impl FrameLayout {
    pub const MINIMAL_FIELDS: usize = 3;
    pub const FEEDBACK_FIELDS: usize = 5;

    pub fn accepts(&self, field_count: usize) -> bool {
        match self {
            FrameLayout::Minimal => field_count == Self::MINIMAL_FIELDS,
            FrameLayout::Feedback => field_count == Self::FEEDBACK_FIELDS,
            FrameLayout::Auto => {
                field_count == Self::MINIMAL_FIELDS || field_count == Self::FEEDBACK_FIELDS
            }
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            FrameLayout::Minimal => "3",
            FrameLayout::Feedback => "5",
            FrameLayout::Auto => "3 or 5",
        }
    }
}
