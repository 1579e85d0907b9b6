use time::OffsetDateTime;

use crate::errors::FrameError;
use crate::models::{FrameLayout, Mode, SensorReading};

/// Decodes `humidity,light,waterLevel[,pumpState,mode]` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameParser {
    layout: FrameLayout,
}

impl FrameParser {
    pub fn new(layout: FrameLayout) -> Self {
        Self { layout }
    }

    /// `Ok(None)` means the line carried no data (empty or whitespace only).
    pub fn parse(&self, line: &str) -> Result<Option<SensorReading>, FrameError> {
        self.parse_at(line, OffsetDateTime::now_utc())
    }

    pub fn parse_at(
        &self,
        line: &str,
        captured_at: OffsetDateTime,
    ) -> Result<Option<SensorReading>, FrameError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if !self.layout.accepts(fields.len()) {
            return Err(FrameError::FieldCount {
                expected: self.layout.describe(),
                found: fields.len(),
            });
        }

        let humidity = parse_measure("humidity", fields[0])?;
        let light = parse_measure("light", fields[1])?;
        let water_level = parse_measure("water level", fields[2])?;

        // Minimal rigs have no actuator feedback.
        let (pump_state, mode) = if fields.len() == FrameLayout::FEEDBACK_FIELDS {
            (parse_pump_state(fields[3])?, parse_mode(fields[4])?)
        } else {
            (0, Mode::Auto)
        };

        Ok(Some(SensorReading {
            humidity,
            light,
            water_level,
            pump_state,
            mode,
            captured_at,
        }))
    }
}

fn parse_measure(field: &'static str, value: &str) -> Result<u32, FrameError> {
    value.parse::<u32>().map_err(|_| FrameError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_pump_state(value: &str) -> Result<u8, FrameError> {
    match value.parse::<u8>() {
        Ok(state @ (0 | 1)) => Ok(state),
        _ => Err(FrameError::InvalidPumpState(value.to_string())),
    }
}

fn parse_mode(value: &str) -> Result<Mode, FrameError> {
    Mode::from_token(&value.to_ascii_uppercase())
        .ok_or_else(|| FrameError::UnknownMode(value.to_string()))
}
