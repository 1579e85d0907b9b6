use std::fmt;

use arrosage_api::CommandStatusResponse;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    Start,
    Stop,
}

impl ActuatorCommand {
    /// Line sent on the serial link, without terminator.
    pub fn as_line(&self) -> &'static str {
        match self {
            ActuatorCommand::Start => "ON",
            ActuatorCommand::Stop => "OFF",
        }
    }
}

impl fmt::Display for ActuatorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_line())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOrigin {
    Manual,
    Schedule,
}

impl CommandOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandOrigin::Manual => "manual",
            CommandOrigin::Schedule => "schedule",
        }
    }
}

impl fmt::Display for CommandOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the last command written to the pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub id: Uuid,
    pub command: ActuatorCommand,
    pub origin: CommandOrigin,
    pub issued_at: OffsetDateTime,
    pub failure: Option<String>,
}

impl CommandRecord {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

impl From<&CommandRecord> for CommandStatusResponse {
    fn from(record: &CommandRecord) -> Self {
        Self {
            id: record.id,
            command: record.command.as_line().to_string(),
            origin: record.origin.as_str().to_string(),
            success: record.succeeded(),
            error: record.failure.clone(),
            issued_at: record.issued_at,
        }
    }
}
