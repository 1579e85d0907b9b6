use tokio::sync::watch;

use crate::models::{CommandRecord, SensorReading, SensorSnapshot};

/// Everything the bridge knows about the rig. Only the latest value of each
/// category is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceStatus {
    pub reading: SensorSnapshot,
    pub last_command: Option<CommandRecord>,
    /// Set while reads on a previously opened port are failing.
    pub link_fault: Option<String>,
}

/// Process-wide device state. Every update replaces the whole status under
/// the channel lock, so readers only ever see complete values.
pub struct DeviceState {
    status: watch::Sender<DeviceStatus>,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceState {
    pub fn new() -> Self {
        let (status, _) = watch::channel(DeviceStatus::default());

        Self { status }
    }

    pub fn snapshot(&self) -> SensorSnapshot {
        self.status.borrow().reading
    }

    pub fn status(&self) -> DeviceStatus {
        self.status.borrow().clone()
    }

    pub fn last_command(&self) -> Option<CommandRecord> {
        self.status.borrow().last_command.clone()
    }

    pub fn record_reading(&self, reading: SensorReading) {
        self.status.send_modify(|status| status.reading = SensorSnapshot::Reading(reading));
    }

    pub fn record_command_outcome(&self, record: CommandRecord) {
        self.status.send_modify(|status| status.last_command = Some(record));
    }

    /// Returns whether the fault state changed.
    pub fn record_link_fault(&self, fault: Option<String>) -> bool {
        self.status.send_if_modified(|status| {
            if status.link_fault == fault {
                false
            } else {
                status.link_fault = fault;
                true
            }
        })
    }
}
