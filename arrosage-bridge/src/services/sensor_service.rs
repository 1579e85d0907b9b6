use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::services::{BackgroundTask, DeviceState, FrameParser, SerialTransport};

/// Read path: moves frames from the serial link into the device state.
///
/// Transport and parse errors stop here; readers of the device state only
/// ever see the last good reading and, if any, the current link fault.
pub struct SensorService {
    transport: Arc<Mutex<SerialTransport>>,
    device_state: Arc<DeviceState>,
    parser: FrameParser,
}

impl SensorService {
    pub fn new(
        transport: Arc<Mutex<SerialTransport>>,
        device_state: Arc<DeviceState>,
        parser: FrameParser,
    ) -> Self {
        Self {
            transport,
            device_state,
            parser,
        }
    }

    /// Drains every complete line currently buffered and returns how many
    /// readings were recorded.
    pub async fn poll(&self) -> usize {
        let mut transport = self.transport.lock().await;
        let mut recorded = 0;

        loop {
            match transport.try_read_line() {
                Ok(Some(line)) => {
                    self.clear_link_fault();
                    if self.ingest(&line) {
                        recorded += 1;
                    }
                }
                Ok(None) => {
                    self.clear_link_fault();
                    break;
                }
                Err(e) => {
                    if self.device_state.record_link_fault(Some(e.to_string())) {
                        tracing::warn!("serial link fault: {}", e);
                    }
                    break;
                }
            }
        }

        recorded
    }

    pub fn start(self: Arc<Self>, period: Duration) -> BackgroundTask {
        BackgroundTask::spawn("sensor reader", period, move || {
            let service = Arc::clone(&self);
            async move {
                service.poll().await;
            }
        })
    }

    fn ingest(&self, line: &str) -> bool {
        match self.parser.parse(line) {
            Ok(Some(reading)) => {
                tracing::debug!(?reading, "frame received");
                self.device_state.record_reading(reading);
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("{}, keeping previous reading (line {:?})", e, line);
                false
            }
        }
    }

    fn clear_link_fault(&self) {
        if self.device_state.record_link_fault(None) {
            tracing::info!("serial link recovered");
        }
    }
}
