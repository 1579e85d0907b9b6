use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::DispatchError;
use crate::models::{ActuatorCommand, CommandOrigin, CommandRecord};
use crate::services::{DeviceState, SerialTransport};

/// Single entry point for commands to the pump. Holding the transport lock for
/// the whole write keeps concurrent submissions whole and in arrival order.
pub struct ActuatorService {
    transport: Arc<Mutex<SerialTransport>>,
    device_state: Arc<DeviceState>,
}

impl ActuatorService {
    pub fn new(transport: Arc<Mutex<SerialTransport>>, device_state: Arc<DeviceState>) -> Self {
        Self {
            transport,
            device_state,
        }
    }

    /// Failed commands are not retried.
    pub async fn submit(
        &self,
        command: ActuatorCommand,
        origin: CommandOrigin,
    ) -> Result<(), DispatchError> {
        let mut transport = self.transport.lock().await;

        let result = transport.write_line(command.as_line());

        self.device_state.record_command_outcome(CommandRecord {
            id: Uuid::new_v4(),
            command,
            origin,
            issued_at: OffsetDateTime::now_utc(),
            failure: result.as_ref().err().map(ToString::to_string),
        });

        drop(transport);

        match result {
            Ok(()) => {
                tracing::info!(%origin, "command {} sent to the rig", command);
                Ok(())
            }
            Err(source) => {
                tracing::error!(%origin, "command {} failed: {}", command, source);
                Err(DispatchError::Transport { command, source })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::errors::TransportError;
    use crate::services::MockLink;

    fn service_with(transport: SerialTransport) -> (Arc<DeviceState>, ActuatorService) {
        let device_state = Arc::new(DeviceState::new());
        let service = ActuatorService::new(
            Arc::new(Mutex::new(transport)),
            Arc::clone(&device_state),
        );

        (device_state, service)
    }

    #[tokio::test]
    async fn test_concurrent_submissions_keep_order() {
        let link = MockLink::new();
        let (_, service) = service_with(SerialTransport::connected(Box::new(link.clone())));

        let (start, stop) = tokio::join!(
            service.submit(ActuatorCommand::Start, CommandOrigin::Manual),
            service.submit(ActuatorCommand::Stop, CommandOrigin::Schedule),
        );

        assert!(start.is_ok());
        assert!(stop.is_ok());
        assert_eq!(link.written(), b"ON\nOFF\n");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_contended_submissions_are_written_whole() {
        let link = MockLink::new();
        let (device_state, service) =
            service_with(SerialTransport::connected(Box::new(link.clone())));
        let service = Arc::new(service);

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let service = Arc::clone(&service);
                let command = if i % 2 == 0 { ActuatorCommand::Start } else { ActuatorCommand::Stop };
                tokio::spawn(async move { service.submit(command, CommandOrigin::Manual).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let written = link.written();
        let lines = link.written_lines();
        assert_eq!(lines.len(), 32);
        assert!(written.ends_with(b"\n"));
        assert!(lines.iter().all(|line| line == "ON" || line == "OFF"));
        assert_eq!(lines.iter().filter(|line| *line == "ON").count(), 16);

        // The audit entry is written under the same lock as the bytes.
        let last = device_state.last_command().unwrap();
        assert_eq!(lines.last().map(String::as_str), Some(last.command.as_line()));
    }

    #[tokio::test]
    async fn test_outcome_is_recorded() {
        let link = MockLink::new();
        let (device_state, service) =
            service_with(SerialTransport::connected(Box::new(link.clone())));

        service.submit(ActuatorCommand::Start, CommandOrigin::Schedule).await.unwrap();

        let record = device_state.last_command().unwrap();
        assert_eq!(record.command, ActuatorCommand::Start);
        assert_eq!(record.origin, CommandOrigin::Schedule);
        assert!(record.succeeded());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported_once() {
        let link = MockLink::new();
        link.fail_writes(Some(io::ErrorKind::BrokenPipe));
        let (device_state, service) =
            service_with(SerialTransport::connected(Box::new(link.clone())));

        let result = service.submit(ActuatorCommand::Stop, CommandOrigin::Manual).await;

        assert!(matches!(
            result,
            Err(DispatchError::Transport { command: ActuatorCommand::Stop, source: TransportError::Io(_) })
        ));
        assert!(!device_state.last_command().unwrap().succeeded());

        link.fail_writes(None);
        assert!(link.written().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_transport_fails_deterministically() {
        let (device_state, service) = service_with(SerialTransport::unavailable("no device"));

        let result = service.submit(ActuatorCommand::Start, CommandOrigin::Manual).await;

        assert!(matches!(
            result,
            Err(DispatchError::Transport { source: TransportError::Unavailable(_), .. })
        ));
        assert_eq!(
            device_state.last_command().unwrap().failure.as_deref(),
            Some("Serial transport unavailable: no device")
        );
    }
}
