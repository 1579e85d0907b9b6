use crate::errors::TransportError;
use crate::models::ActuatorCommand;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Failed to send {command} to the rig: {source}")]
    Transport {
        command: ActuatorCommand,
        #[source]
        source: TransportError,
    },
}
