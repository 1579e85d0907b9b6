mod actuator_service;
mod background;
mod device_state;
mod frame_parser;
#[cfg(any(test, feature = "mock"))]
mod mock_link;
mod schedule_service;
mod sensor_service;
mod serial_transport;

pub use actuator_service::*;
pub use background::*;
pub use device_state::*;
pub use frame_parser::*;
#[cfg(any(test, feature = "mock"))]
pub use mock_link::*;
pub use schedule_service::*;
pub use sensor_service::*;
pub use serial_transport::*;
