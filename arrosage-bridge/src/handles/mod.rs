mod sensor_handle;
mod watering_handle;

pub use sensor_handle::*;
pub use watering_handle::*;
