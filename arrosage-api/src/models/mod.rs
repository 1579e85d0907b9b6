mod schedule;
mod sensor;
mod watering;

pub use schedule::*;
pub use sensor::*;
pub use watering::*;
