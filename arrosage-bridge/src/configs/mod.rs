mod settings;

pub use settings::{Embedded, Logger, Scheduler, Server, Settings};
