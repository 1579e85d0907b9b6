use std::env;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::models::FrameLayout;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedded {
    /// Falls back to the first port reported by the OS when unset.
    pub port_path: Option<String>,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub frame_layout: FrameLayout,
}

impl Embedded {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheduler {
    pub enabled: bool,
    pub base_url: String,
    pub interval_secs: u64,
    pub timeout_secs: u64,
}

impl Scheduler {
    pub fn endpoint(&self) -> String {
        format!("{}/api/arrosage/scheduled", self.base_url.trim_end_matches('/'))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub embedded: Embedded,
    pub scheduler: Scheduler,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Self::defaults()?
            .add_source(File::with_name("configs/default").required(false))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// `ARROSAGE__SERVER__PORT=8080` overrides `server.port`.
    fn environment() -> Environment {
        Environment::with_prefix("ARROSAGE").separator("__").try_parsing(true)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("logger.level", "info")?
            .set_default("embedded.baud_rate", 9600)?
            .set_default("embedded.read_timeout_ms", 10)?
            .set_default("embedded.poll_interval_ms", 100)?
            .set_default("embedded.frame_layout", "auto")?
            .set_default("scheduler.enabled", true)?
            .set_default("scheduler.base_url", "http://localhost:3000")?
            .set_default("scheduler.interval_secs", 30)?
            .set_default("scheduler.timeout_secs", 10)
    }
}
