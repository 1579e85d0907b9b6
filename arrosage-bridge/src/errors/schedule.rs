use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleFetchError {
    #[error("Failed to build scheduler client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Scheduler request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Scheduler answered with status {0}")]
    Status(u16),

    #[error("Invalid scheduler payload: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Scheduler did not answer within {0:?}")]
    Timeout(Duration),
}
