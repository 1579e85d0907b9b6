use std::sync::Arc;
use std::time::Duration;

use arrosage_api::ScheduledWaterings;
use async_trait::async_trait;
use reqwest::Client;

use crate::configs::Scheduler;
use crate::errors::ScheduleFetchError;
use crate::models::{ActuatorCommand, CommandOrigin};
use crate::services::{ActuatorService, BackgroundTask};

/// Where the reconciliation loop learns which waterings are due.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn fetch(&self) -> Result<ScheduledWaterings, ScheduleFetchError>;
}

/// The remote scheduler, reached over `GET {base_url}/api/arrosage/scheduled`.
pub struct HttpScheduleSource {
    client: Client,
    endpoint: String,
}

impl HttpScheduleSource {
    pub fn new(scheduler: &Scheduler) -> Result<Self, ScheduleFetchError> {
        let client = Client::builder()
            .timeout(scheduler.timeout())
            .build()
            .map_err(ScheduleFetchError::Client)?;

        Ok(Self {
            client,
            endpoint: scheduler.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ScheduleSource for HttpScheduleSource {
    async fn fetch(&self) -> Result<ScheduledWaterings, ScheduleFetchError> {
        let response = self.client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(ScheduleFetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScheduleFetchError::Status(status.as_u16()));
        }

        response
            .json::<ScheduledWaterings>()
            .await
            .map_err(ScheduleFetchError::Decode)
    }
}

/// Commands attempted during one reconciliation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub started: bool,
    pub stopped: bool,
}

/// Periodically forwards due starts and stops to the actuator.
///
/// Nothing is persisted: a cycle missed while the process is down is lost,
/// and a failed fetch only skips the current cycle.
pub struct ScheduleService {
    source: Arc<dyn ScheduleSource>,
    actuator_service: Arc<ActuatorService>,
    fetch_timeout: Duration,
}

impl ScheduleService {
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        actuator_service: Arc<ActuatorService>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            source,
            actuator_service,
            fetch_timeout,
        }
    }

    /// Fetches the schedule, then submits Start before Stop when both are due.
    pub async fn run_cycle(&self) -> Result<CycleReport, ScheduleFetchError> {
        let schedule = tokio::time::timeout(self.fetch_timeout, self.source.fetch())
            .await
            .map_err(|_| ScheduleFetchError::Timeout(self.fetch_timeout))??;

        let mut report = CycleReport::default();

        if schedule.wants_start() {
            tracing::info!("{} scheduled watering(s) due to start", schedule.to_start.len());
            report.started = true;
            // Already logged by the actuator, the next cycle is a fresh attempt.
            let _ = self.actuator_service
                .submit(ActuatorCommand::Start, CommandOrigin::Schedule)
                .await;
        }

        if schedule.wants_stop() {
            tracing::info!("{} scheduled watering(s) due to stop", schedule.to_stop.len());
            report.stopped = true;
            let _ = self.actuator_service
                .submit(ActuatorCommand::Stop, CommandOrigin::Schedule)
                .await;
        }

        Ok(report)
    }

    pub fn start(self: Arc<Self>, period: Duration) -> BackgroundTask {
        BackgroundTask::spawn("schedule reconciliation", period, move || {
            let service = Arc::clone(&self);
            async move {
                match service.run_cycle().await {
                    Ok(report) => tracing::debug!(?report, "schedule cycle done"),
                    Err(e) => tracing::warn!("skipping schedule cycle: {}", e),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use tokio::sync::Mutex;

    use super::*;
    use crate::services::{DeviceState, MockLink, SerialTransport};

    /// Replays scripted answers, then keeps answering with an empty schedule.
    struct ScriptedSource {
        answers: std::sync::Mutex<VecDeque<Result<ScheduledWaterings, ScheduleFetchError>>>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(answers: Vec<Result<ScheduledWaterings, ScheduleFetchError>>) -> Self {
            Self {
                answers: std::sync::Mutex::new(answers.into()),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new(vec![Ok(schedule(&["p1"], &[]))])
            }
        }
    }

    #[async_trait]
    impl ScheduleSource for ScriptedSource {
        async fn fetch(&self) -> Result<ScheduledWaterings, ScheduleFetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.answers
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(ScheduledWaterings::default()))
        }
    }

    fn schedule(to_start: &[&str], to_stop: &[&str]) -> ScheduledWaterings {
        ScheduledWaterings {
            to_start: to_start.iter().map(|id| json!(id)).collect(),
            to_stop: to_stop.iter().map(|id| json!(id)).collect(),
        }
    }

    fn service(source: Arc<ScriptedSource>) -> (MockLink, Arc<ScheduleService>) {
        let link = MockLink::new();
        let actuator_service = Arc::new(ActuatorService::new(
            Arc::new(Mutex::new(SerialTransport::connected(Box::new(link.clone())))),
            Arc::new(DeviceState::new()),
        ));
        let service = ScheduleService::new(source, actuator_service, Duration::from_secs(10));

        (link, Arc::new(service))
    }

    #[tokio::test]
    async fn test_start_requested_submits_one_start() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(schedule(&["p1"], &[]))]));
        let (link, service) = service(source);

        let report = service.run_cycle().await.unwrap();

        assert_eq!(report, CycleReport { started: true, stopped: false });
        assert_eq!(link.written_lines(), vec!["ON"]);
    }

    #[tokio::test]
    async fn test_conflicting_schedule_starts_then_stops() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(schedule(&["p1"], &["p2"]))]));
        let (link, service) = service(source);

        let report = service.run_cycle().await.unwrap();

        assert_eq!(report, CycleReport { started: true, stopped: true });
        assert_eq!(link.written(), b"ON\nOFF\n");
    }

    #[tokio::test]
    async fn test_empty_schedule_writes_nothing() {
        let source = Arc::new(ScriptedSource::new(vec![]));
        let (link, service) = service(source);

        assert_eq!(service.run_cycle().await.unwrap(), CycleReport::default());
        assert!(link.written().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_writes_nothing() {
        let source = Arc::new(ScriptedSource::new(vec![Err(ScheduleFetchError::Status(502))]));
        let (link, service) = service(source);

        assert!(matches!(service.run_cycle().await, Err(ScheduleFetchError::Status(502))));
        assert!(link.written().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_fetch_times_out() {
        let source = Arc::new(ScriptedSource::slow(Duration::from_secs(60)));
        let (link, service) = service(source);

        let result = service.run_cycle().await;

        assert!(matches!(result, Err(ScheduleFetchError::Timeout(timeout)) if timeout == Duration::from_secs(10)));
        assert!(link.written().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_retries_after_failed_cycle() {
        let source = Arc::new(ScriptedSource::new(vec![
            Err(ScheduleFetchError::Status(500)),
            Ok(schedule(&[], &["p1"])),
        ]));
        let (link, service) = service(Arc::clone(&source));

        let task = service.start(Duration::from_secs(30));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(link.written().is_empty());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(link.written_lines(), vec!["OFF"]);

        task.stop().await;
    }
}
