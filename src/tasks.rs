use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::model::payload::{GamePayload, TaskPayload};
use crate::model::schedule::Game;

/// Tasks are scheduled to fire this many minutes before the game starts.
const LEAD_TIME_MINUTES: i64 = 5;
/// Execution end hint: game start plus a typical game duration.
const GAME_DURATION_HOURS: i64 = 4;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to parse start time for game {game_id}: {source}")]
    UnparseableStartTime {
        game_id: i64,
        source: chrono::ParseError,
    },
    #[error("failed to serialize task payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("already exists")]
    AlreadyExists,
    #[error("tasks service returned status {0}")]
    Status(u16),
    #[error("tasks service request failed: {0}")]
    Request(#[source] ureq::Error),
    #[error("cannot reach tasks service at {endpoint} - ensure the emulator is running: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: ureq::Error,
    },
    #[error("production queue service is not supported yet, run against the emulator")]
    ProductionUnsupported,
}

/// Fully qualified queue identity on the tasks service.
#[derive(Debug, Clone)]
pub struct QueuePath {
    pub project_id: String,
    pub location: String,
    pub queue_name: String,
}

impl QueuePath {
    /// `projects/<project>/locations/<location>`
    pub fn parent(&self) -> String {
        format!("projects/{}/locations/{}", self.project_id, self.location)
    }

    /// `projects/<project>/locations/<location>/queues/<queue>`
    pub fn queue(&self) -> String {
        format!(
            "projects/{}/locations/{}/queues/{}",
            self.project_id, self.location, self.queue_name
        )
    }
}

/// A unit of work handed to the tasks service: where to send it, what to
/// send, and when to fire.
#[derive(Debug, Clone)]
pub struct DispatchTask {
    pub game_id: i64,
    pub target_url: String,
    pub payload: Vec<u8>,
    pub schedule_time: DateTime<Utc>,
}

/// Builds the dispatch task for a single game: payload with full game
/// context, execution end hint, and a schedule time ahead of the start.
pub fn build_task(game: &Game, config: &Config) -> Result<DispatchTask, TaskError> {
    let start_time = DateTime::parse_from_rfc3339(&game.start_time_utc)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| TaskError::UnparseableStartTime { game_id: game.id, source })?;

    let execution_end =
        (start_time + Duration::hours(GAME_DURATION_HOURS)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let schedule_time = start_time - Duration::minutes(LEAD_TIME_MINUTES);

    let payload = TaskPayload {
        game: GamePayload {
            id: game.id.to_string(),
            game_date: game.game_date.clone(),
            start_time_utc: game.start_time_utc.clone(),
            home_team: game.home_team.clone(),
            away_team: game.away_team.clone(),
        },
        execution_end: Some(execution_end),
        should_notify: !config.test_mode,
    };

    info!(
        game_id = game.id,
        schedule_time = %schedule_time.to_rfc3339_opts(SecondsFormat::Secs, true),
        "Built task for game"
    );

    Ok(DispatchTask {
        game_id: game.id,
        target_url: config.target_url(),
        payload: serde_json::to_vec(&payload)?,
        schedule_time,
    })
}

/// The tasks service boundary: create a queue, create a task on it.
pub trait TaskTransport {
    fn create_queue(&self, queue: &QueuePath) -> Result<(), TransportError>;
    fn create_task(&self, queue: &QueuePath, task: &DispatchTask) -> Result<String, TransportError>;
}

/// Creates the task queue if it doesn't exist. An already existing queue is
/// success, so repeat runs are safe without coordination.
pub fn ensure_queue(transport: &dyn TaskTransport, queue: &QueuePath) -> Result<(), TransportError> {
    match transport.create_queue(queue) {
        Ok(()) => {
            info!(queue = %queue.queue(), "Created queue");
            Ok(())
        }
        Err(TransportError::AlreadyExists) => {
            info!(queue = %queue.queue_name, "Queue already exists, skipping creation");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[derive(Debug, Deserialize)]
struct CreatedTask {
    #[serde(default)]
    name: String,
}

/// Tasks service client speaking the HTTP dialect of the Cloud Tasks API,
/// as exposed by the local emulator.
#[derive(Debug, Clone)]
pub struct HttpTasksClient {
    base_url: String,
}

impl HttpTasksClient {
    /// Connects to the tasks service and probes the queues collection so an
    /// unreachable service fails the run at startup rather than mid-batch.
    pub fn connect(config: &Config) -> Result<Self, TransportError> {
        if config.production {
            return Err(TransportError::ProductionUnsupported);
        }

        let endpoint = &config.emulator_host;
        let base_url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", endpoint)
        };
        info!(endpoint = %base_url, "Connecting to local Cloud Tasks emulator");

        let probe = format!("{}/v2/{}/queues", base_url, config.queue_path().parent());
        match ureq::get(&probe).call() {
            Ok(_) => {}
            // A status response still proves the service is reachable.
            Err(ureq::Error::StatusCode(_)) => {}
            Err(e) => {
                return Err(TransportError::Connect {
                    endpoint: base_url,
                    source: e,
                });
            }
        }

        Ok(HttpTasksClient { base_url })
    }
}

impl TaskTransport for HttpTasksClient {
    fn create_queue(&self, queue: &QueuePath) -> Result<(), TransportError> {
        let url = format!("{}/v2/{}/queues", self.base_url, queue.parent());
        let body = serde_json::json!({ "name": queue.queue() });

        match ureq::post(&url).send_json(body) {
            Ok(_) => Ok(()),
            Err(ureq::Error::StatusCode(409)) => Err(TransportError::AlreadyExists),
            Err(ureq::Error::StatusCode(code)) => Err(TransportError::Status(code)),
            Err(e) => Err(TransportError::Request(e)),
        }
    }

    fn create_task(&self, queue: &QueuePath, task: &DispatchTask) -> Result<String, TransportError> {
        let url = format!("{}/v2/{}/tasks", self.base_url, queue.queue());
        let body = serde_json::json!({
            "task": {
                "httpRequest": {
                    "httpMethod": "POST",
                    "url": task.target_url,
                    "headers": { "Content-Type": "application/json" },
                    "body": BASE64.encode(&task.payload),
                },
                "scheduleTime": task.schedule_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            }
        });

        match ureq::post(&url).send_json(body) {
            Ok(response) => {
                let created: CreatedTask = response
                    .into_body()
                    .read_json()
                    .map_err(TransportError::Request)?;
                Ok(created.name)
            }
            Err(ureq::Error::StatusCode(409)) => Err(TransportError::AlreadyExists),
            Err(ureq::Error::StatusCode(code)) => Err(TransportError::Status(code)),
            Err(e) => Err(TransportError::Request(e)),
        }
    }
}
