use chrono::{DateTime, Utc};
use clap::Parser;
use thiserror::Error;

use crate::notification::redis::DEFAULT_QUEUE_NAME;
use crate::tasks::QueuePath;
use crate::teams::{self, TeamError};

/// Dallas Stars, the default team selection.
pub const DEFAULT_TEAM_ID: i64 = 25;
/// Task target when running against a local receiver.
pub const LOCAL_TARGET_URL: &str = "http://host.docker.internal:8080";

/// Fetches NHL game schedules and creates delayed dispatch tasks for game tracking.
#[derive(Debug, Parser)]
#[command(name = "game-scheduler", version)]
pub struct Cli {
    /// Specific date to query (YYYY-MM-DD format). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    /// Comma-separated list of team ids or city codes (e.g. '25,CHI,DAL').
    /// Defaults to Dallas Stars (25).
    #[arg(long)]
    pub teams: Option<String>,

    /// Run in test mode with predefined game data.
    #[arg(long)]
    pub test: bool,

    /// Include all teams playing on the specified date.
    #[arg(long)]
    pub all: bool,

    /// Filter for today's upcoming games only (overrides --date).
    #[arg(long)]
    pub today: bool,

    /// Use the shootout test game id (2024030412) instead of the default (2024030411).
    #[arg(long)]
    pub shootout: bool,

    /// Send tasks to the production queue service instead of the local emulator.
    #[arg(long)]
    pub prod: bool,

    /// Send task requests to the local receiver (http://host.docker.internal:8080).
    #[arg(long)]
    pub local: bool,

    /// Custom host URL to send task requests to.
    #[arg(long)]
    pub host: Option<String>,

    /// GCP project id.
    #[arg(long, default_value = "localproject")]
    pub project: String,

    /// GCP location.
    #[arg(long, default_value = "us-south1")]
    pub location: String,

    /// Task queue name.
    #[arg(long, default_value = "gameschedule")]
    pub queue: String,

    /// Cloud Tasks emulator host.
    #[arg(long, env = "CLOUD_TASKS_EMULATOR", default_value = "localhost:8123")]
    pub emulator: String,

    /// Discord webhook URL for the schedule summary.
    #[arg(long = "discord-webhook", env = "DISCORD_WEBHOOK_URL")]
    pub discord_webhook: Option<String>,

    /// Discord user id to mention at the end of the summary.
    #[arg(long = "discord-user-id", env = "DISCORD_USER_ID")]
    pub discord_user_id: Option<String>,

    /// Redis URL for queue-based notifications.
    #[arg(long = "redis-url", env = "REDIS_URL")]
    pub redis_url: Option<String>,

    /// Redis list name for queue-based notifications.
    #[arg(long = "redis-queue", default_value = DEFAULT_QUEUE_NAME)]
    pub redis_queue: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("either --local or --host <url> must be provided")]
    MissingDestination,
    #[error("cannot specify both --local and --host")]
    ConflictingDestination,
    #[error(transparent)]
    Team(#[from] TeamError),
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub date: String,
    pub teams: Vec<i64>,
    pub test_mode: bool,
    pub all_teams: bool,
    pub today: bool,
    pub shootout: bool,
    pub production: bool,
    pub local_mode: bool,
    pub host_url: Option<String>,
    pub project_id: String,
    pub location: String,
    pub queue_name: String,
    pub emulator_host: String,
    pub discord_webhook_url: Option<String>,
    pub discord_user_id: Option<String>,
    pub redis_url: Option<String>,
    pub redis_queue: String,
}

impl Config {
    /// Validates and resolves the parsed command line. `now` decides what
    /// "today" means, both for the --today override and the date default.
    pub fn from_cli(cli: Cli, now: DateTime<Utc>) -> Result<Self, ConfigError> {
        if !cli.local && cli.host.is_none() {
            return Err(ConfigError::MissingDestination);
        }
        if cli.local && cli.host.is_some() {
            return Err(ConfigError::ConflictingDestination);
        }

        // --today overrides any explicit date
        let today_str = now.format("%Y-%m-%d").to_string();
        let date = if cli.today {
            today_str
        } else {
            cli.date.unwrap_or(today_str)
        };

        let team_ids = if cli.all {
            // Empty selection means all teams
            Vec::new()
        } else if let Some(selection) = cli.teams.as_deref() {
            teams::resolve_all(selection.split(','))?
        } else {
            vec![DEFAULT_TEAM_ID]
        };

        Ok(Config {
            date,
            teams: team_ids,
            test_mode: cli.test,
            all_teams: cli.all,
            today: cli.today,
            shootout: cli.shootout,
            production: cli.prod,
            local_mode: cli.local,
            host_url: cli.host,
            project_id: cli.project,
            location: cli.location,
            queue_name: cli.queue,
            emulator_host: cli.emulator,
            discord_webhook_url: cli.discord_webhook,
            discord_user_id: cli.discord_user_id,
            redis_url: cli.redis_url,
            redis_queue: cli.redis_queue,
        })
    }

    /// Where dispatch tasks send their HTTP request.
    pub fn target_url(&self) -> String {
        self.host_url
            .clone()
            .unwrap_or_else(|| LOCAL_TARGET_URL.to_string())
    }

    /// Identity of the destination queue on the tasks service.
    pub fn queue_path(&self) -> QueuePath {
        QueuePath {
            project_id: self.project_id.clone(),
            location: self.location.clone(),
            queue_name: self.queue_name.clone(),
        }
    }
}
