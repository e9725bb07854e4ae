//! Outbound notification senders and the schedule summary they carry.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod discord;
pub mod redis;

pub use discord::DiscordSender;
pub use redis::RedisSender;

use crate::config::Config;
use crate::model::schedule::Game;

/// Game details carried by schedule notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub id: String,
    pub game_date: String,
    pub start_time: String,
    pub home_team: String,
    pub away_team: String,
}

impl From<&Game> for GameInfo {
    fn from(game: &Game) -> Self {
        GameInfo {
            id: game.id.to_string(),
            game_date: game.game_date.clone(),
            start_time: game.start_time_utc.clone(),
            home_team: game.home_team.abbrev.clone(),
            away_team: game.away_team.abbrev.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook returned status {0}")]
    Status(u16),
    #[error("webhook request failed: {0}")]
    Request(#[source] ureq::Error),
    #[error("redis request failed: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("failed to serialize notification payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A channel for run notifications. Implementations cover the configured
/// webhook, a queue, or nothing at all when notifications are disabled.
pub trait Sender {
    /// Sends a plain text message.
    fn send(&self, message: &str) -> Result<(), NotifyError>;

    /// Sends the end-of-run summary of every scheduled game.
    fn send_schedule_summary(&self, games: &[GameInfo]) -> Result<(), NotifyError>;

    /// Whether this sender is configured to actually deliver anything.
    fn is_enabled(&self) -> bool;
}

/// Sender used when notifications are disabled.
pub struct NoOpSender;

impl Sender for NoOpSender {
    fn send(&self, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }

    fn send_schedule_summary(&self, _games: &[GameInfo]) -> Result<(), NotifyError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Picks the sender for this run from configuration presence: the webhook
/// when a URL is set, otherwise the queue, otherwise a no-op.
pub fn sender_from_config(config: &Config) -> Box<dyn Sender> {
    if let Some(webhook_url) = config.discord_webhook_url.as_deref() {
        if !webhook_url.is_empty() {
            let mut sender = DiscordSender::new(webhook_url);
            if let Some(user_id) = config.discord_user_id.as_deref() {
                sender = sender.with_user_id(user_id);
            }
            return Box::new(sender);
        }
    }

    if let Some(redis_url) = config.redis_url.as_deref() {
        match RedisSender::connect(redis_url, &config.redis_queue) {
            Ok(sender) => return Box::new(sender),
            Err(e) => {
                warn!(error = %e, "Failed to connect to Redis, notifications disabled");
            }
        }
    }

    Box::new(NoOpSender)
}
