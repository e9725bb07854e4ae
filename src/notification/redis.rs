use chrono::{SecondsFormat, Utc};
use redis::Commands;
use serde::Serialize;

use super::{GameInfo, NotifyError, Sender};

pub const DEFAULT_QUEUE_NAME: &str = "game-notifications";

/// Message shape pushed onto the notification list.
#[derive(Debug, Serialize)]
struct RedisMessage<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    games: Option<&'a [GameInfo]>,
    timestamp: String,
}

/// Queue-based sender: RPUSHes JSON messages onto a named list for a
/// downstream consumer.
pub struct RedisSender {
    client: redis::Client,
    queue_name: String,
}

impl RedisSender {
    /// Opens the client and pings the server so a bad URL or unreachable
    /// instance is caught at selection time, not on first send.
    pub fn connect(redis_url: &str, queue_name: &str) -> Result<Self, NotifyError> {
        let client = redis::Client::open(redis_url)?;
        let mut conn = client.get_connection()?;
        redis::cmd("PING").query::<String>(&mut conn)?;

        let queue_name = if queue_name.is_empty() {
            DEFAULT_QUEUE_NAME.to_string()
        } else {
            queue_name.to_string()
        };

        Ok(RedisSender { client, queue_name })
    }

    fn push(&self, message: &RedisMessage<'_>) -> Result<(), NotifyError> {
        let payload = serde_json::to_string(message)?;
        let mut conn = self.client.get_connection()?;
        let _: () = conn.rpush(&self.queue_name, payload)?;
        Ok(())
    }
}

impl Sender for RedisSender {
    fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.push(&RedisMessage {
            kind: "simple",
            message: Some(message),
            games: None,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }

    fn send_schedule_summary(&self, games: &[GameInfo]) -> Result<(), NotifyError> {
        let kind = if games.is_empty() { "no_games" } else { "schedule_summary" };
        self.push(&RedisMessage {
            kind,
            message: None,
            games: Some(games),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        })
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
