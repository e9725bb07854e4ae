use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{GameInfo, NotifyError, Sender};

/// Discord embed colors (decimal): green for scheduled games, gray when the
/// run found nothing.
const COLOR_SCHEDULED: u32 = 3_066_993;
const COLOR_NO_GAMES: u32 = 9_807_270;

/// Webhook message payload. Either a plain `content` string or a list of
/// embeds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscordMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<DiscordEmbed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub timestamp: String,
}

/// Builds the schedule summary embed. Games render in input order, one block
/// per game; the mention lands once at the very end and only when there is
/// something scheduled.
pub fn build_schedule_summary(
    games: &[GameInfo],
    user_id: Option<&str>,
    now: DateTime<Utc>,
) -> DiscordEmbed {
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    if games.is_empty() {
        return DiscordEmbed {
            title: "NHL Game Schedule".to_string(),
            description: "No games were identified to schedule.".to_string(),
            color: COLOR_NO_GAMES,
            timestamp,
        };
    }

    let plural = if games.len() == 1 { "" } else { "s" };
    let title = format!("NHL Game Schedule ({} game{} scheduled)", games.len(), plural);

    let mut description = String::new();
    for game in games {
        description.push_str(&format!(
            "**{} @ {}**\n{} at {}\n\n",
            game.away_team, game.home_team, game.game_date, game.start_time
        ));
    }
    if let Some(user_id) = user_id {
        description.push_str(&format!("<@{}>", user_id));
    }

    DiscordEmbed {
        title,
        description,
        color: COLOR_SCHEDULED,
        timestamp,
    }
}

/// Discord webhook sender with an optional user to mention in summaries.
#[derive(Debug, Clone)]
pub struct DiscordSender {
    webhook_url: String,
    user_id: Option<String>,
}

impl DiscordSender {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        DiscordSender {
            webhook_url: webhook_url.into(),
            user_id: None,
        }
    }

    /// Mention this user at the end of schedule summaries.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    fn post(&self, payload: &DiscordMessage) -> Result<(), NotifyError> {
        match ureq::post(&self.webhook_url).send_json(payload) {
            Ok(response) => {
                info!(status = response.status().as_u16(), "Posted message to Discord webhook");
                Ok(())
            }
            Err(ureq::Error::StatusCode(code)) => Err(NotifyError::Status(code)),
            Err(e) => Err(NotifyError::Request(e)),
        }
    }
}

impl Sender for DiscordSender {
    fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.post(&DiscordMessage {
            content: Some(message.to_string()),
            ..Default::default()
        })
    }

    fn send_schedule_summary(&self, games: &[GameInfo]) -> Result<(), NotifyError> {
        let embed = build_schedule_summary(games, self.user_id.as_deref(), Utc::now());
        self.post(&DiscordMessage {
            embeds: vec![embed],
            ..Default::default()
        })
    }

    fn is_enabled(&self) -> bool {
        !self.webhook_url.is_empty()
    }
}
