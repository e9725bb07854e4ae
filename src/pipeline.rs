use tracing::{info, warn};

use crate::config::Config;
use crate::model::schedule::Game;
use crate::notification::{GameInfo, Sender};
use crate::tasks::{self, TaskError, TaskTransport, TransportError};

/// What happened to one game on its way through the pipeline.
#[derive(Debug)]
pub enum GameOutcome {
    Dispatched { game_id: i64, task_name: String },
    SynthesisFailed { game_id: i64, error: TaskError },
    DispatchFailed { game_id: i64, error: TransportError },
}

impl GameOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, GameOutcome::Dispatched { .. })
    }
}

/// Processes the filtered game list: ensures the queue exists once, creates
/// one task per game in input order, then sends a single schedule summary.
///
/// A failure for one game is logged and the loop continues; the batch never
/// aborts over an individual game. The summary always covers the full
/// filtered list, whatever happened during dispatch.
pub fn process_games(
    transport: &dyn TaskTransport,
    config: &Config,
    games: &[Game],
    sender: &dyn Sender,
) -> Vec<GameOutcome> {
    let mut outcomes = Vec::with_capacity(games.len());

    if games.is_empty() {
        info!("No games found to process");
    } else {
        let queue = config.queue_path();
        if let Err(e) = tasks::ensure_queue(transport, &queue) {
            warn!(error = %e, "Failed to create queue");
        }

        info!(count = games.len(), "Processing games");

        for game in games {
            info!(game_id = game.id, start_time = %game.start_time_utc, "Processing game");

            let task = match tasks::build_task(game, config) {
                Ok(task) => task,
                Err(e) => {
                    warn!(game_id = game.id, error = %e, "Failed to build task for game");
                    outcomes.push(GameOutcome::SynthesisFailed { game_id: game.id, error: e });
                    continue;
                }
            };

            match transport.create_task(&queue, &task) {
                Ok(task_name) => {
                    info!(
                        task_name = %task_name,
                        game_id = game.id,
                        "Created task for game"
                    );
                    outcomes.push(GameOutcome::Dispatched { game_id: game.id, task_name });
                }
                Err(e) => {
                    warn!(game_id = game.id, error = %e, "Failed to create task for game");
                    outcomes.push(GameOutcome::DispatchFailed { game_id: game.id, error: e });
                }
            }
        }
    }

    if sender.is_enabled() {
        let summary: Vec<GameInfo> = games.iter().map(GameInfo::from).collect();
        if let Err(e) = sender.send_schedule_summary(&summary) {
            warn!(error = %e, "Failed to send schedule summary");
        }
    }

    outcomes
}
