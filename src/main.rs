use chrono::Utc;
use clap::Parser;
use tracing::info;

use nhl_game_scheduler::config::{Cli, Config};
use nhl_game_scheduler::tasks::HttpTasksClient;
use nhl_game_scheduler::{filter, nhl, notification, pipeline};

fn main() -> anyhow::Result<()> {
    // Initialize structured logging with tracing
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let config = Config::from_cli(Cli::parse(), Utc::now())?;

    info!(
        date = %config.date,
        teams = ?config.teams,
        test_mode = config.test_mode,
        all_teams = config.all_teams,
        today = config.today,
        production = config.production,
        "Starting NHL game task scheduler"
    );

    // Connect to the tasks service up front: an unreachable transport is fatal
    let transport = HttpTasksClient::connect(&config)?;

    let games = if config.test_mode {
        info!("Running in test mode with predefined game data");
        vec![nhl::create_test_game(config.shootout, Utc::now())]
    } else {
        let fetched = nhl::fetch_games_for_date(nhl::NHL_API_BASE_URL, &config.date)?;
        let games = filter::by_teams(fetched, &config.teams);
        if config.today {
            filter::upcoming(games, Utc::now())
        } else {
            games
        }
    };

    let sender = notification::sender_from_config(&config);
    pipeline::process_games(&transport, &config, &games, sender.as_ref());

    info!(count = games.len(), "Successfully processed games");
    Ok(())
}
