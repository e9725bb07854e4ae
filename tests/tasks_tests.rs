use chrono::{TimeZone, Utc};

use nhl_game_scheduler::config::{Config, LOCAL_TARGET_URL};
use nhl_game_scheduler::model::schedule::{Game, Team};
use nhl_game_scheduler::tasks::{self, QueuePath, TaskError};

fn local_config(test_mode: bool) -> Config {
    Config {
        date: "2025-01-15".to_string(),
        teams: vec![25],
        test_mode,
        all_teams: false,
        today: false,
        shootout: false,
        production: false,
        local_mode: true,
        host_url: None,
        project_id: "localproject".to_string(),
        location: "us-south1".to_string(),
        queue_name: "gameschedule".to_string(),
        emulator_host: "localhost:8123".to_string(),
        discord_webhook_url: None,
        discord_user_id: None,
        redis_url: None,
        redis_queue: "game-notifications".to_string(),
    }
}

fn sample_game(start: &str) -> Game {
    Game {
        id: 2024020100,
        game_date: "2025-01-15".to_string(),
        start_time_utc: start.to_string(),
        away_team: Team::with_default_names(25, "Stars", "Dallas", "DAL"),
        home_team: Team::with_default_names(1, "Bruins", "Boston", "BOS"),
    }
}

#[test]
fn schedule_time_is_exactly_five_minutes_before_start() {
    let task = tasks::build_task(&sample_game("2025-01-16T00:00:00Z"), &local_config(false))
        .expect("task should build");
    let expected = Utc.with_ymd_and_hms(2025, 1, 15, 23, 55, 0).unwrap();
    assert_eq!(task.schedule_time, expected);
}

#[test]
fn execution_end_is_exactly_four_hours_after_start() {
    let task = tasks::build_task(&sample_game("2025-01-16T00:00:00Z"), &local_config(false))
        .expect("task should build");
    let payload: serde_json::Value = serde_json::from_slice(&task.payload).unwrap();
    assert_eq!(payload["execution_end"], "2025-01-16T04:00:00Z");
}

#[test]
fn payload_carries_full_game_context() {
    let task = tasks::build_task(&sample_game("2025-01-16T00:00:00Z"), &local_config(false))
        .expect("task should build");
    let payload: serde_json::Value = serde_json::from_slice(&task.payload).unwrap();

    assert_eq!(payload["game"]["id"], "2024020100");
    assert_eq!(payload["game"]["gameDate"], "2025-01-15");
    // Start time keeps its original string form
    assert_eq!(payload["game"]["startTimeUTC"], "2025-01-16T00:00:00Z");
    assert_eq!(payload["game"]["homeTeam"]["id"], 1);
    assert_eq!(payload["game"]["homeTeam"]["abbrev"], "BOS");
    assert_eq!(payload["game"]["awayTeam"]["id"], 25);
    assert_eq!(payload["game"]["awayTeam"]["abbrev"], "DAL");
    assert_eq!(payload["ShouldNotify"], true);
}

#[test]
fn test_mode_disables_the_notify_flag() {
    let task = tasks::build_task(&sample_game("2025-01-16T00:00:00Z"), &local_config(true))
        .expect("task should build");
    let payload: serde_json::Value = serde_json::from_slice(&task.payload).unwrap();
    assert_eq!(payload["ShouldNotify"], false);
}

#[test]
fn unparseable_start_time_is_a_task_error() {
    let err = tasks::build_task(&sample_game("7:00 PM ET"), &local_config(false)).unwrap_err();
    assert!(matches!(err, TaskError::UnparseableStartTime { game_id: 2024020100, .. }));
}

#[test]
fn target_url_follows_destination_config() {
    let local = tasks::build_task(&sample_game("2025-01-16T00:00:00Z"), &local_config(false))
        .expect("task should build");
    assert_eq!(local.target_url, LOCAL_TARGET_URL);

    let mut config = local_config(false);
    config.local_mode = false;
    config.host_url = Some("https://tracker.example.com/watchGameUpdates".to_string());
    let hosted = tasks::build_task(&sample_game("2025-01-16T00:00:00Z"), &config)
        .expect("task should build");
    assert_eq!(hosted.target_url, "https://tracker.example.com/watchGameUpdates");
}

#[test]
fn queue_path_formats_service_names() {
    let queue = QueuePath {
        project_id: "localproject".to_string(),
        location: "us-south1".to_string(),
        queue_name: "gameschedule".to_string(),
    };
    assert_eq!(queue.parent(), "projects/localproject/locations/us-south1");
    assert_eq!(
        queue.queue(),
        "projects/localproject/locations/us-south1/queues/gameschedule"
    );
}
