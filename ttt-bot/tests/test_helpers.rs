#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ttt_bot::game_manager::{GameManager, MoveReport};
use ttt_bot::handlers::InteractionHandler;
use ttt_bot::rate_limiter::UserRateLimiter;
use ttt_persistence::StatsStore;
use ttt_types::{
    GameError, GameId, Interaction, InteractionResponse, Participant, START_COMMAND,
    STATS_COMMAND,
};

/// Creates a human test participant
pub fn create_test_user(id: &str) -> Participant {
    Participant {
        id: id.to_string(),
        display_name: format!("User {}", id),
        bot: false,
    }
}

pub fn create_test_bot(id: &str) -> Participant {
    Participant {
        bot: true,
        ..create_test_user(id)
    }
}

/// Test setup that provides all necessary components backed by a temp stats file
pub struct TestBotSetup {
    pub dir: tempfile::TempDir,
    pub stats: Arc<StatsStore>,
    pub game_manager: Arc<GameManager>,
    pub handler: InteractionHandler,
}

impl TestBotSetup {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        Self::with_stats_path(dir, |dir| dir.join("stats.json"))
    }

    /// Stats path inside a directory that does not exist, so every write fails
    pub fn with_unwritable_stats() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        Self::with_stats_path(dir, |dir| dir.join("not-yet").join("stats.json"))
    }

    fn with_stats_path(dir: tempfile::TempDir, path: impl FnOnce(&std::path::Path) -> PathBuf) -> Self {
        let stats = Arc::new(StatsStore::new(path(dir.path())));
        let game_manager = Arc::new(GameManager::new(stats.clone()));
        let handler = InteractionHandler::new(
            game_manager.clone(),
            UserRateLimiter::new(1_000, Duration::from_secs(1)),
        );
        Self {
            dir,
            stats,
            game_manager,
            handler,
        }
    }

    pub fn start_game(&self, challenger: &str, opponent: &str) -> GameId {
        self.game_manager
            .start_game(create_test_user(challenger), create_test_user(opponent))
            .expect("game should start")
            .game_id
    }

    pub async fn play(&self, game_id: GameId, actor: &str, cell: usize) -> Result<MoveReport, GameError> {
        self.game_manager
            .submit_move(game_id, &actor.to_string(), cell)
            .await
    }

    /// Plays (actor, cell) pairs in order, panicking on any rejection
    pub async fn play_all(&self, game_id: GameId, moves: &[(&str, usize)]) -> MoveReport {
        let mut last = None;
        for &(actor, cell) in moves {
            last = Some(
                self.play(game_id, actor, cell)
                    .await
                    .unwrap_or_else(|e| panic!("{} at {} rejected: {:?}", actor, cell, e)),
            );
        }
        last.expect("at least one move")
    }

    pub async fn send(&self, interaction: Interaction) -> InteractionResponse {
        self.handler.handle_interaction(interaction).await
    }
}

pub fn start_command(challenger: Participant, opponent: Option<Participant>) -> Interaction {
    Interaction::Command {
        name: START_COMMAND.to_string(),
        user: challenger,
        opponent,
    }
}

pub fn stats_command(user: Participant) -> Interaction {
    Interaction::Command {
        name: STATS_COMMAND.to_string(),
        user,
        opponent: None,
    }
}

pub fn click(custom_id: &str, user: Participant) -> Interaction {
    Interaction::Component {
        custom_id: custom_id.to_string(),
        user,
    }
}

/// Custom id of the button for `cell` in a board response
pub fn button_id(response: &InteractionResponse, cell: usize) -> String {
    response.components()[cell / 3].buttons[cell % 3]
        .custom_id
        .clone()
}
