use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use ttt_core::GameSession;
use ttt_persistence::StatsStore;
use ttt_types::{
    BoardView, GameError, GameId, MoveResult, Outcome, Participant, SessionStatus, StatsRecord,
    UserId,
};

/// What the interaction layer needs to redraw a board message.
#[derive(Debug, Clone)]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub status: SessionStatus,
    pub status_line: String,
    pub view: BoardView,
}

impl From<&GameSession> for GameSnapshot {
    fn from(session: &GameSession) -> Self {
        Self {
            game_id: session.id(),
            status: session.status().clone(),
            status_line: session.status_line(),
            view: session.render(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoveReport {
    pub snapshot: GameSnapshot,
    pub result: MoveResult,
    /// False when the game finished but its outcome is still waiting to be written.
    pub stats_saved: bool,
}

/// Registry of running games. Sessions are created on start and removed as
/// soon as they reach a win or a draw.
pub struct GameManager {
    active_games: DashMap<GameId, GameSession>,
    stats: Arc<StatsStore>,
    pending_outcomes: Mutex<Vec<(UserId, Outcome)>>,
}

impl GameManager {
    pub fn new(stats: Arc<StatsStore>) -> Self {
        Self {
            active_games: DashMap::new(),
            stats,
            pending_outcomes: Mutex::new(Vec::new()),
        }
    }

    pub fn start_game(
        &self,
        challenger: Participant,
        opponent: Participant,
    ) -> Result<GameSnapshot, GameError> {
        let session = GameSession::start(challenger, opponent)?;
        let snapshot = GameSnapshot::from(&session);

        let [a, b] = session.players();
        info!("Created game {} between {} and {}", session.id(), a.id, b.id);
        self.active_games.insert(session.id(), session);
        Ok(snapshot)
    }

    pub async fn submit_move(
        &self,
        game_id: GameId,
        actor: &UserId,
        cell: usize,
    ) -> Result<MoveReport, GameError> {
        // The entry guard serializes moves on one game; it is released
        // before any stats I/O happens.
        let (result, snapshot) = {
            let mut session = self
                .active_games
                .get_mut(&game_id)
                .ok_or(GameError::GameNotFound { game_id })?;
            let result = session.attempt_move(actor, cell)?;
            (result, GameSnapshot::from(&*session))
        };

        if matches!(result, MoveResult::Continuing { .. }) {
            return Ok(MoveReport {
                snapshot,
                result,
                stats_saved: true,
            });
        }

        if let Some((_, finished)) = self.active_games.remove(&game_id) {
            let duration = Utc::now() - finished.created_at();
            info!(
                "Game {} finished after {}s: {:?}",
                game_id,
                duration.num_seconds(),
                result
            );
        }
        let stats_saved = self.record_outcomes(result.outcomes()).await;

        Ok(MoveReport {
            snapshot,
            result,
            stats_saved,
        })
    }

    /// Writes `outcomes` after any earlier ones that failed to persist.
    /// Whatever cannot be written stays queued for the next attempt.
    pub async fn record_outcomes(&self, outcomes: Vec<(UserId, Outcome)>) -> bool {
        self.pending_outcomes.lock().await.extend(outcomes);
        self.flush_pending().await == 0
    }

    /// Retries queued outcomes in order, stopping at the first failure.
    /// Returns how many are still unsaved.
    pub async fn flush_pending(&self) -> usize {
        let mut pending = self.pending_outcomes.lock().await;

        while let Some((user_id, outcome)) = pending.first().cloned() {
            match self.stats.record_outcome(&user_id, outcome).await {
                Ok(_) => {
                    pending.remove(0);
                }
                Err(e) => {
                    error!(
                        "Failed to save stats, {} outcome(s) kept for retry: {}",
                        pending.len(),
                        e
                    );
                    return pending.len();
                }
            }
        }
        0
    }

    pub async fn pending_outcome_count(&self) -> usize {
        self.pending_outcomes.lock().await.len()
    }

    pub async fn get_stats(&self, user_id: &str) -> Option<StatsRecord> {
        let unsaved = self.flush_pending().await;
        if unsaved > 0 {
            warn!(
                "Stats for {} requested while {} outcome(s) are still pending",
                user_id, unsaved
            );
        }
        self.stats.get_record(user_id).await
    }

    pub fn get_game(&self, game_id: GameId) -> Option<GameSnapshot> {
        self.active_games
            .get(&game_id)
            .map(|session| GameSnapshot::from(&*session))
    }

    pub fn get_active_games_count(&self) -> usize {
        self.active_games.len()
    }
}
