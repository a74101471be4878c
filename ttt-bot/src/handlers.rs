use std::sync::Arc;

use tracing::{info, warn};

use crate::game_manager::{GameManager, GameSnapshot};
use crate::rate_limiter::UserRateLimiter;
use ttt_types::{
    ActionRow, BoardView, Button, ButtonStyle, GameError, GameId, Interaction,
    InteractionResponse, OpponentRejection, Participant, START_COMMAND, STATS_COMMAND,
    cell_custom_id, parse_cell_custom_id,
};

pub const NOT_YOUR_TURN: &str = "Not your turn!";
pub const CELL_TAKEN: &str = "That cell is already taken.";
pub const CELL_OFF_BOARD: &str = "That cell is not on the board.";
pub const GAME_OVER: &str = "This game is no longer running.";
pub const BOT_OPPONENT: &str = "You can't play against a bot.";
pub const SELF_OPPONENT: &str = "You can't play against yourself.";
pub const MISSING_OPPONENT: &str = "Pick an opponent to play against.";
pub const NO_GAMES_YET: &str = "You haven't played any games yet! 🎮";
pub const SLOW_DOWN: &str = "You're clicking too fast, try again in a moment.";
pub const UNKNOWN_COMMAND: &str = "Unknown command.";
pub const UNKNOWN_BUTTON: &str = "That button doesn't belong to a game.";
pub const STATS_RETRY: &str = "⚠️ The result could not be saved yet; it will be retried.";

/// Turns relay interactions into responses. Rejections are always ephemeral
/// so only the user who caused them sees them.
pub struct InteractionHandler {
    game_manager: Arc<GameManager>,
    rate_limiter: UserRateLimiter,
}

impl InteractionHandler {
    pub fn new(game_manager: Arc<GameManager>, rate_limiter: UserRateLimiter) -> Self {
        Self {
            game_manager,
            rate_limiter,
        }
    }

    pub fn rate_limiter(&self) -> &UserRateLimiter {
        &self.rate_limiter
    }

    pub async fn handle_interaction(&self, interaction: Interaction) -> InteractionResponse {
        if !self.rate_limiter.check(&interaction.user().id) {
            warn!("Rate limit exceeded for user {}", interaction.user().id);
            return rejection(&GameError::RateLimitExceeded);
        }

        match interaction {
            Interaction::Command {
                name,
                user,
                opponent,
            } => match name.as_str() {
                START_COMMAND => self.handle_start_game(user, opponent),
                STATS_COMMAND => self.handle_stats(user).await,
                other => {
                    warn!("Unknown command '{}' from {}", other, user.id);
                    InteractionResponse::ephemeral(UNKNOWN_COMMAND)
                }
            },
            Interaction::Component { custom_id, user } => match parse_cell_custom_id(&custom_id) {
                Some((game_id, cell)) => self.handle_cell_click(game_id, cell, user).await,
                None => {
                    warn!("Unrecognised component '{}' from {}", custom_id, user.id);
                    InteractionResponse::ephemeral(UNKNOWN_BUTTON)
                }
            },
        }
    }

    fn handle_start_game(
        &self,
        challenger: Participant,
        opponent: Option<Participant>,
    ) -> InteractionResponse {
        let Some(opponent) = opponent else {
            return InteractionResponse::ephemeral(MISSING_OPPONENT);
        };

        match self.game_manager.start_game(challenger, opponent) {
            Ok(snapshot) => InteractionResponse::Message {
                content: format!("Tic-Tac-Toe started! {}", snapshot.status_line),
                components: board_components(snapshot.game_id, &snapshot.view),
                ephemeral: false,
            },
            Err(e) => rejection(&e),
        }
    }

    async fn handle_stats(&self, user: Participant) -> InteractionResponse {
        match self.game_manager.get_stats(&user.id).await {
            Some(record) => InteractionResponse::public(format!(
                "{} Stats:\nPlayed: {}\nWon: {}\nLost: {}",
                user.mention(),
                record.played,
                record.won,
                record.lost
            )),
            None => InteractionResponse::public(NO_GAMES_YET),
        }
    }

    async fn handle_cell_click(
        &self,
        game_id: GameId,
        cell: usize,
        user: Participant,
    ) -> InteractionResponse {
        match self.game_manager.submit_move(game_id, &user.id, cell).await {
            Ok(report) => {
                let mut content = report.snapshot.status_line.clone();
                if !report.stats_saved {
                    content.push('\n');
                    content.push_str(STATS_RETRY);
                }
                render_update(content, &report.snapshot)
            }
            Err(e) => {
                info!("Rejected move by {} on game {}: {}", user.id, game_id, e);
                rejection(&e)
            }
        }
    }
}

fn render_update(content: String, snapshot: &GameSnapshot) -> InteractionResponse {
    InteractionResponse::UpdateMessage {
        content,
        components: board_components(snapshot.game_id, &snapshot.view),
    }
}

fn rejection(error: &GameError) -> InteractionResponse {
    let notice = match error {
        GameError::InvalidOpponent {
            reason: OpponentRejection::Bot,
        } => BOT_OPPONENT,
        GameError::InvalidOpponent {
            reason: OpponentRejection::SelfPlay,
        } => SELF_OPPONENT,
        GameError::NotYourTurn => NOT_YOUR_TURN,
        GameError::CellOccupied { .. } => CELL_TAKEN,
        GameError::CellOutOfRange { .. } => CELL_OFF_BOARD,
        GameError::GameAlreadyCompleted | GameError::GameNotFound { .. } => GAME_OVER,
        GameError::RateLimitExceeded => SLOW_DOWN,
    };
    InteractionResponse::ephemeral(notice)
}

/// One button per cell, three rows of three. The cell index travels in the custom id.
pub fn board_components(game_id: GameId, view: &BoardView) -> Vec<ActionRow> {
    view.rows
        .iter()
        .map(|row| ActionRow {
            buttons: row
                .iter()
                .map(|cell| Button {
                    custom_id: cell_custom_id(game_id, cell.index),
                    label: cell.glyph.clone(),
                    style: ButtonStyle::Secondary,
                    disabled: !cell.interactive,
                })
                .collect(),
        })
        .collect()
}
