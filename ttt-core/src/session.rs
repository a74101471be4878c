use chrono::{DateTime, Utc};
use tracing::debug;
use ttt_types::{
    GameError, GameId, Mark, MoveResult, OpponentRejection, Participant, SessionStatus, UserId,
};

use crate::Board;

/// Rejects opponents that cannot take part in a game: automated accounts and
/// the challenger themselves.
pub fn validate_opponent(challenger: &Participant, opponent: &Participant) -> Result<(), GameError> {
    if opponent.bot {
        return Err(GameError::InvalidOpponent {
            reason: OpponentRejection::Bot,
        });
    }
    if opponent.id == challenger.id {
        return Err(GameError::InvalidOpponent {
            reason: OpponentRejection::SelfPlay,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct GameSession {
    id: GameId,
    /// `players[0]` is the challenger and plays X, `players[1]` plays O.
    players: [Participant; 2],
    board: Board,
    status: SessionStatus,
    created_at: DateTime<Utc>,
}

impl GameSession {
    pub fn start(challenger: Participant, opponent: Participant) -> Result<Self, GameError> {
        Self::start_with_id(GameId::new_v4(), challenger, opponent)
    }

    pub fn start_with_id(
        id: GameId,
        challenger: Participant,
        opponent: Participant,
    ) -> Result<Self, GameError> {
        validate_opponent(&challenger, &opponent)?;

        let status = SessionStatus::AwaitingMove {
            turn: challenger.id.clone(),
        };
        Ok(Self {
            id,
            players: [challenger, opponent],
            board: Board::new(),
            status,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn players(&self) -> &[Participant; 2] {
        &self.players
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn current_turn(&self) -> Option<&Participant> {
        match &self.status {
            SessionStatus::AwaitingMove { turn } => self.participant(turn),
            _ => None,
        }
    }

    pub fn participant(&self, user_id: &str) -> Option<&Participant> {
        self.players.iter().find(|p| p.id == user_id)
    }

    fn mark_of(&self, user_id: &str) -> Option<Mark> {
        self.players
            .iter()
            .position(|p| p.id == user_id)
            .map(|index| if index == 0 { Mark::X } else { Mark::O })
    }

    fn other_player(&self, user_id: &str) -> &Participant {
        if self.players[0].id == user_id {
            &self.players[1]
        } else {
            &self.players[0]
        }
    }

    /// Applies one move for `actor`. Rejected moves leave the session unchanged.
    pub fn attempt_move(&mut self, actor: &UserId, cell: usize) -> Result<MoveResult, GameError> {
        let turn = match &self.status {
            SessionStatus::AwaitingMove { turn } => turn,
            _ => return Err(GameError::GameAlreadyCompleted),
        };
        if cell >= self.board.cells().len() {
            return Err(GameError::CellOutOfRange { cell });
        }
        if turn != actor {
            return Err(GameError::NotYourTurn);
        }
        let mark = self.mark_of(actor).ok_or(GameError::NotYourTurn)?;

        self.board.place(cell, mark)?;
        debug!("Game {}: {} placed {:?} at {}", self.id, actor, mark, cell);

        let result = if self.board.winner().is_some() {
            let loser = self.other_player(actor).id.clone();
            self.status = SessionStatus::Won {
                winner: actor.clone(),
            };
            MoveResult::Won {
                winner: actor.clone(),
                loser,
            }
        } else if self.board.is_full() {
            self.status = SessionStatus::Draw;
            MoveResult::Draw {
                players: [self.players[0].id.clone(), self.players[1].id.clone()],
            }
        } else {
            let next_turn = self.other_player(actor).id.clone();
            self.status = SessionStatus::AwaitingMove {
                turn: next_turn.clone(),
            };
            MoveResult::Continuing { next_turn }
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str) -> Participant {
        Participant {
            id: id.to_string(),
            display_name: format!("Player {}", id),
            bot: false,
        }
    }

    #[test]
    fn test_validate_opponent() {
        let alice = player("1");
        let mut robot = player("2");
        robot.bot = true;

        assert!(validate_opponent(&alice, &player("2")).is_ok());
        assert_eq!(
            validate_opponent(&alice, &robot),
            Err(GameError::InvalidOpponent {
                reason: OpponentRejection::Bot
            })
        );
        assert_eq!(
            validate_opponent(&alice, &alice.clone()),
            Err(GameError::InvalidOpponent {
                reason: OpponentRejection::SelfPlay
            })
        );
    }

    #[test]
    fn test_challenger_moves_first() {
        let session = GameSession::start(player("1"), player("2")).unwrap();
        assert_eq!(session.current_turn().unwrap().id, "1");
        assert_eq!(
            session.status(),
            &SessionStatus::AwaitingMove { turn: "1".into() }
        );
    }

    #[test]
    fn test_turn_toggles_after_accepted_move() {
        let mut session = GameSession::start(player("1"), player("2")).unwrap();
        let result = session.attempt_move(&"1".to_string(), 4).unwrap();
        assert_eq!(
            result,
            MoveResult::Continuing {
                next_turn: "2".into()
            }
        );
        assert_eq!(session.current_turn().unwrap().id, "2");
    }

    #[test]
    fn test_out_of_range_cell_is_rejected() {
        let mut session = GameSession::start(player("1"), player("2")).unwrap();
        assert_eq!(
            session.attempt_move(&"1".to_string(), 9),
            Err(GameError::CellOutOfRange { cell: 9 })
        );
        assert_eq!(session.board().mark_count(), 0);
    }
}
