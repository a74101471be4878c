#![allow(dead_code)]

use ttt_core::GameSession;
use ttt_types::{MoveResult, Participant, UserId};

/// Creates a human test participant with the given id
pub fn create_test_player(id: &str) -> Participant {
    Participant {
        id: id.to_string(),
        display_name: format!("Player {}", id),
        bot: false,
    }
}

/// Creates a bot account participant
pub fn create_test_bot(id: &str) -> Participant {
    Participant {
        bot: true,
        ..create_test_player(id)
    }
}

/// Alice ("1") challenges Bob ("2"); Alice plays X
pub fn create_standard_session() -> GameSession {
    GameSession::start(create_test_player("1"), create_test_player("2"))
        .expect("two humans can always start a game")
}

pub fn alice() -> UserId {
    "1".to_string()
}

pub fn bob() -> UserId {
    "2".to_string()
}

/// Plays the given cells alternately starting with the player to move,
/// returning every move result in order
pub fn play_cells(session: &mut GameSession, cells: &[usize]) -> Vec<MoveResult> {
    cells
        .iter()
        .map(|&cell| {
            let actor = session
                .current_turn()
                .expect("session should accept moves")
                .id
                .clone();
            session
                .attempt_move(&actor, cell)
                .unwrap_or_else(|e| panic!("move {} rejected: {:?}", cell, e))
        })
        .collect()
}
