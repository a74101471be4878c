use ttt_types::{BOARD_SIDE, BoardView, CellView, SessionStatus};

use crate::{Board, GameSession};

pub fn render_board(board: &Board, accepting_moves: bool) -> BoardView {
    let rows = board
        .cells()
        .chunks(BOARD_SIDE)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| CellView {
                    index: row * BOARD_SIDE + col,
                    glyph: cell.glyph().to_string(),
                    interactive: accepting_moves && cell.is_empty(),
                })
                .collect()
        })
        .collect();

    BoardView { rows }
}

impl GameSession {
    pub fn render(&self) -> BoardView {
        render_board(self.board(), !self.is_terminal())
    }

    /// Headline shown above the board.
    pub fn status_line(&self) -> String {
        let mention = |id: &str| {
            self.participant(id)
                .map(|p| p.mention())
                .unwrap_or_else(|| format!("<@{}>", id))
        };
        match self.status() {
            SessionStatus::AwaitingMove { turn } => format!("Turn: {}", mention(turn.as_str())),
            SessionStatus::Won { winner } => format!("{} wins! 🎉", mention(winner.as_str())),
            SessionStatus::Draw => "Draw! 🤝".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ttt_types::{EMPTY_GLYPH, Mark, O_GLYPH, X_GLYPH};

    #[test]
    fn test_render_empty_board() {
        let view = render_board(&Board::new(), true);
        assert_eq!(view.rows.len(), 3);
        assert!(view.rows.iter().all(|r| r.len() == 3));
        assert_eq!(view.interactive_count(), 9);
        assert_eq!(view.cell(5).unwrap().index, 5);
        assert_eq!(view.cell(5).unwrap().glyph, EMPTY_GLYPH);
    }

    #[test]
    fn test_render_marks_and_locks_taken_cells() {
        let mut board = Board::new();
        board.place(0, Mark::X).unwrap();
        board.place(8, Mark::O).unwrap();

        let view = render_board(&board, true);
        assert_eq!(view.cell(0).unwrap().glyph, X_GLYPH);
        assert_eq!(view.cell(8).unwrap().glyph, O_GLYPH);
        assert!(!view.cell(0).unwrap().interactive);
        assert_eq!(view.interactive_count(), 7);
    }

    #[test]
    fn test_terminal_board_is_not_interactive() {
        let view = render_board(&Board::new(), false);
        assert_eq!(view.interactive_count(), 0);
    }
}
