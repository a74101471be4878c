use ttt_types::{BOARD_CELLS, Cell, GameError, Mark};

/// The eight winning triples: rows, columns, diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2], [3, 4, 5], [6, 7, 8], // rows
    [0, 3, 6], [1, 4, 7], [2, 5, 8], // cols
    [0, 4, 8], [2, 4, 6],             // diagonals
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Writes `mark` into an empty cell. The board is untouched on error.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(GameError::CellOutOfRange { cell: index })?;
        if !cell.is_empty() {
            return Err(GameError::CellOccupied { cell: index });
        }
        *cell = Cell::Marked(mark);
        Ok(())
    }

    pub fn winner(&self) -> Option<Mark> {
        for [a, b, c] in WIN_LINES {
            if let Cell::Marked(mark) = self.cells[a] {
                if self.cells[b] == self.cells[a] && self.cells[c] == self.cells[a] {
                    return Some(mark);
                }
            }
        }
        None
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}
