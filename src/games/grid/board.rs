//! Player state for the grid game: per-cell entries and the cursor.

use serde::{Deserialize, Serialize};

use crate::core::{Deadline, Millis};

/// Longest number a cell accepts.
pub const MAX_ENTRY_DIGITS: usize = 4;

/// How long a wrong cell flashes.
pub const FLASH_MS: u64 = 400;

/// Cell coordinates (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Ten-key pad or keyboard input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridKey {
    Digit(u8),
    Delete,
    Enter,
}

impl GridKey {
    /// Map a key name to a key. Unknown names are ignored.
    ///
    /// Accepts keyboard names (`"0"`..`"9"`, `"Backspace"`, `"Enter"`)
    /// and ten-key pad names (`"delete"`, `"enter"`).
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Backspace" | "delete" => Some(GridKey::Delete),
            "Enter" | "enter" => Some(GridKey::Enter),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c.to_digit(10).map(|d| GridKey::Digit(d as u8)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Cell {
    entry: String,
    solved: bool,
    flash: Option<Deadline>,
}

/// Entries for every cell of an N x N grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBoard {
    size: usize,
    cells: Vec<Cell>,
    selected: Option<CellPos>,
    solved_count: usize,
}

impl GridBoard {
    /// Empty board.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::default(); size * size],
            selected: None,
            solved_count: 0,
        }
    }

    fn slot(&self, pos: CellPos) -> Option<usize> {
        (pos.row < self.size && pos.col < self.size).then(|| pos.row * self.size + pos.col)
    }

    fn cell(&self, pos: CellPos) -> Option<&Cell> {
        self.cells.get(self.slot(pos)?)
    }

    fn cell_mut(&mut self, pos: CellPos) -> Option<&mut Cell> {
        let i = self.slot(pos)?;
        self.cells.get_mut(i)
    }

    /// Grid side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells.
    #[must_use]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// Cells answered correctly.
    #[must_use]
    pub fn solved_count(&self) -> usize {
        self.solved_count
    }

    /// Every cell answered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.solved_count >= self.cells.len()
    }

    /// Focused cell.
    #[must_use]
    pub fn selected(&self) -> Option<CellPos> {
        self.selected
    }

    /// Text typed into a cell.
    #[must_use]
    pub fn entry(&self, pos: CellPos) -> Option<&str> {
        self.cell(pos).map(|c| c.entry.as_str())
    }

    /// Has the cell been answered correctly?
    #[must_use]
    pub fn is_solved(&self, pos: CellPos) -> bool {
        self.cell(pos).is_some_and(|c| c.solved)
    }

    /// Is the cell still showing its wrong-answer flash?
    #[must_use]
    pub fn is_flashing(&self, pos: CellPos, now: Millis) -> bool {
        self.cell(pos)
            .and_then(|c| c.flash)
            .is_some_and(|d| !d.is_due(now))
    }

    /// Focus a cell. Solved and out-of-range cells cannot be focused.
    pub fn select(&mut self, pos: CellPos) -> bool {
        match self.cell(pos) {
            Some(cell) if !cell.solved => {
                self.selected = Some(pos);
                true
            }
            _ => false,
        }
    }

    /// Drop the focus.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Append a digit to the focused cell.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 {
            return false;
        }
        let Some(pos) = self.selected else {
            return false;
        };
        match self.cell_mut(pos) {
            Some(cell) if !cell.solved && cell.entry.len() < MAX_ENTRY_DIGITS => {
                cell.entry.push(char::from(b'0' + digit));
                true
            }
            _ => false,
        }
    }

    /// Remove the last digit of the focused cell.
    pub fn pop_digit(&mut self) -> bool {
        let Some(pos) = self.selected else {
            return false;
        };
        match self.cell_mut(pos) {
            Some(cell) if !cell.solved => cell.entry.pop().is_some(),
            _ => false,
        }
    }

    /// Lock a cell as correct. Solved cells never change again.
    pub fn mark_solved(&mut self, pos: CellPos) -> bool {
        let newly = match self.cell_mut(pos) {
            Some(cell) if !cell.solved => {
                cell.solved = true;
                cell.flash = None;
                true
            }
            _ => false,
        };
        if newly {
            self.solved_count += 1;
        }
        newly
    }

    /// Clear a wrong entry and start its flash. Other cells are untouched.
    pub fn mark_wrong(&mut self, pos: CellPos, now: Millis) -> bool {
        match self.cell_mut(pos) {
            Some(cell) if !cell.solved => {
                cell.entry.clear();
                cell.flash = Some(Deadline::after(now, FLASH_MS));
                true
            }
            _ => false,
        }
    }

    /// Next unsolved cell after `from` in row-major order, wrapping to
    /// the top-left.
    #[must_use]
    pub fn next_unsolved(&self, from: CellPos) -> Option<CellPos> {
        let n = self.cells.len();
        let start = self.slot(from).map_or(0, |i| i + 1);
        (0..n)
            .map(|k| (start + k) % n)
            .find(|&i| !self.cells[i].solved)
            .map(|i| CellPos::new(i / self.size, i % self.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(GridKey::from_key_name("7"), Some(GridKey::Digit(7)));
        assert_eq!(GridKey::from_key_name("Backspace"), Some(GridKey::Delete));
        assert_eq!(GridKey::from_key_name("delete"), Some(GridKey::Delete));
        assert_eq!(GridKey::from_key_name("Enter"), Some(GridKey::Enter));
        assert_eq!(GridKey::from_key_name("a"), None);
        assert_eq!(GridKey::from_key_name("12"), None);
        assert_eq!(GridKey::from_key_name(""), None);
    }

    #[test]
    fn test_entry_editing() {
        let mut board = GridBoard::new(2);
        assert!(!board.push_digit(1));

        assert!(board.select(CellPos::new(1, 0)));
        for d in [1, 2, 3, 4] {
            assert!(board.push_digit(d));
        }
        assert!(!board.push_digit(5));
        assert!(!board.push_digit(12));
        assert_eq!(board.entry(CellPos::new(1, 0)), Some("1234"));

        assert!(board.pop_digit());
        assert_eq!(board.entry(CellPos::new(1, 0)), Some("123"));
        assert_eq!(board.entry(CellPos::new(0, 0)), Some(""));
        assert_eq!(board.entry(CellPos::new(2, 0)), None);
    }

    #[test]
    fn test_solved_cells_are_locked() {
        let mut board = GridBoard::new(2);
        let pos = CellPos::new(0, 1);
        board.select(pos);
        board.push_digit(6);

        assert!(board.mark_solved(pos));
        assert!(!board.mark_solved(pos));
        assert_eq!(board.solved_count(), 1);

        assert!(!board.push_digit(1));
        assert!(!board.pop_digit());
        assert!(!board.mark_wrong(pos, Millis(0)));
        assert_eq!(board.entry(pos), Some("6"));

        board.deselect();
        assert!(!board.select(pos));
        assert!(!board.select(CellPos::new(5, 5)));
    }

    #[test]
    fn test_wrong_flash_clears_only_that_cell() {
        let mut board = GridBoard::new(2);
        board.select(CellPos::new(0, 0));
        board.push_digit(9);
        board.select(CellPos::new(1, 1));
        board.push_digit(5);

        assert!(board.mark_wrong(CellPos::new(1, 1), Millis(1_000)));
        assert_eq!(board.entry(CellPos::new(1, 1)), Some(""));
        assert_eq!(board.entry(CellPos::new(0, 0)), Some("9"));
        assert!(board.is_flashing(CellPos::new(1, 1), Millis(1_399)));
        assert!(!board.is_flashing(CellPos::new(1, 1), Millis(1_400)));
        assert!(!board.is_flashing(CellPos::new(0, 0), Millis(1_000)));
    }

    #[test]
    fn test_next_unsolved_wraps() {
        let mut board = GridBoard::new(2);
        board.mark_solved(CellPos::new(1, 1));
        board.mark_solved(CellPos::new(0, 0));

        assert_eq!(board.next_unsolved(CellPos::new(1, 1)), Some(CellPos::new(0, 1)));
        assert_eq!(board.next_unsolved(CellPos::new(0, 1)), Some(CellPos::new(1, 0)));
        assert_eq!(board.next_unsolved(CellPos::new(1, 0)), Some(CellPos::new(0, 1)));

        board.mark_solved(CellPos::new(0, 1));
        board.mark_solved(CellPos::new(1, 0));
        assert!(board.is_complete());
        assert_eq!(board.next_unsolved(CellPos::new(0, 0)), None);
    }
}
