//! Per-column digit entry with a moving cursor.

use serde::{Deserialize, Serialize};

/// Digits typed into each place column, most significant first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitPad {
    entries: Vec<Option<u8>>,
    cursor: usize,
}

impl DigitPad {
    /// Empty pad with the cursor on the first column.
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            entries: vec![None; columns],
            cursor: 0,
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active column.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Digit in a column, `None` if left empty or out of range.
    #[must_use]
    pub fn entry(&self, column: usize) -> Option<u8> {
        self.entries.get(column).copied().flatten()
    }

    /// All columns.
    #[must_use]
    pub fn entries(&self) -> &[Option<u8>] {
        &self.entries
    }

    /// Any column filled?
    #[must_use]
    pub fn has_any_entry(&self) -> bool {
        self.entries.iter().any(Option::is_some)
    }

    /// Fill the active column, then step right unless on the last one.
    pub fn enter(&mut self, digit: u8) -> bool {
        if digit > 9 {
            return false;
        }
        let Some(slot) = self.entries.get_mut(self.cursor) else {
            return false;
        };
        *slot = Some(digit);
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
        true
    }

    /// Clear the active column; if already empty, step left and clear
    /// that one instead.
    pub fn delete(&mut self) -> bool {
        let Some(current) = self.entries.get(self.cursor).copied() else {
            return false;
        };
        if current.is_none() {
            if self.cursor == 0 {
                return false;
            }
            self.cursor -= 1;
        }
        self.entries[self.cursor] = None;
        true
    }

    /// Move the cursor to a column.
    pub fn focus(&mut self, column: usize) -> bool {
        if column >= self.entries.len() {
            return false;
        }
        self.cursor = column;
        true
    }

    /// Empty every column and return to the first.
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.cursor = 0;
    }

    /// Entered number as shown to the player.
    ///
    /// Leading empty columns are skipped, later gaps show as `_`.
    #[must_use]
    pub fn preview(&self) -> String {
        let mut out = String::with_capacity(self.entries.len());
        for entry in &self.entries {
            match entry {
                Some(d) => out.push(char::from(b'0' + d)),
                None if !out.is_empty() => out.push('_'),
                None => {}
            }
        }
        out
    }
}
