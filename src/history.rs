/// Linear undo/redo history: one ordered list of states and a cursor into it.
///
/// Appending while the cursor is behind the newest entry drops everything
/// after the cursor first, so an edit always invalidates the redo branch.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    entries: Vec<T>,
    cursor: Option<usize>,
}

impl<T> Default for HistoryStack<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }
}

impl<T> HistoryStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `entry` after the cursor and move the cursor onto it.
    pub fn append(&mut self, entry: T) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push(entry);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one entry. `None` (and no change) at the first entry or when
    /// empty.
    pub fn undo(&mut self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.entries.get(cursor - 1)
            }
            _ => None,
        }
    }

    /// Step forward one entry. `None` (and no change) at the last entry or
    /// when empty.
    pub fn redo(&mut self) -> Option<&T> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                self.entries.get(cursor + 1)
            }
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}
