/// Default number of snapshots kept before the oldest ones are dropped.
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

/// Linear undo/redo log of full-document snapshots.
///
/// The log always holds at least one snapshot and `index` always points at
/// a valid entry. Recording after an undo discards the redo branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditHistory {
    snapshots: Vec<String>,
    index: usize,
    limit: usize,
}

impl EditHistory {
    /// Create a history whose only snapshot is `initial`.
    pub fn new(initial: &str) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Create a history retaining at most `limit` snapshots (minimum 1).
    pub fn with_limit(initial: &str, limit: usize) -> Self {
        Self {
            snapshots: vec![initial.to_string()],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Append `text` as a new snapshot unless it equals the current one.
    ///
    /// Returns `true` if a snapshot was added.
    pub fn record(&mut self, text: &str) -> bool {
        if self.current() == text {
            return false;
        }

        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(text.to_string());

        let overflow = self.snapshots.len().saturating_sub(self.limit);
        if overflow > 0 {
            self.snapshots.drain(..overflow);
        }
        self.index = self.snapshots.len() - 1;

        tracing::debug!(
            index = self.index,
            len = self.snapshots.len(),
            "history.record"
        );
        true
    }

    /// Step back one snapshot. `None` when already at the oldest entry.
    pub fn undo(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(&self.snapshots[self.index])
    }

    /// Step forward one snapshot. `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<&str> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(&self.snapshots[self.index])
    }

    /// The snapshot at the current index.
    pub fn current(&self) -> &str {
        &self.snapshots[self.index]
    }

    pub const fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Number of snapshots in the log.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always `false`: the log keeps at least one snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub const fn index(&self) -> usize {
        self.index
    }
}
