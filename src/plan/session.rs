/// Resolved pose history of one continuous drawing session.
///
/// Append-only. The last entry is the anchor the next transition starts from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrokeSession {
    history: Vec<usize>,
}

impl StrokeSession {
    /// Start an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pose the next transition starts from, `None` before the first stroke.
    pub fn anchor(&self) -> Option<usize> {
        self.history.last().copied()
    }

    /// Append an anchor. Called once per completed stroke.
    pub fn record(&mut self, anchor: usize) {
        self.history.push(anchor);
    }

    /// All anchors in order.
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Number of completed strokes.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Return `true` before the first stroke.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
