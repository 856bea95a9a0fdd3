//! Merging planned line edits into a [`RouteFile`].

use super::source::RouteFile;
use std::cmp::Reverse;

/// A single planned change, addressed by line index in the original file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Replace the text of an existing line, keeping its terminator
    ReplaceLine { index: usize, text: String },
    /// Insert a new line so that it occupies `index`
    InsertLine { index: usize, text: String },
}

impl Edit {
    // Replacements at an index go before insertions at the same index so
    // they still address the original line.
    fn order_key(&self) -> (Reverse<usize>, u8) {
        match self {
            Edit::ReplaceLine { index, .. } => (Reverse(*index), 0),
            Edit::InsertLine { index, .. } => (Reverse(*index), 1),
        }
    }
}

/// Per-file result of a transformation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformationOutcome {
    pub changed: bool,
    pub sites_rewritten: usize,
    pub sites_injected: usize,
}

/// Applies `edits` in descending line order so indices computed against
/// the original file stay valid while insertions shift later lines.
pub fn apply_edits(file: &RouteFile, mut edits: Vec<Edit>) -> (RouteFile, TransformationOutcome) {
    edits.sort_by_key(Edit::order_key);

    let mut result = file.clone();
    let mut outcome = TransformationOutcome::default();

    for edit in edits {
        match edit {
            Edit::ReplaceLine { index, text } => {
                result.replace_line(index, text);
                outcome.sites_rewritten += 1;
            }
            Edit::InsertLine { index, text } => {
                result.insert_line(index, text);
                outcome.sites_injected += 1;
            }
        }
    }

    outcome.changed = result != *file;
    (result, outcome)
}
