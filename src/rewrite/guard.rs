//! Detection of an extraction statement left by an earlier run or by hand.
//!
//! The whole function body is inspected, not just the lines right after the
//! injection point: a duplicate `const { id } = await params` is a
//! redeclaration, so any sign of a prior extraction suppresses injection.

use super::matcher::SignatureSite;
use super::scanner::{body_open, word_positions, BraceTracker, Cursor};
use super::source::RouteFile;
use std::ops::RangeInclusive;

/// Line range from the declaration to the line that closes its body.
///
/// The body starts at the `{` after the parameter list and any return
/// type. When that brace is not on the declaration line, or the body never
/// closes, the range runs to the end of the file.
pub fn function_extent(file: &RouteFile, site: &SignatureSite) -> RangeInclusive<usize> {
    let last = file.len().saturating_sub(1).max(site.line);
    let text = file.line(site.line).unwrap_or_default();

    let Some(open) = body_open(text, site.annotation_end) else {
        log::debug!(
            "{}:{}: body does not open on the declaration line",
            file.path().display(),
            site.line + 1
        );
        return site.line..=last;
    };

    let mut tracker = BraceTracker::new();
    if tracker.feed(&text[open..]) {
        return site.line..=site.line;
    }

    let end = (site.line + 1..file.len())
        .find(|&index| tracker.feed(file.line(index).unwrap_or_default()))
        .unwrap_or(last);

    site.line..=end
}

/// Whether the function around `site` already awaits `params`.
pub fn has_existing_extraction(file: &RouteFile, site: &SignatureSite) -> bool {
    function_extent(file, site)
        .filter_map(|index| file.line(index))
        .any(awaits_params)
}

/// Matches `await params` as two separate words, with any spacing between.
pub(crate) fn awaits_params(text: &str) -> bool {
    word_positions(text, "await").any(|start| {
        let mut cursor = Cursor::new(text, start + "await".len());
        cursor.eat_word("params")
    })
}
