//! Wraps a bare `params` object type in `Promise<...>`.

use super::matcher::{AnnotationShape, SignatureSite};

/// Returns the declaration line with the site's object type wrapped in
/// `Promise<...>`, or `None` when the site already has that shape.
///
/// Only the byte range recorded for the site changes; every other
/// character of the line is kept as is.
pub fn rewrite_signature(text: &str, site: &SignatureSite) -> Option<String> {
    if site.shape == AnnotationShape::Promise {
        return None;
    }

    let span = site.object_span.clone();
    let object = text.get(span.clone())?;

    let mut rewritten = String::with_capacity(text.len() + "Promise<>".len());
    rewritten.push_str(&text[..span.start]);
    rewritten.push_str("Promise<");
    rewritten.push_str(object);
    rewritten.push('>');
    rewritten.push_str(&text[span.end..]);
    Some(rewritten)
}
