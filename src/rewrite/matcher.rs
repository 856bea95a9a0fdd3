//! Detection of route handler signatures that destructure `params`.
//!
//! A candidate is a single line declaring an `async function` whose
//! parameter list contains `{ params }: { params: T }`, where `T` is an
//! object type either bare (`{ id: string }`) or already wrapped
//! (`Promise<{ id: string }>`).

use super::scanner::{matching_brace, word_positions, Cursor};
use super::source::RouteFile;
use std::ops::Range;

/// Field names of a `params` object type, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet(Vec<String>);

impl ParameterSet {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// How the `params` field's type is currently written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationShape {
    /// `{ params: { id: string } }`
    Bare,
    /// `{ params: Promise<{ id: string }> }`
    Promise,
}

/// A matched declaration within a [`RouteFile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureSite {
    /// Zero-based line index of the declaration
    pub line: usize,
    pub params: ParameterSet,
    pub shape: AnnotationShape,
    /// Byte range of the object type `{ ... }` within the line
    pub object_span: Range<usize>,
    /// Byte offset just past the `}` that closes `{ params: ... }`
    pub annotation_end: usize,
}

impl SignatureSite {
    pub fn is_new_shape(&self) -> bool {
        self.shape == AnnotationShape::Promise
    }
}

/// Scans every line of `file` and returns the matching sites in line order.
pub fn find_signature_sites(file: &RouteFile) -> Vec<SignatureSite> {
    file.lines()
        .iter()
        .enumerate()
        .filter_map(|(index, line)| match_signature(index, &line.text))
        .collect()
}

/// Matches a single line, returning a site when it has the targeted shape.
pub fn match_signature(line: usize, text: &str) -> Option<SignatureSite> {
    let params_start = async_function_params(text)?;

    text[params_start..]
        .match_indices('{')
        .find_map(|(offset, _)| match_params_annotation(text, params_start + offset))
        .map(|annotation| SignatureSite {
            line,
            params: extract_field_names(&text[annotation.object_span.clone()]),
            shape: annotation.shape,
            object_span: annotation.object_span,
            annotation_end: annotation.end,
        })
}

struct Annotation {
    shape: AnnotationShape,
    object_span: Range<usize>,
    end: usize,
}

/// Offset just past the `(` of an `async function name(` declaration.
fn async_function_params(text: &str) -> Option<usize> {
    word_positions(text, "async").find_map(|start| {
        let mut cursor = Cursor::new(text, start + "async".len());
        if !cursor.eat_word("function") {
            return None;
        }
        cursor.eat("*");
        cursor.ident();
        cursor.eat("(").then(|| cursor.pos())
    })
}

/// Tries to read `{ params }: { params: T }` starting at the `{` at `open`.
fn match_params_annotation(text: &str, open: usize) -> Option<Annotation> {
    let mut cursor = Cursor::new(text, open);
    let destructures = cursor.eat("{")
        && cursor.eat_word("params")
        && cursor.eat("}")
        && cursor.eat(":")
        && cursor.eat("{")
        && cursor.eat_word("params")
        && cursor.eat(":");
    if !destructures {
        return None;
    }

    let shape = if cursor.eat_word("Promise") {
        if !cursor.eat("<") {
            return None;
        }
        AnnotationShape::Promise
    } else {
        AnnotationShape::Bare
    };

    cursor.skip_ws();
    let object_start = cursor.pos();
    let object_end = matching_brace(text, object_start)? + 1;
    cursor.set_pos(object_end);

    if shape == AnnotationShape::Promise && !cursor.eat(">") {
        return None;
    }
    // Optional trailing separator
    if !cursor.eat(";") {
        cursor.eat(",");
    }
    if !cursor.eat("}") {
        return None;
    }

    Some(Annotation {
        shape,
        object_span: object_start..object_end,
        end: cursor.pos(),
    })
}

/// Collects the depth-1 member names of an object type, braces included.
///
/// Members that do not read as `name:` or `name?:` are skipped.
pub(crate) fn extract_field_names(object: &str) -> ParameterSet {
    let inner = object
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(object);

    split_members(inner)
        .into_iter()
        .filter_map(member_name)
        .map(str::to_string)
        .collect()
}

fn split_members(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut members = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'{' | b'[' | b'(' | b'<' => depth += 1,
            b'}' | b']' | b')' => depth = depth.saturating_sub(1),
            // `=>` in a function type is not a closing angle bracket
            b'>' if i == 0 || bytes[i - 1] != b'=' => depth = depth.saturating_sub(1),
            b';' | b',' | b'\n' if depth == 0 => {
                members.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    members.push(&inner[start..]);
    members
}

fn member_name(member: &str) -> Option<&str> {
    let mut cursor = Cursor::new(member, 0);
    let mut name = cursor.ident()?;

    if name == "readonly" {
        let mut rest = cursor.clone();
        if let Some(actual) = rest.ident() {
            name = actual;
            cursor = rest;
        }
    }

    cursor.eat("?");
    cursor.eat(":").then_some(name)
}
