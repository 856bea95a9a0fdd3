//! Lightweight lexical scanning over TypeScript source lines.
//!
//! Only the handful of constructs the rewrite needs are recognized: words,
//! punctuation tokens, balanced braces, string/template literals and
//! comments. Everything else is opaque text.

/// Identifier characters in the JavaScript sense, restricted to ASCII.
pub(crate) fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$'
}

/// Byte offsets of every occurrence of `word` in `text` that is not part of
/// a longer identifier.
pub(crate) fn word_positions<'a>(text: &'a str, word: &'a str) -> impl Iterator<Item = usize> + 'a {
    let bytes = text.as_bytes();
    text.match_indices(word).filter_map(move |(start, _)| {
        let end = start + word.len();
        let bounded_left = start == 0 || !is_ident_byte(bytes[start - 1]);
        let bounded_right = end >= bytes.len() || !is_ident_byte(bytes[end]);
        (bounded_left && bounded_right).then_some(start)
    })
}

/// Forward-only cursor over a single line.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str, pos: usize) -> Self {
        Self {
            src,
            pos: pos.min(src.len()),
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    pub fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skips whitespace, then consumes `token` if it comes next.
    pub fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.src[self.pos..].starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Like [`Cursor::eat`] but `word` must not continue as an identifier.
    pub fn eat_word(&mut self, word: &str) -> bool {
        let start = self.pos;
        if !self.eat(word) {
            return false;
        }
        if self.peek().is_some_and(is_ident_byte) {
            self.pos = start;
            return false;
        }
        true
    }

    /// Consumes an identifier and returns it.
    pub fn ident(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let start = self.pos;
        let bytes = self.src.as_bytes();
        if start >= bytes.len() || bytes[start].is_ascii_digit() || !is_ident_byte(bytes[start]) {
            return None;
        }
        while self.peek().is_some_and(is_ident_byte) {
            self.pos += 1;
        }
        Some(&self.src[start..self.pos])
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.src.len());
    }
}

/// Index of the `}` that closes the `{` at `open`, on the same line.
///
/// Quoted strings are skipped so braces inside them do not count.
pub(crate) fn matching_brace(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            quote @ (b'\'' | b'"' | b'`') => {
                i = skip_quoted(bytes, i + 1, quote)?;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the `{` opening a function body whose parameter list is still
/// open at `from`.
///
/// The parameter list must close on this line. After it, the last `{` at
/// brace depth zero opens the body, so braces in a return type such as
/// `Promise<{ ok: boolean }>` or in defaults like `opts = {}` are passed
/// over.
pub(crate) fn body_open(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut parens = 1usize;
    let mut braces = 0usize;
    let mut open = None;
    let mut i = from;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => break,
            quote @ (b'\'' | b'"' | b'`') => i = skip_quoted(bytes, i + 1, quote)?,
            b'(' => parens += 1,
            b')' => parens = parens.saturating_sub(1),
            b'{' if parens == 0 => {
                if braces == 0 {
                    open = Some(i);
                }
                braces += 1;
            }
            b'}' if parens == 0 => braces = braces.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
    open
}

/// Returns the index of the closing `quote`, honoring backslash escapes.
fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> Option<usize> {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Whether the trimmed line holds nothing but a comment.
pub(crate) fn is_comment_line(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

/// Tracks brace depth across lines to find where a block closes.
///
/// Comments, quoted strings and template literals are skipped. Block
/// comments and template literals may span lines.
///
/// A quote that never closes on its line (a regex literal like `/['"]/`)
/// leaves the rest of that line uncounted. From then on the depth is not
/// trusted and the tracker never reports the block as closed.
#[derive(Debug, Default)]
pub(crate) struct BraceTracker {
    depth: usize,
    opened: bool,
    in_block_comment: bool,
    in_template: bool,
    lost_track: bool,
}

impl BraceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the next slice of source. Returns `true` once the first block
    /// opened by this tracker has been closed again.
    pub fn feed(&mut self, text: &str) -> bool {
        let bytes = text.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            if self.in_block_comment {
                match text[i..].find("*/") {
                    Some(offset) => {
                        self.in_block_comment = false;
                        i += offset + 2;
                        continue;
                    }
                    None => return false,
                }
            }

            if self.in_template {
                match skip_quoted(bytes, i, b'`') {
                    Some(close) => {
                        self.in_template = false;
                        i = close + 1;
                        continue;
                    }
                    None => return false,
                }
            }

            match bytes[i] {
                b'/' if bytes.get(i + 1) == Some(&b'/') => return false,
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    self.in_block_comment = true;
                    i += 2;
                    continue;
                }
                b'`' => self.in_template = true,
                quote @ (b'\'' | b'"') => match skip_quoted(bytes, i + 1, quote) {
                    Some(close) => i = close,
                    None => {
                        self.lost_track = true;
                        return false;
                    }
                },
                b'{' => {
                    self.depth += 1;
                    self.opened = true;
                }
                b'}' if self.depth > 0 => {
                    self.depth -= 1;
                    if self.opened && self.depth == 0 && !self.lost_track {
                        return true;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_positions_respects_boundaries() {
        let text = "params paramsList myparams params";
        let found: Vec<_> = word_positions(text, "params").collect();
        assert_eq!(found, vec![0, 27]);
    }

    #[test]
    fn test_cursor_eat_word_rejects_prefix() {
        let mut cursor = Cursor::new("  functional()", 0);
        assert!(!cursor.eat_word("function"));
        assert_eq!(cursor.pos(), 0);

        let mut cursor = Cursor::new("  function GET()", 0);
        assert!(cursor.eat_word("function"));
        assert_eq!(cursor.ident(), Some("GET"));
    }

    #[test]
    fn test_matching_brace_handles_nesting_and_strings() {
        let text = "{ a: { b: string }; c: '}' }";
        assert_eq!(matching_brace(text, 0), Some(text.len() - 1));
        assert_eq!(matching_brace(text, 5), Some(17));
        assert_eq!(matching_brace("{ open", 0), None);
        assert_eq!(matching_brace("x", 0), None);
    }

    #[test]
    fn test_brace_tracker_spans_lines() {
        let mut tracker = BraceTracker::new();
        assert!(!tracker.feed(") {"));
        assert!(!tracker.feed("  try {"));
        assert!(!tracker.feed("    const s = '}}}'"));
        assert!(!tracker.feed("    // }"));
        assert!(!tracker.feed("  } catch (e) {"));
        assert!(!tracker.feed("  }"));
        assert!(tracker.feed("}"));
    }

    #[test]
    fn test_brace_tracker_skips_multiline_comments_and_templates() {
        let mut tracker = BraceTracker::new();
        assert!(!tracker.feed("{ /* }"));
        assert!(!tracker.feed(" } */ const t = `"));
        assert!(!tracker.feed("}`"));
        assert!(tracker.feed("}"));
    }

    #[test]
    fn test_brace_tracker_never_closes_after_untokenizable_line() {
        let mut tracker = BraceTracker::new();
        assert!(!tracker.feed("{"));
        assert!(!tracker.feed("  if (/['\"]/.test(s)) {"));
        assert!(!tracker.feed("  }"));
        assert!(!tracker.feed("}"));
        assert!(!tracker.feed("}"));
    }

    #[test]
    fn test_body_open_skips_return_type_and_default_braces() {
        let text = "async function GET(req, { params }: P): Promise<{ ok: boolean }> {";
        assert_eq!(body_open(text, 24), Some(text.len() - 1));

        let text = "async function GET(req, { params }: P, opts = {}) {";
        assert_eq!(body_open(text, 24), Some(text.len() - 1));

        let text = "async function GET(req, { params }: P) { return { a: 1 } }";
        assert_eq!(body_open(text, 24), Some(39));
    }

    #[test]
    fn test_body_open_needs_closed_parameter_list() {
        assert_eq!(body_open("async function GET(req, { params }: P,", 24), None);
        assert_eq!(body_open("async function GET(req, { params }: P) // {", 24), None);
        assert_eq!(body_open("async function GET(a = ')' ) {", 19), Some(29));
    }

    #[test]
    fn test_is_comment_line() {
        assert!(is_comment_line("  // note"));
        assert!(is_comment_line("  /* block */"));
        assert!(is_comment_line("   * continued"));
        assert!(!is_comment_line("  try {"));
    }
}
