//! Line model for a single route file.
//!
//! Every line keeps its own terminator so that a file with no edits renders
//! back to exactly the bytes it was read from, including mixed `\r\n`/`\n`
//! endings and a missing final newline.

use std::path::{Path, PathBuf};

/// One line of source text together with its original terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    /// `"\n"`, `"\r\n"` or `""` for a final line without newline
    pub ending: String,
}

impl SourceLine {
    fn split(raw: &str) -> Self {
        let (text, ending) = if let Some(text) = raw.strip_suffix("\r\n") {
            (text, "\r\n")
        } else if let Some(text) = raw.strip_suffix('\n') {
            (text, "\n")
        } else {
            (raw, "")
        };

        Self {
            text: text.to_string(),
            ending: ending.to_string(),
        }
    }
}

/// A route handler file held in memory for one processing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFile {
    path: PathBuf,
    lines: Vec<SourceLine>,
}

impl RouteFile {
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: content.split_inclusive('\n').map(SourceLine::split).collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[SourceLine] {
        &self.lines
    }

    /// Text of the line at `index`, without its terminator.
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|line| line.text.as_str())
    }

    pub(crate) fn replace_line(&mut self, index: usize, text: String) {
        if let Some(line) = self.lines.get_mut(index) {
            line.text = text;
        }
    }

    /// Inserts a new line so that it ends up at `index`.
    ///
    /// The new line takes the terminator of the line it follows. When that
    /// line was the unterminated last line, it receives the file's newline
    /// style and the inserted line becomes the unterminated one.
    pub(crate) fn insert_line(&mut self, index: usize, text: String) {
        let index = index.min(self.lines.len());
        let newline = self.newline().to_string();

        let ending = match index.checked_sub(1).and_then(|prev| self.lines.get_mut(prev)) {
            Some(prev) if prev.ending.is_empty() => {
                prev.ending = newline;
                String::new()
            }
            Some(prev) => prev.ending.clone(),
            None => newline,
        };

        self.lines.insert(index, SourceLine { text, ending });
    }

    /// The first terminator found in the file, `"\n"` if there is none.
    pub fn newline(&self) -> &str {
        self.lines
            .iter()
            .map(|line| line.ending.as_str())
            .find(|ending| !ending.is_empty())
            .unwrap_or("\n")
    }

    pub fn render(&self) -> String {
        let capacity = self
            .lines
            .iter()
            .map(|line| line.text.len() + line.ending.len())
            .sum();

        self.lines
            .iter()
            .fold(String::with_capacity(capacity), |mut out, line| {
                out.push_str(&line.text);
                out.push_str(&line.ending);
                out
            })
    }
}
