//! Source positions for tokens, nodes and diagnostics
//!
//! A [`Location`] is a line/column pair plus a shared handle on the
//! [`SourceText`] it points into, so a diagnostic can always quote the
//! offending line without the parser keeping a separate line table around.

use std::fmt;
use std::sync::Arc;

/// A named piece of source text, split into lines for diagnostics.
#[derive(Debug)]
pub struct SourceText {
    name: String,
    lines: Vec<String>,
}

impl SourceText {
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self {
            name: name.into(),
            lines,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text of a 1-based line, without its terminator.
    pub fn line(&self, line: usize) -> &str {
        line.checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Position of a lexeme or node in its source text.
///
/// Lines and columns are 1-based; columns count Unicode scalar values.
#[derive(Debug, Clone)]
pub struct Location {
    source: Arc<SourceText>,
    line: usize,
    column: usize,
}

impl Location {
    pub fn new(source: Arc<SourceText>, line: usize, column: usize) -> Self {
        Self {
            source,
            line,
            column,
        }
    }

    pub fn file_name(&self) -> &str {
        self.source.name()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// The literal text of the line this location points into.
    pub fn line_text(&self) -> &str {
        self.source.line(self.line)
    }

    /// Render the "where" block: file, line, the line itself and a caret
    /// under the column.
    pub fn render(&self) -> String {
        let number = self.line.to_string();
        let gutter = " ".repeat(number.len());
        let text = self.line_text();

        // Keep tabs so the caret lines up with the quoted text.
        let pad: String = text
            .chars()
            .take(self.column.saturating_sub(1))
            .map(|ch| if ch == '\t' { '\t' } else { ' ' })
            .collect();

        format!(
            "{gutter}--> {}:{}:{}\n{gutter} |\n{number} | {text}\n{gutter} | {pad}^",
            self.file_name(),
            self.line,
            self.column
        )
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
            && self.column == other.column
            && self.source.name() == other.source.name()
    }
}

impl Eq for Location {}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_name(), self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_and_render() {
        let source = Arc::new(SourceText::new("Demo.jv", "class A {\r\n  int x = 'ab';\n}"));
        let loc = Location::new(source, 2, 12);

        assert_eq!(loc.line_text(), "  int x = 'ab';");
        let rendered = loc.render();
        assert!(rendered.contains("--> Demo.jv:2:12"));
        assert!(rendered.contains("2 |   int x = 'ab';"));
        assert!(rendered.ends_with(&format!(" | {}^", " ".repeat(11))));
    }

    #[test]
    fn test_out_of_range_line_is_empty() {
        let source = Arc::new(SourceText::new("Demo.jv", "x"));
        assert_eq!(source.line(0), "");
        assert_eq!(source.line(9), "");
    }
}
