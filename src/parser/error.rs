//! Error channel shared by the scanner and the parser
//!
//! Every failure is fatal for the source unit being parsed: errors propagate
//! with `?` up to the caller of the entry point and are never recovered from
//! inside the front end.

use super::location::Location;
use std::path::PathBuf;
use thiserror::Error;

/// All errors the front end can report.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input text that cannot be classified into a token.
    #[error("{message}")]
    Lexical { message: String, location: Location },

    /// A token sequence that cannot continue the expected production.
    #[error("{message}")]
    Grammar { message: String, location: Location },

    /// The source file could not be read.
    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenient `Result` alias for fallible front-end operations.
pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    pub fn lexical(message: impl Into<String>, location: Location) -> Self {
        ParseError::Lexical {
            message: message.into(),
            location,
        }
    }

    pub fn grammar(message: impl Into<String>, location: Location) -> Self {
        ParseError::Grammar {
            message: message.into(),
            location,
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            ParseError::Lexical { location, .. } | ParseError::Grammar { location, .. } => {
                Some(location)
            }
            ParseError::Io { .. } => None,
        }
    }

    pub fn is_lexical(&self) -> bool {
        matches!(self, ParseError::Lexical { .. })
    }

    pub fn is_grammar(&self) -> bool {
        matches!(self, ParseError::Grammar { .. })
    }

    /// Full diagnostic: the message followed by the rendered location.
    pub fn report(&self) -> String {
        let kind = match self {
            ParseError::Lexical { .. } => "lexical error",
            ParseError::Grammar { .. } => "syntax error",
            ParseError::Io { .. } => "error",
        };
        match self.location() {
            Some(location) => format!("{kind}: {self}\n{}", location.render()),
            None => match self {
                ParseError::Io { source, .. } => format!("{kind}: {self}: {source}"),
                _ => format!("{kind}: {self}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::location::SourceText;
    use std::sync::Arc;

    #[test]
    fn test_report_contains_message_and_caret() {
        let source = Arc::new(SourceText::new("Bad.jv", "char c = '';"));
        let err = ParseError::lexical("empty character literal", Location::new(source, 1, 11));

        let report = err.report();
        assert!(report.starts_with("lexical error: empty character literal\n"));
        assert!(report.contains("1 | char c = '';"));
        assert!(report.ends_with(&format!("| {}^", " ".repeat(10))));
        assert!(err.is_lexical());
    }
}
