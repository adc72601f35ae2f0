//! Leaf values: identifiers, literals and keyword markers
//!
//! A [`Value`] keeps the exact source text of its lexeme; the typed
//! accessors decode it on demand. The scanner has already validated the
//! lexeme, so decoding never fails on scanned input; the accessors return
//! `None` only when asked for the wrong kind (or, for integers, when the
//! literal does not fit an `i64`).

/// What a value leaf holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Identifier,
    Integer,
    Floating,
    Character,
    String,
    TextBlock,
    Boolean,
    Null,
    /// Keyword markers such as `this`, `void` or a primitive type name.
    Keyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    kind: ValueKind,
    text: String,
}

impl Value {
    pub fn new(kind: ValueKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Source text of the lexeme.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Value of an integer literal. Hexadecimal and binary literals wrap
    /// into the signed range the way two's complement bit patterns do.
    pub fn as_integer(&self) -> Option<i64> {
        if self.kind != ValueKind::Integer {
            return None;
        }

        let digits: String = self
            .text
            .chars()
            .filter(|c| *c != '_' && *c != 'l' && *c != 'L')
            .collect();
        let lower = digits.to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix("0x") {
            u64::from_str_radix(hex, 16).ok().map(|v| v as i64)
        } else if let Some(bin) = lower.strip_prefix("0b") {
            u64::from_str_radix(bin, 2).ok().map(|v| v as i64)
        } else {
            digits.parse::<i64>().ok()
        }
    }

    /// Value of a floating-point (or integer) literal.
    pub fn as_float(&self) -> Option<f64> {
        match self.kind {
            ValueKind::Floating => {
                let digits: String = self
                    .text
                    .chars()
                    .filter(|c| !matches!(c, '_' | 'f' | 'F' | 'd' | 'D'))
                    .collect();
                digits.parse::<f64>().ok()
            }
            ValueKind::Integer => self.as_integer().map(|v| v as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ValueKind::Boolean => Some(self.text == "true"),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        if self.kind != ValueKind::Character {
            return None;
        }
        let inner = self.text.strip_prefix('\'')?.strip_suffix('\'')?;
        let text = unescape(inner);
        let mut decoded = text.chars();
        match (decoded.next(), decoded.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    }

    /// Decoded contents of a string literal or text block.
    pub fn as_string(&self) -> Option<String> {
        match self.kind {
            ValueKind::String => {
                let inner = self.text.strip_prefix('"')?.strip_suffix('"')?;
                Some(unescape(inner))
            }
            ValueKind::TextBlock => {
                let inner = self.text.strip_prefix("\"\"\"")?.strip_suffix("\"\"\"")?;
                Some(unescape(&strip_indent(inner)))
            }
            _ => None,
        }
    }
}

/// Decode escape sequences. An escaped line terminator joins lines.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('b') => out.push('\u{8}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{c}'),
            Some('r') => out.push('\r'),
            Some('s') => out.push(' '),
            Some('0') => out.push('\0'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16).ok();
                let decoded = match code {
                    Some(high @ 0xD800..=0xDBFF) => {
                        // a high surrogate pairs with a directly following low one
                        let mut ahead = chars.clone();
                        let low = match (ahead.next(), ahead.next()) {
                            (Some('\\'), Some('u')) => {
                                let hex: String = ahead.by_ref().take(4).collect();
                                u32::from_str_radix(&hex, 16)
                                    .ok()
                                    .filter(|low| (0xDC00..=0xDFFF).contains(low))
                            }
                            _ => None,
                        };
                        low.and_then(|low| {
                            chars = ahead;
                            char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
                        })
                    }
                    _ => code.and_then(char::from_u32),
                };
                match decoded {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some('\n') => {}
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Turn the raw body of a text block (everything between the delimiters)
/// into its content: drop the opening line, remove the indentation common
/// to all non-blank lines and the closing line, strip trailing blanks.
fn strip_indent(body: &str) -> String {
    let Some((_, content)) = body.split_once('\n') else {
        return String::new();
    };

    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    // A closing delimiter on its own line ends the content with a newline
    // and takes part in the indentation.
    let closing_on_own_line = lines.last().is_some_and(|last| last.trim().is_empty());

    let indent_of = |line: &str| line.chars().take_while(|c| c.is_whitespace()).count();
    let indent = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| !line.trim().is_empty() || (*i == lines.len() - 1 && closing_on_own_line))
        .map(|(_, line)| indent_of(*line))
        .min()
        .unwrap_or(0);

    let body_lines = if closing_on_own_line {
        &lines[..lines.len() - 1]
    } else {
        &lines[..]
    };

    let mut out: Vec<String> = body_lines
        .iter()
        .map(|line| {
            let stripped: String = line.chars().skip(indent).collect();
            stripped.trim_end().to_string()
        })
        .collect();

    if closing_on_own_line {
        out.push(String::new());
    }
    out.join("\n")
}
