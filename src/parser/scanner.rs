//! Scanner (tokenizer) for source text
//!
//! Unlike a batch tokenizer, the scanner hands out one [`Token`] at a time:
//! the parser calls [`Scanner::next`] and reads [`Scanner::current_token`].
//! This matters because tokenization of `>` depends on the *type context*
//! flag that the parser toggles while it is inside `<...>` argument lists:
//! with the flag set, `>>` and `>>>` come out as separate `>` tokens so that
//! `Map<String, List<Integer>>` closes correctly.
//!
//! Speculative parses save the scanner state with [`Scanner::checkpoint`] and
//! restore it with [`Scanner::rewind`].

use super::error::{ParseError, ParseResult};
use super::location::{Location, SourceText};
use super::token::{keyword_table, Token, TokenKind};
use rustc_hash::FxHashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::trace;

/// Saved scanner state, restored by [`Scanner::rewind`].
#[derive(Debug, Clone)]
pub struct Checkpoint {
    position: usize,
    line: usize,
    column: usize,
    type_context: bool,
    current: Token,
}

/// Pull-based scanner over one source unit
pub struct Scanner {
    source: Arc<SourceText>,
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    type_context: bool,
    current: Token,
    keywords: FxHashMap<&'static str, TokenKind>,
}

impl Scanner {
    /// Create a scanner over in-memory source text.
    ///
    /// No token is scanned yet: the current token is
    /// [`TokenKind::StartOfInput`] until the first [`Scanner::next`].
    pub fn new(name: impl Into<String>, text: &str) -> Self {
        let source = Arc::new(SourceText::new(name, text));
        let start = Token::new(
            TokenKind::StartOfInput,
            "",
            Location::new(Arc::clone(&source), 1, 1),
        );
        Self {
            source,
            input: text.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            type_context: false,
            current: start,
            keywords: keyword_table(),
        }
    }

    /// Create a scanner over the contents of a source file.
    pub fn open(path: impl AsRef<Path>) -> ParseResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path.display().to_string(), &text))
    }

    /// The most recently scanned token.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn type_context(&self) -> bool {
        self.type_context
    }

    /// Set the type context flag, returning its previous value so the caller
    /// can restore it.
    pub fn set_type_context(&mut self, enabled: bool) -> bool {
        std::mem::replace(&mut self.type_context, enabled)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
            line: self.line,
            column: self.column,
            type_context: self.type_context,
            current: self.current.clone(),
        }
    }

    pub fn rewind(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
        self.type_context = checkpoint.type_context;
        self.current = checkpoint.current;
    }

    /// Advance to the next token. At the end of the input this keeps
    /// returning [`TokenKind::EndOfInput`].
    pub fn next(&mut self) -> ParseResult<&Token> {
        self.skip_whitespace_and_comments()?;

        let token = if self.is_at_end() {
            Token::new(TokenKind::EndOfInput, "", self.current_location())
        } else {
            self.scan_token()?
        };

        trace!(kind = ?token.kind, text = %token.text, at = %token.location, "scanned token");
        self.current = token;
        Ok(&self.current)
    }

    /// Scan the remaining input, end-of-input token included.
    pub fn tokenize(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next()?.clone();
            let done = token.is(TokenKind::EndOfInput);
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan one token starting at the current (non-blank) character.
    fn scan_token(&mut self) -> ParseResult<Token> {
        let start = self.position;
        let loc = self.current_location();
        let ch = self
            .advance()
            .ok_or_else(|| ParseError::lexical("unexpected end of input", loc.clone()))?;

        let kind = match ch {
            '"' => self.string_literal(&loc)?,
            '\'' => self.char_literal(&loc)?,
            '0'..='9' => self.number_literal(start, &loc)?,
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                self.number_literal(start, &loc)?
            }
            c if is_identifier_start(c) => self.identifier_or_keyword(start),

            '>' => {
                if self.type_context {
                    // Inside type arguments every '>' closes one list.
                    TokenKind::Gt
                } else if self.peek() == Some('>') {
                    self.advance();
                    if self.eat('>') {
                        if self.eat('=') {
                            TokenKind::GtGtGtEq
                        } else {
                            TokenKind::GtGtGt
                        }
                    } else if self.eat('=') {
                        TokenKind::GtGtEq
                    } else {
                        TokenKind::GtGt
                    }
                } else if self.eat('=') {
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '<' => {
                if self.eat('<') {
                    if self.eat('=') {
                        TokenKind::LtLtEq
                    } else {
                        TokenKind::LtLt
                    }
                } else if self.eat('=') {
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '=' => {
                if self.eat('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                if self.eat('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '&' => {
                if self.eat('&') {
                    TokenKind::AndAnd
                } else if self.eat('=') {
                    TokenKind::AmpEq
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::OrOr
                } else if self.eat('=') {
                    TokenKind::PipeEq
                } else {
                    TokenKind::Pipe
                }
            }
            '^' => {
                if self.eat('^') {
                    TokenKind::CaretCaret
                } else if self.eat('=') {
                    TokenKind::CaretEq
                } else {
                    TokenKind::Caret
                }
            }
            '+' => {
                if self.eat('+') {
                    TokenKind::PlusPlus
                } else if self.eat('=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.eat('-') {
                    TokenKind::MinusMinus
                } else if self.eat('=') {
                    TokenKind::MinusEq
                } else if self.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.eat('=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.eat('=') {
                    TokenKind::SlashEq
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.eat('=') {
                    TokenKind::PercentEq
                } else {
                    TokenKind::Percent
                }
            }
            ':' => {
                if self.eat(':') {
                    TokenKind::ColonColon
                } else {
                    TokenKind::Colon
                }
            }
            '.' => {
                if self.peek() == Some('.') && self.peek_ahead(1) == Some('.') {
                    self.advance();
                    self.advance();
                    TokenKind::Ellipsis
                } else {
                    TokenKind::Dot
                }
            }
            '@' => TokenKind::At,
            '?' => TokenKind::Question,
            '~' => TokenKind::Tilde,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,

            _ => {
                return Err(ParseError::lexical(
                    format!("unexpected character '{}'", ch.escape_default()),
                    loc,
                ));
            }
        };

        let text: String = self.input[start..self.position].iter().collect();
        Ok(Token::new(kind, text, loc))
    }

    /// Scan a string literal or, after `"""`, a text block. The opening
    /// quote is already consumed.
    fn string_literal(&mut self, open: &Location) -> ParseResult<TokenKind> {
        if self.peek() == Some('"') {
            if self.peek_ahead(1) == Some('"') {
                self.advance();
                self.advance();
                return self.text_block(open);
            }
            // Empty string ""
            self.advance();
            return Ok(TokenKind::StringLiteral);
        }

        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::lexical(
                        "unterminated string literal",
                        open.clone(),
                    ));
                }
                Some('\n') | Some('\r') => {
                    return Err(ParseError::lexical(
                        "line break in string literal",
                        self.current_location(),
                    ));
                }
                Some('"') => {
                    self.advance();
                    return Ok(TokenKind::StringLiteral);
                }
                Some('\\') => self.escape_sequence()?,
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Scan a text block body; the `"""` opener is already consumed.
    fn text_block(&mut self, open: &Location) -> ParseResult<TokenKind> {
        if self.at_triple_quote() {
            // """""" is the empty text block
            self.advance_by(3);
            return Ok(TokenKind::TextBlock);
        }

        while matches!(self.peek(), Some(' ') | Some('\t') | Some('\u{c}')) {
            self.advance();
        }
        match self.peek() {
            None => {
                return Err(ParseError::lexical("unterminated text block", open.clone()));
            }
            Some('\n') => {
                self.advance();
            }
            Some('\r') => {
                self.advance();
                self.eat('\n');
            }
            Some(_) => {
                return Err(ParseError::lexical(
                    "text block opening delimiter must be followed by a line terminator",
                    self.current_location(),
                ));
            }
        }

        loop {
            if self.at_triple_quote() {
                self.advance_by(3);
                return Ok(TokenKind::TextBlock);
            }
            match self.peek() {
                None => {
                    return Err(ParseError::lexical("unterminated text block", open.clone()));
                }
                Some('\\') if matches!(self.peek_ahead(1), Some('\n') | Some('\r')) => {
                    // Escaped line terminator joins two lines.
                    self.advance();
                }
                Some('\\') => self.escape_sequence()?,
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Scan a character literal; the opening quote is already consumed.
    fn char_literal(&mut self, open: &Location) -> ParseResult<TokenKind> {
        match self.peek() {
            None => {
                return Err(ParseError::lexical(
                    "unterminated character literal",
                    open.clone(),
                ));
            }
            Some('\'') => {
                return Err(ParseError::lexical(
                    "empty character literal",
                    self.current_location(),
                ));
            }
            Some('\n') | Some('\r') => {
                return Err(ParseError::lexical(
                    "line break in character literal",
                    self.current_location(),
                ));
            }
            Some('\\') => self.escape_sequence()?,
            Some(_) => {
                self.advance();
            }
        }

        match self.peek() {
            Some('\'') => {
                self.advance();
                Ok(TokenKind::CharacterLiteral)
            }
            None | Some('\n') | Some('\r') => Err(ParseError::lexical(
                "unterminated character literal",
                open.clone(),
            )),
            Some(_) => Err(ParseError::lexical(
                "character literal must contain exactly one character",
                self.current_location(),
            )),
        }
    }

    /// Validate one escape sequence starting at the backslash.
    fn escape_sequence(&mut self) -> ParseResult<()> {
        self.advance(); // skip '\'
        let loc = self.current_location();

        match self.advance() {
            Some('b' | 't' | 'n' | 'f' | 'r' | 's' | '"' | '\'' | '\\' | '0') => Ok(()),
            // Any four hex digits; surrogate halves pair up when decoded.
            Some('u') => {
                for _ in 0..4 {
                    if !self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                        return Err(ParseError::lexical(
                            "unicode escape needs four hex digits",
                            self.current_location(),
                        ));
                    }
                    self.advance();
                }
                Ok(())
            }
            Some(other) => Err(ParseError::lexical(
                format!("invalid escape sequence '\\{}'", other.escape_default()),
                loc,
            )),
            None => Err(ParseError::lexical("unterminated escape sequence", loc)),
        }
    }

    /// Scan a numeric literal starting at `start`; its first character (a
    /// digit, or the '.' of a literal like `.5`) is already consumed.
    fn number_literal(&mut self, start: usize, start_loc: &Location) -> ParseResult<TokenKind> {
        let first = self.input[start];
        let mut floating = false;

        let radix = match (first, self.peek()) {
            ('0', Some('x' | 'X')) => 16,
            ('0', Some('b' | 'B')) => 2,
            _ => 10,
        };

        if radix != 10 {
            self.advance(); // skip radix marker
            if self.digits(radix, 0)? == 0 {
                return Err(ParseError::lexical(
                    "radix prefix must be followed by digits",
                    self.current_location(),
                ));
            }
        } else {
            if first == '.' {
                floating = true;
                self.digits(10, 0)?;
            } else {
                // the leading digit is already consumed
                self.digits(10, 1)?;
                if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit())
                {
                    self.advance();
                    self.digits(10, 0)?;
                    floating = true;
                }
            }

            if matches!(self.peek(), Some('e' | 'E')) {
                self.advance();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
                if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    return Err(ParseError::lexical(
                        "exponent has no digits",
                        self.current_location(),
                    ));
                }
                self.digits(10, 0)?;
                floating = true;
            }
        }

        match self.peek() {
            Some('f' | 'F' | 'd' | 'D') if radix == 10 => {
                self.advance();
                floating = true;
            }
            Some('l' | 'L') if !floating => {
                self.advance();
            }
            _ => {}
        }

        if let Some(c) = self.peek() {
            if is_identifier_part(c) {
                return Err(ParseError::lexical(
                    format!("invalid character '{c}' in numeric literal"),
                    self.current_location(),
                ));
            }
        }

        if floating {
            return Ok(TokenKind::FloatingLiteral);
        }

        // Integer literals must fit in 64 bits.
        let lexeme: String = self.input[start..self.position]
            .iter()
            .filter(|c| **c != '_')
            .collect();
        let digits = lexeme.trim_end_matches(['l', 'L']);
        let in_range = match radix {
            10 => digits.parse::<u64>().is_ok(),
            _ => u64::from_str_radix(&digits[2..], radix).is_ok(),
        };
        if !in_range {
            return Err(ParseError::lexical(
                "integer literal is too large",
                start_loc.clone(),
            ));
        }

        Ok(TokenKind::IntegerLiteral)
    }

    /// Consume a run of digits (with `_` separators) in the given radix and
    /// return how many digits were seen. `seen` counts digits of the run
    /// that were consumed before the call.
    fn digits(&mut self, radix: u32, seen: usize) -> ParseResult<usize> {
        let mut count = seen;
        let mut trailing_underscore = false;

        while let Some(ch) = self.peek() {
            if ch.is_digit(radix) {
                count += 1;
                trailing_underscore = false;
            } else if ch == '_' && count > 0 {
                trailing_underscore = true;
            } else {
                break;
            }
            self.advance();
        }

        if trailing_underscore {
            return Err(ParseError::lexical(
                "underscore at end of digit sequence",
                self.current_location(),
            ));
        }
        Ok(count)
    }

    /// Scan an identifier or keyword starting at `start`.
    fn identifier_or_keyword(&mut self, start: usize) -> TokenKind {
        while let Some(ch) = self.peek() {
            if is_identifier_part(ch) {
                self.advance();
            } else {
                break;
            }
        }

        let ident: String = self.input[start..self.position].iter().collect();
        self.keywords
            .get(ident.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') | Some('\u{c}') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip block comment (/* ... */)
    fn skip_block_comment(&mut self) -> ParseResult<()> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(ParseError::lexical("unterminated block comment", start_loc))
    }

    fn at_triple_quote(&self) -> bool {
        self.peek() == Some('"') && self.peek_ahead(1) == Some('"') && self.peek_ahead(2) == Some('"')
    }

    /// Consume the current character if it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> Location {
        Location::new(Arc::clone(&self.source), self.line, self.column)
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new("test", source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lex_error(source: &str) -> ParseError {
        Scanner::new("test", source)
            .tokenize()
            .expect_err("expected a lexical error")
    }

    #[test]
    fn test_simple_tokens() {
        use TokenKind::*;
        assert_eq!(
            kinds("class Main { int x = 0; }"),
            vec![Class, Identifier, LBrace, Int, Identifier, Eq, IntegerLiteral, Semicolon, RBrace, EndOfInput]
        );
    }

    #[test]
    fn test_start_and_end_of_input() {
        let mut scanner = Scanner::new("test", "x");
        assert_eq!(scanner.current_token().kind, TokenKind::StartOfInput);
        assert_eq!(scanner.next().unwrap().kind, TokenKind::Identifier);
        assert_eq!(scanner.next().unwrap().kind, TokenKind::EndOfInput);
        assert_eq!(scanner.next().unwrap().kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_maximal_munch() {
        use TokenKind::*;
        assert_eq!(
            kinds(">>>= >>= >>> >> >= > <<= << <= < ^^ ^= ... :: -> ++ --"),
            vec![
                GtGtGtEq, GtGtEq, GtGtGt, GtGt, Ge, Gt, LtLtEq, LtLt, Le, Lt, CaretCaret, CaretEq,
                Ellipsis, ColonColon, Arrow, PlusPlus, MinusMinus, EndOfInput
            ]
        );
    }

    #[test]
    fn test_type_context_splits_closing_angles() {
        use TokenKind::*;
        let mut scanner = Scanner::new("test", "Map<Class<?>, List<Integer>>");
        scanner.set_type_context(true);
        let tokens: Vec<TokenKind> = scanner.tokenize().unwrap().into_iter().map(|t| t.kind).collect();

        assert_eq!(
            tokens,
            vec![
                Identifier, Lt, Identifier, Lt, Question, Gt, Comma, Identifier, Lt, Identifier, Gt,
                Gt, EndOfInput
            ]
        );
    }

    #[test]
    fn test_type_context_splits_triple_angle() {
        let mut scanner = Scanner::new("test", ">>>");
        scanner.set_type_context(true);
        let tokens = scanner.tokenize().unwrap();
        assert_eq!(tokens.len(), 4);
        assert!(tokens[..3].iter().all(|t| t.is(TokenKind::Gt)));
        assert_eq!(tokens[2].location.column(), 3);
    }

    #[test]
    fn test_checkpoint_restores_type_context_and_position() {
        let mut scanner = Scanner::new("test", "a >> b");
        scanner.next().unwrap();
        let saved = scanner.checkpoint();

        scanner.set_type_context(true);
        assert_eq!(scanner.next().unwrap().kind, TokenKind::Gt);

        scanner.rewind(saved);
        assert!(!scanner.type_context());
        assert_eq!(scanner.current_token().text, "a");
        assert_eq!(scanner.next().unwrap().kind, TokenKind::GtGt);
    }

    #[test]
    fn test_numeric_literals() {
        let tokens = Scanner::new("test", "1234 1234.5 0x1F 0b1010 1_000L 1e10 2.5E-3 .5 3f")
            .tokenize()
            .unwrap();
        let summary: Vec<(TokenKind, &str)> =
            tokens.iter().map(|t| (t.kind, t.text.as_str())).collect();

        assert_eq!(
            summary,
            vec![
                (TokenKind::IntegerLiteral, "1234"),
                (TokenKind::FloatingLiteral, "1234.5"),
                (TokenKind::IntegerLiteral, "0x1F"),
                (TokenKind::IntegerLiteral, "0b1010"),
                (TokenKind::IntegerLiteral, "1_000L"),
                (TokenKind::FloatingLiteral, "1e10"),
                (TokenKind::FloatingLiteral, "2.5E-3"),
                (TokenKind::FloatingLiteral, ".5"),
                (TokenKind::FloatingLiteral, "3f"),
                (TokenKind::EndOfInput, ""),
            ]
        );
    }

    #[test]
    fn test_member_access_on_integer_is_not_a_float() {
        use TokenKind::*;
        assert_eq!(kinds("1.foo"), vec![IntegerLiteral, Dot, Identifier, EndOfInput]);
    }

    #[test]
    fn test_exponent_without_digits() {
        let err = lex_error("x = 1e;");
        assert!(err.is_lexical());
        assert_eq!(err.location().unwrap().column(), 7);

        let err = lex_error("1.5e+");
        assert_eq!(err.location().unwrap().column(), 6);
    }

    #[test]
    fn test_bad_numbers() {
        assert!(lex_error("0x").to_string().contains("radix"));
        assert!(lex_error("12abc").to_string().contains("numeric literal"));
        assert!(lex_error("1_").to_string().contains("underscore"));
        assert!(lex_error("99999999999999999999").to_string().contains("too large"));
    }

    #[test]
    fn test_underscored_numbers() {
        use TokenKind::*;
        assert_eq!(
            kinds("1_000 1_000_000L 0x7fff_ffff 1_0.5_0"),
            vec![IntegerLiteral, IntegerLiteral, IntegerLiteral, FloatingLiteral, EndOfInput]
        );
        assert!(lex_error("1__").to_string().contains("underscore"));
    }

    #[test]
    fn test_char_literals() {
        let tokens = Scanner::new("test", r"'c' '\n' '\'' 'A'").tokenize().unwrap();
        assert!(tokens[..4].iter().all(|t| t.is(TokenKind::CharacterLiteral)));
        assert_eq!(tokens[1].text, r"'\n'");
    }

    #[test]
    fn test_empty_char_literal() {
        let err = lex_error("c = '';");
        assert!(err.to_string().contains("empty character literal"));
        assert_eq!(err.location().unwrap().column(), 6);
    }

    #[test]
    fn test_multi_char_literal() {
        let err = lex_error("'ab'");
        assert!(err.to_string().contains("exactly one character"));
        assert_eq!(err.location().unwrap().column(), 3);
    }

    #[test]
    fn test_string_literals() {
        let tokens = Scanner::new("test", r#""hello\tworld\n" """#).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, r#""hello\tworld\n""#);
        assert_eq!(tokens[1].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[1].text, r#""""#);
    }

    #[test]
    fn test_unicode_escapes_in_strings() {
        let tokens = Scanner::new("test", r#""\uD83D\uDE00" "\u00e9" "\uDE00""#).tokenize().unwrap();
        assert!(tokens[..3].iter().all(|t| t.is(TokenKind::StringLiteral)));
        assert_eq!(tokens[0].text, r#""\uD83D\uDE00""#);

        let err = lex_error(r#""\u12G4""#);
        assert!(err.to_string().contains("four hex digits"));
    }

    #[test]
    fn test_string_errors() {
        assert!(lex_error("\"abc").to_string().contains("unterminated string"));
        assert!(lex_error("\"ab\ncd\"").to_string().contains("line break"));

        let err = lex_error(r#""bad \q escape""#);
        assert!(err.to_string().contains(r"'\q'"));
        assert_eq!(err.location().unwrap().column(), 7);
    }

    #[test]
    fn test_text_block() {
        let source = "s = \"\"\"   \n    hello\n      \"world\"\n    \"\"\";";
        let tokens = Scanner::new("test", source).tokenize().unwrap();
        assert_eq!(tokens[2].kind, TokenKind::TextBlock);
        assert_eq!(tokens[3].kind, TokenKind::Semicolon);
        assert_eq!(tokens[3].location.line(), 4);
    }

    #[test]
    fn test_empty_text_block() {
        let tokens = Scanner::new("test", "\"\"\"\"\"\"").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::TextBlock);
        assert_eq!(tokens[1].kind, TokenKind::EndOfInput);
    }

    #[test]
    fn test_text_block_content_on_opening_line() {
        let err = lex_error("\"\"\"  oops\n\"\"\"");
        assert!(err.to_string().contains("line terminator"));
        assert_eq!(err.location().unwrap().column(), 6);
    }

    #[test]
    fn test_unterminated_text_block() {
        let err = lex_error("x = \"\"\"\nabc\n\"\"");
        assert!(err.to_string().contains("unterminated text block"));
        assert_eq!(err.location().unwrap().line(), 1);
        assert_eq!(err.location().unwrap().column(), 5);
    }

    #[test]
    fn test_comments() {
        use TokenKind::*;
        assert_eq!(
            kinds("int x; // comment\nint y; /* block\ncomment */ int z;"),
            vec![Int, Identifier, Semicolon, Int, Identifier, Semicolon, Int, Identifier, Semicolon, EndOfInput]
        );
    }

    #[test]
    fn test_unterminated_block_comment_across_lines() {
        let err = lex_error("int x;\n  /* never\n closed");
        assert!(err.to_string().contains("unterminated block comment"));
        let loc = err.location().unwrap();
        assert_eq!((loc.line(), loc.column()), (2, 3));
    }

    #[test]
    fn test_token_locations() {
        let tokens = Scanner::new("test", "a\n  bb").tokenize().unwrap();
        assert_eq!((tokens[1].location.line(), tokens[1].location.column()), (2, 3));
        assert_eq!(tokens[1].location.line_text(), "  bb");
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex_error("int #x;");
        assert!(err.to_string().contains("unexpected character '#'"));
        assert_eq!(err.location().unwrap().column(), 5);
    }
}
