//! Lexical primitives for filter expressions.
//!
//! The filter grammar is scannerless: whitespace is significant as the
//! implicit `and` operator, so the parser drives a [`Lexer`] cursor directly
//! instead of consuming a token stream. The cursor records byte offsets and
//! can be rewound to a checkpoint when an alternative fails.

use super::error::{FilterResult, SyntaxError, SyntaxErrorKind};

/// Delimiter of quoted values.
pub(crate) const QUOTE: char = '\'';

/// Returns true for characters allowed in attribute keys.
pub(crate) fn is_key_char(c: char) -> bool {
    c.is_alphabetic()
}

/// Returns true for characters allowed in tag names.
pub(crate) fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Returns true for characters allowed in bare (unquoted) values.
pub(crate) fn is_value_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == ':'
}

/// Returns true if `value` can be written without quotes.
pub(crate) fn is_bare_value(value: &str) -> bool {
    !value.is_empty() && value.chars().all(is_value_char)
}

/// A saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint(usize);

/// Cursor over a filter expression.
pub(crate) struct Lexer<'a> {
    input: &'a str,
    /// Current byte position in the input string.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer positioned at the start of `input`.
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns the current byte offset.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Returns the unconsumed part of the input.
    pub(crate) fn rest(&self) -> &'a str {
        let input: &'a str = self.input;
        &input[self.position..]
    }

    /// Returns true once every character has been consumed.
    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Saves the current position.
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.position)
    }

    /// Rewinds to a saved position.
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.0;
    }

    /// Peeks at the next character without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes and returns the next character.
    pub(crate) fn next_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consumes `expected` if it is the next character.
    pub(crate) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes the longest run of characters matching `pred`.
    pub(crate) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.position += len;
        &rest[..len]
    }

    /// Skips whitespace and returns how many bytes were skipped.
    pub(crate) fn skip_whitespace(&mut self) -> usize {
        self.take_while(char::is_whitespace).len()
    }

    /// Returns true if the input at the cursor is the keyword `word`.
    ///
    /// A keyword must not run into a following letter, digit or `:`, so
    /// `order:x` and `or:x` are not the `or` keyword.
    pub(crate) fn at_keyword(&self, word: &str) -> bool {
        match self.rest().strip_prefix(word) {
            Some(after) => !after
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric() || c == ':'),
            None => false,
        }
    }

    /// Consumes the keyword `word` if it is next.
    pub(crate) fn eat_keyword(&mut self, word: &str) -> bool {
        if self.at_keyword(word) {
            self.position += word.len();
            true
        } else {
            false
        }
    }

    /// Reads the body of a `'`-delimited string.
    ///
    /// The cursor must be on the opening quote. The body is taken verbatim;
    /// there are no escape sequences.
    pub(crate) fn read_quoted_string(&mut self) -> FilterResult<&'a str> {
        let start = self.position;
        if !self.eat(QUOTE) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::EmptyValue,
                start,
                "expected opening quote",
            ));
        }

        let body = self.take_while(|c| c != QUOTE);
        if !self.eat(QUOTE) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnterminatedQuote,
                start,
                "unterminated quoted string",
            ));
        }
        Ok(body)
    }
}
