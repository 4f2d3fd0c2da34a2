//! Error types for the filter parser.

use thiserror::Error;

/// A specialized Result type for filter parsing operations.
pub type FilterResult<T> = Result<T, SyntaxError>;

/// The category of a [`SyntaxError`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
pub enum SyntaxErrorKind {
    /// A `'` was opened with no matching closing `'`.
    #[error("unterminated quote")]
    UnterminatedQuote,

    /// A `:` separator was not followed by a value.
    #[error("empty value")]
    EmptyValue,

    /// The key position contains no letters.
    #[error("invalid key")]
    InvalidKey,

    /// A key was not followed by the `:` separator.
    #[error("missing separator")]
    MissingSeparator,

    /// A `+` or `-` tag sign was not followed by a name.
    #[error("empty tag name")]
    EmptyTagName,

    /// A `(` without a matching `)`, or a stray `)`.
    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,

    /// A complete expression was parsed but characters remain.
    #[error("unexpected trailing input")]
    UnexpectedTrailingInput,

    /// Neither a parenthesized group, an attribute pair nor a tag was found.
    #[error("unrecognized expression")]
    UnrecognizedPrimary,

    /// Parentheses are nested deeper than the configured limit.
    #[error("nesting too deep")]
    NestingTooDeep,

    /// The input is longer than the configured limit.
    #[error("input too long")]
    InputTooLong,
}

/// A failure to parse a filter expression.
///
/// Carries the byte offset in the input where matching failed and a
/// human-readable description of what the parser expected there.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} at position {position}: {expected}")]
pub struct SyntaxError {
    /// The category of the error.
    pub kind: SyntaxErrorKind,
    /// Byte offset in the input where the error occurred.
    pub position: usize,
    /// What the parser expected at `position`.
    pub expected: String,
}

impl SyntaxError {
    /// Creates a new syntax error.
    pub fn new(kind: SyntaxErrorKind, position: usize, expected: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            expected: expected.into(),
        }
    }

    /// Returns a hint for common mistakes, if one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self.kind {
            SyntaxErrorKind::UnterminatedQuote => {
                Some("Add a closing quote (') to complete the value")
            }
            SyntaxErrorKind::UnmatchedParenthesis => {
                Some("Check that every ( has a matching )")
            }
            SyntaxErrorKind::MissingSeparator => {
                Some("Attribute filters are written key:value, e.g. 'project:home'")
            }
            SyntaxErrorKind::EmptyValue => {
                Some("Use quotes for values with spaces, e.g. due:'end of month'")
            }
            SyntaxErrorKind::EmptyTagName => Some("Tags are written +name or -name"),
            _ => None,
        }
    }

    /// Formats the error with the input and a marker under the failing offset.
    pub fn format_with_context(&self, input: &str) -> String {
        let offset = self.position.min(input.len());
        let column = input
            .get(..offset)
            .map_or(offset, |prefix| prefix.chars().count());

        let mut result = format!(
            "filter syntax error: {}\n  {input}\n  {}^",
            self.expected,
            " ".repeat(column)
        );
        if let Some(hint) = self.suggestion() {
            result.push_str("\nhint: ");
            result.push_str(hint);
        }
        result
    }
}
