//! Parser for task filter expressions.
//!
//! A filter selects items by attribute value and tag, combined with boolean
//! operators. Parsing turns one line of text into an [`Expr`] tree; evaluating
//! the tree against records is left to the caller.
//!
//! # Supported Syntax
//!
//! ## Attribute Pairs
//! - `due:tomorrow` - a key, a colon and a value, with no spaces around `:`
//! - `until:2024-01-01T00:00:00` - bare values may contain letters, digits, `-` and `:`
//! - `project:'home office'` - single-quoted values may contain anything but `'`
//!
//! Keys are letters only. The keys `due`, `until`, `project`, `end`, `entry`,
//! `estimate`, `id`, `modified`, `parent`, `priority`, `recur`, `scheduled`,
//! `start`, `status` and `wait` are built in; any other key is user-defined.
//!
//! ## Tags
//! - `+urgent` - items with the tag
//! - `-urgent` - items without the tag
//!
//! ## Boolean Operators
//! - `and`, or just whitespace - AND
//! - `or` - OR, binding looser than AND
//! - `()` - Grouping
//!
//! # Example
//!
//! ```
//! use task_filter_rs::filter::{BinaryOperator, Expr, FilterParser};
//!
//! // `or` binds looser than the implicit `and`
//! let filter = FilterParser::parse("+urgent or project:home due:1w").unwrap();
//! assert!(matches!(
//!     filter,
//!     Expr::BinaryFilter { operator: BinaryOperator::Or, .. }
//! ));
//!
//! // Errors carry the byte offset where parsing failed
//! let err = FilterParser::parse("due:'unterminated").unwrap_err();
//! assert_eq!(err.position, 4);
//! ```

mod ast;
mod error;
mod keys;
mod lexer;
mod options;
mod parser;

pub use ast::{BinaryOperator, Expr, Key, Keys, TagModifier};
pub use error::{FilterResult, SyntaxError, SyntaxErrorKind};
pub use keys::{is_built_in, suggest_builtin, BUILT_IN_KEYS};
pub use options::{OptionsError, ParseOptions, DEFAULT_MAX_DEPTH};
pub use parser::{parse, FilterParser};
