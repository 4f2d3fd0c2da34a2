//! Filter query language for task lists.
//!
//! This crate parses one-line filter queries such as
//! `project:home (due:1w or +urgent) -someday` into a typed expression tree
//! that an evaluator can walk against a collection of records.
//!
//! See the [`filter`] module for the syntax.

pub mod filter;

pub use filter::{parse, Expr, FilterParser, Key, SyntaxError, SyntaxErrorKind};
