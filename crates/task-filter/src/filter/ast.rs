//! Abstract Syntax Tree (AST) for filter expressions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::keys;
use super::lexer::{is_bare_value, QUOTE};

/// The key of an attribute pair.
///
/// Keys are classified once, when they are parsed or built with
/// [`Key::new`]: a key is `BuiltIn` iff its text is one of
/// [`BUILT_IN_KEYS`](super::BUILT_IN_KEYS).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Key {
    /// A key from the reserved vocabulary.
    BuiltIn(String),

    /// Any other key (a user-defined attribute).
    UserDefined(String),
}

impl Key {
    /// Creates a key, classifying `name` against the built-in vocabulary.
    ///
    /// # Example
    ///
    /// ```
    /// use task_filter_rs::filter::Key;
    ///
    /// assert_eq!(Key::new("due"), Key::BuiltIn("due".to_string()));
    /// assert_eq!(Key::new("client"), Key::UserDefined("client".to_string()));
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        if keys::is_built_in(&name) {
            Key::BuiltIn(name)
        } else {
            Key::UserDefined(name)
        }
    }

    /// Returns the text of the key.
    pub fn name(&self) -> &str {
        match self {
            Key::BuiltIn(name) | Key::UserDefined(name) => name,
        }
    }

    /// Returns true for keys from the reserved vocabulary.
    pub fn is_built_in(&self) -> bool {
        matches!(self, Key::BuiltIn(_))
    }

    /// Suggests a built-in key when a user-defined key looks like a typo of one.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Key::BuiltIn(_) => None,
            Key::UserDefined(name) => keys::suggest_builtin(name),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a tag filter includes or excludes items carrying the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagModifier {
    /// `+name`: items must have the tag.
    Include,

    /// `-name`: items must not have the tag.
    Exclude,
}

impl TagModifier {
    /// Returns the sign character for this modifier.
    pub fn sign(self) -> char {
        match self {
            TagModifier::Include => '+',
            TagModifier::Exclude => '-',
        }
    }

    /// Returns the modifier for a sign character.
    pub fn from_sign(c: char) -> Option<Self> {
        match c {
            '+' => Some(TagModifier::Include),
            '-' => Some(TagModifier::Exclude),
            _ => None,
        }
    }
}

/// A boolean combinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    /// Conjunction, written `and` or as plain whitespace.
    And,

    /// Disjunction, written `or`.
    Or,
}

impl BinaryOperator {
    /// Returns the keyword for this operator.
    pub fn keyword(self) -> &'static str {
        match self {
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
        }
    }

    /// Binding strength; higher binds tighter.
    fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Represents a parsed filter expression.
///
/// Leaves are attribute pairs and tags; internal nodes combine two
/// sub-expressions with `and` or `or`. Each node owns its children.
///
/// The `Display` implementation renders the expression back to query text
/// that parses to an equal tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    /// `key:value`.
    AttributePair {
        /// The attribute key.
        key: Key,
        /// The value, with surrounding quotes removed.
        value: String,
    },

    /// `+name` or `-name`.
    Tag {
        /// Include or exclude.
        modifier: TagModifier,
        /// The tag name, without its sign.
        value: String,
    },

    /// Two expressions joined by a boolean operator.
    BinaryFilter {
        /// Left operand.
        left: Box<Expr>,
        /// The combinator.
        operator: BinaryOperator,
        /// Right operand.
        right: Box<Expr>,
    },
}

impl Expr {
    /// Creates an attribute pair, classifying the key.
    ///
    /// # Example
    ///
    /// ```
    /// use task_filter_rs::filter::{Expr, Key};
    ///
    /// let expr = Expr::attribute("due", "tomorrow");
    /// assert!(matches!(expr, Expr::AttributePair { key: Key::BuiltIn(_), .. }));
    /// ```
    pub fn attribute(key: impl Into<String>, value: impl Into<String>) -> Self {
        Expr::AttributePair {
            key: Key::new(key),
            value: value.into(),
        }
    }

    /// Creates a `+name` tag filter.
    pub fn include(name: impl Into<String>) -> Self {
        Expr::Tag {
            modifier: TagModifier::Include,
            value: name.into(),
        }
    }

    /// Creates a `-name` tag filter.
    pub fn exclude(name: impl Into<String>) -> Self {
        Expr::Tag {
            modifier: TagModifier::Exclude,
            value: name.into(),
        }
    }

    /// Creates a binary filter node.
    pub fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryFilter {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Creates an AND filter from two filters.
    ///
    /// # Example
    ///
    /// ```
    /// use task_filter_rs::filter::{BinaryOperator, Expr};
    ///
    /// let filter = Expr::and(Expr::attribute("due", "1w"), Expr::include("home"));
    /// assert!(matches!(filter, Expr::BinaryFilter { operator: BinaryOperator::And, .. }));
    /// ```
    pub fn and(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOperator::And, right)
    }

    /// Creates an OR filter from two filters.
    pub fn or(left: Expr, right: Expr) -> Self {
        Self::binary(left, BinaryOperator::Or, right)
    }

    /// Iterates over the keys of all attribute pairs, left to right.
    pub fn keys(&self) -> Keys<'_> {
        Keys { stack: vec![self] }
    }

    /// Binding strength of the node; leaves bind tightest.
    fn precedence(&self) -> u8 {
        match self {
            Expr::BinaryFilter { operator, .. } => operator.precedence(),
            _ => u8::MAX,
        }
    }

    /// Writes `child`, parenthesized when it would otherwise regroup.
    fn fmt_operand(
        f: &mut fmt::Formatter<'_>,
        child: &Expr,
        parent: BinaryOperator,
        is_right: bool,
    ) -> fmt::Result {
        let child_precedence = child.precedence();
        let needs_parens = child_precedence < parent.precedence()
            || (is_right && child_precedence == parent.precedence());
        if needs_parens {
            write!(f, "({child})")
        } else {
            write!(f, "{child}")
        }
    }
}

/// Iterator over the keys of an [`Expr`], returned by [`Expr::keys`].
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    /// Subtrees still to visit; the next one is on top.
    stack: Vec<&'a Expr>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a Key;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(expr) = self.stack.pop() {
            match expr {
                Expr::AttributePair { key, .. } => return Some(key),
                Expr::Tag { .. } => {}
                Expr::BinaryFilter { left, right, .. } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::AttributePair { key, value } => {
                if is_bare_value(value) {
                    write!(f, "{key}:{value}")
                } else {
                    write!(f, "{key}:{QUOTE}{value}{QUOTE}")
                }
            }
            Expr::Tag { modifier, value } => write!(f, "{}{value}", modifier.sign()),
            Expr::BinaryFilter {
                left,
                operator,
                right,
            } => {
                Self::fmt_operand(f, left, *operator, false)?;
                write!(f, " {operator} ")?;
                Self::fmt_operand(f, right, *operator, true)
            }
        }
    }
}
