//! Recursive descent parser for filter expressions.

use log::{debug, trace};

use super::ast::{Expr, Key, TagModifier};
use super::error::{FilterResult, SyntaxError, SyntaxErrorKind};
use super::keys;
use super::lexer::{is_key_char, is_tag_char, is_value_char, Lexer, QUOTE};
use super::options::ParseOptions;

/// Parses a filter expression with default options.
///
/// Shorthand for [`FilterParser::parse`].
pub fn parse(input: &str) -> FilterResult<Expr> {
    FilterParser::parse(input)
}

/// Parser for filter expressions.
///
/// # Grammar
///
/// ```text
/// expression ::= and_expr (OR and_expr)*
/// and_expr   ::= primary (AND primary)*
/// primary    ::= "(" expression ")" | attribute | tag
/// attribute  ::= key ":" value
/// key        ::= letter+
/// value      ::= "'" [^']* "'" | (letter | digit | "-" | ":")+
/// tag        ::= ("+" | "-") (letter | digit)+
/// AND        ::= "and" | whitespace+
/// OR         ::= "or"
/// ```
///
/// # Operator Precedence (highest to lowest)
///
/// 1. `and`, explicit or implicit - binary, left-associative
/// 2. `or` - binary, left-associative
///
/// Adjacent filters separated only by whitespace are joined with `and`.
/// At each operator position the `and` keyword is tried first, then plain
/// whitespace; whitespace followed by the `or` keyword, a `)` or the end of
/// input is never an implicit `and`.
///
/// # Example
///
/// ```
/// use task_filter_rs::filter::{Expr, FilterParser};
///
/// let filter = FilterParser::parse("project:home +urgent").unwrap();
/// assert_eq!(
///     filter,
///     Expr::and(Expr::attribute("project", "home"), Expr::include("urgent"))
/// );
///
/// let filter = FilterParser::parse("due:1w or status:pending").unwrap();
/// assert_eq!(filter.to_string(), "due:1w or status:pending");
/// ```
pub struct FilterParser<'a> {
    lexer: Lexer<'a>,
    options: &'a ParseOptions,
    /// Current parenthesis nesting.
    depth: usize,
}

impl<'a> FilterParser<'a> {
    /// Parses a complete filter expression with default options.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the input is not a single well-formed
    /// expression. The whole input must be consumed; trailing characters are
    /// an error, never a partial result.
    pub fn parse(input: &str) -> FilterResult<Expr> {
        let options = ParseOptions::default();
        FilterParser::parse_with(input, &options)
    }

    /// Parses a complete filter expression with the given options.
    ///
    /// # Errors
    ///
    /// As [`FilterParser::parse`], plus [`SyntaxErrorKind::InputTooLong`] and
    /// [`SyntaxErrorKind::NestingTooDeep`] when a configured limit is exceeded.
    pub fn parse_with(input: &'a str, options: &'a ParseOptions) -> FilterResult<Expr> {
        if let Some(limit) = options.max_input_len {
            if input.len() > limit {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::InputTooLong,
                    0,
                    format!("at most {limit} bytes of input"),
                ));
            }
        }

        let mut parser = Self::new(input, options);
        let result = parser.parse_filter();
        if let Err(err) = &result {
            debug!("failed to parse filter {input:?}: {err}");
        }
        result
    }

    /// Parses the attribute key at the start of `input`.
    ///
    /// Text after the key is ignored, so `"a b"` yields the key `a`.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxErrorKind::InvalidKey`] if `input` does not start
    /// with a letter.
    pub fn parse_key(input: &str) -> FilterResult<Key> {
        let options = ParseOptions::default();
        FilterParser::new(input, &options).read_key()
    }

    /// Parses the attribute value at the start of `input`.
    ///
    /// Quoted values are returned without their quotes. Text after the value
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxErrorKind::UnterminatedQuote`] for a quote without its
    /// closing quote, and [`SyntaxErrorKind::EmptyValue`] if no value
    /// characters are present.
    pub fn parse_value(input: &str) -> FilterResult<String> {
        let options = ParseOptions::default();
        FilterParser::new(input, &options).read_value()
    }

    fn new(input: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            lexer: Lexer::new(input),
            options,
            depth: 0,
        }
    }

    /// Parses the whole input, allowing surrounding whitespace.
    fn parse_filter(&mut self) -> FilterResult<Expr> {
        self.lexer.skip_whitespace();
        let expr = self.parse_expression()?;
        self.lexer.skip_whitespace();

        let position = self.lexer.position();
        match self.lexer.peek() {
            None => Ok(expr),
            Some(')') => Err(SyntaxError::new(
                SyntaxErrorKind::UnmatchedParenthesis,
                position,
                "unmatched closing parenthesis",
            )),
            Some(c) => Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedTrailingInput,
                position,
                format!("expected end of input, found '{c}'"),
            )),
        }
    }

    /// Parses the top-level expression (OR expression).
    fn parse_expression(&mut self) -> FilterResult<Expr> {
        self.parse_or_expr()
    }

    /// Parses OR expressions: `and_expr ("or" and_expr)*`
    fn parse_or_expr(&mut self) -> FilterResult<Expr> {
        let mut left = self.parse_and_expr()?;

        while self.eat_operator_keyword("or") {
            let right = self.parse_and_expr()?;
            left = Expr::or(left, right);
        }

        Ok(left)
    }

    /// Parses AND expressions: `primary (("and" | whitespace) primary)*`
    fn parse_and_expr(&mut self) -> FilterResult<Expr> {
        let mut left = self.parse_primary()?;

        loop {
            let right = if self.eat_operator_keyword("and") {
                self.parse_primary()?
            } else if let Some(right) = self.parse_implicit_and_operand()? {
                right
            } else {
                break;
            };
            left = Expr::and(left, right);
        }

        Ok(left)
    }

    /// Consumes an operator keyword with its surrounding whitespace.
    ///
    /// Leaves the cursor untouched if the keyword is not next.
    fn eat_operator_keyword(&mut self, word: &str) -> bool {
        let checkpoint = self.lexer.checkpoint();
        self.lexer.skip_whitespace();
        if self.lexer.eat_keyword(word) {
            self.lexer.skip_whitespace();
            true
        } else {
            self.lexer.restore(checkpoint);
            false
        }
    }

    /// Parses the right operand of an implicit (whitespace) `and`.
    ///
    /// Returns `None`, with the cursor restored, when the whitespace does not
    /// separate two filters: it is followed by `or`, `)` or the end of input,
    /// or by text that does not start a leaf filter.
    fn parse_implicit_and_operand(&mut self) -> FilterResult<Option<Expr>> {
        let checkpoint = self.lexer.checkpoint();
        if self.lexer.skip_whitespace() == 0
            || self.lexer.is_at_end()
            || self.lexer.peek() == Some(')')
            || self.lexer.at_keyword("or")
        {
            self.lexer.restore(checkpoint);
            return Ok(None);
        }

        if self.lexer.peek() == Some('(') {
            return self.parse_group().map(Some);
        }

        match self.parse_primary() {
            Ok(expr) => Ok(Some(expr)),
            Err(err)
                if matches!(
                    err.kind,
                    SyntaxErrorKind::UnrecognizedPrimary | SyntaxErrorKind::MissingSeparator
                ) =>
            {
                self.lexer.restore(checkpoint);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Parses primary expressions: `"(" expression ")" | attribute | tag`
    fn parse_primary(&mut self) -> FilterResult<Expr> {
        let position = self.lexer.position();

        match self.lexer.peek() {
            Some('(') => self.parse_group(),
            Some(c) if TagModifier::from_sign(c).is_some() => self.parse_tag(),
            Some(c) if is_key_char(c) => self.parse_attribute_pair(),
            Some(c) => Err(SyntaxError::new(
                SyntaxErrorKind::UnrecognizedPrimary,
                position,
                format!("expected '(', a key or a tag, found '{c}'"),
            )),
            None => Err(SyntaxError::new(
                SyntaxErrorKind::UnrecognizedPrimary,
                position,
                "expected '(', a key or a tag, found end of input",
            )),
        }
    }

    /// Parses a parenthesized group: `"(" expression ")"`
    fn parse_group(&mut self) -> FilterResult<Expr> {
        let open = self.lexer.position();
        if self.depth >= self.options.max_depth {
            return Err(SyntaxError::new(
                SyntaxErrorKind::NestingTooDeep,
                open,
                format!("at most {} nested parentheses", self.options.max_depth),
            ));
        }
        self.lexer.next_char(); // consume '('
        self.depth += 1;

        self.lexer.skip_whitespace();
        let inner = self.parse_expression()?;
        self.lexer.skip_whitespace();

        if !self.lexer.eat(')') {
            let position = self.lexer.position();
            // Leftover text before a later ')' is not an unclosed group.
            return Err(match self.lexer.peek() {
                Some(c) if self.lexer.rest().contains(')') => SyntaxError::new(
                    SyntaxErrorKind::UnexpectedTrailingInput,
                    position,
                    format!("expected ')' or another filter, found '{c}'"),
                ),
                _ => SyntaxError::new(
                    SyntaxErrorKind::UnmatchedParenthesis,
                    position,
                    format!("expected closing parenthesis for '(' at position {open}"),
                ),
            });
        }
        self.depth -= 1;

        Ok(inner)
    }

    /// Parses `key:value`.
    fn parse_attribute_pair(&mut self) -> FilterResult<Expr> {
        let key = self.read_key()?;

        let separator = self.lexer.position();
        if !self.lexer.eat(':') {
            return Err(SyntaxError::new(
                SyntaxErrorKind::MissingSeparator,
                separator,
                format!("expected ':' after key '{key}'"),
            ));
        }

        let value = self.read_value()?;

        if self.options.suggest_builtin_keys {
            if let Some(suggestion) = key.suggestion() {
                debug!("user-defined key '{key}' looks like built-in key '{suggestion}'");
            }
        }
        trace!("parsed attribute pair {key:?} = {value:?}");

        Ok(Expr::AttributePair { key, value })
    }

    /// Parses `+name` or `-name`.
    fn parse_tag(&mut self) -> FilterResult<Expr> {
        let position = self.lexer.position();
        let modifier = self
            .lexer
            .next_char()
            .and_then(TagModifier::from_sign)
            .ok_or_else(|| {
                SyntaxError::new(
                    SyntaxErrorKind::UnrecognizedPrimary,
                    position,
                    "expected '+' or '-'",
                )
            })?;

        let name = self.lexer.take_while(is_tag_char);
        if name.is_empty() {
            return Err(SyntaxError::new(
                SyntaxErrorKind::EmptyTagName,
                self.lexer.position(),
                format!("expected a tag name after '{}'", modifier.sign()),
            ));
        }
        trace!("parsed tag {modifier:?} {name:?}");

        Ok(Expr::Tag {
            modifier,
            value: name.to_string(),
        })
    }

    /// Reads a key and classifies it against the built-in vocabulary.
    ///
    /// The whole letter run is the key, so `duedate` is a user-defined key
    /// rather than `due` followed by stray letters.
    fn read_key(&mut self) -> FilterResult<Key> {
        let position = self.lexer.position();
        let name = self.lexer.take_while(is_key_char);
        if name.is_empty() {
            return Err(SyntaxError::new(
                SyntaxErrorKind::InvalidKey,
                position,
                "expected a key made of letters",
            ));
        }

        Ok(match keys::lookup(name) {
            Some(built_in) => Key::BuiltIn(built_in.to_string()),
            None => Key::UserDefined(name.to_string()),
        })
    }

    /// Reads a quoted or bare value.
    fn read_value(&mut self) -> FilterResult<String> {
        if self.lexer.peek() == Some(QUOTE) {
            return self.lexer.read_quoted_string().map(str::to_string);
        }

        let position = self.lexer.position();
        let value = self.lexer.take_while(is_value_char);
        if value.is_empty() {
            return Err(SyntaxError::new(
                SyntaxErrorKind::EmptyValue,
                position,
                "expected a value after ':'",
            ));
        }

        Ok(value.to_string())
    }
}
