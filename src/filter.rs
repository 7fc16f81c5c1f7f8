//! Filter predicates and clause trees.
//!
//! A [`Filter`] names a column, a [`Comparator`] and an argument. Several
//! filters passed to [`Table::filter`](crate::Table::filter) are combined with
//! logical AND. [`Clause`] builds arbitrary AND/OR/NOT trees on top of them.

use std::fmt;

use crate::value::Value;

/// A named row predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    In,
    NotIn,
    /// SQL `LIKE`: `%` matches any run of characters, `_` exactly one,
    /// a backslash escapes the next character.
    Like,
    /// Case-insensitive [Comparator::Like].
    ILike,
    IsNull,
    IsNotNull,
}

impl Comparator {
    /// The built-in comparator selecting exactly the rows this one rejects,
    /// if there is one.
    pub fn inverse(self) -> Option<Self> {
        let inverse = match self {
            Self::Eq => Self::Ne,
            Self::Ne => Self::Eq,
            Self::Gt => Self::Le,
            Self::Le => Self::Gt,
            Self::Ge => Self::Lt,
            Self::Lt => Self::Ge,
            Self::In => Self::NotIn,
            Self::NotIn => Self::In,
            Self::IsNull => Self::IsNotNull,
            Self::IsNotNull => Self::IsNull,
            Self::Like | Self::ILike => return None,
        };
        Some(inverse)
    }

    /// Whether the comparator depends on an ordering of values.
    pub fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Ge | Self::Lt | Self::Le)
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Like => "like",
            Self::ILike => "ilike",
            Self::IsNull => "is null",
            Self::IsNotNull => "is not null",
        };
        f.write_str(symbol)
    }
}

/// Right-hand side of a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// No argument, for [Comparator::IsNull] and [Comparator::IsNotNull].
    None,
    /// A literal compared with every row.
    Value(Value),
    /// A set of literals, for [Comparator::In] and [Comparator::NotIn].
    Values(Vec<Value>),
    /// Another column of the same table, compared row by row.
    Column(String),
}

/// One predicate clause over a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub comparator: Comparator,
    pub arg: Arg,
    /// Keep the rows the predicate rejects instead of the ones it accepts.
    pub inverse: bool,
}

impl Filter {
    pub fn new(column: impl Into<String>, comparator: Comparator, arg: impl Into<Value>) -> Self {
        Self::with_arg(column, comparator, Arg::Value(arg.into()))
    }

    pub fn with_arg(column: impl Into<String>, comparator: Comparator, arg: Arg) -> Self {
        Self {
            column: column.into(),
            comparator,
            arg,
            inverse: false,
        }
    }

    /// Compares `column` with `other` row by row.
    pub fn columns(column: impl Into<String>, comparator: Comparator, other: impl Into<String>) -> Self {
        Self::with_arg(column, comparator, Arg::Column(other.into()))
    }

    pub fn is_in<V: Into<Value>>(column: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        Self::with_arg(column, Comparator::In, Arg::Values(values))
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::with_arg(column, Comparator::IsNull, Arg::None)
    }

    /// Flips the clause to keep the rows it would otherwise drop.
    pub fn inverted(mut self) -> Self {
        self.inverse = !self.inverse;
        self
    }
}

/// A boolean combination of filters.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Filter(Filter),
    And(Vec<Clause>),
    Or(Vec<Clause>),
    Not(Box<Clause>),
}

impl Clause {
    pub fn and(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self::And(clauses.into_iter().collect())
    }

    pub fn or(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Self::Or(clauses.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(clause: Clause) -> Self {
        Self::Not(Box::new(clause))
    }
}

impl From<Filter> for Clause {
    fn from(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}

/// Matches `text` against a SQL `LIKE` pattern.
pub(crate) fn like_match(text: &str, pattern: &str, case_insensitive: bool) -> bool {
    if case_insensitive {
        let text: Vec<char> = text.to_lowercase().chars().collect();
        let pattern = parse_pattern(&pattern.to_lowercase());
        like_match_impl(&text, &pattern)
    } else {
        let text: Vec<char> = text.chars().collect();
        like_match_impl(&text, &parse_pattern(pattern))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Literal(char),
    AnyOne,
    AnyRun,
}

fn parse_pattern(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '\\' => Token::Literal(chars.next().unwrap_or('\\')),
            '%' => Token::AnyRun,
            '_' => Token::AnyOne,
            c => Token::Literal(c),
        };
        tokens.push(token);
    }
    tokens
}

/// Greedy wildcard matching, backtracking to the last `%` on mismatch.
fn like_match_impl(text: &[char], pattern: &[Token]) -> bool {
    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some(Token::AnyRun) => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(Token::AnyOne) => {
                t += 1;
                p += 1;
            }
            Some(Token::Literal(c)) if *c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star_p, star_t)) => {
                    backtrack = Some((star_p, star_t + 1));
                    p = star_p + 1;
                    t = star_t + 1;
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|token| *token == Token::AnyRun)
}
