//! Textual form shared by every geometric type.
//!
//! Text is a list of groups. A group is a numeric tuple wrapped in `()`,
//! `[]` or `{}`; when the text contains no brackets at all it is read as a
//! single bare group. Groups may be separated by `,`, `;` or whitespace.
//!
//! Inside a group numbers are separated by:
//! - `;` when the group contains one (then `,` is a decimal separator),
//! - `,` when that yields the expected number of values,
//! - whitespace otherwise (then `,` is a decimal separator).
//!
//! Writing always emits `(a, b, c)` groups with Rust's shortest round-trip
//! float formatting, so `Display` followed by `FromStr` is exact.

use std::fmt;
use std::str::FromStr;

use nom::branch::alt;
use nom::bytes::complete::is_not;
use nom::character::complete::{char, multispace0, one_of};
use nom::combinator::{all_consuming, opt};
use nom::multi::many1;
use nom::sequence::{delimited, pair, terminated};
use nom::IResult;

use crate::error::ParseError;

/// Parses `text`, returning `None` instead of an error on malformed input.
pub trait TryParse: FromStr {
    /// Parses `text`, returning `None` on failure.
    fn try_parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl<T: FromStr> TryParse for T {}

const BRACKETS: &str = "()[]{}";

fn bracketed(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('('), is_not(BRACKETS), char(')')),
        delimited(char('['), is_not(BRACKETS), char(']')),
        delimited(char('{'), is_not(BRACKETS), char('}')),
    ))(input)
}

fn group_list(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(terminated(
        many1(delimited(
            multispace0,
            bracketed,
            pair(multispace0, opt(one_of(",;"))),
        )),
        multispace0,
    ))(input)
}

/// Splits `text` into its bracketed groups.
///
/// # Errors
///
/// Returns an error if the brackets are unbalanced or text remains outside them.
pub fn groups(text: &str) -> Result<Vec<&str>, ParseError> {
    if !text.contains(|c| BRACKETS.contains(c)) {
        if text.trim().is_empty() {
            return Err(ParseError::malformed(text, "empty input"));
        }
        return Ok(vec![text]);
    }
    group_list(text)
        .map(|(_, groups)| groups)
        .map_err(|e| ParseError::malformed(text, e.to_string()))
}

/// Reads exactly `N` numbers from a single group.
///
/// # Errors
///
/// Returns an error if the group does not hold `N` valid numbers.
pub fn numbers<const N: usize>(group: &str, text: &str) -> Result<[f64; N], ParseError> {
    let tokens: Vec<String> = if group.contains(';') {
        group.split(';').map(|t| t.trim().replace(',', ".")).collect()
    } else {
        let by_comma: Vec<&str> = group.split(',').map(str::trim).collect();
        if by_comma.len() == N {
            by_comma.into_iter().map(str::to_owned).collect()
        } else {
            group.split_whitespace().map(|t| t.replace(',', ".")).collect()
        }
    };

    if tokens.len() != N {
        return Err(ParseError::malformed(
            text,
            format!("expected {N} values, found {}", tokens.len()),
        ));
    }

    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(&tokens) {
        *value = token
            .parse::<f64>()
            .map_err(|e| ParseError::malformed(text, format!("{token:?}: {e}")))?;
    }
    Ok(values)
}

/// Reads text made of exactly one `N`-tuple.
///
/// # Errors
///
/// Returns an error if the text is not a single `N`-tuple.
pub fn tuple<const N: usize>(text: &str) -> Result<[f64; N], ParseError> {
    match groups(text)?.as_slice() {
        [group] => numbers(group, text),
        other => Err(ParseError::malformed(
            text,
            format!("expected 1 group, found {}", other.len()),
        )),
    }
}

/// Reads text made of a fixed number of `N`-tuples.
///
/// # Errors
///
/// Returns an error if the group count differs from `count` or a group is malformed.
pub fn tuples<const N: usize>(text: &str, count: usize) -> Result<Vec<[f64; N]>, ParseError> {
    let groups = groups(text)?;
    if groups.len() != count {
        return Err(ParseError::malformed(
            text,
            format!("expected {count} groups, found {}", groups.len()),
        ));
    }
    groups.iter().map(|g| numbers(g, text)).collect()
}

/// Writes `values` as a single `(a, b, c)` group.
pub(crate) fn write_tuple(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    f.write_str("(")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    f.write_str(")")
}
