//! Reasoning entry parsing.
//!
//! Turns short annotation strings such as `"Good omen (5%)"` or
//! `"Bad sign -3%"` into a [`ReasoningEntry`] holding a trimmed rule label
//! and a signed integer weight in percentage points.
//!
//! # Weight notations
//!
//! - Parenthetical: `<rule> (<sign?><digits>%)`, sign optional, defaults to `+`.
//! - Trailing signed: `<rule> <sign?><digits>%`, separated from the rule by
//!   whitespace. Negative weights must carry `-`; `+` is optional.
//!
//! The weight token is always anchored at the end of the string, so digits
//! or `%` characters inside the rule text are never mistaken for the weight.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;

/// One parsed `{rule, weight}` fact.
///
/// The rule is never empty and carries no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct ReasoningEntry {
    rule: String,
    weight: i64,
}

/// Wire shape accepted on input; `text` is the field name older bundles used.
#[derive(Deserialize)]
struct RawEntry {
    #[serde(alias = "text")]
    rule: String,
    weight: i64,
}

impl TryFrom<RawEntry> for ReasoningEntry {
    type Error = ParseError;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        Self::new(&raw.rule, raw.weight)
    }
}

impl ReasoningEntry {
    /// Build an entry from an already-separated rule and weight.
    ///
    /// The rule is trimmed; an empty result is rejected with
    /// [`ParseError::EmptyRule`].
    pub fn new(rule: &str, weight: i64) -> Result<Self, ParseError> {
        let trimmed = rule.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyRule {
                input: rule.to_string(),
            });
        }
        Ok(Self {
            rule: trimmed.to_string(),
            weight,
        })
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }
}

/// Writes the canonical parenthetical form, e.g. `Bad sign (-3%)`.
impl fmt::Display for ReasoningEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}%)", self.rule, self.weight)
    }
}

impl FromStr for ReasoningEntry {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_reasoning_entry(s)
    }
}

/// Parse one annotation string into a [`ReasoningEntry`].
///
/// # Algorithm
///
/// 1. Drop trailing whitespace.
/// 2. If the text ends in `%)`, read `(<sign?><digits>%)` backwards; the
///    rule is everything before the `(`. This notation wins any tie.
/// 3. Otherwise, if the text ends in `%`, read `<sign?><digits>%` backwards;
///    the token must be preceded by whitespace (or start the string).
/// 4. No match is [`ParseError::NoWeightFound`]; a match whose trimmed rule
///    is empty is [`ParseError::EmptyRule`].
///
/// Magnitudes too large for `i64` saturate rather than fail.
pub fn parse_reasoning_entry(input: &str) -> Result<ReasoningEntry, ParseError> {
    let text = input.trim_end();

    let Some((rule, weight)) = parenthetical(text).or_else(|| trailing_signed(text)) else {
        debug!(input, "no weight notation");
        return Err(ParseError::NoWeightFound {
            input: input.to_string(),
        });
    };

    let rule = rule.trim();
    if rule.is_empty() {
        debug!(input, "empty rule label");
        return Err(ParseError::EmptyRule {
            input: input.to_string(),
        });
    }

    Ok(ReasoningEntry {
        rule: rule.to_string(),
        weight,
    })
}

/// `<rule> ( <sign?><digits>% )` → (rule, weight).
fn parenthetical(text: &str) -> Option<(&str, i64)> {
    let inner = text.strip_suffix(')')?.trim_end();
    let (head, weight) = signed_percent(inner)?;
    let rule = head.trim_end().strip_suffix('(')?;
    Some((rule, weight))
}

/// `<rule> <sign?><digits>%` → (rule, weight).
fn trailing_signed(text: &str) -> Option<(&str, i64)> {
    let (head, weight) = signed_percent(text)?;
    if !head.is_empty() && !head.ends_with(char::is_whitespace) {
        return None;
    }
    Some((head, weight))
}

/// Strip a trailing `<sign?><digits>%` token, returning what precedes it.
fn signed_percent(text: &str) -> Option<(&str, i64)> {
    let body = text.strip_suffix('%')?;
    let head = body.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &body[head.len()..];
    if digits.is_empty() {
        return None;
    }

    let (head, negative) = match head.strip_suffix('-') {
        Some(rest) => (rest, true),
        None => (head.strip_suffix('+').unwrap_or(head), false),
    };
    Some((head, magnitude(digits, negative)))
}

fn magnitude(digits: &str, negative: bool) -> i64 {
    // `digits` is non-empty ASCII, so parsing only fails on overflow.
    let parsed = if negative {
        format!("-{digits}").parse::<i64>()
    } else {
        digits.parse::<i64>()
    };
    parsed.unwrap_or(if negative { i64::MIN } else { i64::MAX })
}
