use crate::utils::error::{AttendanceError, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid digits pattern"));

/// Builds a selector from a literal known to be valid.
pub fn selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// A parsed page. Not `Send`, so it is built and dropped between awaits.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::html::Select<'a, 'b> {
        self.html.select(selector)
    }

    /// Concatenated text of every element matching `selector`.
    pub fn text_of(&self, selector: &Selector) -> String {
        self.select(selector).map(|el| text(&el)).collect()
    }
}

pub fn text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

/// Concatenated text of every descendant of `element` matching `selector`.
pub fn text_within(element: &ElementRef<'_>, selector: &Selector) -> String {
    element.select(selector).map(|el| text(&el)).collect()
}

/// How a numeric cell that is absent or not a number is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericPolicy {
    Required,
    DefaultTo(i64),
}

/// Reads the leading integer of `raw` (surrounding whitespace ignored, trailing text tolerated).
pub fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Parses a count under `policy`, building the error lazily when the value is required.
pub fn parse_count(
    raw: &str,
    policy: NumericPolicy,
    on_missing: impl FnOnce() -> AttendanceError,
) -> Result<i64> {
    match (leading_integer(raw), policy) {
        (Some(n), _) => Ok(n),
        (None, NumericPolicy::DefaultTo(fallback)) => Ok(fallback),
        (None, NumericPolicy::Required) => Err(on_missing()),
    }
}

/// The last run of digits in `raw`, e.g. the session total closing a heading.
pub fn last_number(raw: &str) -> Option<i64> {
    DIGITS
        .find_iter(raw)
        .last()
        .and_then(|m| m.as_str().parse().ok())
}
