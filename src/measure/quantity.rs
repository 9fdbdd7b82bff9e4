use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::units::{Unit, normalize};
use crate::error::MeasureError;

static MIXED_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(\d+)/(\d+)").expect("mixed fraction pattern"));
static SIMPLE_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)/(\d+)").expect("fraction pattern"));
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+(?:\.\d+)?|\.\d+)").expect("decimal pattern"));

/// A numeric amount together with the text it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Amount {
    pub value: f64,
    pub text: String,
}

/// A measure split into amount, unit and trailing qualifier.
///
/// `amount` is `None` when the measure has no leading number, in which case
/// `unit` holds the whole trimmed measure and `tail` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    pub amount: Option<Amount>,
    pub unit: String,
    pub tail: String,
}

impl ParsedQuantity {
    fn unparsed(measure: &str) -> Self {
        Self {
            amount: None,
            unit: measure.to_string(),
            tail: String::new(),
        }
    }

    pub fn canonical_unit(&self) -> Option<Unit> {
        self.amount.as_ref()?;
        Unit::from_text(&self.unit)
    }
}

/// A number found at the start of some text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NumberToken<'a> {
    pub text: &'a str,
    pub value: f64,
}

/// Reads a mixed fraction, simple fraction or decimal at the very start of
/// `text`, in that order of preference.
pub(crate) fn leading_number(text: &str) -> Result<Option<NumberToken<'_>>, MeasureError> {
    if let Some(caps) = MIXED_FRACTION.captures(text) {
        let whole = number(&caps[1])?;
        let fraction = fraction(&caps[2], &caps[3], text)?;
        return Ok(Some(NumberToken {
            text: &text[..caps[0].len()],
            value: whole + fraction,
        }));
    }

    if let Some(caps) = SIMPLE_FRACTION.captures(text) {
        return Ok(Some(NumberToken {
            text: &text[..caps[0].len()],
            value: fraction(&caps[1], &caps[2], text)?,
        }));
    }

    match DECIMAL.find(text) {
        Some(found) => Ok(Some(NumberToken {
            text: found.as_str(),
            value: number(found.as_str())?,
        })),
        None => Ok(None),
    }
}

fn number(digits: &str) -> Result<f64, MeasureError> {
    digits
        .parse::<f64>()
        .map_err(|_| MeasureError::UnparsableQuantity(digits.to_string()))
}

fn fraction(numerator: &str, denominator: &str, source: &str) -> Result<f64, MeasureError> {
    let denominator = number(denominator)?;
    if denominator == 0.0 {
        return Err(MeasureError::DegenerateFraction(source.trim().to_string()));
    }
    Ok(number(numerator)? / denominator)
}

/// Parses a measure, reporting why it could not be read.
pub fn try_parse(measure: &str) -> Result<ParsedQuantity, MeasureError> {
    let trimmed = measure.trim();
    let token = leading_number(trimmed)?
        .ok_or_else(|| MeasureError::UnparsableQuantity(trimmed.to_string()))?;

    let normalized = normalize(&trimmed[token.text.len()..]);

    Ok(ParsedQuantity {
        amount: Some(Amount {
            value: token.value,
            text: token.text.to_string(),
        }),
        unit: normalized.unit_text.to_string(),
        tail: normalized.tail.to_string(),
    })
}

/// Parses a measure such as "1 1/2 cups flour".
///
/// Never fails: text without a usable leading number comes back with no
/// amount and the trimmed text as its unit.
pub fn parse(measure: &str) -> ParsedQuantity {
    try_parse(measure).unwrap_or_else(|err| {
        debug!(measure, %err, "measure left unparsed");
        ParsedQuantity::unparsed(measure.trim())
    })
}
