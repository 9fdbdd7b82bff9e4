use crate::error::MeasureError;

/// Units the converter understands. Imperial units convert to metric,
/// metric units are displayed as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Teaspoon,
    Tablespoon,
    Cup,
    FluidOunce,
    Ounce,
    Pound,
    Milliliter,
    Liter,
}

/// Lowercase synonyms. Matching picks the longest synonym that fits, so
/// "fl oz" wins over "fl" style partial reads and "lbs" over "lb".
const SYNONYMS: &[(&str, Unit)] = &[
    ("tsp", Unit::Teaspoon),
    ("tsps", Unit::Teaspoon),
    ("teaspoon", Unit::Teaspoon),
    ("teaspoons", Unit::Teaspoon),
    ("tbsp", Unit::Tablespoon),
    ("tbsps", Unit::Tablespoon),
    ("tbs", Unit::Tablespoon),
    ("tablespoon", Unit::Tablespoon),
    ("tablespoons", Unit::Tablespoon),
    ("cup", Unit::Cup),
    ("cups", Unit::Cup),
    ("fl oz", Unit::FluidOunce),
    ("fl. oz", Unit::FluidOunce),
    ("fluid ounce", Unit::FluidOunce),
    ("fluid ounces", Unit::FluidOunce),
    ("oz", Unit::Ounce),
    ("ounce", Unit::Ounce),
    ("ounces", Unit::Ounce),
    ("lb", Unit::Pound),
    ("lbs", Unit::Pound),
    ("pound", Unit::Pound),
    ("pounds", Unit::Pound),
    ("ml", Unit::Milliliter),
    ("milliliter", Unit::Milliliter),
    ("milliliters", Unit::Milliliter),
    ("millilitre", Unit::Milliliter),
    ("millilitres", Unit::Milliliter),
    ("l", Unit::Liter),
    ("liter", Unit::Liter),
    ("liters", Unit::Liter),
    ("litre", Unit::Liter),
    ("litres", Unit::Liter),
];

impl Unit {
    /// Name used when rendering the unit back to the user.
    pub fn canonical(self) -> &'static str {
        match self {
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::Cup => "cup",
            Unit::FluidOunce => "fl oz",
            Unit::Ounce => "oz",
            Unit::Pound => "lb",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
        }
    }

    /// Multiplier into the metric display unit, `None` for units that are
    /// already metric.
    fn metric_factor(self) -> Option<(f64, &'static str)> {
        match self {
            Unit::Teaspoon => Some((4.92892, "ml")),
            Unit::Tablespoon => Some((14.7868, "ml")),
            Unit::Cup => Some((236.588, "ml")),
            Unit::FluidOunce => Some((29.5735, "ml")),
            Unit::Ounce => Some((28.3495, "g")),
            Unit::Pound => Some((453.592, "g")),
            Unit::Milliliter | Unit::Liter => None,
        }
    }

    pub fn is_metric(self) -> bool {
        self.metric_factor().is_none()
    }

    /// Looks up a unit written on its own, e.g. "Cups" or "fl oz".
    pub fn from_text(text: &str) -> Option<Unit> {
        let normalized = normalize(text);
        match normalized.unit {
            Some(unit) if normalized.tail.is_empty() => Some(unit),
            _ => None,
        }
    }
}

/// Result of splitting the text after an amount into unit and trailing qualifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<'a> {
    pub unit: Option<Unit>,
    /// The unit as written, or the whole text when no unit was recognized.
    pub unit_text: &'a str,
    pub tail: &'a str,
}

/// Splits `rest` into a known unit and the qualifier that follows it.
///
/// Matching is case-insensitive and anchored at the start. A synonym only
/// counts when it ends the text or is followed by a non-letter, so "large"
/// is not read as liters.
pub fn normalize(rest: &str) -> Normalized<'_> {
    let rest = rest.trim();

    let best = SYNONYMS
        .iter()
        .filter(|(synonym, _)| starts_with_word(rest, synonym))
        .max_by_key(|(synonym, _)| synonym.len());

    match best {
        Some((synonym, unit)) => {
            let (unit_text, tail) = rest.split_at(synonym.len());
            Normalized {
                unit: Some(*unit),
                unit_text,
                tail: tail.trim_start().trim_start_matches('.').trim(),
            }
        }
        None => Normalized {
            unit: None,
            unit_text: rest,
            tail: "",
        },
    }
}

fn starts_with_word(text: &str, synonym: &str) -> bool {
    let Some(prefix) = text.get(..synonym.len()) else {
        return false;
    };
    if !prefix.eq_ignore_ascii_case(synonym) {
        return false;
    }
    text[synonym.len()..]
        .chars()
        .next()
        .is_none_or(|next| !next.is_alphabetic())
}

/// A converted quantity ready for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub value: f64,
    pub unit: &'static str,
}

/// Converts an imperial amount to metric, rounded to one decimal place.
///
/// Returns `None` for units that are already metric.
pub fn convert(amount: f64, unit: Unit) -> Option<Metric> {
    let (factor, metric_unit) = unit.metric_factor()?;
    Some(Metric {
        value: round_tenth(amount * factor),
        unit: metric_unit,
    })
}

/// Like [`convert`], but starts from unit text and reports why nothing was
/// converted. Metric units come back unchanged.
pub fn try_convert(amount: f64, unit_text: &str) -> Result<Metric, MeasureError> {
    let unit = Unit::from_text(unit_text)
        .ok_or_else(|| MeasureError::UnrecognizedUnit(unit_text.trim().to_string()))?;

    Ok(convert(amount, unit).unwrap_or(Metric {
        value: amount,
        unit: unit.canonical(),
    }))
}

/// Rounds half away from zero to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("cups flour", Some(Unit::Cup), "cups", "flour")]
    #[case("Tbsp", Some(Unit::Tablespoon), "Tbsp", "")]
    #[case("tbs olive oil", Some(Unit::Tablespoon), "tbs", "olive oil")]
    #[case("fl oz cold water", Some(Unit::FluidOunce), "fl oz", "cold water")]
    #[case("lbs", Some(Unit::Pound), "lbs", "")]
    #[case("oz. chocolate", Some(Unit::Ounce), "oz", "chocolate")]
    #[case("Litres", Some(Unit::Liter), "Litres", "")]
    fn test_normalize_recognized_units(
        #[case] rest: &str,
        #[case] unit: Option<Unit>,
        #[case] unit_text: &str,
        #[case] tail: &str,
    ) {
        let normalized = normalize(rest);

        assert_eq!(normalized.unit, unit);
        assert_eq!(normalized.unit_text, unit_text);
        assert_eq!(normalized.tail, tail);
    }

    #[rstest]
    #[case("large eggs")]
    #[case("cloves garlic")]
    #[case("pinch")]
    #[case("")]
    fn test_normalize_unrecognized_keeps_whole_text(#[case] rest: &str) {
        let normalized = normalize(rest);

        assert_eq!(normalized.unit, None);
        assert_eq!(normalized.unit_text, rest);
        assert_eq!(normalized.tail, "");
    }

    #[test]
    fn test_normalize_prefers_longest_synonym() {
        // "teaspoon" would leave a dangling "s" in the tail
        assert_eq!(normalize("teaspoons sugar").tail, "sugar");
        assert_eq!(normalize("fluid ounces milk").unit, Some(Unit::FluidOunce));
    }

    #[rstest]
    #[case(2.0, Unit::Tablespoon, 29.6, "ml")]
    #[case(2.0, Unit::Cup, 473.2, "ml")]
    #[case(8.0, Unit::Ounce, 226.8, "g")]
    #[case(1.0, Unit::Pound, 453.6, "g")]
    #[case(1.0, Unit::Teaspoon, 4.9, "ml")]
    #[case(4.0, Unit::FluidOunce, 118.3, "ml")]
    fn test_convert_fixed_points(
        #[case] amount: f64,
        #[case] unit: Unit,
        #[case] value: f64,
        #[case] metric_unit: &str,
    ) {
        let metric = convert(amount, unit).expect("imperial unit should convert");

        assert!((metric.value - value).abs() < 1e-9, "got {}", metric.value);
        assert_eq!(metric.unit, metric_unit);
    }

    #[test]
    fn test_convert_metric_units_pass_through() {
        assert_eq!(convert(250.0, Unit::Milliliter), None);
        assert_eq!(convert(1.0, Unit::Liter), None);
        assert!(Unit::Liter.is_metric());
    }

    #[test]
    fn test_try_convert_reports_unrecognized_unit() {
        let result = try_convert(3.0, "eggs");

        assert_eq!(
            result,
            Err(MeasureError::UnrecognizedUnit("eggs".to_string()))
        );
    }

    #[test]
    fn test_try_convert_metric_unchanged() {
        let metric = try_convert(250.0, "ml").expect("ml is a known unit");

        assert_eq!(metric, Metric { value: 250.0, unit: "ml" });
    }

    #[test]
    fn test_round_tenth_half_away_from_zero() {
        assert_eq!(round_tenth(0.25), 0.3);
        assert_eq!(round_tenth(-0.25), -0.3);
        assert_eq!(round_tenth(473.176), 473.2);
    }
}
