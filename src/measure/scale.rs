use tracing::debug;

use super::quantity::leading_number;
use super::units::round_tenth;
use crate::error::MeasureError;

/// Formats an amount for display: whole numbers without a decimal point,
/// everything else rounded to one decimal place.
pub fn format_amount(value: f64) -> String {
    let rounded = round_tenth(value);
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Multiplies the first number in `measure` by `factor`, reporting why the
/// measure was left alone.
pub fn try_scale(measure: &str, factor: f64) -> Result<String, MeasureError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(MeasureError::InvalidFactor(factor));
    }

    let digit = measure
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| MeasureError::UnparsableQuantity(measure.trim().to_string()))?;
    // ".5 cup": the decimal point belongs to the number
    let start = if measure[..digit].ends_with('.') {
        digit - 1
    } else {
        digit
    };
    let token = leading_number(&measure[start..])?
        .ok_or_else(|| MeasureError::UnparsableQuantity(measure.trim().to_string()))?;

    if factor == 1.0 {
        return Ok(measure.to_string());
    }

    let end = start + token.text.len();
    Ok(format!(
        "{}{}{}",
        &measure[..start],
        format_amount(token.value * factor),
        &measure[end..]
    ))
}

/// Multiplies the first number in `measure` by `factor`, keeping the text
/// around it verbatim.
///
/// Measures without a number, with a zero denominator, or scaled by a
/// non-positive factor pass through unchanged.
pub fn scale(measure: &str, factor: f64) -> String {
    try_scale(measure, factor).unwrap_or_else(|err| {
        debug!(measure, factor, %err, "measure not scaled");
        measure.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::parse;
    use rstest::*;

    #[rstest]
    #[case("1 cup", 2.0, "2 cup")]
    #[case("2 cups", 2.0, "4 cups")]
    #[case("1/2 cup", 2.0, "1 cup")]
    #[case("1 1/2 cups sugar", 2.0, "3 cups sugar")]
    #[case("1/3 tsp", 2.0, "0.7 tsp")]
    #[case("2.5 kg", 3.0, "7.5 kg")]
    #[case("500g", 3.0, "1500g")]
    #[case("Juice of 1 lemon", 3.0, "Juice of 3 lemon")]
    #[case("3 eggs", 1.5, "4.5 eggs")]
    #[case(".5 cup", 2.0, "1 cup")]
    #[case("about .25 lb", 3.0, "about 0.8 lb")]
    fn test_scale(#[case] measure: &str, #[case] factor: f64, #[case] expected: &str) {
        assert_eq!(scale(measure, factor), expected);
    }

    #[rstest]
    #[case("2")]
    #[case("1/2 cup")]
    #[case("1 1/2 cups")]
    #[case("0.25 tsp")]
    fn test_scale_factor_one_is_identity(#[case] measure: &str) {
        assert_eq!(scale(measure, 1.0), measure);
    }

    #[rstest]
    #[case("a pinch")]
    #[case("to taste")]
    #[case("")]
    fn test_scale_without_number_passes_through(#[case] measure: &str) {
        assert_eq!(scale(measure, 3.0), measure);
    }

    #[test]
    fn test_scale_degenerate_fraction_passes_through() {
        assert_eq!(scale("1/0 cup", 2.0), "1/0 cup");
        assert_eq!(
            try_scale("1/0 cup", 2.0),
            Err(MeasureError::DegenerateFraction("1/0 cup".to_string()))
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-2.0)]
    #[case(f64::NAN)]
    fn test_scale_rejects_invalid_factor(#[case] factor: f64) {
        assert!(matches!(
            try_scale("2 cups", factor),
            Err(MeasureError::InvalidFactor(_))
        ));
        assert_eq!(scale("2 cups", factor), "2 cups");
    }

    #[rstest]
    #[case("1 1/2 cups")]
    #[case("3 tbsp")]
    #[case("2.5 oz")]
    fn test_scaling_is_linear(#[case] measure: &str) {
        let twice = parse(&scale(&scale(measure, 2.0), 1.5));
        let once = parse(&scale(measure, 3.0));

        let twice = twice.amount.expect("amount").value;
        let once = once.amount.expect("amount").value;
        assert!((twice - once).abs() <= 0.05 + 1e-9, "{twice} vs {once}");
    }

    #[rstest]
    #[case("2 tbsp")]
    #[case("1/2 cup")]
    #[case("1 1/2 cups")]
    fn test_factor_one_reparses_to_same_amount(#[case] measure: &str) {
        let original = parse(measure).amount.expect("amount").value;
        let rescaled = parse(&scale(measure, 1.0)).amount.expect("amount").value;

        assert_eq!(original, rescaled);
    }

    #[rstest]
    #[case(2.0, "2")]
    #[case(2.25, "2.3")]
    #[case(0.666, "0.7")]
    #[case(1.96, "2")]
    fn test_format_amount(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_amount(value), expected);
    }
}
