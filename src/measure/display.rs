use tracing::debug;

use super::quantity::try_parse;
use super::scale::format_amount;
use super::units::convert;
use crate::error::MeasureError;

/// Renders a measure with its metric equivalent appended, e.g.
/// `"2 tbsp"` becomes `"2 tbsp (29.6 ml)"`.
///
/// The amount keeps its original text and the unit is shown by its canonical
/// name. Metric measures, unknown units and measures without an amount come
/// back trimmed but otherwise unchanged.
pub fn to_metric_display(measure: &str) -> String {
    let trimmed = measure.trim();
    try_metric_display(trimmed).unwrap_or_else(|err| {
        debug!(measure = trimmed, %err, "measure shown without conversion");
        trimmed.to_string()
    })
}

fn try_metric_display(measure: &str) -> Result<String, MeasureError> {
    let quantity = try_parse(measure)?;
    let unit = quantity
        .canonical_unit()
        .ok_or_else(|| MeasureError::UnrecognizedUnit(quantity.unit.clone()))?;
    let Some(amount) = quantity.amount else {
        return Err(MeasureError::UnparsableQuantity(measure.to_string()));
    };

    let Some(metric) = convert(amount.value, unit) else {
        return Ok(measure.to_string());
    };

    let tail = if quantity.tail.is_empty() {
        String::new()
    } else {
        format!(" {}", quantity.tail)
    };

    Ok(format!(
        "{} {}{tail} ({} {}{tail})",
        amount.text,
        unit.canonical(),
        format_amount(metric.value),
        metric.unit,
    ))
}
