use std::fmt;

use crate::measure::to_metric_display;

/// One deduplicated line of the shopping list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingEntry {
    /// Normalized ingredient name (trimmed, lowercase).
    pub ingredient: String,
    /// Scaled measures in the order their lines were encountered. Lines
    /// without a measure contribute nothing here.
    pub measures: Vec<String>,
}

impl ShoppingEntry {
    pub fn new(ingredient: impl Into<String>) -> Self {
        Self {
            ingredient: ingredient.into(),
            measures: Vec::new(),
        }
    }

    /// All contributing measures joined with `" + "`, empty when none.
    pub fn measure(&self) -> String {
        self.measures.join(" + ")
    }

    /// Clipboard form: each measure converted for display and followed by the
    /// ingredient, or the bare ingredient when there is no measure.
    pub fn render(&self) -> String {
        if self.measures.is_empty() {
            return self.ingredient.clone();
        }

        self.measures
            .iter()
            .map(|measure| format!("{} {}", to_metric_display(measure), self.ingredient))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl fmt::Display for ShoppingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
