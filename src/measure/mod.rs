//! Parsing, scaling and metric display of free-text recipe measures such as
//! "1 1/2 cups" or "8 oz".
//!
//! Every public function here degrades to the least-transformed text instead
//! of failing; the `try_*` variants say why a measure was left alone.

mod display;
mod quantity;
mod scale;
mod units;

pub use display::to_metric_display;
pub use quantity::{Amount, ParsedQuantity, parse, try_parse};
pub use scale::{format_amount, scale, try_scale};
pub use units::{Metric, Normalized, Unit, convert, normalize, round_tenth, try_convert};
