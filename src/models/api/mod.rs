mod meal;
mod note;
mod shopping_list;

pub use meal::{Meal, MealSummary, instruction_steps};
pub use note::{NewNote, Note, NotePatch, parse_tags};
pub use shopping_list::ShoppingEntry;
