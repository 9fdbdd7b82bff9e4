mod meal_controller;
mod note_controller;
mod shopping_list_controller;

pub use meal_controller::{get_meal, import_meal, read_catalog_file, search_meals};
pub use note_controller::{create_note, delete_note, get_note, list_notes, update_note};
pub use shopping_list_controller::{
    NO_INGREDIENTS, build_shopping_list, ingredient_display, is_excluded_from_shopping,
    meal_report, scale_lines, shopping_list_text,
};
