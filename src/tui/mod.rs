pub mod app;
mod meal_views;
pub mod terminal;

pub use app::{AppAction, MealApp, MealContext};
