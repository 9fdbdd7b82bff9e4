use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::Frame;

use super::meal_views::IngredientsView;
use crate::controllers::{build_shopping_list, ingredient_display, shopping_list_text};
use crate::models::api::{Meal, ShoppingEntry};
use crate::servings::{CopyIndicator, ServingOptions, ServingSelector};

#[derive(Debug, PartialEq, Eq)]
pub enum AppAction {
    Continue,         // Keep running
    CopyShoppingList, // Caller should copy the shopping list text
    Exit,             // q or Esc pressed
}

pub struct MealApp {
    state: Box<dyn MealState>,
    context: MealContext,
}

pub struct MealContext {
    pub meal: Meal,
    pub selector: ServingSelector,
    pub copy_indicator: CopyIndicator,
    pub status: Option<String>,
}

impl MealContext {
    pub fn new(meal: Meal, options: ServingOptions) -> Self {
        Self {
            meal,
            selector: ServingSelector::new(options),
            copy_indicator: CopyIndicator::default(),
            status: None,
        }
    }

    /// Everything below is recomputed from the meal's lines on each call, so
    /// a serving change never sees stale results.
    pub fn ingredient_display(&self) -> Vec<String> {
        ingredient_display(&self.meal.ingredients, self.selector.factor())
    }

    pub fn shopping_list(&self) -> Vec<ShoppingEntry> {
        build_shopping_list(&self.meal.ingredients, self.selector.factor())
    }

    pub fn shopping_text(&self) -> String {
        shopping_list_text(&self.shopping_list())
    }

    fn select_servings(&mut self, servings: u32) {
        self.status = self
            .selector
            .select(servings)
            .err()
            .map(|err| err.to_string());
    }
}

pub(crate) trait MealState {
    fn render(&self, context: &MealContext, frame: &mut Frame, now: Instant);
    fn handle_key(&mut self, key: KeyCode, context: &mut MealContext)
    -> Option<Box<dyn MealState>>;
}

impl MealApp {
    pub fn new(meal: Meal, options: ServingOptions) -> Self {
        Self {
            state: Box::new(IngredientsView),
            context: MealContext::new(meal, options),
        }
    }

    pub fn context(&self) -> &MealContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut MealContext {
        &mut self.context
    }

    pub fn render(&self, frame: &mut Frame, now: Instant) {
        self.state.render(&self.context, frame, now);
    }

    /// Expire the copy acknowledgment once its time is up.
    pub fn tick(&mut self, now: Instant) {
        self.context.copy_indicator.tick(now);
    }

    pub fn handle_key(&mut self, key: KeyCode) -> AppAction {
        // global behavior shared by every view
        match key {
            KeyCode::Esc | KeyCode::Char('q') => return AppAction::Exit,
            KeyCode::Char('c') => return AppAction::CopyShoppingList,
            KeyCode::Left => {
                self.context.selector.previous();
                self.context.status = None;
                return AppAction::Continue;
            }
            KeyCode::Right => {
                self.context.selector.next();
                self.context.status = None;
                return AppAction::Continue;
            }
            KeyCode::Char(digit) if digit.is_ascii_digit() => {
                if let Some(servings) = digit.to_digit(10) {
                    self.context.select_servings(servings);
                }
                return AppAction::Continue;
            }
            _ => {}
        }

        // otherwise let the view handle it
        if let Some(next_state) = self.state.handle_key(key, &mut self.context) {
            self.state = next_state
        }

        AppAction::Continue
    }
}
