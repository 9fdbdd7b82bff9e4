use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{MealContext, MealState};
use crate::controllers::NO_INGREDIENTS;

fn render_header(context: &MealContext, frame: &mut Frame, area: Rect) {
    let current = context.selector.servings();

    let mut spans = Vec::new();
    for &choice in context.selector.options().choices() {
        let label = format!(" {choice} servings ");
        if choice == current {
            spans.push(Span::styled(
                label,
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        } else {
            spans.push(Span::raw(label));
        }
        spans.push(Span::raw(" "));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(context.meal.name.as_str()),
    );
    frame.render_widget(header, area);
}

fn render_footer(context: &MealContext, frame: &mut Frame, area: Rect) {
    let text = match &context.status {
        Some(message) => format!("ERROR: {message}"),
        None => "←/→ or digit: servings | Tab: next view | c: copy | q: quit".to_string(),
    };

    let footer = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_shopping_list(context: &MealContext, frame: &mut Frame, area: Rect, now: Instant) {
    let lines: Vec<Line> = context
        .shopping_list()
        .iter()
        .map(|entry| Line::from(entry.render()))
        .collect();

    let title = if context.copy_indicator.is_copied(now) {
        "Shopping list ✓ Copied"
    } else {
        "Shopping list"
    };

    let list = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn split_screen(frame: &Frame) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Servings
            Constraint::Min(1),    // Lists
            Constraint::Length(3), // Help
        ])
        .split(frame.area());
    (chunks[0], chunks[1], chunks[2])
}

/// Full ingredient list next to the shopping list.
pub(crate) struct IngredientsView;

impl MealState for IngredientsView {
    fn render(&self, context: &MealContext, frame: &mut Frame, now: Instant) {
        let (header, body, footer) = split_screen(frame);
        render_header(context, frame, header);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body);

        let display = context.ingredient_display();
        let ingredient_lines: Vec<Line> = if display.is_empty() {
            vec![Line::from(NO_INGREDIENTS)]
        } else {
            display.into_iter().map(Line::from).collect()
        };
        let ingredients = Paragraph::new(ingredient_lines)
            .block(Block::default().borders(Borders::ALL).title("Ingredients"));
        frame.render_widget(ingredients, columns[0]);

        render_shopping_list(context, frame, columns[1], now);
        render_footer(context, frame, footer);
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        _context: &mut MealContext,
    ) -> Option<Box<dyn MealState>> {
        match key {
            KeyCode::Tab => Some(Box::new(ShoppingListView)),
            _ => None,
        }
    }
}

/// Just the shopping list, using the whole width.
pub(crate) struct ShoppingListView;

impl MealState for ShoppingListView {
    fn render(&self, context: &MealContext, frame: &mut Frame, now: Instant) {
        let (header, body, footer) = split_screen(frame);
        render_header(context, frame, header);
        render_shopping_list(context, frame, body, now);
        render_footer(context, frame, footer);
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        _context: &mut MealContext,
    ) -> Option<Box<dyn MealState>> {
        match key {
            KeyCode::Tab => Some(Box::new(InstructionsView)),
            _ => None,
        }
    }
}

/// Numbered cooking steps.
pub(crate) struct InstructionsView;

impl MealState for InstructionsView {
    fn render(&self, context: &MealContext, frame: &mut Frame, _now: Instant) {
        let (header, body, footer) = split_screen(frame);
        render_header(context, frame, header);

        let steps = context.meal.steps();
        let lines: Vec<Line> = if steps.is_empty() {
            vec![Line::from("No instructions.")]
        } else {
            steps
                .iter()
                .enumerate()
                .map(|(index, step)| Line::from(format!("{}. {}", index + 1, step)))
                .collect()
        };

        let instructions = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Instructions"));
        frame.render_widget(instructions, body);
        render_footer(context, frame, footer);
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        _context: &mut MealContext,
    ) -> Option<Box<dyn MealState>> {
        match key {
            KeyCode::Tab => Some(Box::new(IngredientsView)),
            _ => None,
        }
    }
}
