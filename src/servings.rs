//! Serving-size selection and the transient "copied" acknowledgment.

use std::time::{Duration, Instant};

use crate::error::{FeedMeError, Result};

pub const DEFAULT_SERVING_CHOICES: [u32; 3] = [2, 4, 6];
pub const DEFAULT_BASE_SERVINGS: u32 = 2;

/// How long the "copied" acknowledgment stays up.
pub const COPY_ACK_DURATION: Duration = Duration::from_millis(1400);

/// The serving counts a user may pick from and the count recipes are written for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServingOptions {
    choices: Vec<u32>,
    base: u32,
}

impl ServingOptions {
    /// Duplicate choices are dropped, keeping the first occurrence.
    pub fn new(choices: Vec<u32>, base: u32) -> Result<Self> {
        if base == 0 {
            return Err(FeedMeError::InvalidConfig(
                "base servings must be positive".to_string(),
            ));
        }
        if choices.is_empty() {
            return Err(FeedMeError::InvalidConfig(
                "at least one serving choice is required".to_string(),
            ));
        }
        if choices.contains(&0) {
            return Err(FeedMeError::InvalidConfig(
                "serving choices must be positive".to_string(),
            ));
        }

        let mut unique = Vec::with_capacity(choices.len());
        for choice in choices {
            if !unique.contains(&choice) {
                unique.push(choice);
            }
        }

        Ok(Self {
            choices: unique,
            base,
        })
    }

    pub fn choices(&self) -> &[u32] {
        &self.choices
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// The serving count shown before the user picks one: the base when it
    /// is offered, otherwise the first choice.
    pub fn initial(&self) -> u32 {
        if self.contains(self.base) {
            self.base
        } else {
            self.choices[0]
        }
    }

    pub fn contains(&self, servings: u32) -> bool {
        self.choices.contains(&servings)
    }

    /// Returns `servings` if it is one of the choices.
    pub fn validate(&self, servings: u32) -> Result<u32> {
        if self.contains(servings) {
            Ok(servings)
        } else {
            Err(FeedMeError::UnsupportedServings {
                requested: servings,
                choices: self.choices.clone(),
            })
        }
    }

    pub fn factor_for(&self, servings: u32) -> f64 {
        f64::from(servings) / f64::from(self.base)
    }
}

impl Default for ServingOptions {
    fn default() -> Self {
        Self {
            choices: DEFAULT_SERVING_CHOICES.to_vec(),
            base: DEFAULT_BASE_SERVINGS,
        }
    }
}

/// The currently selected serving count.
///
/// Selection is immediate; callers recompute the scaled lists from the
/// source ingredient lines after every change.
#[derive(Debug, Clone)]
pub struct ServingSelector {
    options: ServingOptions,
    index: usize,
}

impl ServingSelector {
    /// Starts at [`ServingOptions::initial`].
    pub fn new(options: ServingOptions) -> Self {
        let initial = options.initial();
        let index = options
            .choices
            .iter()
            .position(|&choice| choice == initial)
            .unwrap_or(0);
        Self { options, index }
    }

    pub fn options(&self) -> &ServingOptions {
        &self.options
    }

    pub fn servings(&self) -> u32 {
        self.options.choices[self.index]
    }

    pub fn factor(&self) -> f64 {
        self.options.factor_for(self.servings())
    }

    pub fn select(&mut self, servings: u32) -> Result<()> {
        self.options.validate(servings)?;
        if let Some(index) = self
            .options
            .choices
            .iter()
            .position(|&choice| choice == servings)
        {
            self.index = index;
        }
        Ok(())
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.options.choices.len();
    }

    pub fn previous(&mut self) {
        let len = self.options.choices.len();
        self.index = (self.index + len - 1) % len;
    }
}

/// Whether the shopping list was just copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyIndicator {
    #[default]
    Idle,
    Copied {
        since: Instant,
    },
}

impl CopyIndicator {
    pub fn acknowledge(&mut self, now: Instant) {
        *self = CopyIndicator::Copied { since: now };
    }

    /// Falls back to `Idle` once the acknowledgment has been shown long enough.
    pub fn tick(&mut self, now: Instant) {
        if let CopyIndicator::Copied { since } = *self {
            if now.saturating_duration_since(since) >= COPY_ACK_DURATION {
                *self = CopyIndicator::Idle;
            }
        }
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        match self {
            CopyIndicator::Idle => false,
            CopyIndicator::Copied { since } => {
                now.saturating_duration_since(*since) < COPY_ACK_DURATION
            }
        }
    }
}
