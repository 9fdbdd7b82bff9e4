use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedMeError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid catalog record: {0}")]
    InvalidRecord(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Meal not found with id: {0}")]
    MealNotFound(String),

    #[error("Note not found with id: {0}")]
    NoteNotFound(i64),

    #[error("Unsupported serving count {requested} (choose one of {choices:?})")]
    UnsupportedServings { requested: u32, choices: Vec<u32> },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, FeedMeError>;

/// Ways a measure can fail to parse, convert or scale.
///
/// None of these are fatal: the public measure functions degrade to the
/// least-transformed text and only the `try_*` variants surface them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    #[error("no numeric quantity in '{0}'")]
    UnparsableQuantity(String),

    #[error("unrecognized unit '{0}'")]
    UnrecognizedUnit(String),

    #[error("zero denominator in '{0}'")]
    DegenerateFraction(String),

    #[error("scale factor must be positive and finite, got {0}")]
    InvalidFactor(f64),
}
