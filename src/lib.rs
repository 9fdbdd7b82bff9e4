pub mod clipboard;
pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod logging;
pub mod measure;
pub mod models;
pub mod servings;
pub mod tui;
