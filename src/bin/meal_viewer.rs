use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use feedme::{
    clipboard::{Clipboard, Osc52Clipboard, copy_shopping_list},
    config::Config,
    controllers::{get_meal, read_catalog_file},
    db, logging,
    models::api::Meal,
    tui::{
        app::{AppAction, MealApp},
        terminal,
    },
};
use ratatui::{Terminal, backend::Backend};
use tracing::info;

/// How often the screen refreshes while waiting for keys, so the copy
/// acknowledgment disappears on time.
const TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(author, version, about = "Pick a serving size and copy the shopping list")]
struct Cli {
    /// Meal ID in the local catalog
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    id: Option<String>,

    /// Read the meal from a catalog JSON file instead of the database
    #[arg(short, long)]
    file: Option<PathBuf>,
}

async fn load_meal(cli: &Cli, config: &Config) -> Result<Meal> {
    if let Some(file) = &cli.file {
        let meals = read_catalog_file(file)
            .await
            .with_context(|| format!("Failed to read catalog file '{}'", file.display()))?;
        return match meals.first() {
            Some(meal) => Ok(Meal::from(meal)),
            None => bail!("No meals found in {}", file.display()),
        };
    }

    let Some(id) = &cli.id else {
        bail!("Either a meal ID or --file is required");
    };
    let pool = db::connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database '{}'", config.database_url))?;
    Ok(get_meal(&pool, id).await?)
}

async fn run<B, C>(terminal: &mut Terminal<B>, app: &mut MealApp, clipboard: &mut C) -> Result<()>
where
    B: Backend,
    C: Clipboard,
{
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|f| app.render(f, now))?;

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key.code) {
            AppAction::Continue => {}
            AppAction::CopyShoppingList => {
                let text = app.context().shopping_text();
                copy_shopping_list(
                    clipboard,
                    &text,
                    &mut app.context_mut().copy_indicator,
                    Instant::now(),
                )
                .await;
            }
            AppAction::Exit => return Ok(()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;
    logging::init_file(&config.log_level, &config.log_file)?;

    let meal = load_meal(&cli, &config).await?;
    info!(meal_id = %meal.id, "opening meal viewer");
    let mut app = MealApp::new(meal, config.serving_options.clone());

    // Setup terminal
    let mut terminal = terminal::init().context("Failed to set up terminal")?;

    let mut clipboard = Osc52Clipboard::new(std::io::stdout());
    let result = run(&mut terminal, &mut app, &mut clipboard).await;

    // Cleanup terminal
    terminal::restore()?;

    result
}
