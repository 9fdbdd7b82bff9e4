use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use feedme::config::Config;
use feedme::controllers::{
    build_shopping_list, create_note, delete_note, get_meal, get_note, import_meal, list_notes,
    meal_report, read_catalog_file, search_meals, shopping_list_text, update_note,
};
use feedme::models::api::{Meal, NewNote, Note, NotePatch, parse_tags};
use feedme::{db, logging};
use sqlx::SqlitePool;

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse meals, keep recipe notes and build shopping lists")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Import every meal from a saved catalog lookup response
    Import { file: PathBuf },
    /// List meals that use an ingredient
    Search { ingredient: String },
    /// Show a meal with its scaled ingredients and shopping list
    Show(MealArgs),
    /// Print only the shopping list, ready to paste
    Shop(MealArgs),
    /// Manage personal recipe notes
    #[command(subcommand)]
    Notes(NotesCommand),
}

#[derive(Args, Debug)]
struct MealArgs {
    /// Meal ID in the local catalog
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    id: Option<String>,

    /// Read the meal from a catalog JSON file instead of the database
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Number of servings to scale to
    #[arg(short, long)]
    servings: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum NotesCommand {
    /// List all notes, newest first
    List,
    /// Show one note
    Show { id: i64 },
    /// Add a note
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long, default_value = "")]
        ingredients: String,
        #[arg(short, long, default_value = "")]
        steps: String,
        /// Comma separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Change fields of a note
    Edit {
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        ingredients: Option<String>,
        #[arg(short, long)]
        steps: Option<String>,
        /// Comma separated tags, replacing the current ones
        #[arg(long)]
        tags: Option<String>,
    },
    /// Delete a note
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = Config::from_env().context("Failed to load configuration")?;
    logging::init_stderr(&config.log_level)?;

    match cli.command {
        Command::Import { file } => {
            let pool = open_database(&config).await?;
            let meals = read_catalog_file(&file)
                .await
                .with_context(|| format!("Failed to read catalog file '{}'", file.display()))?;
            if meals.is_empty() {
                println!("No meals found in {}", file.display());
            }
            for meal in &meals {
                let meal_id = import_meal(&pool, meal).await?;
                println!("Imported {} ({})", meal.name.trim(), meal_id);
            }
        }
        Command::Search { ingredient } => {
            let pool = open_database(&config).await?;
            let meals = search_meals(&pool, &ingredient).await?;
            if meals.is_empty() {
                println!("No meals use '{}'", ingredient.trim());
            }
            for meal in meals {
                println!("{}\t{}", meal.id, meal.name);
            }
        }
        Command::Show(args) => {
            let (meal, servings) = load_meal(&config, &args).await?;
            let factor = config.serving_options.factor_for(servings);

            print!("{}", meal_report(&meal, servings, factor));
        }
        Command::Shop(args) => {
            let (meal, servings) = load_meal(&config, &args).await?;
            let factor = config.serving_options.factor_for(servings);
            let text = shopping_list_text(&build_shopping_list(&meal.ingredients, factor));
            if !text.is_empty() {
                println!("{text}");
            }
        }
        Command::Notes(command) => {
            let pool = open_database(&config).await?;
            run_notes(&pool, command).await?;
        }
    }

    Ok(())
}

async fn open_database(config: &Config) -> Result<SqlitePool> {
    db::connect(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database '{}'", config.database_url))
}

async fn load_meal(config: &Config, args: &MealArgs) -> Result<(Meal, u32)> {
    let servings = match args.servings {
        Some(requested) => config.serving_options.validate(requested)?,
        None => config.serving_options.initial(),
    };

    let meal = match (&args.file, &args.id) {
        (Some(file), _) => {
            let meals = read_catalog_file(file)
                .await
                .with_context(|| format!("Failed to read catalog file '{}'", file.display()))?;
            match meals.first() {
                Some(meal) => Meal::from(meal),
                None => bail!("No meals found in {}", file.display()),
            }
        }
        (None, Some(id)) => {
            let pool = open_database(config).await?;
            get_meal(&pool, id).await?
        }
        (None, None) => bail!("Either a meal ID or --file is required"),
    };

    Ok((meal, servings))
}

fn print_note(note: &Note) {
    println!("#{} {}", note.id, note.title);
    if !note.tags.is_empty() {
        println!("Tags: {}", note.tags.join(", "));
    }
    println!("Updated: {}", note.updated_at);
    if !note.ingredients.is_empty() {
        println!("\nIngredients:\n{}", note.ingredients);
    }
    if !note.steps.is_empty() {
        println!("\nSteps:\n{}", note.steps);
    }
}

async fn run_notes(pool: &SqlitePool, command: NotesCommand) -> Result<()> {
    match command {
        NotesCommand::List => {
            let notes = list_notes(pool).await?;
            if notes.is_empty() {
                println!("No notes yet.");
            }
            for note in notes {
                let tags = if note.tags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", note.tags.join(", "))
                };
                println!("{}\t{}{}", note.id, note.title, tags);
            }
        }
        NotesCommand::Show { id } => print_note(&get_note(pool, id).await?),
        NotesCommand::Add {
            title,
            ingredients,
            steps,
            tags,
        } => {
            if title.trim().is_empty() {
                bail!("A note needs a title");
            }
            let note = create_note(
                pool,
                &NewNote {
                    title,
                    ingredients,
                    steps,
                    tags: parse_tags(&tags),
                },
            )
            .await?;
            println!("Note saved with ID: {}", note.id);
        }
        NotesCommand::Edit {
            id,
            title,
            ingredients,
            steps,
            tags,
        } => {
            let patch = NotePatch {
                title,
                ingredients,
                steps,
                tags: tags.as_deref().map(parse_tags),
            };
            if patch.is_empty() {
                bail!("Nothing to change; pass at least one field");
            }
            print_note(&update_note(pool, id, &patch).await?);
        }
        NotesCommand::Delete { id } => {
            if delete_note(pool, id).await? {
                println!("Deleted note {id}");
            } else {
                println!("No note with ID {id}");
            }
        }
    }

    Ok(())
}
