// Travelplanner command line entry point

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travelplanner::app::AppState;
use travelplanner::commands::{self, CommandResponse, NoteForm, Session};
use travelplanner::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "travelplanner",
    version,
    about = "Plan trips: itineraries, budgets, packing lists, journal and photos"
)]
struct Cli {
    /// SQLite database file (overrides TRAVELPLANNER_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Acting user id, as returned by `register` or `login`
    #[arg(long, global = true)]
    user: Option<String>,

    /// Current trip id for trip-scoped commands
    #[arg(long, global = true)]
    trip: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an account
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// Sign in and print the user record
    Login { email: String, password: String },
    /// Show or update the acting user's profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Trip management
    #[command(subcommand)]
    Trip(TripCommand),
    /// Day-by-day itinerary for the current trip
    #[command(subcommand)]
    Itinerary(ItineraryCommand),
    /// Expenses for the current trip
    #[command(subcommand)]
    Expense(ExpenseCommand),
    /// Packing list for the current trip
    #[command(subcommand)]
    Packing(PackingCommand),
    /// Travel journal for the current trip
    #[command(subcommand)]
    Note(NoteCommand),
    /// Photos for the current trip
    #[command(subcommand)]
    Photo(PhotoCommand),
    /// Current weather for a city
    Weather { city: String },
    /// Attractions or restaurants in a city
    Places {
        city: String,
        #[arg(default_value = "tourist_attraction")]
        kind: String,
    },
    /// Travel time between two places
    Traffic { origin: String, destination: String },
}

#[derive(Subcommand, Debug)]
enum TripCommand {
    /// Create a trip (dates as YYYY-MM-DD)
    Create {
        destination: String,
        start_date: String,
        end_date: String,
        budget: f64,
    },
    /// List the acting user's trips
    List,
    /// Show the current trip
    Show,
    /// Change fields of the current trip
    Update {
        #[arg(long)]
        destination: Option<String>,
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
    },
    /// Delete the current trip and everything attached to it
    Delete,
    /// Budget, spend and remaining amount
    Budget,
}

#[derive(Subcommand, Debug)]
enum ItineraryCommand {
    /// Replace the itinerary with a freshly generated one
    Generate,
    /// Show the stored itinerary
    Show,
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    /// Record an expense
    Add {
        category: String,
        amount: f64,
        date: String,
    },
    List,
    /// Totals per category
    Summary,
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum PackingCommand {
    /// Regenerate the weather-based items, keeping custom ones
    Generate,
    List,
    /// Add a custom item
    Add { name: String, category: String },
    Pack { id: String },
    Unpack { id: String },
    Remove { id: String },
    Progress,
}

#[derive(Args, Debug)]
struct NoteArgs {
    title: String,
    content: String,
    date: String,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    mood: Option<String>,
}

impl From<NoteArgs> for NoteForm {
    fn from(args: NoteArgs) -> Self {
        NoteForm {
            title: args.title,
            content: args.content,
            date: args.date,
            location: args.location,
            mood: args.mood,
        }
    }
}

#[derive(Subcommand, Debug)]
enum NoteCommand {
    Add(NoteArgs),
    List,
    Show {
        id: String,
    },
    Update {
        id: String,
        #[command(flatten)]
        note: NoteArgs,
    },
    Delete {
        id: String,
    },
    /// Number of notes per mood
    Moods,
    /// Distinct locations mentioned in notes
    Locations,
}

#[derive(Subcommand, Debug)]
enum PhotoCommand {
    /// Upload a JPEG or PNG file
    Upload {
        path: PathBuf,
        #[arg(long)]
        description: Option<String>,
    },
    List,
    /// Write a stored photo into a directory
    Export {
        id: String,
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    Delete { id: String },
}

/// Print a response as pretty JSON and report whether it succeeded
fn emit<T: Serialize>(response: CommandResponse<T>) -> Result<bool> {
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(response.success)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr, responses to stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travelplanner=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let state = AppState::initialize(&config)
        .await
        .context("failed to initialize application")?;

    let mut session = Session::anonymous();
    session.user_id = cli.user;
    session.current_trip_id = cli.trip;

    let success = run(&state, &session, cli.command).await?;
    if !success {
        std::process::exit(1);
    }
    Ok(())
}

async fn run(state: &AppState, session: &Session, command: Commands) -> Result<bool> {
    match command {
        Commands::Register {
            name,
            email,
            password,
        } => emit(commands::register(state, &name, &email, &password).await),
        Commands::Login { email, password } => {
            emit(commands::login(state, &email, &password).await)
        }
        Commands::Profile { name, email } => {
            if name.is_none() && email.is_none() {
                emit(commands::get_profile(state, session).await)
            } else {
                emit(
                    commands::update_profile(state, session, name.as_deref(), email.as_deref())
                        .await,
                )
            }
        }
        Commands::Trip(cmd) => run_trip(state, session, cmd).await,
        Commands::Itinerary(cmd) => match cmd {
            ItineraryCommand::Generate => emit(commands::generate_itinerary(state, session).await),
            ItineraryCommand::Show => emit(commands::get_itinerary(state, session).await),
        },
        Commands::Expense(cmd) => match cmd {
            ExpenseCommand::Add {
                category,
                amount,
                date,
            } => emit(commands::add_expense(state, session, &category, amount, &date).await),
            ExpenseCommand::List => emit(commands::list_expenses(state, session).await),
            ExpenseCommand::Summary => emit(commands::expense_summary(state, session).await),
            ExpenseCommand::Delete { id } => {
                emit(commands::delete_expense(state, session, &id).await)
            }
        },
        Commands::Packing(cmd) => run_packing(state, session, cmd).await,
        Commands::Note(cmd) => run_note(state, session, cmd).await,
        Commands::Photo(cmd) => run_photo(state, session, cmd).await,
        Commands::Weather { city } => emit(commands::get_weather(state, &city).await),
        Commands::Places { city, kind } => emit(commands::get_places(state, &city, &kind).await),
        Commands::Traffic {
            origin,
            destination,
        } => emit(commands::get_traffic(state, &origin, &destination).await),
    }
}

async fn run_trip(state: &AppState, session: &Session, cmd: TripCommand) -> Result<bool> {
    match cmd {
        TripCommand::Create {
            destination,
            start_date,
            end_date,
            budget,
        } => emit(
            commands::create_trip(state, session, &destination, &start_date, &end_date, budget)
                .await,
        ),
        TripCommand::List => emit(commands::list_trips(state, session).await),
        TripCommand::Show => emit(commands::get_trip(state, session).await),
        TripCommand::Update {
            destination,
            start_date,
            end_date,
            budget,
        } => emit(
            commands::update_trip(
                state,
                session,
                destination.as_deref(),
                start_date.as_deref(),
                end_date.as_deref(),
                budget,
            )
            .await,
        ),
        TripCommand::Delete => emit(commands::delete_trip(state, session).await),
        TripCommand::Budget => emit(commands::budget_status(state, session).await),
    }
}

async fn run_packing(state: &AppState, session: &Session, cmd: PackingCommand) -> Result<bool> {
    match cmd {
        PackingCommand::Generate => emit(commands::generate_packing_list(state, session).await),
        PackingCommand::List => emit(commands::list_packing_items(state, session).await),
        PackingCommand::Add { name, category } => {
            emit(commands::add_packing_item(state, session, &name, &category).await)
        }
        PackingCommand::Pack { id } => {
            emit(commands::set_item_packed(state, session, &id, true).await)
        }
        PackingCommand::Unpack { id } => {
            emit(commands::set_item_packed(state, session, &id, false).await)
        }
        PackingCommand::Remove { id } => {
            emit(commands::delete_packing_item(state, session, &id).await)
        }
        PackingCommand::Progress => emit(commands::packing_progress(state, session).await),
    }
}

async fn run_note(state: &AppState, session: &Session, cmd: NoteCommand) -> Result<bool> {
    match cmd {
        NoteCommand::Add(note) => emit(commands::add_note(state, session, note.into()).await),
        NoteCommand::List => emit(commands::list_notes(state, session).await),
        NoteCommand::Show { id } => emit(commands::get_note(state, session, &id).await),
        NoteCommand::Update { id, note } => {
            emit(commands::update_note(state, session, &id, note.into()).await)
        }
        NoteCommand::Delete { id } => emit(commands::delete_note(state, session, &id).await),
        NoteCommand::Moods => emit(commands::mood_counts(state, session).await),
        NoteCommand::Locations => emit(commands::note_locations(state, session).await),
    }
}

async fn run_photo(state: &AppState, session: &Session, cmd: PhotoCommand) -> Result<bool> {
    match cmd {
        PhotoCommand::Upload { path, description } => {
            let data = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            emit(
                commands::upload_photo(state, session, &name, description.as_deref(), &data)
                    .await,
            )
        }
        PhotoCommand::List => emit(commands::list_photos(state, session).await),
        PhotoCommand::Export { id, dir } => {
            emit(commands::export_photo(state, session, &id, &dir).await)
        }
        PhotoCommand::Delete { id } => emit(commands::delete_photo(state, session, &id).await),
    }
}
