//! SearchDish CLI
//!
//! Find dishes by city, browse restaurant menus, manage restaurants and the
//! dish catalog against the SearchDish backend.

use clap::{Parser, Subcommand, ValueEnum};
use searchdish_core::error::exit_codes;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod render;

use app::App;
use commands::{auth, contact, dishes, explore, menu, restaurants};

/// Restaurant and dish discovery from the terminal
#[derive(Parser)]
#[command(name = "searchdish")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Configuration file (defaults to .searchdish.toml, searchdish.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored tables and status lines
    Text,
    /// Pretty-printed JSON on stdout
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login {
        /// Account email
        email: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "SEARCHDISH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Create an account
    Register(auth::RegisterArgs),

    /// Restaurants (admin review and restaurateur settings)
    Restaurants {
        #[command(subcommand)]
        action: restaurants::RestaurantsCommand,
    },

    /// Global dish catalog
    Dishes {
        #[command(subcommand)]
        action: dishes::DishesCommand,
    },

    /// Dishes served in a city
    Explore(explore::ExploreArgs),

    /// Restaurants serving a dish
    SearchDish(explore::SearchDishArgs),

    /// A restaurant's menu
    Menu {
        #[command(subcommand)]
        action: menu::MenuCommand,
    },

    /// Write to the SearchDish team
    Contact(contact::ContactArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("searchdish=debug,searchdish_api_client=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let app = App::load(cli.config.as_deref(), cli.format)?;

    match cli.command {
        Commands::Login { email, password } => auth::login(&app, &email, password).await,
        Commands::Logout => auth::logout(&app),
        Commands::Whoami => auth::whoami(&app).await,
        Commands::Register(args) => auth::register(&app, args).await,
        Commands::Restaurants { action } => restaurants::run(&app, action).await,
        Commands::Dishes { action } => dishes::run(&app, action).await,
        Commands::Explore(args) => explore::explore(&app, args).await,
        Commands::SearchDish(args) => explore::search_dish(&app, args).await,
        Commands::Menu { action } => menu::run(&app, action).await,
        Commands::Contact(args) => contact::run(&app, args).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let error = app::into_core_error(e);
            if format == OutputFormat::Json {
                render::print_json(&error.to_report());
            } else {
                searchdish_cli::output::report_error(&error);
            }
            let code = error.exit_code();
            ExitCode::from(u8::try_from(code).unwrap_or(exit_codes::FAILURE as u8))
        }
    }
}
