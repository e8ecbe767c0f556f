use clap::{ArgAction, Parser, Subcommand};
use commands::{config, interactive, search, watched};

mod commands;
mod context;
mod logging;
mod output;
mod render;
mod terminal;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "Popcorn - search movies and keep track of what you've watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    #[command(long_about = "Search the movie catalogue by title. Queries shorter than the configured minimum (3 characters by default) return no results without contacting the API.")]
    Search {
        /// Title to search for
        query: Vec<String>,
    },
    /// Show the full detail of one movie
    Show {
        /// IMDb identifier, e.g. tt1375666
        imdb_id: String,
    },
    /// Rate a movie and add it to the watched list
    #[command(long_about = "Fetch a movie by IMDb identifier, rate it and append it to the watched list. Movies already in the list are refused; remove them first to re-rate.")]
    Add {
        /// IMDb identifier, e.g. tt1375666
        imdb_id: String,

        /// Your rating, 1-10
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// Remove a movie from the watched list
    Remove {
        /// IMDb identifier of the watched entry
        imdb_id: String,
    },
    /// Show the watched list with summary statistics
    List,
    /// Show summary statistics for the watched list
    Stats,
    /// Interactive search and rating session (default)
    #[command(long_about = "Search, open a movie, rate it and manage the watched list from prompts. Press Esc in the movie menu to close the detail view; an empty search shows the watched list.")]
    Interactive,
    /// View or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show,
    /// Store an OMDb API key in the config file
    SetKey {
        /// API key (if not provided, will prompt)
        key: Option<String>,
    },
    /// Print the config and data locations
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Interactive);

    // Interactive sessions log to a file so log lines never land in the prompts
    let logging_ready = if matches!(command, Commands::Interactive) {
        let log_file = popcorn_config::PathManager::default().log_file();
        logging::init_logging_with_file(cli.verbose, cli.quiet, Some(log_file))
    } else {
        logging::init_logging(cli.verbose, cli.quiet)
    };
    logging_ready.map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match command {
        Commands::Search { query } => search::run_search(&query.join(" "), &output).await,
        Commands::Show { imdb_id } => watched::run_show(&imdb_id, &output).await,
        Commands::Add { imdb_id, rating } => watched::run_add(&imdb_id, rating, &output).await,
        Commands::Remove { imdb_id } => watched::run_remove(&imdb_id, &output),
        Commands::List => watched::run_list(&output),
        Commands::Stats => watched::run_stats(&output),
        Commands::Interactive => interactive::run_interactive(&output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output),
    }
}
