use clap::{ArgAction, Parser, Subcommand};
use commands::{config, locales, resolve, search, show};
use marquee_config::{Config, PathManager};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Marquee - Turn a plain list of movie titles into a curated movie list")]
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

    /// TMDB API key (takes precedence over the stored key)
    #[arg(long, global = true, env = "MARQUEE_TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a file of movie titles and export the result
    #[command(long_about = "Read a text file with one movie title per line, look each title up on TMDB and write the resolved movies to a JSON export. Blank lines are ignored. Titles without a match are skipped and reported. Use --review to edit, reorder, filter and extend the list before saving.")]
    Resolve {
        /// Text file with one title per line
        file: PathBuf,

        /// Locale for titles and overviews (e.g. de-DE); defaults to curation.locale
        #[arg(long)]
        locale: Option<String>,

        /// Skip a title by its position in the list (1-based, repeatable)
        #[arg(long, value_name = "N")]
        exclude: Vec<usize>,

        /// Where to write the export (defaults to the data directory)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Review the resolved list interactively before saving
        #[arg(long, action = ArgAction::SetTrue)]
        review: bool,
    },
    /// Search TMDB for a title
    Search {
        /// Title to look for
        query: String,

        /// Locale for the results
        #[arg(long)]
        locale: Option<String>,

        /// Maximum number of results to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// List the locales TMDB can localize into
    Locales,
    /// Display a saved export
    Show {
        /// Export file written by `marquee resolve`
        file: PathBuf,

        /// Only show movies of this genre
        #[arg(long)]
        genre: Option<String>,
    },
    /// View or change configuration and the API key
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (the API key is masked)
    Show,

    /// Store the TMDB API key
    #[command(long_about = "Store the TMDB API key in the credentials file. Create a key at https://www.themoviedb.org/settings/api. If no key is given you will be prompted for it.")]
    ApiKey {
        /// API key (if not provided, will prompt)
        key: Option<String>,

        /// Remove the stored key instead
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "key")]
        clear: bool,
    },

    /// Set a configuration value by dotted key, e.g. `curation.locale de-DE`
    Set {
        key: String,
        value: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // A broken config file is reported by the command itself, not here
    let log_file = Config::load_or_default(&PathManager::default().config_file())
        .ok()
        .and_then(|config| config.logging.file);
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let api_key = cli.api_key.as_deref();

    match cli.command {
        Commands::Resolve { file, locale, exclude, out, review } => {
            let args = resolve::ResolveArgs { file, locale, exclude, out, review };
            resolve::run_resolve(args, api_key, &output).await
        }
        Commands::Search { query, locale, limit } => search::run_search(&query, locale, limit, api_key, &output).await,
        Commands::Locales => locales::run_locales(api_key, &output).await,
        Commands::Show { file, genre } => show::run_show(&file, genre.as_deref(), &output),
        Commands::Config { cmd } => config::run_config(cmd, &output),
    }
}
