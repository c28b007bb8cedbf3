use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use team_randomizer::config::ServerConfig;
use team_randomizer::display::{print_teams, write_teams_to_file};
use team_randomizer::export::{export_teams_to_csv, teams_to_csv_string};
use team_randomizer::parser::{load_pool, parse_disabled, parse_names};
use team_randomizer::request::{prepare, run, RawRequest};
use team_randomizer::teams::DisabledByRound;
use team_randomizer::web;

/// Seeded team randomizer
#[derive(Parser)]
#[command(name = "team-randomizer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate teams and print or save them
    Generate {
        /// Comma or newline separated names
        #[arg(short, long)]
        names: Option<String>,

        /// CSV or text file with one name per row
        #[arg(short = 'f', long, conflicts_with = "names")]
        names_file: Option<PathBuf>,

        /// People per team
        #[arg(short = 's', long)]
        team_size: Option<usize>,

        /// Number of rounds (defaults from a YYYYMMDD seed, else 3)
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Minimum rounds per person
        #[arg(long)]
        min: Option<usize>,

        /// Maximum rounds per person (defaults to the round count)
        #[arg(long)]
        max: Option<usize>,

        /// Integer seed or YYYYMMDD date; omit for a random one
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<String>,

        /// People to leave out, e.g. "0:Ann,Bo;2:Cy" (zero-based rounds)
        #[arg(short, long)]
        disabled: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the JSON API
    Web {
        /// Overrides TEAM_RANDOMIZER_PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Web { port } => {
            let config = ServerConfig::from_env().with_port(port);
            println!("Access the API at http://localhost:{}/api/teams", config.port);
            web::start_server(config).await?;
        }
        Commands::Generate {
            names,
            names_file,
            team_size,
            rounds,
            min,
            max,
            seed,
            disabled,
            format,
            output,
        } => {
            let pool = match (&names_file, &names) {
                (Some(path), _) => load_pool(path)?,
                (None, Some(names)) => parse_names(names),
                (None, None) => return Err("either --names or --names-file is required".into()),
            };
            let disabled = match disabled.as_deref() {
                Some(raw) => parse_disabled(raw)?,
                None => DisabledByRound::new(),
            };

            let prepared = prepare(RawRequest {
                pool,
                team_size,
                rounds,
                min_appearances: min,
                max_appearances: max,
                seed,
                disabled,
            })?;
            let outcome = run(&prepared)?;

            match (format, &output) {
                (OutputFormat::Text, None) => print_teams(&outcome),
                (OutputFormat::Text, Some(path)) => write_teams_to_file(&outcome, path)?,
                (OutputFormat::Json, None) => println!("{}", serde_json::to_string_pretty(&outcome)?),
                (OutputFormat::Json, Some(path)) => std::fs::write(path, serde_json::to_string_pretty(&outcome)?)?,
                (OutputFormat::Csv, None) => print!("{}", teams_to_csv_string(&outcome)?),
                (OutputFormat::Csv, Some(path)) => export_teams_to_csv(&outcome, path)?,
            }

            if let Some(path) = &output {
                println!("Teams saved to {}", path.display());
            }
        }
    }

    Ok(())
}
