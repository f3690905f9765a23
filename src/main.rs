use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pokedoku::config::Config;
use pokedoku::errors::PokedokuResult;
use pokedoku::service::PokedexService;
use pokedoku::tool_interface::{
    analyze_report, classify_report, debug_chain_report, normalize_report, validate_guess_report,
};

#[derive(Parser, Debug)]
#[command(name = "pokedoku")]
#[command(about = "Pokemon sudoku name, form, region and evolution tooling", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to $POKEDOKU_CONFIG, then ./pokedoku.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the normalized key and derived names for a display name
    Normalize {
        name: String,
    },
    /// Classify a name: forms, categories, region
    Classify {
        name: String,

        /// Generation slug of the species, e.g. generation-iv
        #[arg(short, long)]
        generation: Option<String>,
    },
    /// Analyze a Pokemon's position within an evolution chain
    Analyze {
        /// JSON file holding the evolution chain payload
        chain: PathBuf,

        /// Pokemon to locate in the chain
        target: String,
    },
    /// Print the flattened view and validation of an evolution chain
    DebugChain {
        /// JSON file holding the evolution chain payload
        chain: PathBuf,
    },
    /// Check a guess against a row and a column criterion
    Validate {
        /// JSON file holding the species record
        record: PathBuf,

        /// Row criterion as JSON, e.g. '{"kind": "type", "value": "Fire"}'
        #[arg(long)]
        row: String,

        /// Column criterion as JSON
        #[arg(long)]
        col: String,

        /// JSON file holding the species' evolution chain
        #[arg(long)]
        chain: Option<PathBuf>,
    },
}

fn read_payload(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))
}

fn run(cli: Cli) -> Result<String, String> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path).map_err(|e| e.to_string())?,
        None => Config::load(),
    };
    let service = PokedexService::from_config(&config).map_err(|e| e.to_string())?;

    let report: PokedokuResult<String> = match cli.command {
        Commands::Normalize { name } => Ok(normalize_report(&service, &name)),
        Commands::Classify { name, generation } => {
            classify_report(&service, &name, generation.as_deref())
        }
        Commands::Analyze { chain, target } => {
            analyze_report(&service, &read_payload(&chain)?, &target)
        }
        Commands::DebugChain { chain } => debug_chain_report(&read_payload(&chain)?),
        Commands::Validate {
            record,
            row,
            col,
            chain,
        } => {
            let chain = chain.as_deref().map(read_payload).transpose()?;
            validate_guess_report(
                &service,
                &read_payload(&record)?,
                &row,
                &col,
                chain.as_deref(),
            )
        }
    };
    report.map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
