use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use skillsync::analysis::AnalysisReport;
use skillsync::catalog::Catalog;
use skillsync::config::{Config, SourceMode};
use skillsync::error::AnalyzeError;
use skillsync::matching::MatchConfig;
use skillsync::session::Session;
use skillsync::source::{AnalysisSource, BackendClient, MockSource};
use skillsync::upload::ResumeFile;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a PDF resume and list matching internships
    Analyze {
        /// Path to the resume (must be a .pdf)
        file: PathBuf,

        /// Use the offline mock source instead of the backend
        #[arg(long)]
        mock: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Maximum number of recommendations to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Match a rating (0-10) against the catalog without analyzing a resume
    Match {
        #[arg(allow_negative_numbers = true)]
        score: f64,

        /// Print the matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the internship catalog
    Catalog {
        /// Fetch the catalog from the backend instead of the local one
        #[arg(long)]
        remote: bool,

        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "skillsync")]
#[command(about = "Resume analysis and internship matching CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to config file (defaults to ~/.config/skillsync/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SKILLSYNC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn exit_code_for(error: &AnalyzeError) -> i32 {
    if error.is_input_error() {
        EXIT_INPUT
    } else {
        EXIT_NETWORK
    }
}

fn print_analyze_error(error: &AnalyzeError) {
    tracing::debug!(%error, "analysis failed");
    eprintln!(
        "{}",
        skillsync::output::format_error(error, std::io::IsTerminal::is_terminal(&std::io::stderr()))
    );
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

/// Load and validate config, exiting with EXIT_CONFIG on any problem
fn load_validated_config(path: Option<PathBuf>) -> Config {
    let config = match skillsync::config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = skillsync::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    config
}

/// Configured catalog file, or the built-in postings
fn load_catalog(config: &Config) -> Arc<Catalog> {
    let catalog = match &config.catalog {
        Some(path) => match Catalog::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Catalog error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
        None => Catalog::builtin(),
    };

    if let Err(errors) = skillsync::matching::validate_catalog(&catalog) {
        eprintln!("Catalog errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    tracing::debug!(postings = catalog.len(), "catalog loaded");
    Arc::new(catalog)
}

fn backend_client(config: &Config, catalog: Arc<Catalog>) -> BackendClient {
    // Both values were checked by validate_config; failures here are still config errors
    let built = config
        .timeout_duration()
        .and_then(|timeout| BackendClient::new(&config.backend_url, timeout, catalog));
    match built {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create backend client: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn build_source(
    config: &Config,
    catalog: Arc<Catalog>,
    matching: MatchConfig,
    force_mock: bool,
) -> Box<dyn AnalysisSource> {
    if force_mock || config.source == SourceMode::Mock {
        let delay = match config.mock_delay() {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        Box::new(MockSource::new(catalog, matching).with_delay(delay))
    } else {
        Box::new(backend_client(config, catalog))
    }
}

async fn run_analyze(
    config: &Config,
    file: PathBuf,
    mock: bool,
    json: bool,
    limit: Option<usize>,
) -> i32 {
    let catalog = load_catalog(config);

    let mut matching = config.matching.clone();
    if let Some(limit) = limit {
        matching = MatchConfig::with_limit(limit);
        if let Err(errors) = skillsync::matching::validate_matching(&matching) {
            for error in errors {
                eprintln!("Invalid --limit: {}", error);
            }
            return EXIT_INPUT;
        }
    }

    let resume = match ResumeFile::from_path(&file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{:#}", e);
            return EXIT_INPUT;
        }
    };

    let mut session = Session::new();
    if let Err(e) = session.select_file(resume) {
        print_analyze_error(&e);
        return exit_code_for(&e);
    }

    let source = build_source(config, catalog, matching, mock);
    let start_time = Instant::now();

    let mut report: AnalysisReport = match session.analyze(source.as_ref()).await {
        Ok(report) => report.clone(),
        Err(e) => {
            print_analyze_error(&e);
            return exit_code_for(&e);
        }
    };
    tracing::debug!(
        source = ?report.source(),
        recommendations = report.recommendations.len(),
        elapsed = ?start_time.elapsed(),
        "analysis complete"
    );

    // The backend picks its own recommendations; --limit still caps what is shown
    if let Some(limit) = limit {
        report.recommendations.truncate(limit);
    }

    if json {
        print_json(&report);
    } else {
        let use_colors = skillsync::output::should_use_colors();
        println!("{}", skillsync::output::format_report(&report, use_colors));
    }

    EXIT_SUCCESS
}

fn run_match(config: &Config, score: f64, json: bool) -> i32 {
    if !score.is_finite() || !(0.0..=10.0).contains(&score) {
        eprintln!("Invalid score {}. Must be between 0 and 10.", score);
        return EXIT_INPUT;
    }

    let catalog = load_catalog(config);
    let matches = skillsync::matching::match_postings(score, &catalog, &config.matching);

    if json {
        print_json(&matches);
    } else {
        let use_colors = skillsync::output::should_use_colors();
        println!(
            "Rating: {}\n\n{}",
            skillsync::output::format_rating(score),
            skillsync::output::format_recommendations(&matches, use_colors)
        );
    }

    EXIT_SUCCESS
}

async fn run_catalog(config: &Config, remote: bool, tsv: bool) -> i32 {
    let catalog = load_catalog(config);

    let postings = if remote {
        match backend_client(config, catalog).fetch_internships().await {
            Ok(postings) => postings,
            Err(e) => {
                print_analyze_error(&e);
                return exit_code_for(&e);
            }
        }
    } else {
        catalog.postings().to_vec()
    };

    if tsv {
        let output = skillsync::output::format_tsv(&postings);
        if !output.is_empty() {
            println!("{}", output);
        }
    } else {
        let use_colors = skillsync::output::should_use_colors();
        println!("{}", skillsync::output::format_catalog_table(&postings, use_colors));
    }

    EXIT_SUCCESS
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        eprintln!("Failed to install rustls crypto provider");
        std::process::exit(EXIT_NETWORK);
    }

    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.quiet, cli.verbose) {
        eprintln!("{:#}", e);
    }

    let config_path = cli.config.map(PathBuf::from);

    let code = match cli.command {
        Commands::Init => match skillsync::config::init::run_init_wizard(config_path) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                EXIT_CONFIG
            }
        },
        Commands::Analyze {
            file,
            mock,
            json,
            limit,
        } => {
            let config = load_validated_config(config_path);
            run_analyze(&config, file, mock, json, limit).await
        }
        Commands::Match { score, json } => {
            let config = load_validated_config(config_path);
            run_match(&config, score, json)
        }
        Commands::Catalog { remote, tsv } => {
            let config = load_validated_config(config_path);
            run_catalog(&config, remote, tsv).await
        }
    };

    std::process::exit(code);
}
