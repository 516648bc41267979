//! CodeCraft CLI
//!
//! A command-line front end for running playground code on a remote
//! execution service.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codecraft::{
    Config, EXAMPLE_CONFIG, FileStore, HttpExecutor, RunController, RunOutcome, RunResult,
    Session,
};
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "codecraft")]
#[command(about = "An interactive code playground backed by a remote execution service")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new configuration file
    Init {
        /// Output path (default: codecraft.toml)
        #[arg(short, long, default_value = "codecraft.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Run code on the execution service
    ///
    /// Without FILE, the last saved source text (or the starter snippet) is run.
    Run {
        /// Source file to load into the editor before running
        #[arg(value_name = "FILE")]
        source: Option<PathBuf>,

        /// Language ID (e.g., cpp, java, javascript)
        #[arg(short, long)]
        language: Option<String>,

        /// File whose contents are fed to the program's stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the starter snippet for a language
    Snippet {
        /// Language ID
        language: String,
    },

    /// List available languages
    Languages,

    /// Show the effective configuration
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = if let Some(ref path) = cli.config {
        info!(?path, "loading configuration");
        Config::from_file(path).context("failed to load configuration")?
    } else {
        debug!("using default configuration");
        Config::default()
    };

    match cli.command {
        Commands::Init { output, force } => init_config(&output, force).await,
        Commands::Run {
            source,
            language,
            input,
        } => {
            run_code(
                config,
                source.as_deref(),
                language.as_deref(),
                input.as_deref(),
            )
            .await
        }
        Commands::Snippet { language } => {
            let language = config
                .get_language(&language)
                .context("unknown language")?;
            println!("{}", language.snippet);
            Ok(())
        }
        Commands::Languages => {
            list_languages(&config);
            Ok(())
        }
        Commands::ShowConfig => {
            show_config(&config);
            Ok(())
        }
    }
}

async fn run_code(
    config: Config,
    source: Option<&Path>,
    language: Option<&str>,
    input: Option<&Path>,
) -> Result<()> {
    let config = Arc::new(config);
    let store = Arc::new(FileStore::new(&config.snapshot_path));
    let mut session = Session::initialize(Arc::clone(&config), store);

    if let Some(language) = language {
        session
            .set_language(language)
            .context("unknown language")?;
    }

    if let Some(path) = source {
        let text = tokio::fs::read_to_string(path)
            .await
            .context("failed to read source file")?;
        session.set_source_text(text);
    } else {
        debug!(path = ?config.snapshot_path, "running saved source text");
    }

    if let Some(path) = input {
        let text = tokio::fs::read_to_string(path)
            .await
            .context("failed to read input file")?;
        session.set_program_input(text);
    }

    let executor = HttpExecutor::from_config(&config).context("failed to create HTTP client")?;
    let controller = RunController::new(executor);

    info!(
        language = session.language(),
        endpoint = %config.endpoint,
        "running program"
    );

    let session = session.into_shared();
    let result = match controller.run(&session).await {
        RunOutcome::Completed(result) => result,
        RunOutcome::AlreadyRunning => anyhow::bail!("a run is already in progress"),
    };

    println!("{}", result.render());

    let code = exit_code(&result);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Process exit status for a completed run
fn exit_code(result: &RunResult) -> i32 {
    if result.is_error() { 1 } else { 0 }
}

fn list_languages(config: &Config) {
    println!("Available languages:\n");

    for id in config.language_ids() {
        let name = &config.languages[id].name;
        let marker = if id == config.default_language {
            " (default)"
        } else {
            ""
        };
        println!("  {:<15} {}{}", id, name, marker);
    }
}

fn show_config(config: &Config) {
    println!("Endpoint: {}", config.endpoint);
    println!("Default language: {}", config.default_language);
    println!("Snapshot path: {}", config.snapshot_path.display());
    match config.request_timeout {
        Some(seconds) => println!("Request timeout: {seconds}s"),
        None => println!("Request timeout: none"),
    }
    println!(
        "Font size: {} (range {}-{})",
        config.font_size.default, config.font_size.min, config.font_size.max
    );
    println!();
    println!("Languages configured: {}", config.languages.len());
}

async fn init_config(output: &PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at '{}'. Use --force to overwrite.",
            output.display()
        );
    }

    tokio::fs::write(output, EXAMPLE_CONFIG)
        .await
        .context("failed to write configuration file")?;

    println!("Created configuration file at '{}'", output.display());
    Ok(())
}
