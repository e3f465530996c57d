// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! bible-mcp entry point: the MCP server and a few lookup commands.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use bible_mcp::bible::BibleService;
use bible_mcp::config::{self, BibleConfig, CliOptions};
use bible_mcp::error::BibleResult;
use bible_mcp::mcp::{serve_stdio, McpServer, SERVER_NAME};
use bible_mcp::telemetry::{init_telemetry, TelemetryConfig};
use bible_mcp::VERSION;

/// Bible text over the Model Context Protocol.
#[derive(Parser)]
#[command(name = "bible-mcp")]
#[command(author, version, about = "Bible text over the Model Context Protocol", long_about = None)]
struct Cli {
    /// Base URL of the free-text endpoint
    #[arg(long, env = "BIBLE_API_URL", global = true)]
    base_url: Option<String>,

    /// Base URL of the structured data endpoint (default: {base-url}/data)
    #[arg(long, env = "BIBLE_DATA_URL", global = true)]
    data_url: Option<String>,

    /// Translation used when a request names none
    #[arg(long, env = "BIBLE_TRANSLATION", global = true)]
    default_translation: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "BIBLE_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Log at info level
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Log at debug level with span timings
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server on stdin/stdout (default)
    Serve,

    /// Look up a free-text reference, e.g. "John 3:16"
    Verse {
        reference: String,
        #[arg(short, long)]
        translation: Option<String>,
    },

    /// Look up a chapter, or one verse of it, by book id
    Chapter {
        /// USFM book id, e.g. JHN
        book: String,
        chapter: String,
        verse: Option<String>,
        #[arg(short, long)]
        translation: Option<String>,
    },

    /// Fetch a random well-known verse
    Random {
        #[arg(short, long)]
        translation: Option<String>,
        /// OT or NT
        #[arg(long)]
        testament: Option<String>,
    },

    /// List supported translations
    Translations,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the resolved configuration
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let _telemetry = init_telemetry(&TelemetryConfig::from_flags(cli.verbose, cli.debug))?;

    run(cli).await
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let cli_options = CliOptions {
        base_url: cli.base_url,
        data_url: cli.data_url,
        translation: cli.default_translation,
        timeout_secs: cli.timeout_secs,
        user_agent: None,
    };

    let cwd = std::env::current_dir()?;
    let workspace_root = config::find_workspace_root(&cwd).unwrap_or(cwd);
    let config = config::load_config(&workspace_root, cli_options)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            serve(&config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verse {
            reference,
            translation,
        } => {
            let service = BibleService::from_config(&config)?;
            print_result(service.passage(&reference, translation.as_deref()).await)
        }
        Commands::Chapter {
            book,
            chapter,
            verse,
            translation,
        } => {
            let service = BibleService::from_config(&config)?;
            let translation = translation.unwrap_or_else(|| config.default_translation.clone());
            print_result(
                service
                    .lookup(&translation, &book, &chapter, verse.as_deref())
                    .await,
            )
        }
        Commands::Random {
            translation,
            testament,
        } => {
            let service = BibleService::from_config(&config)?;
            print_result(
                service
                    .random(translation.as_deref(), testament.as_deref())
                    .await,
            )
        }
        Commands::Translations => {
            let service = BibleService::from_config(&config)?;
            print!("{}", service.translations());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                show_config(&config, &workspace_root)?;
                Ok(ExitCode::SUCCESS)
            }
        },
    }
}

async fn serve(config: &BibleConfig) -> anyhow::Result<()> {
    let service = BibleService::from_config(config)?;
    let server = McpServer::from_service(service);

    info!(
        server = SERVER_NAME,
        version = VERSION,
        base_url = %config.base_url,
        translation = %config.default_translation,
        "Starting MCP server on stdio"
    );
    serve_stdio(server).await?;
    Ok(())
}

fn print_result(result: BibleResult<String>) -> anyhow::Result<ExitCode> {
    Ok(if report(result) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print a lookup result to stdout, or its error to stderr. Returns whether it succeeded.
fn report(result: BibleResult<String>) -> bool {
    match result {
        Ok(text) => {
            println!("{text}");
            true
        }
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            false
        }
    }
}

fn show_config(config: &BibleConfig, workspace_root: &std::path::Path) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);

    if let Some(path) = config::get_global_config_path() {
        let state = if path.exists() { "found" } else { "absent" };
        eprintln!("{}", format!("global:    {} ({state})", path.display()).dimmed());
    }
    eprintln!(
        "{}",
        format!("workspace: {}", workspace_root.display()).dimmed()
    );
    eprintln!(
        "{}",
        format!("data url:  {}", config.resolved_data_url()).dimmed()
    );
    Ok(())
}
