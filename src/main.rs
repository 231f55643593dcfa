// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use reg_assistant::session::resolve_api_key;
use reg_assistant::utils::logging::{status_fail, status_ok, status_warn};
use reg_assistant::utils::validation;
use reg_assistant::{
    AssistantSession, Config, EmbeddingClient, LanceDbClient, ProbeResult, Role, SchemaManager,
    StatusReport, Transcript,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "reg_assistant")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Question answering over FMCSA regulations using LanceDB", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session against the regulation index
    Chat,

    /// Ask a single question and print the answer with its citations
    Ask {
        /// Free-text question
        question: String,

        #[arg(long)]
        json: bool,
    },

    /// Verify the storage path, index connection, and collection schema
    Verify,

    Stats,

    /// Report component health (vector index, embedding service)
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    reg_assistant::utils::logging::init_logging(cli.verbose, cli.color);

    info!("FMCSA Regulation Assistant");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Chat => {
            cmd_chat(&config).await?;
        }
        Commands::Ask { question, json } => {
            cmd_ask(&config, &question, json).await?;
        }
        Commands::Verify => {
            cmd_verify(&config).await?;
        }
        Commands::Stats => {
            cmd_stats(&config).await?;
        }
        Commands::Health => {
            cmd_health(&config).await?;
        }
    }

    Ok(())
}

async fn cmd_chat(config: &Config) -> Result<()> {
    let session = AssistantSession::new(config.clone())
        .await
        .context("Failed to initialize assistant session")?;

    println!("\n{}", "FMCSA Regulation Assistant".cyan().bold());
    println!("Ask questions about Federal Motor Carrier Safety Administration regulations.");
    println!("Type 'exit' or 'quit' to end the session.\n");

    let mut transcript = Transcript::new();
    info!("Chat session {} started", transcript.session_id());

    let stdin = io::stdin();

    loop {
        print!("{} ", "You:".cyan().bold());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        transcript.push(Role::User, question);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("Failed to create spinner template"),
        );
        spinner.set_message("Consulting the regulations...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        let response = session.ask(question).await;

        spinner.finish_and_clear();

        let entry = response.render();
        println!("\n{}\n{}", "Assistant:".green().bold(), entry);

        transcript.push(Role::Assistant, entry);
    }

    info!(
        "Chat session {} ended after {} turns",
        transcript.session_id(),
        transcript.len()
    );

    Ok(())
}

async fn cmd_ask(config: &Config, question: &str, json: bool) -> Result<()> {
    let session = AssistantSession::new(config.clone())
        .await
        .context("Failed to initialize assistant session")?;

    let response = session.ask(question).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("\n{}", response.render());
    }

    Ok(())
}

async fn cmd_verify(config: &Config) -> Result<()> {
    info!("Verifying vector index");

    validation::ensure_index_dir(Path::new(&config.database.uri))
        .context("Storage path check failed")?;

    let client = LanceDbClient::new(config.database.clone())
        .await
        .context("Failed to create LanceDB client")?;

    if !client.ping().await? {
        println!("{}", status_fail("Cannot connect to LanceDB"));
        return Err(anyhow::anyhow!("Database connection failed"));
    }

    println!("{}", status_ok("Database connection successful"));

    let schema_manager = SchemaManager::new(&client);
    let missing = schema_manager
        .verify()
        .await
        .context("Collection verification failed")?;

    if missing.is_empty() {
        println!(
            "{}",
            status_ok(&format!(
                "Collection '{}' contains all required columns",
                client.collection_name()
            ))
        );
    } else {
        println!(
            "{}",
            status_fail(&format!(
                "Collection '{}' is missing columns: {}",
                client.collection_name(),
                missing.join(", ")
            ))
        );
        return Err(anyhow::anyhow!("Collection schema incomplete"));
    }

    match resolve_api_key(&config.model) {
        Ok(_) => println!("{}", status_ok("API key resolved")),
        Err(e) => println!("{}", status_warn(&e.to_string())),
    }

    Ok(())
}

async fn cmd_stats(config: &Config) -> Result<()> {
    info!("Gathering statistics");

    let client = LanceDbClient::new(config.database.clone())
        .await
        .context("Failed to create LanceDB client")?;

    if !client.ping().await? {
        return Err(anyhow::anyhow!("Database connection failed"));
    }

    let passage_count = client.get_passage_count().await?;

    println!("\nCollection: {}", client.collection_name());
    println!("Storage: {}", config.database.uri);
    println!("Passages: {}", passage_count);
    println!("Retrieval top_k: {}", config.retrieval.top_k);
    println!("Embedding model: {}", config.model.embedding_model);
    println!("Generation model: {}", config.model.generation_model);

    Ok(())
}

async fn cmd_health(config: &Config) -> Result<()> {
    info!("Probing components");

    let start = Instant::now();
    let index_probe = match index_health(config).await {
        Ok(true) => ProbeResult::ok("vector index", start.elapsed()),
        Ok(false) => ProbeResult::down(
            "vector index",
            format!("collection '{}' not found", config.database.collection),
            start.elapsed(),
        ),
        Err(e) => ProbeResult::down("vector index", e.to_string(), start.elapsed()),
    };

    let start = Instant::now();
    let embedding_probe = match resolve_api_key(&config.model) {
        Err(e) => ProbeResult::impaired("embedding service", e.to_string(), start.elapsed()),
        Ok(api_key) => {
            let embedder = EmbeddingClient::new(
                config.model.api_base.clone(),
                api_key,
                config.model.embedding_model.clone(),
            );

            match embedder.embed("health check").await {
                Ok(_) => ProbeResult::ok("embedding service", start.elapsed()),
                Err(e) => ProbeResult::down("embedding service", e.to_string(), start.elapsed()),
            }
        }
    };

    let report = StatusReport::from_probes(vec![index_probe, embedding_probe]);

    println!("\n{}", report.render());

    Ok(())
}

async fn index_health(config: &Config) -> reg_assistant::Result<bool> {
    let client = LanceDbClient::new(config.database.clone()).await?;
    client.ping().await?;
    client.collection_exists().await
}
