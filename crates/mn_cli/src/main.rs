use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use mn_core::{CompletionModel, PageStore};
use mn_inference::models::openai::{probe, PROBE_CANDIDATES};
use mn_inference::{
    create_model, Config, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};
use mn_storage::backends::notion::{failure_hint, DEFAULT_TITLE_PROPERTY};
use mn_storage::publisher::smoke_test_record;
use mn_storage::{create_store, NotionConfig, RecordPublisher};
use mn_web::{create_app, AppState, CorsConfig};
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};
use url::Url;

mod logging;

const DEFAULT_NOTION_BASE_URL: &str = mn_storage::backends::notion::DEFAULT_BASE_URL;

#[derive(Parser)]
#[command(author, version, about = "Turns raw meeting notes into structured Notion pages", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    openai: OpenAiArgs,
    #[command(flatten)]
    notion: NotionArgs,
    #[arg(
        long,
        env = "MN_MODEL",
        default_value = "openai",
        help = "Completion model to use. Available models: openai (default), static"
    )]
    model: String,
    #[arg(
        long,
        env = "MN_STORE",
        default_value = "notion",
        help = "Page store to publish to. Available stores: notion (default), memory"
    )]
    store: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OpenAiArgs {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_MODEL)]
    openai_model: String,
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    openai_base_url: Url,
    #[arg(long, env = "OPENAI_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,
    #[arg(long, env = "OPENAI_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,
}

impl OpenAiArgs {
    fn config(&self) -> Config {
        Config {
            api_key: self.openai_api_key.clone(),
            model_name: self.openai_model.clone(),
            base_url: self.openai_base_url.to_string(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[derive(Args)]
struct NotionArgs {
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    notion_api_key: Option<String>,
    #[arg(long, env = "NOTION_DATABASE_ID")]
    notion_database_id: Option<String>,
    #[arg(long, env = "NOTION_BASE_URL", default_value = DEFAULT_NOTION_BASE_URL)]
    notion_base_url: Url,
    /// Name of the database's title property.
    #[arg(long, env = "NOTION_TITLE_PROPERTY", default_value = DEFAULT_TITLE_PROPERTY)]
    notion_title_property: String,
}

impl NotionArgs {
    fn config(&self) -> NotionConfig {
        NotionConfig {
            api_key: self.notion_api_key.clone(),
            database_id: self.notion_database_id.clone(),
            base_url: self.notion_base_url.to_string(),
            title_property: self.notion_title_property.clone(),
            ..NotionConfig::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the note-processing API
    Serve {
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,
        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
        /// Origin allowed to call the API with credentials. Any origin is allowed when none is given.
        #[arg(long = "allow-origin", env = "MN_ALLOW_ORIGINS", value_delimiter = ',')]
        allow_origins: Vec<String>,
    },
    /// Interpret one note and publish it
    Process {
        /// Note file to read, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },
    /// Check which chat models the configured key can use
    CheckModels {
        /// Models to try. Defaults to a built-in candidate list.
        models: Vec<String>,
    },
    /// Create a test page to verify Notion connectivity
    TestNotion,
}

impl Cli {
    fn model(&self) -> mn_core::Result<Arc<dyn CompletionModel>> {
        create_model(&self.model, self.openai.config())
    }

    fn store(&self) -> mn_core::Result<Arc<dyn PageStore>> {
        create_store(&self.store, self.notion.config())
    }

    fn state(&self) -> mn_core::Result<AppState> {
        Ok(AppState::new(self.model()?, self.store()?))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Serve {
            host,
            port,
            allow_origins,
        } => {
            let cors = CorsConfig {
                allowed_origins: allow_origins
                    .iter()
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect(),
            };
            serve(cli.state()?, &cors, host, *port).await
        }
        Commands::Process { input } => process(&cli, input).await,
        Commands::CheckModels { models } => check_models(&cli.openai.config(), models).await,
        Commands::TestNotion => test_notion(cli.notion.config()).await,
    }
}

async fn serve(state: AppState, cors: &CorsConfig, host: &str, port: u16) -> anyhow::Result<()> {
    if let Err(e) = state.ensure_configured() {
        warn!("{}; requests will fail until it is configured", e);
    }

    let app = create_app(state, cors)?;
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        return;
    }
    info!("Shutting down");
}

async fn process(cli: &Cli, input: &Path) -> anyhow::Result<()> {
    let text = read_note(input).await?;
    if text.trim().is_empty() {
        bail!("Note is empty: {}", input.display());
    }

    let state = cli.state()?;
    state.ensure_configured()?;

    let record = state.interpreter.interpret(&text).await?;
    let published = state.publisher.publish(&record).await?;

    let output = serde_json::json!({
        "data": record,
        "url": published.url,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn read_note(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read note from stdin")?;
        return Ok(text);
    }
    tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))
}

async fn check_models(config: &Config, models: &[String]) -> anyhow::Result<()> {
    if config.api_key.as_deref().map_or(true, |key| key.trim().is_empty()) {
        bail!("OPENAI_API_KEY is missing");
    }

    let candidates: Vec<String> = if models.is_empty() {
        PROBE_CANDIDATES.iter().map(|m| m.to_string()).collect()
    } else {
        models.to_vec()
    };

    println!("🔍 Checking available models...");
    let outcomes = probe(config, &candidates).await;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(reply) => println!("✅ {}: OK ({})", outcome.model, reply.trim()),
            Err(e) => println!("❌ {}: Failed: {}", outcome.model, e),
        }
    }

    if outcomes.iter().all(|outcome| outcome.result.is_err()) {
        bail!("None of the {} candidate models answered", outcomes.len());
    }
    Ok(())
}

async fn test_notion(config: NotionConfig) -> anyhow::Result<()> {
    println!(
        "🧪 Creating a test page in database {}",
        config.database_id.as_deref().unwrap_or("<unset>")
    );

    // Always Notion here; MN_STORE only picks the backend for note publishing.
    let publisher = RecordPublisher::new(create_store("notion", config)?);
    match publisher.publish(&smoke_test_record()).await {
        Ok(page) => {
            println!("✅ Notion connectivity works: {}", page.url);
            Ok(())
        }
        Err(e) => {
            println!("❌ Failed: {}", e);
            if let Some(hint) = failure_hint(&e) {
                println!("💡 {}", hint);
            }
            Err(e.into())
        }
    }
}
