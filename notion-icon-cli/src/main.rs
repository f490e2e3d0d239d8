//! notion-icon: set page icons from the command line.
//!
//! Usage:
//!   notion-icon set-icon --page <id|url> --url 🚀
//!   notion-icon set-icon --page <id> --page <id> --file logo.png --continue-on-fail
//!   notion-icon verify
//!   notion-icon describe
//!
//! Credentials come from flags, `NOTION_*` environment variables or the
//! `[credentials]` table of the config file, in that order.

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use notion_icon_cli::{mime_type_for, CliConfig, CredentialSettings};
use notion_icon_core::{NotionApi, ReqwestTransport};
use notion_icon_node::{
    credential_description, node_description, MemoryHost, MemoryItem, NotionSetIconNode,
    CREDENTIAL_NAME, PARAM_BINARY_PROPERTY, PARAM_ICON_SOURCE, PARAM_ICON_URL, PARAM_PAGE_ID,
};
use notion_icon_types::{BinaryPayload, Credentials, IconSource};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const BINARY_PROPERTY: &str = "data";

#[derive(Parser, Debug)]
#[command(name = "notion-icon")]
#[command(about = "Set custom icons on Notion pages")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Value of the token_v2 session cookie
    #[arg(long, env = "NOTION_TOKEN_V2", hide_env_values = true, global = true)]
    token_v2: Option<String>,

    /// Workspace (space) ID
    #[arg(long, env = "NOTION_SPACE_ID", global = true)]
    space_id: Option<String>,

    /// User ID the edits are attributed to
    #[arg(long, env = "NOTION_USER_ID", global = true)]
    user_id: Option<String>,

    /// Netscape cookies file to read token_v2 from
    #[arg(long, global = true)]
    cookies: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Set the icon of one or more pages
    SetIcon(SetIconArgs),
    /// Check that the service accepts the credentials
    Verify,
    /// Print the node and credential descriptions as JSON
    Describe,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("icon").required(true).args(["url", "file"])))]
struct SetIconArgs {
    /// Page ID or page URL (repeatable)
    #[arg(long = "page", required = true)]
    pages: Vec<String>,

    /// Icon URL or emoji
    #[arg(long)]
    url: Option<String>,

    /// Image file to upload
    #[arg(long)]
    file: Option<PathBuf>,

    /// Mime type of the uploaded file (guessed from the extension if omitted)
    #[arg(long, requires = "file")]
    mime: Option<String>,

    /// Report failed pages in the output instead of stopping at the first one
    #[arg(long)]
    continue_on_fail: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    match &cli.command {
        Command::Describe => {
            let descriptions = serde_json::json!({
                "node": node_description(),
                "credential": credential_description(),
            });
            println!("{}", serde_json::to_string_pretty(&descriptions)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify => {
            let credentials = resolve_credentials(&cli, &config)?;
            let api = NotionApi::new(config.api.clone(), transport(&config)?);
            api.verify_credentials(&credentials)
                .await
                .context("credentials were rejected")?;
            info!("credentials accepted");
            Ok(ExitCode::SUCCESS)
        }
        Command::SetIcon(args) => set_icon(&cli, config, args).await,
    }
}

async fn set_icon(cli: &Cli, config: CliConfig, args: &SetIconArgs) -> Result<ExitCode> {
    let credentials = resolve_credentials(cli, &config)?;
    let mut host = MemoryHost::new(transport(&config)?)
        .with_credentials(CREDENTIAL_NAME, credentials)
        .continue_on_fail(args.continue_on_fail);

    let upload = match &args.file {
        Some(path) => {
            let data = tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned());
            let mime_type = mime_type_for(path, args.mime.as_deref());
            Some(BinaryPayload::new(data, file_name, Some(mime_type)))
        }
        None => None,
    };

    for page in &args.pages {
        let item = MemoryItem::new().parameter(PARAM_PAGE_ID, page.as_str());
        let item = match (&upload, &args.url) {
            (Some(payload), _) => item
                .parameter(PARAM_ICON_SOURCE, IconSource::Upload.as_str())
                .parameter(PARAM_BINARY_PROPERTY, BINARY_PROPERTY)
                .binary(BINARY_PROPERTY, payload.clone()),
            (None, url) => item
                .parameter(PARAM_ICON_SOURCE, IconSource::Url.as_str())
                .parameter(PARAM_ICON_URL, url.clone().unwrap_or_default()),
        };
        host = host.with_item(item);
    }

    let node = NotionSetIconNode::new(config.api);
    let outputs = node.execute(&host).await.context("set-icon failed")?;
    println!("{}", serde_json::to_string_pretty(&outputs)?);

    let failed = outputs.iter().filter(|o| !o.json.success).count();
    if failed > 0 {
        warn!(failed, total = outputs.len(), "some pages were not updated");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn resolve_credentials(cli: &Cli, config: &CliConfig) -> Result<Credentials> {
    let flags = CredentialSettings {
        token_v2: cli.token_v2.clone(),
        space_id: cli.space_id.clone(),
        user_id: cli.user_id.clone(),
        cookies_file: cli.cookies.clone(),
    };
    let credentials = config.credentials.clone().overlay(flags).resolve()?;
    Ok(credentials)
}

fn transport(config: &CliConfig) -> Result<ReqwestTransport> {
    ReqwestTransport::new(Duration::from_secs(config.api.timeout_secs))
        .context("failed to build HTTP client")
}
