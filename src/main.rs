use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

use admin_ui_utils::api::{AdminApi, ApiClient, HttpMethod, TransformRequest};
use admin_ui_utils::clipboard::{ClipboardBackend, copy_to_clipboard, detect_clipboard_backend};
use admin_ui_utils::config::Settings;
use admin_ui_utils::page::print_banner;
use admin_ui_utils::ui::run_console;
use admin_ui_utils::utils::{format_bytes, format_date, format_date_in};

// ============================================================================
// CLI
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "admin-ui-utils", version, about = "Feed optimizer admin console helpers")]
struct Cli {
    /// Admin server base URL (overrides config and ADMIN_UI_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Skip the startup banner
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format a byte count
    Bytes {
        #[arg(allow_negative_numbers = true)]
        bytes: f64,
        #[arg(short, long, allow_negative_numbers = true)]
        decimals: Option<i32>,
    },
    /// Format an ISO-8601 timestamp
    Date {
        iso: String,
        /// Render in UTC instead of local time
        #[arg(long)]
        utc: bool,
    },
    /// Copy text to the system clipboard
    Copy { text: String },
    /// Call a JSON endpoint and print the response
    Api {
        endpoint: String,
        #[arg(short = 'X', long, default_value = "GET")]
        method: HttpMethod,
        /// JSON payload
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Edit the JSON document behind an endpoint
    Console { endpoint: String },
    /// Admin server routes
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Subcommand)]
enum AdminCommand {
    Rules,
    SaveRules { json: String },
    Settings,
    SaveSettings { json: String },
    Preview { json: String },
    Transform {
        input_file: String,
        #[arg(long, default_value = "openai")]
        format: String,
        #[arg(long)]
        no_compress: bool,
    },
    Validate { file: String },
    Sample { file: String },
}

// ============================================================================
// MAIN
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !cli.quiet {
        print_banner();
    }

    let mut settings = Settings::load().context("failed to load settings")?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }

    match cli.command {
        Command::Bytes { bytes, decimals } => {
            let decimals = decimals.unwrap_or(settings.byte_decimals);
            println!("{}", format_bytes(bytes, decimals)?);
        }
        Command::Date { iso, utc } => {
            let rendered = if utc {
                format_date_in(&iso, &Utc)?
            } else {
                format_date(&iso)?
            };
            println!("{rendered}");
        }
        Command::Copy { text } => {
            let backend = detect_clipboard_backend().persistent();
            tracing::debug!(?backend, "clipboard backend");
            if backend == ClipboardBackend::ArboardWait {
                tracing::info!("holding the clipboard until something else is copied");
            }
            if !copy_to_clipboard(&backend, text).await {
                bail!("could not copy to clipboard");
            }
            println!("✓ Copied to clipboard");
        }
        Command::Api {
            endpoint,
            method,
            data,
        } => {
            let client = ApiClient::new(&settings.base_url)?;
            let payload = data.as_deref().map(parse_json).transpose()?;
            let response = client.call(&endpoint, method, payload.as_ref()).await?;
            print_json(&response)?;
        }
        Command::Console { endpoint } => {
            let client = ApiClient::new(&settings.base_url)?;
            let runtime = Handle::current();
            let backend = detect_clipboard_backend();
            tokio::task::spawn_blocking(move || {
                run_console(runtime, client, backend, &settings, &endpoint)
            })
            .await??;
        }
        Command::Admin(action) => {
            let admin = AdminApi::new(ApiClient::new(&settings.base_url)?);
            let response = run_admin(&admin, action).await?;
            print_json(&response)?;
        }
    }

    Ok(())
}

async fn run_admin(admin: &AdminApi, action: AdminCommand) -> Result<Value> {
    let response = match action {
        AdminCommand::Rules => admin.rules().await?,
        AdminCommand::SaveRules { json } => admin.save_rules(&parse_json(&json)?).await?,
        AdminCommand::Settings => admin.settings().await?,
        AdminCommand::SaveSettings { json } => admin.save_settings(&parse_json(&json)?).await?,
        AdminCommand::Preview { json } => admin.preview(&parse_json(&json)?).await?,
        AdminCommand::Transform {
            input_file,
            format,
            no_compress,
        } => {
            let request = TransformRequest {
                format,
                compress: !no_compress,
                ..TransformRequest::new(input_file)
            };
            admin.transform(&request).await?
        }
        AdminCommand::Validate { file } => admin.validate(&file).await?,
        AdminCommand::Sample { file } => admin.sample(&file).await?,
    };
    Ok(response)
}

fn parse_json(raw: &str) -> Result<Value> {
    serde_json::from_str(raw).context("payload is not valid JSON")
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
