use clap::{Parser, Subcommand};
use notpx_api::{ApiConfig, ApiError, ApiRequest, Outcome, PaintCommand, ReqwestHttp};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{command} did not succeed")]
    Unsuccessful { command: &'static str },
    #[error("session credential rejected")]
    InvalidSession,
}

#[derive(Parser, Debug)]
#[command(name = "notpx", about = "NotPixel game API client")]
struct Cli {
    /// Overrides `NOTPX_API_URL`.
    #[arg(long)]
    api_url: Option<String>,

    /// Telegram init data sent as `Authorization: initData ...`.
    #[arg(long, env = "NOTPX_INIT_DATA")]
    init_data: Option<String>,

    #[arg(long, env = "NOTPX_SESSION", default_value = "cli")]
    session: String,

    #[arg(long, env = "NOTPX_BOT", default_value = "NotPixel")]
    bot: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Current user profile.
    Me,
    /// Check the session credential.
    Validate,
    /// Mining status.
    Mining,
    /// Claim the mining reward.
    Claim,
    /// Check and claim a task.
    Task { name: String },
    /// Paint a single pixel.
    Repaint {
        #[arg(long)]
        pixel_id: u64,
        #[arg(long)]
        color: String,
    },
    /// Record a pageview.
    Pageview {
        #[arg(default_value = "/")]
        page: String,
    },
    /// Read one pixel snapshot from the WebSocket.
    Pixels,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ApiConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }

    let http = ReqwestHttp::new(config.timeouts, cli.init_data.as_deref())?;
    let api = ApiRequest::new(cli.session, cli.bot).with_config(config);

    match cli.command {
        Command::Me => report("me", api.get_user_info(&http).await),
        Command::Validate => {
            if !api.validate_query_id(&http).await {
                return Err(CliError::InvalidSession);
            }
            println!("ok");
            Ok(())
        }
        Command::Mining => report("mining", api.get_mine_info(&http).await),
        Command::Claim => report("claim", api.claim_mine(&http).await),
        Command::Task { name } => report("task", api.claim_task(&http, &name).await),
        Command::Repaint { pixel_id, color } => {
            let paint = PaintCommand::new(pixel_id, color);
            report("repaint", api.repaint(&http, &paint).await)
        }
        Command::Pageview { page } => report("pageview", api.go_to_page(&http, &page).await),
        Command::Pixels => {
            let snapshot = api.get_pixels_info().await?;
            print_json(&snapshot)
        }
    }
}

fn report(command: &'static str, outcome: Outcome<Option<Value>>) -> Result<(), CliError> {
    print_json(&outcome)?;
    if outcome.is_success() {
        Ok(())
    } else {
        Err(CliError::Unsuccessful { command })
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
