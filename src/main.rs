//! relay-bot binary entry point.

use std::process::ExitCode;
use std::sync::Arc;

use relay_bot::api::{self, AppState};
use relay_bot::cli::{self, Args};
use relay_bot::config::Config;
use relay_bot::services::{self, ServiceHub};
use relay_bot::transport::{telegram, TelegramTransport, Transport};
use relay_bot::{logging, CommandDispatcher, ContentStore, ContinuationRegistry, MenuPresenter};
use teloxide::Bot;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'relay-bot --help' for more information.");
            return ExitCode::FAILURE;
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> relay_bot::Result<()> {
    // Process environment wins over the file.
    let dotenv = dotenvy::dotenv().ok();
    let config = Config::load(&args)?;

    logging::init(config.log_filter());
    logging::install_panic_hook();

    info!("relay-bot v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    let token = config.token()?;
    let base_url = config.public_base_url()?;
    let operator = config.operator();

    info!(token = %logging::mask(token), "bot token loaded");
    info!(base_url = %base_url, "deep links resolve against public base URL");
    match operator {
        Some(chat) => info!(operator = %chat, "developer contact enabled"),
        None => warn!("DEVELOPER_CHAT_ID not set, developer contact messages will be dropped"),
    }

    let bot = Bot::new(token);
    let transport: Arc<dyn Transport> = Arc::new(TelegramTransport::new(bot.clone()));

    let client = services::http_client(config.services.timeout())?;
    let hub = ServiceHub::from_config(&config.services, client, transport.clone(), operator);
    let menu = MenuPresenter::new(base_url, config.menu.entries.clone());

    let dispatcher = Arc::new(CommandDispatcher::new(
        transport,
        Arc::new(ContinuationRegistry::new()),
        hub,
        menu,
        config.telegram.developer_username.clone(),
    ));

    let content = ContentStore::open(&config.content.uploads_dir).await?;
    info!(
        root = %content.root().display(),
        documents = content.names().count(),
        "content store ready"
    );

    let server_config = config.to_server_config()?;
    let state = AppState::new(content);

    tokio::select! {
        result = api::serve(server_config, state) => {
            result?;
            info!("content server stopped");
        }
        () = telegram::run(bot, dispatcher) => {}
    }

    info!("relay-bot shut down");
    Ok(())
}
