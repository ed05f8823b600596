use std::sync::Arc;

use teloxide::dispatching::{Dispatcher, UpdateFilterExt as _};
use teloxide::dptree;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::Update;
use tracing_subscriber::EnvFilter;

use genshin_bot::config::Config;
use genshin_bot::gateway::hoyolab::HoyolabGateway;
use genshin_bot::ui::card;
use genshin_bot::{database, handler, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Both required settings must be present before anything connects.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    };

    let db = match database::init::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(error = %err, "could not open the credential store");
            std::process::exit(1);
        }
    };

    let gateway = match HoyolabGateway::new() {
        Ok(gateway) => gateway,
        Err(err) => {
            tracing::error!(error = %err, "could not build the remote gateway client");
            std::process::exit(1);
        }
    };

    let renderer = card::select_renderer(config.card_service_url.as_deref());
    let state = Arc::new(AppState::new(db, Arc::new(gateway), renderer));
    let bot = Bot::new(&config.bot_token);

    let tree = dptree::entry()
        .branch(Update::filter_message().endpoint(handler::message_handler))
        .branch(Update::filter_callback_query().endpoint(handler::callback_handler));

    tracing::info!("bot is connected, starting long polling");
    Dispatcher::builder(bot, tree)
        .dependencies(dptree::deps![Arc::clone(&state)])
        .default_handler(|update| async move {
            tracing::debug!(?update, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text("update handler error"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
