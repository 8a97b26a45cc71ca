//! comic-courier binary entrypoint.
//! Wires settings, the seen-ledger, the site adapters, and the Telegram
//! client, then runs the interval scheduler and the command loop side by
//! side until the process is stopped.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use comic_courier::bot::Bot;
use comic_courier::config::Settings;
use comic_courier::ledger::SeenLedger;
use comic_courier::notify::{TelegramApi, TelegramNotifier};
use comic_courier::scrape::{self, scheduler::spawn_scrape_scheduler};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let settings = Settings::from_env()?;
    let ledger = SeenLedger::load(&settings.ledger_path)
        .context("seen ledger must exist and parse before the bot can run")?;
    tracing::info!(
        entries = ledger.len(),
        path = %settings.ledger_path.display(),
        "seen ledger loaded"
    );

    let client = scrape::http_client()?;
    let sources = scrape::registry(&client);
    let api = TelegramApi::new(client, settings.bot_token.clone());
    let notifier =
        TelegramNotifier::new(api.clone(), settings.comics_chat_id, settings.ops_chat_id);

    let bot = Arc::new(Bot::new(sources, ledger, Box::new(notifier), api));
    let _scheduler = spawn_scrape_scheduler(bot.clone(), settings.scheduler_cfg());
    tracing::info!("comic-courier ready");

    bot.run_commands().await
}
