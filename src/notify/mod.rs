// src/notify/mod.rs
//! Outbound delivery. The pipeline talks to one `Notifier`; the Telegram
//! implementation below it carries strips to the comics channel and failure
//! reports to the ops chat.

pub mod telegram;

pub use telegram::{TelegramApi, TelegramNotifier};

use anyhow::Result;
use async_trait::async_trait;

use crate::scrape::types::Strip;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one strip to the audience channel.
    async fn send_strip(&self, strip: &Strip) -> Result<()>;

    /// Deliver an operational failure report to whoever runs the bot.
    async fn report_failure(&self, text: &str) -> Result<()>;
}
