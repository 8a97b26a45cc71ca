// src/bot.rs
//! Shared bot state, cycle serialization, and the operator command loop.
//!
//! The seen-ledger sits behind an async mutex that is held for a whole cycle,
//! so the interval scheduler and a manual trigger can never run concurrently;
//! whichever starts second waits its turn.

use std::time::Duration;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::ledger::SeenLedger;
use crate::notify::{Notifier, TelegramApi};
use crate::scrape::types::ComicSource;
use crate::scrape::{run_cycle, CycleStats};

const POLL_TIMEOUT_SECS: u64 = 50;
const POLL_RETRY: Duration = Duration::from_secs(5);
const MANUAL_SCRAPE: &str = "manual_scrape";

pub struct Bot {
    sources: Vec<Box<dyn ComicSource>>,
    ledger: Mutex<SeenLedger>,
    notifier: Box<dyn Notifier>,
    api: TelegramApi,
}

impl Bot {
    pub fn new(
        sources: Vec<Box<dyn ComicSource>>,
        ledger: SeenLedger,
        notifier: Box<dyn Notifier>,
        api: TelegramApi,
    ) -> Self {
        Self {
            sources,
            ledger: Mutex::new(ledger),
            notifier,
            api,
        }
    }

    /// Run one full cycle. Callers queue on the ledger lock, so at most one
    /// cycle is in flight per process. Any failures the cycle collected are
    /// rolled into a single ops report afterwards.
    pub async fn scrape_once(&self) -> CycleStats {
        let stats = {
            let mut ledger = self.ledger.lock().await;
            run_cycle(&self.sources, &mut ledger, self.notifier.as_ref()).await
        };
        if !stats.is_clean() {
            let report = format!(
                "scrape cycle finished with {} failure(s):\n{}",
                stats.failures.len(),
                stats.failures.join("\n")
            );
            if let Err(e) = self.notifier.report_failure(&report).await {
                tracing::warn!(error = ?e, "failure report could not be delivered");
            }
        }
        stats
    }

    /// Long-poll for operator commands. Transport errors are retried after a
    /// short pause; the loop never returns on its own.
    pub async fn run_commands(&self) -> Result<()> {
        let username = match self.api.get_me().await {
            Ok(me) => me.username,
            Err(e) => {
                tracing::warn!(error = ?e, "getMe failed, commands addressed by bot name are ignored");
                None
            }
        };
        if let Some(name) = username.as_deref() {
            tracing::info!(username = name, "command loop listening");
        }
        let mut offset = 0i64;
        loop {
            let updates = match self.api.get_updates(offset, POLL_TIMEOUT_SECS).await {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::warn!(error = ?e, "getUpdates failed, retrying");
                    tokio::time::sleep(POLL_RETRY).await;
                    continue;
                }
            };
            for update in updates {
                offset = offset.max(update.update_id + 1);
                let Some(message) = update.message else { continue };
                let Some(text) = message.text.as_deref() else { continue };
                if is_command(text, MANUAL_SCRAPE, username.as_deref()) {
                    tracing::info!(chat = message.chat.id, "manual scrape requested");
                    let stats = self.scrape_once().await;
                    tracing::info!(
                        dispatched = stats.dispatched,
                        unchanged = stats.unchanged,
                        failed = stats.failed,
                        "manual scrape finished"
                    );
                }
            }
        }
    }
}

/// Matches `/name` and `/name@OurBot`, with or without trailing arguments.
/// A command addressed to some other bot's username is not ours to run.
fn is_command(text: &str, name: &str, username: Option<&str>) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    let Some(cmd) = first.strip_prefix('/') else {
        return false;
    };
    match cmd.split_once('@') {
        None => cmd == name,
        Some((head, addressee)) => {
            head == name && username.is_some_and(|me| addressee.eq_ignore_ascii_case(me))
        }
    }
}
