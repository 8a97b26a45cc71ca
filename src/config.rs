// src/config.rs
//! Process settings, read once at startup. `.env` is loaded by main via
//! dotenvy before this runs, so local overrides work without exporting.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::scrape::scheduler::SchedulerCfg;

const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
const ENV_COMICS_CHAT: &str = "COMICS_CHAT_ID";
const ENV_OPS_CHAT: &str = "OPS_CHAT_ID";
const ENV_LEDGER_PATH: &str = "LEDGER_PATH";
const ENV_INTERVAL: &str = "SCRAPE_INTERVAL_SECS";
const ENV_STARTUP_DELAY: &str = "SCRAPE_STARTUP_DELAY_SECS";

const DEFAULT_LEDGER_PATH: &str = "last_urls.json";
const DEFAULT_INTERVAL_SECS: u64 = 3600;
const DEFAULT_STARTUP_DELAY_SECS: u64 = 5;

#[derive(Debug, Clone)]
pub struct Settings {
    pub bot_token: String,
    pub comics_chat_id: i64,
    /// Failure reports go here; defaults to the comics chat when unset.
    pub ops_chat_id: i64,
    pub ledger_path: PathBuf,
    pub scrape_interval: Duration,
    pub startup_delay: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var(ENV_BOT_TOKEN)
            .with_context(|| format!("{ENV_BOT_TOKEN} is not set"))?;
        let comics_chat_id = required_chat_id(ENV_COMICS_CHAT)?;
        let ops_chat_id = match std::env::var(ENV_OPS_CHAT) {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_OPS_CHAT} is not a chat id: {raw:?}"))?,
            Err(_) => comics_chat_id,
        };
        let ledger_path = std::env::var(ENV_LEDGER_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEDGER_PATH));
        Ok(Self {
            bot_token,
            comics_chat_id,
            ops_chat_id,
            ledger_path,
            scrape_interval: Duration::from_secs(env_u64(ENV_INTERVAL, DEFAULT_INTERVAL_SECS)),
            startup_delay: Duration::from_secs(env_u64(
                ENV_STARTUP_DELAY,
                DEFAULT_STARTUP_DELAY_SECS,
            )),
        })
    }

    pub fn scheduler_cfg(&self) -> SchedulerCfg {
        SchedulerCfg {
            startup_delay: self.startup_delay,
            interval: self.scrape_interval,
        }
    }
}

fn required_chat_id(name: &str) -> Result<i64> {
    let raw = std::env::var(name).with_context(|| format!("{name} is not set"))?;
    raw.trim()
        .parse()
        .with_context(|| format!("{name} is not a chat id: {raw:?}"))
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
