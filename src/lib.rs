// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod bot;
pub mod config;
pub mod ledger;
pub mod notify;
pub mod scrape;

// ---- Re-exports for stable public API ----
pub use bot::Bot;
pub use config::Settings;
pub use ledger::SeenLedger;
pub use notify::{Notifier, TelegramApi, TelegramNotifier};
pub use scrape::types::{ComicId, ComicSource, ScrapeError, Strip};
pub use scrape::{run_cycle, CycleStats};
