// src/scrape/scheduler.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::bot::Bot;

#[derive(Clone, Copy, Debug)]
pub struct SchedulerCfg {
    /// Pause before the first cycle so startup has settled by then.
    pub startup_delay: Duration,
    /// Gap between cycle starts thereafter.
    pub interval: Duration,
}

/// Spawn the repeating scrape trigger. The first cycle runs `startup_delay`
/// after spawn, then one per `interval`; a cycle that overruns its slot
/// delays the next tick instead of overlapping it.
pub fn spawn_scrape_scheduler(bot: Arc<Bot>, cfg: SchedulerCfg) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + cfg.startup_delay, cfg.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            startup_delay_secs = cfg.startup_delay.as_secs(),
            interval_secs = cfg.interval.as_secs(),
            "scrape scheduler started"
        );
        loop {
            ticker.tick().await;
            let stats = bot.scrape_once().await;
            tracing::info!(
                dispatched = stats.dispatched,
                unchanged = stats.unchanged,
                failed = stats.failed,
                "scheduled scrape tick"
            );
        }
    })
}
