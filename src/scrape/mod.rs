// src/scrape/mod.rs
//! Extraction and dedup-and-dispatch pipeline.
//!
//! `registry` declares the fixed set of site adapters, `run_cycle` makes one
//! pass over them: extract the latest strip, compare against the seen-ledger,
//! dispatch only on change, then record. Every failure is contained to its
//! source; one broken site never blocks the rest of the cycle.

pub mod scheduler;
pub mod sources;
pub mod types;

use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

use crate::ledger::SeenLedger;
use crate::notify::Notifier;
use crate::scrape::sources::{
    octopuns::Octopuns, oglaf::Oglaf, pbf::Pbf, poorlydrawnlines::PoorlyDrawnLines, smbc::Smbc,
    xkcd::Xkcd,
};
use crate::scrape::types::{ComicId, ComicSource, ScrapeError};

/// Hard per-fetch bound so one unresponsive site cannot stall a whole cycle.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one pass over the registry.
#[derive(Debug, Default)]
pub struct CycleStats {
    pub dispatched: usize,
    pub unchanged: usize,
    /// Fetch, extraction, or dispatch failures; all retried naturally on the
    /// next cycle because the ledger was not advanced.
    pub failed: usize,
    /// Ledger writes that did not reach disk. The in-memory entry is still
    /// advanced, so no duplicate is sent within this process.
    pub ledger_failures: usize,
    /// One line per failure, `"<comic>: <error>"`, ready for the ops report.
    pub failures: Vec<String>,
}

impl CycleStats {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Shared HTTP client used for the comic pages and the Telegram API.
pub fn http_client() -> anyhow::Result<Client> {
    Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!("comic-courier/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building http client")
}

/// Fixed, ordered adapter set. Order only affects log output.
pub fn registry(client: &Client) -> Vec<Box<dyn ComicSource>> {
    vec![
        Box::new(Smbc::new(client.clone())),
        Box::new(Pbf::new(client.clone())),
        Box::new(Octopuns::new(client.clone())),
        Box::new(PoorlyDrawnLines::new(client.clone())),
        Box::new(Xkcd::new(client.clone())),
        Box::new(Oglaf::new(client.clone())),
    ]
}

/// Run one dedup-and-dispatch cycle over `sources`.
///
/// Per source: extract, compare with the ledger entry, dispatch on change,
/// record. The ledger is only advanced after the notifier confirms delivery,
/// so a failed dispatch is retried on the next cycle instead of being lost.
pub async fn run_cycle(
    sources: &[Box<dyn ComicSource>],
    ledger: &mut SeenLedger,
    notifier: &dyn Notifier,
) -> CycleStats {
    let mut stats = CycleStats::default();
    tracing::info!(sources = sources.len(), "scrape cycle starting");

    for source in sources {
        let id = source.id();
        let strip = match source.fetch_latest().await {
            Ok(strip) => strip,
            Err(e) => {
                tracing::warn!(comic = %id, error = ?e, "scrape failed, source skipped this cycle");
                stats.failed += 1;
                stats.failures.push(format!("{id}: {e}"));
                continue;
            }
        };

        if ledger.get(id) == Some(strip.image_url.as_str()) {
            tracing::debug!(comic = %id, "already sent");
            stats.unchanged += 1;
            continue;
        }

        if let Err(e) = notifier.send_strip(&strip).await {
            tracing::warn!(comic = %id, error = ?e, "dispatch failed, strip retried next cycle");
            stats.failed += 1;
            stats.failures.push(format!("{id}: dispatch failed: {e:#}"));
            continue;
        }
        tracing::info!(comic = %id, url = %strip.image_url, "new strip dispatched");

        if let Err(e) = ledger.set(id, &strip.image_url) {
            tracing::error!(comic = %id, error = ?e, "ledger write failed, on-disk dedup state is stale");
            stats.ledger_failures += 1;
            stats.failures.push(format!("{id}: ledger write failed: {e:#}"));
        }
        stats.dispatched += 1;
    }

    stats
}

// ---- helpers shared by the site adapters ----

pub(crate) async fn get_text(req: reqwest::RequestBuilder) -> Result<String, ScrapeError> {
    let resp = req.send().await?.error_for_status()?;
    Ok(resp.text().await?)
}

pub(crate) fn select_first<'a>(
    doc: &'a Html,
    selector: &Selector,
    comic: ComicId,
    what: &'static str,
) -> Result<ElementRef<'a>, ScrapeError> {
    doc.select(selector)
        .next()
        .ok_or(ScrapeError::Extraction { comic, what })
}

pub(crate) fn required_attr(
    el: ElementRef<'_>,
    attr: &'static str,
    comic: ComicId,
) -> Result<String, ScrapeError> {
    el.value()
        .attr(attr)
        .map(str::to_owned)
        .ok_or(ScrapeError::Extraction { comic, what: attr })
}

static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse whitespace runs and trim; site text often carries stray newlines
/// and indentation from the surrounding markup.
pub(crate) fn clean_text(s: &str) -> String {
    RE_WS.replace_all(s, " ").trim().to_string()
}

/// Photo captions cap out at 1024 chars on the Telegram side.
const CAPTION_LIMIT: usize = 1024;

/// Build the caption: a bold header with the display name and today's date,
/// then the site-provided text on its own paragraph. The body is escaped so
/// quotes and angle brackets in alt/title text survive HTML parse mode;
/// embedded line breaks are kept. An over-long body is clipped so the whole
/// caption stays within the photo-caption bound.
pub(crate) fn caption(title: &str, body: &str) -> String {
    let header = format!("<b>{}</b>, {}", title, Local::now().format("%Y-%m-%d"));
    if body.is_empty() {
        return header;
    }
    let escaped = html_escape::encode_text(body);
    let room = CAPTION_LIMIT.saturating_sub(header.chars().count() + 2);
    let clipped = clip(&escaped, room);
    if clipped.is_empty() {
        return header;
    }
    format!("{header}\n\n{clipped}")
}

/// Some sites publish protocol-relative image URLs; Telegram needs a scheme.
pub(crate) fn ensure_https(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("//") {
        format!("https://{rest}")
    } else {
        url.to_string()
    }
}

/// Cut `s` to at most `limit` chars, then drop any `&...;` entity the cut
/// left half-emitted.
pub(crate) fn clip(s: &str, limit: usize) -> &str {
    let cut = match s.char_indices().nth(limit) {
        Some((idx, _)) => idx,
        None => return s,
    };
    let mut head = &s[..cut];
    if let Some(amp) = head.rfind('&') {
        if !head[amp..].contains(';') {
            head = &head[..amp];
        }
    }
    head
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  Baked\n   Beings \t"), "Baked Beings");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn caption_escapes_site_text_but_keeps_our_markup() {
        let c = caption("XKCD", "1 < 2 & \"so on\"");
        assert!(c.starts_with("<b>XKCD</b>, "));
        assert!(c.contains("1 &lt; 2 &amp;"));
        assert!(!c.contains("<b>1"));
    }

    #[test]
    fn caption_without_body_is_header_only() {
        let c = caption("Poorly Drawn Lines", "");
        assert!(c.starts_with("<b>Poorly Drawn Lines</b>, "));
        assert!(!c.contains('\n'));
    }

    #[test]
    fn multiline_bodies_survive_escaping() {
        let c = caption("Oglaf", "Beeswax\nthe bees are a metaphor");
        assert!(c.ends_with("Beeswax\nthe bees are a metaphor"));
    }

    #[test]
    fn caption_is_clamped_to_the_photo_caption_bound() {
        let c = caption("XKCD", &"a".repeat(3000));
        assert!(c.chars().count() <= 1024);
        assert!(c.starts_with("<b>XKCD</b>, "));
        assert!(c.ends_with('a'));
    }

    #[test]
    fn caption_clamp_drops_a_torn_entity_whole() {
        // The cut lands inside the escaped `&`.
        let body = format!("{}&b", "a".repeat(997));
        let c = caption("XKCD", &body);
        assert!(c.chars().count() <= 1024);
        assert!(!c.contains('&'));
    }

    #[test]
    fn clip_respects_limit() {
        assert_eq!(clip("abcdef", 10), "abcdef");
        assert_eq!(clip("abcdef", 6), "abcdef");
        assert_eq!(clip("abcdef", 3), "abc");
    }

    #[test]
    fn clip_never_leaves_a_torn_entity() {
        assert_eq!(clip("ab&amp;cd", 4), "ab");
        assert_eq!(clip("ab&amp;cd", 7), "ab&amp;");
    }

    #[test]
    fn ensure_https_only_touches_protocol_relative_urls() {
        assert_eq!(
            ensure_https("//imgs.xkcd.com/comics/a.png"),
            "https://imgs.xkcd.com/comics/a.png"
        );
        assert_eq!(ensure_https("https://x.test/a.png"), "https://x.test/a.png");
        assert_eq!(ensure_https("http://x.test/a.png"), "http://x.test/a.png");
    }

    #[test]
    fn registry_covers_every_comic_exactly_once() {
        let client = Client::new();
        let ids: Vec<_> = registry(&client).iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            vec![
                ComicId::Smbc,
                ComicId::Pbf,
                ComicId::Octopuns,
                ComicId::PoorlyDrawnLines,
                ComicId::Xkcd,
                ComicId::Oglaf,
            ]
        );
    }
}
