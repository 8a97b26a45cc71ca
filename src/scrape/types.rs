// src/scrape/types.rs
//! Core data model: source identities, the extracted strip, and the adapter
//! contract the pipeline drives.

use std::fmt;

use async_trait::async_trait;

/// Closed set of supported sites. The string forms double as ledger keys, so
/// they must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComicId {
    Smbc,
    Pbf,
    Octopuns,
    PoorlyDrawnLines,
    Xkcd,
    Oglaf,
}

impl ComicId {
    pub fn as_str(self) -> &'static str {
        match self {
            ComicId::Smbc => "smbc",
            ComicId::Pbf => "pbf",
            ComicId::Octopuns => "octopuns",
            ComicId::PoorlyDrawnLines => "poorlydrawnlines",
            ComicId::Xkcd => "xkcd",
            ComicId::Oglaf => "oglaf",
        }
    }
}

impl fmt::Display for ComicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted strip, ready for dispatch. Built whole or not at all; the
/// caption already carries its Telegram-HTML header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub caption: String,
    pub image_url: String,
    pub spoiler: bool,
}

impl Strip {
    pub fn new(caption: String, image_url: String) -> Self {
        Self {
            caption,
            image_url,
            spoiler: false,
        }
    }

    /// Mark the strip as needing a spoiler cover on delivery.
    pub fn with_spoiler(mut self) -> Self {
        self.spoiler = true;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    /// The page no longer carries the element or attribute the adapter needs;
    /// `what` names the missing piece for markup-change diagnostics.
    #[error("expected {what} not found")]
    Extraction { comic: ComicId, what: &'static str },
}

/// One comic site. Implementations own their page URL and markup rules and
/// return a complete `Strip` per call; they never touch the seen-ledger.
#[async_trait]
pub trait ComicSource: Send + Sync {
    fn id(&self) -> ComicId;

    /// Fetch the site's front page and extract the latest strip.
    async fn fetch_latest(&self) -> Result<Strip, ScrapeError>;
}
