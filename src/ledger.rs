// src/ledger.rs
//! Persistent dedup state: the image URL most recently dispatched per comic,
//! kept as a flat JSON object on disk.
//!
//! The file must exist and parse at startup; refusing to run beats silently
//! re-announcing every strip with an empty state. Writes go through on every
//! accepted strip so a crash between cycles loses nothing. When a write
//! fails the in-memory entry keeps the new value, which holds dedup for the
//! lifetime of the process while the failure is reported.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::scrape::types::ComicId;

#[derive(Debug)]
pub struct SeenLedger {
    path: PathBuf,
    last_urls: BTreeMap<String, String>,
}

impl SeenLedger {
    /// Read the ledger from `path`. Fails if the file is missing or is not a
    /// JSON object of strings; entries under unknown keys are kept verbatim.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("reading seen ledger from {}", path.display()))?;
        let last_urls: BTreeMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing seen ledger {}", path.display()))?;
        Ok(Self { path, last_urls })
    }

    pub fn get(&self, comic: ComicId) -> Option<&str> {
        self.last_urls.get(comic.as_str()).map(String::as_str)
    }

    /// Record `url` as the last dispatched strip for `comic` and write the
    /// ledger to disk. The in-memory entry is updated even when the write
    /// fails, so dedup still holds within this process.
    pub fn set(&mut self, comic: ComicId, url: &str) -> Result<()> {
        self.last_urls
            .insert(comic.as_str().to_string(), url.to_string());
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.last_urls)
            .context("serializing seen ledger")?;
        fs::write(&self.path, json)
            .with_context(|| format!("writing seen ledger to {}", self.path.display()))
    }

    pub fn len(&self) -> usize {
        self.last_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_urls.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
