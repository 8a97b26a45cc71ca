// src/scrape/sources/poorlydrawnlines.rs
//! Poorly Drawn Lines. Lazy-loaded image in the entry content; the site has
//! no hover text, so the caption is the header alone.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::scrape::types::{ComicId, ComicSource, ScrapeError, Strip};
use crate::scrape::{caption, get_text, required_attr, select_first};

const PAGE_URL: &str = "https://poorlydrawnlines.com/";
const TITLE: &str = "Poorly Drawn Lines";

static ENTRY_IMG: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.entry-content img").unwrap());

pub struct PoorlyDrawnLines {
    client: Client,
}

impl PoorlyDrawnLines {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn parse(html: &str) -> Result<Strip, ScrapeError> {
        let doc = Html::parse_document(html);
        let img = select_first(
            &doc,
            &ENTRY_IMG,
            ComicId::PoorlyDrawnLines,
            "div.entry-content img",
        )?;
        let image_url = required_attr(img, "data-src", ComicId::PoorlyDrawnLines)?;
        Ok(Strip::new(caption(TITLE, ""), image_url))
    }
}

#[async_trait]
impl ComicSource for PoorlyDrawnLines {
    fn id(&self) -> ComicId {
        ComicId::PoorlyDrawnLines
    }

    async fn fetch_latest(&self) -> Result<Strip, ScrapeError> {
        let body = get_text(self.client.get(PAGE_URL)).await?;
        Self::parse(&body)
    }
}
