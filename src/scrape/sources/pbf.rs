// src/scrape/sources/pbf.rs
//! Perry Bible Fellowship. The strip image is lazy-loaded, so the real URL is
//! in `data-src`; the `title` attribute carries the strip name with a `PBF-`
//! filename prefix we strip off.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::scrape::types::{ComicId, ComicSource, ScrapeError, Strip};
use crate::scrape::{caption, clean_text, get_text, required_attr, select_first};

const PAGE_URL: &str = "https://pbfcomics.com/";
const TITLE: &str = "Perry Bible Fellowship";

static COMIC_IMG: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#comic img.lazyload").unwrap());

pub struct Pbf {
    client: Client,
}

impl Pbf {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn parse(html: &str) -> Result<Strip, ScrapeError> {
        let doc = Html::parse_document(html);
        let img = select_first(&doc, &COMIC_IMG, ComicId::Pbf, "div#comic img.lazyload")?;
        let image_url = required_attr(img, "data-src", ComicId::Pbf)?;
        let name = required_attr(img, "title", ComicId::Pbf)?.replace("PBF-", "");
        Ok(Strip::new(caption(TITLE, &clean_text(&name)), image_url))
    }
}

#[async_trait]
impl ComicSource for Pbf {
    fn id(&self) -> ComicId {
        ComicId::Pbf
    }

    async fn fetch_latest(&self) -> Result<Strip, ScrapeError> {
        let body = get_text(self.client.get(PAGE_URL)).await?;
        Self::parse(&body)
    }
}
