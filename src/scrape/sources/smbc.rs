// src/scrape/sources/smbc.rs
//! Saturday Morning Breakfast Cereal. The front page embeds the latest strip
//! as `img#cc-comic`; the hover gag lives in the `title` attribute and goes
//! into the caption below the header.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::scrape::types::{ComicId, ComicSource, ScrapeError, Strip};
use crate::scrape::{caption, clean_text, get_text, required_attr, select_first};

const PAGE_URL: &str = "https://www.smbc-comics.com/";
const TITLE: &str = "Saturday Morning Breakfast Cereal";

static COMIC_IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img#cc-comic").unwrap());

pub struct Smbc {
    client: Client,
}

impl Smbc {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn parse(html: &str) -> Result<Strip, ScrapeError> {
        let doc = Html::parse_document(html);
        let img = select_first(&doc, &COMIC_IMG, ComicId::Smbc, "img#cc-comic")?;
        let image_url = required_attr(img, "src", ComicId::Smbc)?;
        let hover = required_attr(img, "title", ComicId::Smbc)?;
        Ok(Strip::new(caption(TITLE, &clean_text(&hover)), image_url))
    }
}

#[async_trait]
impl ComicSource for Smbc {
    fn id(&self) -> ComicId {
        ComicId::Smbc
    }

    async fn fetch_latest(&self) -> Result<Strip, ScrapeError> {
        let body = get_text(self.client.get(PAGE_URL)).await?;
        Self::parse(&body)
    }
}
