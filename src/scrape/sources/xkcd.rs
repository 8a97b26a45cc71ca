// src/scrape/sources/xkcd.rs
//! XKCD. The image URL is published protocol-relative, so it gets an explicit
//! scheme before dispatch.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::scrape::types::{ComicId, ComicSource, ScrapeError, Strip};
use crate::scrape::{caption, clean_text, ensure_https, get_text, required_attr, select_first};

const PAGE_URL: &str = "https://xkcd.com/";
const TITLE: &str = "XKCD";

static COMIC_IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("div#comic img").unwrap());

pub struct Xkcd {
    client: Client,
}

impl Xkcd {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn parse(html: &str) -> Result<Strip, ScrapeError> {
        let doc = Html::parse_document(html);
        let img = select_first(&doc, &COMIC_IMG, ComicId::Xkcd, "div#comic img")?;
        let image_url = ensure_https(&required_attr(img, "src", ComicId::Xkcd)?);
        let hover = required_attr(img, "title", ComicId::Xkcd)?;
        Ok(Strip::new(caption(TITLE, &clean_text(&hover)), image_url))
    }
}

#[async_trait]
impl ComicSource for Xkcd {
    fn id(&self) -> ComicId {
        ComicId::Xkcd
    }

    async fn fetch_latest(&self) -> Result<Strip, ScrapeError> {
        let body = get_text(self.client.get(PAGE_URL)).await?;
        Self::parse(&body)
    }
}
