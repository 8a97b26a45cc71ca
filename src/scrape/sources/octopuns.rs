// src/scrape/sources/octopuns.rs
//! Octopuns, a Blogger-hosted site. The newest post's image sits inside the
//! post body; the punchline is the first `h3` heading on the page.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::scrape::types::{ComicId, ComicSource, ScrapeError, Strip};
use crate::scrape::{caption, clean_text, get_text, required_attr, select_first};

const PAGE_URL: &str = "https://www.octopuns.com/";
const TITLE: &str = "Octopuns";

static POST_IMG: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.post-body.entry-content img").unwrap());
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());

pub struct Octopuns {
    client: Client,
}

impl Octopuns {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn parse(html: &str) -> Result<Strip, ScrapeError> {
        let doc = Html::parse_document(html);
        let img = select_first(&doc, &POST_IMG, ComicId::Octopuns, "post body img")?;
        let image_url = required_attr(img, "src", ComicId::Octopuns)?;
        let heading = select_first(&doc, &HEADING, ComicId::Octopuns, "h3 heading")?;
        let text = heading.text().collect::<String>();
        Ok(Strip::new(caption(TITLE, &clean_text(&text)), image_url))
    }
}

#[async_trait]
impl ComicSource for Octopuns {
    fn id(&self) -> ComicId {
        ComicId::Octopuns
    }

    async fn fetch_latest(&self) -> Result<Strip, ScrapeError> {
        let body = get_text(self.client.get(PAGE_URL)).await?;
        Self::parse(&body)
    }
}
