// src/notify/telegram.rs
//! Thin Telegram Bot API client plus the `Notifier` built on it.
//!
//! Only the four methods the bot needs are wrapped: `sendPhoto`,
//! `sendMessage`, `getUpdates`, and `getMe`. Responses are decoded before
//! the HTTP status is judged, because the API puts the useful error text in
//! the `description` field of a non-2xx body.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::notify::Notifier;
use crate::scrape::clip;
use crate::scrape::types::Strip;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";
const HTML_MODE: &str = "HTML";
const SEND_TIMEOUT: Duration = Duration::from_secs(30);
/// Message bodies cap out at 4096 chars; reports stay under that with room
/// for the `<pre>` wrapper.
const REPORT_LIMIT: usize = 4000;

#[derive(Clone)]
pub struct TelegramApi {
    client: Client,
    base_url: String,
    token: String,
}

impl TelegramApi {
    pub fn new(client: Client, token: String) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            token,
        }
    }

    /// Point the client at another server, for tests or a self-hosted API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<T, P>(&self, method: &str, payload: &P, timeout: Duration) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize,
    {
        let resp = self
            .client
            .post(self.method_url(method))
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("sending {method} request"))?;
        let status = resp.status();
        let body: ApiResponse<T> = resp
            .json()
            .await
            .with_context(|| format!("decoding {method} response (http {status})"))?;
        if !body.ok {
            bail!(
                "{method} rejected (http {status}): {}",
                body.description.as_deref().unwrap_or("no description")
            );
        }
        body.result
            .with_context(|| format!("{method} response is ok but carries no result"))
    }

    pub async fn send_photo(&self, chat_id: i64, strip: &Strip) -> Result<()> {
        let payload = SendPhoto {
            chat_id,
            photo: &strip.image_url,
            caption: &strip.caption,
            parse_mode: HTML_MODE,
            has_spoiler: strip.spoiler,
        };
        let _: serde_json::Value = self.call("sendPhoto", &payload, SEND_TIMEOUT).await?;
        Ok(())
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let payload = SendMessage {
            chat_id,
            text,
            parse_mode: HTML_MODE,
            link_preview_options: LinkPreviewOptions { is_disabled: true },
        };
        let _: serde_json::Value = self.call("sendMessage", &payload, SEND_TIMEOUT).await?;
        Ok(())
    }

    /// Long-poll for incoming messages. The HTTP timeout rides above the
    /// server-side window so the server, not the client, closes the poll.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        let payload = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: &["message"],
        };
        self.call(
            "getUpdates",
            &payload,
            Duration::from_secs(timeout_secs + 10),
        )
        .await
    }

    /// Ask the API who this token belongs to, mainly for the bot's username.
    pub async fn get_me(&self) -> Result<Me> {
        self.call("getMe", &serde_json::json!({}), SEND_TIMEOUT).await
    }
}

#[derive(Serialize)]
struct SendPhoto<'a> {
    chat_id: i64,
    photo: &'a str,
    caption: &'a str,
    parse_mode: &'a str,
    has_spoiler: bool,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
    link_preview_options: LinkPreviewOptions,
}

#[derive(Serialize)]
struct LinkPreviewOptions {
    is_disabled: bool,
}

#[derive(Serialize)]
struct GetUpdates<'a> {
    offset: i64,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Me {
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Sends strips to the audience channel and failure reports to the ops chat.
/// The two may be the same chat.
pub struct TelegramNotifier {
    api: TelegramApi,
    comics_chat: i64,
    ops_chat: i64,
}

impl TelegramNotifier {
    pub fn new(api: TelegramApi, comics_chat: i64, ops_chat: i64) -> Self {
        Self {
            api,
            comics_chat,
            ops_chat,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_strip(&self, strip: &Strip) -> Result<()> {
        self.api.send_photo(self.comics_chat, strip).await
    }

    async fn report_failure(&self, text: &str) -> Result<()> {
        let escaped = html_escape::encode_text(text);
        let report = format!("<pre>{}</pre>", clip(&escaped, REPORT_LIMIT));
        self.api.send_message(self.ops_chat, &report).await
    }
}
