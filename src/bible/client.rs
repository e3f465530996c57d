// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! HTTP client for bible-api.com.
//!
//! Two upstream endpoints are used:
//!
//! - the free-text endpoint, `GET {base}/{reference}?translation={id}`
//! - the structured data endpoint, `GET {data}/{translation}/{book}/{chapter}`
//!
//! Each call is a single attempt. Any status outside 2xx becomes
//! [`BibleError::Upstream`], an undecodable body becomes [`BibleError::Decode`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

#[cfg(feature = "telemetry")]
use tracing::debug;

#[cfg(feature = "telemetry")]
use crate::telemetry::metrics::GLOBAL_METRICS;

use super::reference::Lookup;
use crate::config::BibleConfig;
use crate::error::{BibleError, BibleResult};

/// Source of raw scripture payloads.
///
/// [`BibleClient`] is the production implementation; tests substitute fakes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScriptureSource: Send + Sync {
    /// Fetch a passage through the free-text endpoint.
    async fn fetch_passage(&self, reference: &str, translation: &str) -> BibleResult<Value>;

    /// Fetch a whole chapter through the structured data endpoint.
    async fn fetch_chapter(&self, translation: &str, book: &str, chapter: u32)
        -> BibleResult<Value>;
}

/// Fetch whatever a resolved [`Lookup`] asks for.
pub async fn fetch_lookup(source: &dyn ScriptureSource, lookup: &Lookup) -> BibleResult<Value> {
    match lookup {
        Lookup::Passage {
            reference,
            translation,
        } => source.fetch_passage(reference, translation).await,
        Lookup::Chapter {
            translation,
            book,
            chapter,
        } => source.fetch_chapter(translation, book, *chapter).await,
    }
}

/// Stateless adapter over the upstream REST API.
#[derive(Debug, Clone)]
pub struct BibleClient {
    http: Client,
    base_url: Url,
    data_url: Url,
}

impl BibleClient {
    /// Build a client from configuration.
    pub fn new(config: &BibleConfig) -> BibleResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| BibleError::Network(format!("failed to build HTTP client: {e}")))?;

        Self::with_http_client(http, &config.base_url, &config.resolved_data_url())
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http_client(http: Client, base_url: &str, data_url: &str) -> BibleResult<Self> {
        Ok(Self {
            http,
            base_url: parse_base(base_url)?,
            data_url: parse_base(data_url)?,
        })
    }

    /// Get verse(s) by free-text reference, e.g. `"john 3:16"` or `"matt 25:31-33,46"`.
    pub async fn get_verse_by_reference(
        &self,
        reference: &str,
        translation: Option<&str>,
    ) -> BibleResult<Value> {
        let url = self.passage_url(reference, translation)?;
        self.get_json(url, "upstream.passage").await
    }

    /// Get a chapter, or a single verse when `verse` is given.
    ///
    /// Identifiers go through [`Lookup::resolve`], so a verse request and any
    /// single-chapter book (`JUD`, `PHM`, ...) use the free-text endpoint
    /// while other chapters use the data endpoint.
    pub async fn get_by_book_chapter_verse(
        &self,
        translation: &str,
        book: &str,
        chapter: u32,
        verse: Option<u32>,
    ) -> BibleResult<Value> {
        let verse = verse.map(|v| v.to_string());
        let lookup = Lookup::resolve(translation, book, &chapter.to_string(), verse.as_deref())?;

        match lookup {
            Lookup::Passage {
                reference,
                translation,
            } => {
                self.get_verse_by_reference(&reference, Some(&translation))
                    .await
            }
            Lookup::Chapter {
                translation,
                book,
                chapter,
            } => {
                let url = self.chapter_url(&translation, &book, chapter)?;
                self.get_json(url, "upstream.chapter").await
            }
        }
    }

    /// URL for the free-text endpoint. The reference is encoded as one path segment.
    pub fn passage_url(&self, reference: &str, translation: Option<&str>) -> BibleResult<Url> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(BibleError::validation("reference must not be empty"));
        }

        let mut url = self.base_url.clone();
        push_segments(&mut url, &[reference])?;
        if let Some(translation) = translation {
            url.query_pairs_mut().append_pair("translation", translation);
        }
        Ok(url)
    }

    /// URL for the structured chapter endpoint.
    pub fn chapter_url(&self, translation: &str, book: &str, chapter: u32) -> BibleResult<Url> {
        let chapter = chapter.to_string();
        let mut url = self.data_url.clone();
        push_segments(&mut url, &[translation, book, chapter.as_str()])?;
        Ok(url)
    }

    async fn get_json(&self, url: Url, operation: &'static str) -> BibleResult<Value> {
        let start = Instant::now();

        #[cfg(feature = "telemetry")]
        debug!(url = %url, "Sending upstream request");

        let result = self.send(url).await;

        #[cfg(feature = "telemetry")]
        {
            GLOBAL_METRICS.record_operation(operation, start.elapsed());
            debug!(
                operation,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                ok = result.is_ok(),
                "Upstream request finished"
            );
        }
        #[cfg(not(feature = "telemetry"))]
        let _ = (start, operation);

        result
    }

    async fn send(&self, url: Url) -> BibleResult<Value> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| BibleError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BibleError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), &body));
        }

        decode_body(&body)
    }
}

#[async_trait]
impl ScriptureSource for BibleClient {
    async fn fetch_passage(&self, reference: &str, translation: &str) -> BibleResult<Value> {
        self.get_verse_by_reference(reference, Some(translation))
            .await
    }

    async fn fetch_chapter(
        &self,
        translation: &str,
        book: &str,
        chapter: u32,
    ) -> BibleResult<Value> {
        let url = self.chapter_url(translation, book, chapter)?;
        self.get_json(url, "upstream.chapter").await
    }
}

/// Decode a success body into a JSON object.
pub fn decode_body(body: &str) -> BibleResult<Value> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(BibleError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    Ok(value)
}

/// Map a non-2xx response, preferring the upstream `{"error": "..."}` message.
fn upstream_error(status: u16, body: &str) -> BibleError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| body.trim().to_string());
    BibleError::upstream(status, message)
}

fn parse_base(raw: &str) -> BibleResult<Url> {
    let url = Url::parse(raw)
        .map_err(|e| BibleError::validation(format!("invalid base URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(BibleError::validation(format!(
            "base URL {raw:?} cannot carry path segments"
        )));
    }
    Ok(url)
}

fn push_segments(url: &mut Url, segments: &[&str]) -> BibleResult<()> {
    url.path_segments_mut()
        .map_err(|_| BibleError::validation("URL cannot carry path segments"))?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BibleClient {
        BibleClient::with_http_client(
            Client::new(),
            "https://bible-api.com",
            "https://bible-api.com/data",
        )
        .unwrap()
    }

    #[test]
    fn test_passage_url_encodes_reference() {
        let url = client().passage_url("John 3:16", Some("kjv")).unwrap();
        assert_eq!(url.as_str(), "https://bible-api.com/John%203:16?translation=kjv");

        let url = client().passage_url("matt 25:31-33,46", None).unwrap();
        assert_eq!(url.as_str(), "https://bible-api.com/matt%2025:31-33,46");
    }

    #[test]
    fn test_passage_url_escapes_path_separators() {
        let url = client().passage_url("John 3/16", None).unwrap();
        assert_eq!(url.path(), "/John%203%2F16");
    }

    #[test]
    fn test_passage_url_rejects_empty_reference() {
        assert!(matches!(
            client().passage_url("  ", None),
            Err(BibleError::Validation(_))
        ));
    }

    #[test]
    fn test_chapter_url() {
        let url = client().chapter_url("web", "GEN", 1).unwrap();
        assert_eq!(url.as_str(), "https://bible-api.com/data/web/GEN/1");
    }

    #[test]
    fn test_chapter_url_with_trailing_slash_base() {
        let client = BibleClient::with_http_client(
            Client::new(),
            "https://example.org/",
            "https://example.org/data/",
        )
        .unwrap();
        let url = client.chapter_url("kjv", "JHN", 3).unwrap();
        assert_eq!(url.as_str(), "https://example.org/data/kjv/JHN/3");
        let url = client.passage_url("JHN 3:16", Some("kjv")).unwrap();
        assert_eq!(url.as_str(), "https://example.org/JHN%203:16?translation=kjv");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = BibleClient::with_http_client(Client::new(), "not a url", "https://x.org")
            .unwrap_err();
        assert!(matches!(err, BibleError::Validation(_)));

        let err = BibleClient::with_http_client(Client::new(), "mailto:a@b.c", "https://x.org")
            .unwrap_err();
        assert!(matches!(err, BibleError::Validation(_)));
    }

    #[test]
    fn test_decode_body() {
        let value = decode_body(r#"{"reference": "John 3:16"}"#).unwrap();
        assert_eq!(value["reference"], "John 3:16");

        assert!(matches!(decode_body("<html>"), Err(BibleError::Decode(_))));
        assert!(matches!(decode_body("[1, 2]"), Err(BibleError::Decode(_))));
    }

    #[test]
    fn test_upstream_error_prefers_error_field() {
        let err = upstream_error(404, r#"{"error":"not found"}"#);
        assert!(matches!(
            err,
            BibleError::Upstream { status: 404, ref body } if body == "not found"
        ));

        let err = upstream_error(502, "Bad Gateway\n");
        assert!(matches!(
            err,
            BibleError::Upstream { status: 502, ref body } if body == "Bad Gateway"
        ));
    }

    #[tokio::test]
    async fn test_fetch_lookup_dispatches_by_shape() {
        let mut source = MockScriptureSource::new();
        source
            .expect_fetch_passage()
            .withf(|reference: &str, translation: &str| {
                reference == "JUD 1" && translation == "web"
            })
            .times(1)
            .returning(|_, _| Ok(serde_json::json!({"reference": "Jude 1:1"})));
        source
            .expect_fetch_chapter()
            .withf(|translation: &str, book: &str, chapter: &u32| {
                translation == "kjv" && book == "GEN" && *chapter == 1
            })
            .times(1)
            .returning(|_, _, _| Ok(serde_json::json!({"verses": []})));

        let passage = Lookup::resolve("web", "JUD", "1", None).unwrap();
        let value = fetch_lookup(&source, &passage).await.unwrap();
        assert_eq!(value["reference"], "Jude 1:1");

        let chapter = Lookup::resolve("kjv", "GEN", "1", None).unwrap();
        let value = fetch_lookup(&source, &chapter).await.unwrap();
        assert!(value["verses"].is_array());
    }
}
