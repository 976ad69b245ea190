//! Link resolver adapter
//!
//! Fetches an aggregator landing page once and takes the first anchor href
//! as the destination. This is a pattern match over the raw body, not an
//! HTML parse.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use super::client::read_capped;
use crate::domain::ports::LinkResolver;
use crate::error::ResolveError;

/// Landing pages are small; anything bigger is not what we expect
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub struct HttpLinkResolver {
    http: Client,
    timeout: Duration,
}

impl HttpLinkResolver {
    pub fn new(http: Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    async fn fetch_and_scan(&self, url: &str) -> Result<String, ResolveError> {
        let fetch_error = |source| ResolveError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = read_capped(response, MAX_BODY_BYTES)
            .await
            .map_err(fetch_error)?
            .ok_or_else(|| ResolveError::BodyTooLarge {
                url: url.to_string(),
                limit: MAX_BODY_BYTES,
            })?;

        first_anchor_href(&String::from_utf8_lossy(&body)).ok_or_else(|| {
            ResolveError::NoLinkFound {
                url: url.to_string(),
            }
        })
    }
}

#[async_trait]
impl LinkResolver for HttpLinkResolver {
    async fn resolve(&self, url: &str, cancel: &CancellationToken) -> Result<String, ResolveError> {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ResolveError::Cancelled { url: url.to_string() }),
            result = self.fetch_and_scan(url) => result,
        };

        match &result {
            Ok(link) => tracing::debug!(url, link = %link, "Resolved link"),
            Err(ResolveError::Cancelled { .. }) => tracing::debug!(url, "Resolution cancelled"),
            Err(e) => tracing::warn!(url, error = %e, "Failed to resolve link"),
        }
        result
    }
}

fn anchor_href() -> &'static Regex {
    static ANCHOR_HREF: OnceLock<Regex> = OnceLock::new();
    ANCHOR_HREF.get_or_init(|| {
        Regex::new(r#"(?is)<a(?:\s[^>]*?)?\shref\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("anchor href pattern is valid")
    })
}

/// First `<a href=...>` value in `body`, entity-unescaped
pub fn first_anchor_href(body: &str) -> Option<String> {
    let caps = anchor_href().captures(body)?;
    let href = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();
    if href.is_empty() {
        return None;
    }
    Some(html_escape::decode_html_entities(href).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver() -> HttpLinkResolver {
        HttpLinkResolver::new(Client::new(), Duration::from_secs(5))
    }

    // ===== first_anchor_href tests =====

    #[test]
    fn finds_first_href() {
        let body = r#"<html><body><a href="https://example.com/one">1</a>
            <a href="https://example.com/two">2</a></body></html>"#;

        assert_eq!(
            first_anchor_href(body).as_deref(),
            Some("https://example.com/one")
        );
    }

    #[test]
    fn finds_href_after_other_attributes() {
        let body = r#"<A class="x" data-n='1' HREF='https://example.com/a?x=1&amp;y=2'>go</A>"#;

        assert_eq!(
            first_anchor_href(body).as_deref(),
            Some("https://example.com/a?x=1&y=2")
        );
    }

    #[test]
    fn decodes_numeric_and_named_entities() {
        let body = r#"<a href="https://example.com/?a=1&#38;b=2&amp;c=&quot;3&quot;">x</a>"#;

        assert_eq!(
            first_anchor_href(body).as_deref(),
            Some("https://example.com/?a=1&b=2&c=\"3\"")
        );
    }

    #[test]
    fn skips_prefixed_href_attributes() {
        let body = r#"<a data-href="https://tracker.example/t" xlink:href="https://tracker.example/x" href="https://example.com/real">x</a>"#;

        assert_eq!(
            first_anchor_href(body).as_deref(),
            Some("https://example.com/real")
        );
    }

    #[test]
    fn ignores_non_anchor_hrefs() {
        let body = r#"<link href="/style.css"><abbr href="nope"></abbr>"#;

        assert_eq!(first_anchor_href(body), None);
    }

    #[test]
    fn no_anchor_yields_none() {
        assert_eq!(first_anchor_href("<p>nothing here</p>"), None);
        assert_eq!(first_anchor_href(r#"<a href="">empty</a>"#), None);
    }

    // ===== resolve tests =====

    #[tokio::test]
    async fn resolve_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rss/articles/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><a href="https://example.com/story">Opening</a></html>"#,
            ))
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/rss/articles/abc", mock_server.uri());
        let link = resolver()
            .resolve(&url, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(link, "https://example.com/story");
    }

    #[tokio::test]
    async fn resolve_no_link_found() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;

        let err = resolver()
            .resolve(&mock_server.uri(), &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            ResolveError::NoLinkFound { .. } => {}
            e => panic!("Expected NoLinkFound, got {:?}", e),
        }
    }

    #[tokio::test]
    async fn resolve_error_status_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let err = resolver()
            .resolve(&mock_server.uri(), &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            ResolveError::Status { status: 500, .. } => {}
            e => panic!("Expected Status(500), got {:?}", e),
        }
    }

    #[tokio::test]
    async fn resolve_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<a href="https://example.com/late">late</a>"#)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        let resolver = HttpLinkResolver::new(Client::new(), Duration::from_millis(100));
        let err = resolver
            .resolve(&mock_server.uri(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Fetch { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn resolve_stops_when_cancelled() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"<a href="https://example.com/late">late</a>"#)
                    .set_delay(Duration::from_secs(30)),
            )
            .mount(&mock_server)
            .await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = resolver()
            .resolve(&mock_server.uri(), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Cancelled { .. }), "{err:?}");
    }
}
