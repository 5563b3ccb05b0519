use super::parser::{parse_feed_bytes, FeedParseError};
use super::types::StatusFeed;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
    #[error("feed could not be parsed: {0}")]
    Parse(#[from] FeedParseError),
}

/// Downloads and parses the feed at `url`. A single attempt; callers decide
/// what a failure means for the current cycle.
pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<StatusFeed, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = response.bytes().await?;
    let feed = parse_feed_bytes(&body)?;
    tracing::debug!(
        url,
        format = ?feed.format,
        title = feed.title.as_deref().unwrap_or("untitled"),
        entries = feed.entries.len(),
        "fetched status feed"
    );
    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{spawn_feed_server, FeedResponse, ATOM_FIXTURE};

    #[tokio::test]
    async fn fetch_feed_returns_entries_newest_first() {
        let server = spawn_feed_server(vec![FeedResponse::atom(ATOM_FIXTURE)]).await;
        let client = reqwest::Client::new();

        let feed = fetch_feed(&client, &server.url)
            .await
            .expect("fetch should succeed");
        assert_eq!(feed.entries.len(), 3);
        assert_eq!(feed.entries[0].title.as_deref(), Some("API"));
        assert_eq!(feed.entries[1].title.as_deref(), Some("ChatGPT"));
        assert_eq!(server.request_count(), 1);
    }

    #[tokio::test]
    async fn server_errors_are_not_retried() {
        let server = spawn_feed_server(vec![FeedResponse::status(503)]).await;
        let client = reqwest::Client::new();

        let error = fetch_feed(&client, &server.url)
            .await
            .expect_err("503 must fail");
        assert!(matches!(error, FetchError::HttpStatus(503)));
        assert_eq!(server.request_count(), 1);
    }

    #[tokio::test]
    async fn malformed_payload_is_a_parse_failure() {
        let server =
            spawn_feed_server(vec![FeedResponse::atom("<html><body>maintenance</body></html>")])
                .await;
        let client = reqwest::Client::new();

        let error = fetch_feed(&client, &server.url)
            .await
            .expect_err("garbage must fail");
        assert!(matches!(error, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_request_failure() {
        let client = reqwest::Client::new();
        let error = fetch_feed(&client, "http://127.0.0.1:9/history.atom")
            .await
            .expect_err("closed port must fail");
        assert!(matches!(error, FetchError::Request(_)));
    }
}
