use super::{FetchError, TweetBatch, TweetFetcher};
use async_trait::async_trait;
use std::time::Duration;

pub struct GeneratorFetcher {
    endpoint: String,
    client: reqwest::Client,
}

impl GeneratorFetcher {
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder().user_agent("tweetgen");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| reqwest::Client::new());

        Self { endpoint, client }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TweetFetcher for GeneratorFetcher {
    async fn fetch(&self) -> Result<TweetBatch, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "Requesting generated tweets");

        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // Decode by hand so a bad body is reported as a payload error, not a transport one.
        let body = response.text().await?;
        let batch: TweetBatch = serde_json::from_str(&body)?;

        tracing::debug!(count = batch.tweets.len(), "Received generated tweets");
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher_for(server: &mockito::Server) -> GeneratorFetcher {
        GeneratorFetcher::new(format!("{}/generate-tweets", server.url()), None)
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/generate-tweets")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tweets":["a","b"]}"#)
            .expect(1)
            .create_async()
            .await;

        let batch = fetcher_for(&server).fetch().await.unwrap();

        assert_eq!(batch.tweets, vec!["a".to_string(), "b".to_string()]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_server_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/generate-tweets")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let err = fetcher_for(&server).fetch().await.unwrap_err();

        assert!(matches!(
            err,
            FetchError::Status(status) if status == reqwest::StatusCode::INTERNAL_SERVER_ERROR
        ));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/generate-tweets")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tweets": 5}"#)
            .create_async()
            .await;

        let err = fetcher_for(&server).fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Payload(_)));
    }

    #[tokio::test]
    async fn test_fetch_non_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/generate-tweets")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = fetcher_for(&server).fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Payload(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        // Nothing listens on port 1.
        let fetcher = GeneratorFetcher::new(
            "http://127.0.0.1:1/generate-tweets".to_string(),
            Some(Duration::from_secs(5)),
        );

        let err = fetcher.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn test_fetcher_new() {
        let fetcher = GeneratorFetcher::new("http://localhost:5000/x".to_string(), None);
        assert_eq!(fetcher.endpoint(), "http://localhost:5000/x");
    }
}
