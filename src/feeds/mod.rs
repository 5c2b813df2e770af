pub mod generator;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Endpoint of the local tweet generation service.
pub const GENERATE_TWEETS_URL: &str = "http://localhost:5000/generate-tweets";

/// One successful response from the generation service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TweetBatch {
    pub tweets: Vec<String>,
    #[serde(default, rename = "onchain_data", deserialize_with = "lenient")]
    pub market: Option<MarketSnapshot>,
    #[serde(default, rename = "social_data", deserialize_with = "lenient")]
    pub social: Option<SocialSignal>,
}

impl TweetBatch {
    pub fn new(tweets: Vec<String>) -> Self {
        Self {
            tweets,
            ..Self::default()
        }
    }
}

/// Ticker data the service based its prompt on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketSnapshot {
    pub token: String,
    #[serde(deserialize_with = "scalar_text")]
    pub price: String,
    #[serde(default = "not_available", deserialize_with = "scalar_text")]
    pub volume: String,
}

/// Influencer mention data the service based its prompt on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SocialSignal {
    pub token: String,
    pub influencer: String,
    pub mentions: u32,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response body: {0}")]
    Payload(#[from] serde_json::Error),
}

#[async_trait]
pub trait TweetFetcher: Send + Sync {
    async fn fetch(&self) -> Result<TweetBatch, FetchError>;
}

/// Context blocks are optional extras: a broken one is dropped, never fatal.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => not_available(),
        other => other.to_string(),
    })
}

fn not_available() -> String {
    "N/A".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_with_tweets_only() {
        let batch: TweetBatch = serde_json::from_str(r#"{"tweets":["a","b"]}"#).unwrap();
        assert_eq!(batch, TweetBatch::new(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_batch_with_context() {
        let body = r#"{
            "tweets": ["🚀 $doge"],
            "onchain_data": {"token": "$doge", "price": "0.1234", "volume": {"DOGE": "1"}},
            "social_data": {"token": "$SOL", "influencer": "@ansem", "mentions": 42}
        }"#;
        let batch: TweetBatch = serde_json::from_str(body).unwrap();
        let market = batch.market.unwrap();
        assert_eq!(market.token, "$doge");
        assert_eq!(market.price, "0.1234");
        assert_eq!(market.volume, r#"{"DOGE":"1"}"#);
        let social = batch.social.unwrap();
        assert_eq!(social.influencer, "@ansem");
        assert_eq!(social.mentions, 42);
    }

    #[test]
    fn test_numeric_price_is_rendered_as_text() {
        let body = r#"{"tweets":[],"onchain_data":{"token":"$btc","price":65000.5}}"#;
        let market = serde_json::from_str::<TweetBatch>(body)
            .unwrap()
            .market
            .unwrap();
        assert_eq!(market.price, "65000.5");
        assert_eq!(market.volume, "N/A");
    }

    #[test]
    fn test_broken_context_is_dropped() {
        let body = r#"{"tweets":["x"],"social_data":{"token":"$ETH"}}"#;
        let batch: TweetBatch = serde_json::from_str(body).unwrap();
        assert_eq!(batch.tweets, vec!["x".to_string()]);
        assert!(batch.social.is_none());
    }

    #[test]
    fn test_missing_tweets_is_an_error() {
        assert!(serde_json::from_str::<TweetBatch>(r#"{"onchain_data":{}}"#).is_err());
        assert!(serde_json::from_str::<TweetBatch>(r#"{"tweets":"nope"}"#).is_err());
        assert!(serde_json::from_str::<TweetBatch>(r#"{"tweets":[1,2]}"#).is_err());
    }
}
