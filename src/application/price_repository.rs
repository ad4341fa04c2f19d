// Repository trait for token price history
use crate::domain::series::Series;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Parameters of a single price history request
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuery {
    pub tokens: Vec<String>,
    pub chain_id: String,
    pub date_range: String,
}

/// Price history of one token
#[derive(Debug, Clone)]
pub struct PriceHistory {
    pub series: Series,
    /// None when the API did not report a change figure
    pub price_change_percentage: Option<f64>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("pricing API responded with status {0}: {1}")]
    Status(u16, String),

    #[error("malformed pricing API response: {0}")]
    Decode(String),

    #[error("token {0} missing from pricing API response")]
    MissingToken(String),
}

#[async_trait]
pub trait PriceRepository: Send + Sync {
    /// Fetch price history for every token in the query, keyed by token id.
    /// Either all requested tokens are returned or the call fails.
    async fn fetch_prices(
        &self,
        query: &PriceQuery,
    ) -> Result<HashMap<String, PriceHistory>, FetchError>;
}
