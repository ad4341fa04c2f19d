// Astroport pricing API repository implementation
use crate::application::price_repository::{FetchError, PriceHistory, PriceQuery, PriceRepository};
use crate::domain::series::Series;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AstroportRepository {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TrpcResponse {
    result: TrpcResult,
}

#[derive(Debug, Deserialize)]
struct TrpcResult {
    data: TrpcData,
}

#[derive(Debug, Deserialize)]
struct TrpcData {
    json: HashMap<String, TokenPrices>,
}

// minValue/maxValue are also sent but levels are recomputed from the series
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenPrices {
    series: Series,
    #[serde(default)]
    price_change_percentage: Option<f64>,
}

impl AstroportRepository {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_query_url(&self, query: &PriceQuery) -> String {
        let input = serde_json::json!({
            "json": {
                "tokens": query.tokens,
                "chainId": query.chain_id,
                "dateRange": query.date_range,
            }
        });

        format!(
            "{}/charts.prices?input={}",
            self.base_url,
            urlencoding::encode(&input.to_string())
        )
    }

    fn parse_prices(
        body: &str,
        query: &PriceQuery,
    ) -> Result<HashMap<String, PriceHistory>, FetchError> {
        let response: TrpcResponse =
            serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
        let mut tokens = response.result.data.json;

        query
            .tokens
            .iter()
            .map(|token| -> Result<(String, PriceHistory), FetchError> {
                let prices = tokens
                    .remove(token)
                    .ok_or_else(|| FetchError::MissingToken(token.clone()))?;

                Ok((
                    token.clone(),
                    PriceHistory {
                        series: prices.series,
                        price_change_percentage: prices.price_change_percentage,
                    },
                ))
            })
            .collect()
    }
}

#[async_trait]
impl PriceRepository for AstroportRepository {
    async fn fetch_prices(
        &self,
        query: &PriceQuery,
    ) -> Result<HashMap<String, PriceHistory>, FetchError> {
        let url = self.build_query_url(query);
        tracing::debug!("Fetching prices: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16(), body));
        }

        let prices = Self::parse_prices(&body, query)?;
        tracing::debug!(
            "Fetched {} price series for chain {}",
            prices.len(),
            query.chain_id
        );

        Ok(prices)
    }
}
