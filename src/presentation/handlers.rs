// HTTP request handlers
use crate::infrastructure::http_response::{accepts_brotli, html_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page::{render_page, render_unavailable};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Chart page with one tab per pair, or the fallback message if prices are unavailable
pub async fn chart_page(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);

    let html = match state.chart_service.load_page().await {
        Ok(page) => match render_page(&page) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Error rendering chart page: {}", e);
                render_unavailable()
            }
        },
        Err(e) => {
            tracing::error!("Error fetching prices: {}", e);
            render_unavailable()
        }
    };

    match html_response(StatusCode::OK, html, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Chart data as JSON, as handed to the charting library
pub async fn chart_data(State(state): State<Arc<AppState>>) -> Response {
    match state.chart_service.load_page().await {
        Ok(page) => Json(page).into_response(),
        Err(e) => {
            tracing::error!("Error fetching prices: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": "unavailable" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_service::ChartService;
    use crate::application::price_repository::{
        FetchError, PriceHistory, PriceQuery, PriceRepository,
    };
    use crate::domain::series::{ChartTime, TimePoint};
    use crate::infrastructure::astroport_repository::AstroportRepository;
    use crate::infrastructure::config::{MarketConfig, TokenConfig};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Pricing API client pointed at a port nothing listens on
    fn offline_repository() -> Arc<dyn PriceRepository> {
        Arc::new(
            AstroportRepository::new(
                "http://127.0.0.1:1/api/trpc".to_string(),
                Duration::from_secs(2),
            )
            .unwrap(),
        )
    }

    struct FixedRepository;

    #[async_trait]
    impl PriceRepository for FixedRepository {
        async fn fetch_prices(
            &self,
            query: &PriceQuery,
        ) -> Result<HashMap<String, PriceHistory>, FetchError> {
            Ok(query
                .tokens
                .iter()
                .map(|token| {
                    let history = PriceHistory {
                        series: vec![
                            TimePoint::new(ChartTime::Unix(1), 4.0),
                            TimePoint::new(ChartTime::Unix(2), 8.0),
                        ],
                        price_change_percentage: Some(1.0),
                    };
                    (token.clone(), history)
                })
                .collect())
        }
    }

    fn state(repository: Arc<dyn PriceRepository>) -> Arc<AppState> {
        let market = MarketConfig {
            chain_id: "neutron-1".to_string(),
            date_range: "D7".to_string(),
            base: TokenConfig {
                symbol: "ATOM".to_string(),
                denom: "atom".to_string(),
            },
            quote: TokenConfig {
                symbol: "NTRN".to_string(),
                denom: "untrn".to_string(),
            },
        };

        Arc::new(AppState {
            chart_service: ChartService::new(repository, market),
        })
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_chart_page_fetch_failure_renders_fallback() {
        let response = chart_page(HeaderMap::new(), State(state(offline_repository()))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("<main>Something went wrong. Please, try again</main>"));
        assert!(!body.contains("<script"));
        assert!(!body.contains("role=\"tab\""));
    }

    #[tokio::test]
    async fn test_chart_page_renders_tabs() {
        let response = chart_page(HeaderMap::new(), State(state(Arc::new(FixedRepository)))).await;

        let body = body_string(response).await;
        assert!(body.contains(">ATOM/NTRN</button>"));
        assert!(body.contains(">ATOM/USD</button>"));
        assert!(body.contains(">NTRN/USD</button>"));
        assert!(body.contains("Average Price: $6.00"));
        assert!(body.contains("Average Price: $1.00"));
        assert!(!body.contains("Something went wrong"));
    }

    #[tokio::test]
    async fn test_chart_data_json() {
        let response = chart_data(State(state(Arc::new(FixedRepository)))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        let charts = json["charts"].as_array().unwrap();
        assert_eq!(charts.len(), 3);
        assert_eq!(charts[0]["pair"], "basequote");
        assert_eq!(charts[0]["summary"]["max"], 1.0);
        assert_eq!(charts[1]["series"][1]["value"], 8.0);
    }

    #[tokio::test]
    async fn test_chart_data_unavailable() {
        let response = chart_data(State(state(offline_repository()))).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["error"], "unavailable");
    }
}
