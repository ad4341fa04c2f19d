// Chart service - Use case for building the price chart page
use crate::application::price_repository::{FetchError, PriceHistory, PriceRepository};
use crate::domain::chart::{ChartPage, Pair, PairChart};
use crate::domain::series::{Series, align_ratio, summarize};
use crate::infrastructure::config::MarketConfig;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn PriceRepository>,
    market: MarketConfig,
}

impl ChartService {
    pub fn new(repository: Arc<dyn PriceRepository>, market: MarketConfig) -> Self {
        Self { repository, market }
    }

    pub async fn load_page(&self) -> Result<ChartPage, FetchError> {
        let query = self.market.price_query();
        let mut prices = self.repository.fetch_prices(&query).await?;

        let base = take_history(&mut prices, &self.market.base.denom)?;
        let quote = take_history(&mut prices, &self.market.quote.denom)?;

        let charts = Pair::ALL
            .iter()
            .map(|&pair| match pair {
                Pair::BaseQuote => {
                    self.pair_chart(pair, cross_rate(&base.series, &quote.series), None)
                }
                Pair::BaseUsd => {
                    self.pair_chart(pair, base.series.clone(), base.price_change_percentage)
                }
                Pair::QuoteUsd => {
                    self.pair_chart(pair, quote.series.clone(), quote.price_change_percentage)
                }
            })
            .collect();

        Ok(ChartPage::new(charts))
    }

    fn pair_chart(
        &self,
        pair: Pair,
        series: Series,
        price_change_percentage: Option<f64>,
    ) -> PairChart {
        let title = pair.title(&self.market.base.symbol, &self.market.quote.symbol);

        let summary = match summarize(&series) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("No chart for {}: {}", title, e);
                None
            }
        };

        PairChart {
            pair,
            title,
            series,
            summary,
            price_change_percentage,
        }
    }
}

fn take_history(
    prices: &mut HashMap<String, PriceHistory>,
    denom: &str,
) -> Result<PriceHistory, FetchError> {
    prices
        .remove(denom)
        .ok_or_else(|| FetchError::MissingToken(denom.to_string()))
}

/// Derived base/quote series; points divided by a zero quote price are left out
fn cross_rate(base: &Series, quote: &Series) -> Series {
    let mut series = align_ratio(base, quote);
    let aligned = series.len();
    series.retain(|p| p.value.is_finite());

    if series.len() < aligned {
        tracing::warn!(
            "Dropped {} non-finite cross rate points (zero quote price)",
            aligned - series.len()
        );
    }

    series
}
