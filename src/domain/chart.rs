// Chart page domain models
use super::series::{Series, SeriesSummary};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pair {
    BaseQuote,
    BaseUsd,
    QuoteUsd,
}

impl Pair {
    /// Tab order, first entry is the default tab
    pub const ALL: [Pair; 3] = [Pair::BaseQuote, Pair::BaseUsd, Pair::QuoteUsd];

    pub fn id(&self) -> &'static str {
        match self {
            Pair::BaseQuote => "basequote",
            Pair::BaseUsd => "baseusd",
            Pair::QuoteUsd => "quoteusd",
        }
    }

    pub fn title(&self, base: &str, quote: &str) -> String {
        match self {
            Pair::BaseQuote => format!("{}/{}", base, quote),
            Pair::BaseUsd => format!("{}/USD", base),
            Pair::QuoteUsd => format!("{}/USD", quote),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PairChart {
    pub pair: Pair,
    pub title: String,
    pub series: Series,
    /// None when the series has no points
    pub summary: Option<SeriesSummary>,
    pub price_change_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartPage {
    pub charts: Vec<PairChart>,
}

impl ChartPage {
    pub fn new(charts: Vec<PairChart>) -> Self {
        Self { charts }
    }

    pub fn default_pair(&self) -> Option<Pair> {
        self.charts.first().map(|c| c.pair)
    }
}
