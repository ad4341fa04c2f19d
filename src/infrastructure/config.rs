use crate::application::price_repository::PriceQuery;
use anyhow::Context;
use serde::Deserialize;

const ATOM_DENOM: &str = "ibc/C4CFF46FD6DE35CA4CF4CE031E643C8FDC9BA4B99AE598E9B0ED98FE3A2319F9";
const NTRN_DENOM: &str = "untrn";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub api: ApiSettings,
    pub market: MarketConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketConfig {
    pub chain_id: String,
    pub date_range: String,
    pub base: TokenConfig,
    pub quote: TokenConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TokenConfig {
    pub symbol: String,
    pub denom: String,
}

impl MarketConfig {
    /// Single request covering both tokens of the market
    pub fn price_query(&self) -> PriceQuery {
        PriceQuery {
            tokens: vec![self.base.denom.clone(), self.quote.denom.clone()],
            chain_id: self.chain_id.clone(),
            date_range: self.date_range.clone(),
        }
    }
}

/// Load `config/charts.{toml,...}` if present, then `CHARTS__*` environment overrides
pub fn load_config() -> anyhow::Result<AppConfig> {
    load_config_with(config::File::with_name("config/charts").required(false))
}

fn load_config_with<S>(file: S) -> anyhow::Result<AppConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("server.bind", "0.0.0.0:8080")?
        .set_default("api.base_url", "https://app.astroport.fi/api/trpc")?
        .set_default("api.timeout_secs", 30_i64)?
        .set_default("market.chain_id", "neutron-1")?
        .set_default("market.date_range", "D7")?
        .set_default("market.base.symbol", "ATOM")?
        .set_default("market.base.denom", ATOM_DENOM)?
        .set_default("market.quote.symbol", "NTRN")?
        .set_default("market.quote.denom", NTRN_DENOM)?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("CHARTS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_defaults() {
        let config = load_config_with(File::from_str("", FileFormat::Toml)).unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.market.chain_id, "neutron-1");
        assert_eq!(config.market.base.symbol, "ATOM");
        assert_eq!(config.market.quote.denom, "untrn");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            [api]
            timeout_secs = 5

            [market]
            date_range = "M1"

            [market.quote]
            symbol = "ASTRO"
            denom = "ibc/ASTRO"
        "#;
        let config = load_config_with(File::from_str(toml, FileFormat::Toml)).unwrap();

        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.base_url, "https://app.astroport.fi/api/trpc");
        assert_eq!(config.market.base.denom, ATOM_DENOM);
        assert_eq!(
            config.market.quote,
            TokenConfig {
                symbol: "ASTRO".to_string(),
                denom: "ibc/ASTRO".to_string(),
            }
        );

        let query = config.market.price_query();
        assert_eq!(query.tokens, vec![ATOM_DENOM.to_string(), "ibc/ASTRO".to_string()]);
        assert_eq!(query.date_range, "M1");
    }
}
