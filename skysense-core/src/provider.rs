use crate::{Config, ForecastError, ForecastSeries, provider::weatherbit::WeatherbitProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherbit;

/// Number of forecast days requested per city.
pub const FORECAST_DAYS: u8 = 7;

/// Source of multi-day forecasts for a named city.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastSeries, ForecastError>;
}

/// Construct the forecast provider described by config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let api_key = config.api_key()?;

    let provider = WeatherbitProvider::new(
        api_key.to_owned(),
        config.base_url().to_owned(),
        config.timeout(),
    )?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_key_is_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg);
        assert!(provider.is_ok());
    }
}
