use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Request, StatusCode};
use serde::Deserialize;
use std::{fmt, time::Duration};

use crate::{
    ForecastError,
    error::truncate_body,
    model::{ForecastDay, ForecastSeries},
};

use super::{FORECAST_DAYS, ForecastProvider};

/// Daily forecasts from Weatherbit (`/v2.0/forecast/daily`).
#[derive(Clone)]
pub struct WeatherbitProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherbitProvider {
    pub fn new(
        api_key: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, ForecastError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { api_key, base_url, http })
    }

    /// The GET request for `city`. Every query value is URL-encoded.
    pub fn build_request(&self, city: &str) -> Result<Request, ForecastError> {
        let days = FORECAST_DAYS.to_string();

        let request = self
            .http
            .get(&self.base_url)
            .query(&[("key", self.api_key.as_str()), ("city", city), ("days", days.as_str())])
            .build()
            .map_err(transport_error)?;

        Ok(request)
    }

    /// Performs the request and returns the whole response body.
    pub async fn fetch_body(&self, city: &str) -> Result<String, ForecastError> {
        let request = self.build_request(city)?;
        tracing::debug!(%city, "requesting forecast");

        let res = self.http.execute(request).await.map_err(transport_error)?;

        let status = res.status();
        // Weatherbit answers an unknown city with an empty 204.
        if status == StatusCode::NO_CONTENT {
            return Err(ForecastError::Empty { city: city.to_string() });
        }

        let body = res.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(ForecastError::Status { status, body: truncate_body(&body) });
        }

        tracing::trace!(%city, bytes = body.len(), "forecast body received");
        Ok(body)
    }
}

/// reqwest errors carry the request URL, and the URL carries the API key.
fn transport_error(err: reqwest::Error) -> ForecastError {
    ForecastError::Transport(err.without_url())
}

impl fmt::Debug for WeatherbitProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherbitProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Map a Weatherbit daily forecast body to a series for `city`.
///
/// A missing, null or empty `data` array is [`ForecastError::Empty`]. Any
/// malformed element fails the whole body, so no partial series escapes.
pub fn parse_forecast(city: &str, body: &str) -> Result<ForecastSeries, ForecastError> {
    let parsed: WbResponse = serde_json::from_str(body)?;

    let data = parsed.data.unwrap_or_default();
    if data.is_empty() {
        return Err(ForecastError::Empty { city: city.to_string() });
    }

    let days = data
        .into_iter()
        .map(|day| ForecastDay {
            city: city.to_string(),
            date: day.datetime,
            description: day.weather.description,
            temperature_c: day.temp,
            humidity_pct: day.rh,
            wind_speed_mps: day.wind_spd,
            pressure_mb: day.pres,
        })
        .collect();

    Ok(ForecastSeries::new(city, days))
}

#[derive(Debug, Deserialize)]
struct WbWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WbDay {
    datetime: NaiveDate,
    weather: WbWeather,
    temp: f64,
    rh: f64,
    wind_spd: f64,
    pres: f64,
}

#[derive(Debug, Deserialize)]
struct WbResponse {
    data: Option<Vec<WbDay>>,
}

#[async_trait]
impl ForecastProvider for WeatherbitProvider {
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastSeries, ForecastError> {
        let body = self.fetch_body(city).await?;
        let series = parse_forecast(city, &body)?;

        tracing::info!(%city, days = series.len(), "forecast fetched");
        Ok(series)
    }
}
