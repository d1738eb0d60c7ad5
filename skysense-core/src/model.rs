use chrono::NaiveDate;

/// One day of a city's forecast, in the provider's units.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub city: String,
    pub date: NaiveDate,
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_mps: f64,
    pub pressure_mb: f64,
}

/// Days for one city, in the order the provider returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    pub city: String,
    pub days: Vec<ForecastDay>,
}

impl ForecastSeries {
    pub fn new(city: impl Into<String>, days: Vec<ForecastDay>) -> Self {
        Self { city: city.into(), days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.days.iter().map(|d| d.temperature_c)
    }
}
