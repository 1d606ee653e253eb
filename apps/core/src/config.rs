use crate::providers::Coordinates;
use std::env;

pub const WEATHER_API_KEY_VAR: &str = "ORBIT_WEATHER_API_KEY";
pub const NEWS_API_KEY_VAR: &str = "ORBIT_NEWS_API_KEY";
pub const NEWS_COUNTRY_VAR: &str = "ORBIT_NEWS_COUNTRY";
pub const UNITS_VAR: &str = "ORBIT_UNITS";
pub const LATITUDE_VAR: &str = "ORBIT_LATITUDE";
pub const LONGITUDE_VAR: &str = "ORBIT_LONGITUDE";

pub const DEFAULT_NEWS_COUNTRY: &str = "us";
pub const NEWS_PAGE_SIZE: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    pub const fn temperature_symbol(self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Some(Self::Metric),
            "imperial" | "f" | "fahrenheit" => Some(Self::Imperial),
            _ => None,
        }
    }
}

/// Provider credentials and request settings.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub weather_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub news_country: String,
    pub units: Units,
    /// Fixed position for environments without a geolocation service.
    pub coordinates: Option<Coordinates>,
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Blank values count as missing and
    /// unparseable ones fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let units = value(UNITS_VAR).map_or(Units::Metric, |raw| {
            Units::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(units = %raw, "unknown units, using metric");
                Units::Metric
            })
        });

        let latitude = value(LATITUDE_VAR).and_then(|raw| raw.parse::<f64>().ok());
        let longitude = value(LONGITUDE_VAR).and_then(|raw| raw.parse::<f64>().ok());

        Self {
            weather_api_key: value(WEATHER_API_KEY_VAR),
            news_api_key: value(NEWS_API_KEY_VAR),
            news_country: value(NEWS_COUNTRY_VAR)
                .map_or_else(|| DEFAULT_NEWS_COUNTRY.to_string(), |raw| raw.to_lowercase()),
            units,
            coordinates: Coordinates::checked(latitude, longitude),
        }
    }
}
