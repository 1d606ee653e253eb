//! Request builders and response decoding for the weather and news providers.
//!
//! Transport is left to the front ends (browser `fetch`, `reqwest`); they pass
//! the status code and body back here so both decode identically.

use crate::config::{Config, Units, NEWS_PAGE_SIZE};
use crate::error::FetchError;
use crate::feature::{FeatureContent, Headline, WeatherReport, MISSING_DESCRIPTION};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::form_urlencoded;

pub const WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const NEWS_ENDPOINT: &str = "https://newsapi.org/v2/top-headlines";
pub const MAX_HEADLINES: usize = 5;
const REMOVED_ARTICLE_TITLE: &str = "[Removed]";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Both halves present and within range, or nothing.
    pub fn checked(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        let (latitude, longitude) = (latitude?, longitude?);
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            tracing::warn!(latitude, longitude, "ignoring out-of-range coordinates");
            None
        }
    }
}

pub fn weather_url(config: &Config, position: Coordinates) -> Result<String, FetchError> {
    let key = config
        .weather_api_key
        .as_deref()
        .ok_or(FetchError::MissingCredential("weather"))?;

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("lat", &position.latitude.to_string())
        .append_pair("lon", &position.longitude.to_string())
        .append_pair("units", config.units.as_query())
        .append_pair("appid", key)
        .finish();

    Ok(format!("{WEATHER_ENDPOINT}?{query}"))
}

pub fn news_url(config: &Config) -> Result<String, FetchError> {
    let key = config
        .news_api_key
        .as_deref()
        .ok_or(FetchError::MissingCredential("news"))?;

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("country", &config.news_country)
        .append_pair("pageSize", &NEWS_PAGE_SIZE.to_string())
        .append_pair("apiKey", key)
        .finish();

    Ok(format!("{NEWS_ENDPOINT}?{query}"))
}

#[derive(Debug, Deserialize)]
struct ProviderMessage {
    message: Option<String>,
}

/// Maps a non-success HTTP status to an error, preferring the provider's own
/// message when the body carries one.
pub fn check_status(status: u16, body: &str) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    match serde_json::from_str::<ProviderMessage>(body) {
        Ok(ProviderMessage {
            message: Some(message),
        }) => Err(FetchError::Provider(message)),
        _ => Err(FetchError::Status(status)),
    }
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: Option<String>,
    main: MainReadings,
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

pub fn parse_weather(body: &str, units: Units) -> Result<FeatureContent, FetchError> {
    let response: WeatherResponse = serde_json::from_str(body)?;
    let description = response
        .weather
        .into_iter()
        .next()
        .map_or_else(|| "unknown conditions".to_string(), |c| c.description);

    Ok(FeatureContent::Weather(WeatherReport {
        location: response.name.filter(|name| !name.is_empty()),
        description,
        temperature: response.main.temp,
        feels_like: response.main.feels_like,
        temp_min: response.main.temp_min,
        temp_max: response.main.temp_max,
        humidity: response.main.humidity,
        pressure: response.main.pressure,
        units,
    }))
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    published_at: Option<DateTime<Utc>>,
}

pub fn parse_news(body: &str) -> Result<FeatureContent, FetchError> {
    let response: NewsResponse = serde_json::from_str(body)?;
    if response.status != "ok" {
        return Err(FetchError::Provider(
            response
                .message
                .unwrap_or_else(|| format!("status {}", response.status)),
        ));
    }

    let articles: Vec<Headline> = response
        .articles
        .into_iter()
        .filter_map(|article| {
            let title = article.title.filter(|t| !t.is_empty() && t != REMOVED_ARTICLE_TITLE)?;
            let url = article.url.filter(|u| !u.is_empty())?;
            let description = article
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| MISSING_DESCRIPTION.to_string());
            Some(Headline {
                title,
                description,
                url,
                published_at: article.published_at,
            })
        })
        .take(MAX_HEADLINES)
        .collect();

    if articles.is_empty() {
        Ok(FeatureContent::NoNews)
    } else {
        Ok(FeatureContent::Headlines { articles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER_BODY: &str = r#"{
        "name": "Porto",
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky"}],
        "main": {"temp": 19.5, "feels_like": 18.9, "temp_min": 17.0,
                 "temp_max": 21.2, "pressure": 1018, "humidity": 55}
    }"#;

    fn configured() -> Config {
        Config {
            weather_api_key: Some("w key".to_string()),
            news_api_key: Some("n-key".to_string()),
            news_country: "us".to_string(),
            ..Config::default()
        }
    }

    fn article(title: &str, description: Option<&str>) -> String {
        let description = description.map_or("null".to_string(), |d| format!("\"{d}\""));
        format!(
            r#"{{"title":"{title}","description":{description},"url":"https://news.test/{title}","publishedAt":"2026-10-17T08:30:00Z"}}"#
        )
    }

    #[test]
    fn weather_url_carries_position_units_and_key() {
        let url = weather_url(
            &configured(),
            Coordinates {
                latitude: 41.15,
                longitude: -8.61,
            },
        );
        assert_eq!(
            url.as_deref(),
            Ok("https://api.openweathermap.org/data/2.5/weather?lat=41.15&lon=-8.61&units=metric&appid=w+key")
        );
    }

    #[test]
    fn missing_keys_are_reported_not_panicked() {
        let config = Config::default();
        assert_eq!(
            news_url(&config),
            Err(FetchError::MissingCredential("news"))
        );
        assert_eq!(
            weather_url(&config, Coordinates::default()),
            Err(FetchError::MissingCredential("weather"))
        );
    }

    #[test]
    fn news_url_uses_country_and_page_size() {
        let url = news_url(&configured()).unwrap_or_default();
        assert!(url.starts_with(NEWS_ENDPOINT));
        assert!(url.contains("country=us"));
        assert!(url.contains("pageSize=5"));
        assert!(url.contains("apiKey=n-key"));
    }

    #[test]
    fn parses_weather_fields() {
        let Ok(FeatureContent::Weather(report)) = parse_weather(WEATHER_BODY, Units::Metric) else {
            panic!("expected a weather report");
        };
        assert_eq!(report.location.as_deref(), Some("Porto"));
        assert_eq!(report.description, "clear sky");
        assert_eq!(report.humidity, 55);
        assert_eq!(report.pressure, 1018);
        assert!((report.temp_max - 21.2).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_weather_is_a_decode_error() {
        assert!(matches!(
            parse_weather("{\"main\":{}}", Units::Metric),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn news_keeps_at_most_five_articles() {
        let articles: Vec<String> = (0..8).map(|i| article(&format!("t{i}"), Some("d"))).collect();
        let body = format!(r#"{{"status":"ok","articles":[{}]}}"#, articles.join(","));
        let Ok(FeatureContent::Headlines { articles }) = parse_news(&body) else {
            panic!("expected headlines");
        };
        assert_eq!(articles.len(), MAX_HEADLINES);
        assert_eq!(articles[0].title, "t0");
        assert!(articles[0].published_at.is_some());
    }

    #[test]
    fn missing_description_uses_fallback() {
        let body = format!(r#"{{"status":"ok","articles":[{}]}}"#, article("a", None));
        let Ok(FeatureContent::Headlines { articles }) = parse_news(&body) else {
            panic!("expected headlines");
        };
        assert_eq!(articles[0].description, MISSING_DESCRIPTION);
    }

    #[test]
    fn zero_articles_yield_no_news() {
        let body = r#"{"status":"ok","totalResults":0,"articles":[]}"#;
        assert_eq!(parse_news(body), Ok(FeatureContent::NoNews));
    }

    #[test]
    fn removed_articles_are_skipped() {
        let body = format!(
            r#"{{"status":"ok","articles":[{}]}}"#,
            article(REMOVED_ARTICLE_TITLE, None)
        );
        assert_eq!(parse_news(&body), Ok(FeatureContent::NoNews));
    }

    #[test]
    fn provider_error_body_is_surfaced() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        assert_eq!(
            parse_news(body),
            Err(FetchError::Provider("Your API key is invalid.".to_string()))
        );
    }

    #[test]
    fn status_check_prefers_provider_message() {
        assert_eq!(check_status(200, ""), Ok(()));
        assert_eq!(
            check_status(401, r#"{"cod":401,"message":"Invalid API key"}"#),
            Err(FetchError::Provider("Invalid API key".to_string()))
        );
        assert_eq!(check_status(503, "<html>"), Err(FetchError::Status(503)));
    }

    #[test]
    fn coordinates_must_be_complete_and_in_range() {
        assert!(Coordinates::checked(Some(10.0), None).is_none());
        assert!(Coordinates::checked(Some(91.0), Some(0.0)).is_none());
        assert!(Coordinates::checked(Some(-33.9), Some(151.2)).is_some());
    }
}
