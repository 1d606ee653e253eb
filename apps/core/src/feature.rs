//! Content shown in the feature panel once an option is selected.

use crate::config::Units;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const NO_NEWS_MESSAGE: &str = "No news articles available right now.";
pub const MISSING_DESCRIPTION: &str = "No description available.";
pub const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureContent {
    Text { body: String },
    Weather(WeatherReport),
    Headlines { articles: Vec<Headline> },
    NoNews,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub location: Option<String>,
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
    #[serde(skip)]
    pub units: Units,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Heading,
    Body,
    Muted,
    Link,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub text: String,
    pub style: LineStyle,
}

impl ContentLine {
    pub fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn blank() -> Self {
        Self::new(LineStyle::Body, "")
    }
}

impl FeatureContent {
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text { body: body.into() }
    }

    /// Links the user can open from the panel, in display order.
    pub fn links(&self) -> Vec<&str> {
        match self {
            Self::Headlines { articles } => articles.iter().map(|a| a.url.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    pub fn lines(&self) -> Vec<ContentLine> {
        match self {
            Self::Text { body } => body
                .lines()
                .map(|line| ContentLine::new(LineStyle::Body, line))
                .collect(),
            Self::Weather(report) => report.lines(),
            Self::Headlines { articles } => {
                let mut lines = Vec::new();
                for (index, article) in articles.iter().enumerate() {
                    if index > 0 {
                        lines.push(ContentLine::blank());
                    }
                    lines.extend(article.lines(index + 1));
                }
                lines
            }
            Self::NoNews => vec![ContentLine::new(LineStyle::Muted, NO_NEWS_MESSAGE)],
        }
    }
}

impl WeatherReport {
    pub fn lines(&self) -> Vec<ContentLine> {
        let symbol = self.units.temperature_symbol();
        vec![
            ContentLine::new(
                LineStyle::Heading,
                self.location.as_deref().unwrap_or("Your location"),
            ),
            ContentLine::new(LineStyle::Body, capitalize(&self.description)),
            ContentLine::new(
                LineStyle::Body,
                format!(
                    "Temperature: {:.1}{symbol} (feels like {:.1}{symbol})",
                    self.temperature, self.feels_like
                ),
            ),
            ContentLine::new(
                LineStyle::Body,
                format!(
                    "Min / Max: {:.1}{symbol} / {:.1}{symbol}",
                    self.temp_min, self.temp_max
                ),
            ),
            ContentLine::new(LineStyle::Body, format!("Humidity: {}%", self.humidity)),
            ContentLine::new(LineStyle::Body, format!("Pressure: {} hPa", self.pressure)),
        ]
    }
}

impl Headline {
    fn lines(&self, number: usize) -> Vec<ContentLine> {
        let mut lines = vec![
            ContentLine::new(LineStyle::Heading, format!("{number}. {}", self.title)),
            ContentLine::new(LineStyle::Body, self.description.clone()),
        ];
        if let Some(published) = self.published_at {
            lines.push(ContentLine::new(
                LineStyle::Muted,
                published.format("%Y-%m-%d %H:%M UTC").to_string(),
            ));
        }
        lines.push(ContentLine::new(LineStyle::Link, self.url.clone()));
        lines
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> WeatherReport {
        WeatherReport {
            location: Some("Lisbon".to_string()),
            description: "scattered clouds".to_string(),
            temperature: 21.34,
            feels_like: 20.0,
            temp_min: 18.0,
            temp_max: 23.5,
            humidity: 60,
            pressure: 1012,
            units: Units::Metric,
        }
    }

    #[test]
    fn weather_block_has_fixed_structure() {
        let lines = report().lines();
        let texts: Vec<&str> = lines.iter().map(|line| line.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Lisbon",
                "Scattered clouds",
                "Temperature: 21.3°C (feels like 20.0°C)",
                "Min / Max: 18.0°C / 23.5°C",
                "Humidity: 60%",
                "Pressure: 1012 hPa",
            ]
        );
        assert_eq!(lines[0].style, LineStyle::Heading);
    }

    #[test]
    fn imperial_reports_use_fahrenheit() {
        let mut report = report();
        report.units = Units::Imperial;
        assert!(report.lines()[2].text.contains("°F"));
    }

    #[test]
    fn headlines_are_numbered_and_linked() {
        let content = FeatureContent::Headlines {
            articles: vec![
                Headline {
                    title: "First".into(),
                    description: "One".into(),
                    url: "https://example.com/1".into(),
                    published_at: None,
                },
                Headline {
                    title: "Second".into(),
                    description: "Two".into(),
                    url: "https://example.com/2".into(),
                    published_at: None,
                },
            ],
        };
        let lines = content.lines();
        assert_eq!(lines[0].text, "1. First");
        assert!(lines.iter().any(|line| line.text == "2. Second"));
        assert_eq!(
            content.links(),
            vec!["https://example.com/1", "https://example.com/2"]
        );
    }

    #[test]
    fn no_news_renders_explicit_message() {
        let lines = FeatureContent::NoNews.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, NO_NEWS_MESSAGE);
    }

    #[test]
    fn multi_line_text_splits_per_line() {
        assert_eq!(FeatureContent::text("a\nb").lines().len(), 2);
    }
}
