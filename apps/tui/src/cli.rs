use clap::{CommandFactory, Parser, ValueEnum};
use orbit_core::config::{
    LATITUDE_VAR, LONGITUDE_VAR, NEWS_COUNTRY_VAR, UNITS_VAR,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeatureArg {
    News,
    Weather,
    Calendar,
    Notes,
}

impl FeatureArg {
    pub const fn label(self) -> &'static str {
        match self {
            Self::News => "News",
            Self::Weather => "Weather",
            Self::Calendar => "Calendar",
            Self::Notes => "Notes",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "orbit", version, about = "Radial feature launcher")]
pub struct CliArgs {
    /// Print the menu layout (or a feature with --feature) and exit
    #[arg(long)]
    pub headless: bool,

    /// Feature to load in headless mode
    #[arg(long, value_enum, requires = "headless")]
    pub feature: Option<FeatureArg>,

    /// Print headless output as JSON
    #[arg(long)]
    pub json: bool,

    /// Viewport width in pixels used for the headless layout
    #[arg(long, value_name = "PX", default_value_t = 1200.0)]
    pub width: f64,

    /// Write debug logs to the log file
    #[arg(long)]
    pub debug: bool,

    /// Latitude used for local weather
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude used for local weather
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Temperature units: metric or imperial
    #[arg(long)]
    pub units: Option<String>,

    /// Two-letter country code for headlines
    #[arg(long)]
    pub country: Option<String>,

    /// Start in light mode
    #[arg(long)]
    pub light: bool,

    /// Width of one terminal cell in pixels
    #[arg(long = "cell-width", value_name = "PX", default_value_t = 8)]
    pub cell_width: u16,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(lat) = self.lat {
            std::env::set_var(LATITUDE_VAR, lat.to_string());
        }
        if let Some(lon) = self.lon {
            std::env::set_var(LONGITUDE_VAR, lon.to_string());
        }
        if let Some(units) = &self.units {
            std::env::set_var(UNITS_VAR, units);
        }
        if let Some(country) = &self.country {
            std::env::set_var(NEWS_COUNTRY_VAR, country);
        }
        if self.debug {
            std::env::set_var("ORBIT_LOG", "1");
        }
    }

    #[cfg(test)]
    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headless_feature_flags() {
        let args = CliArgs::try_parse_from(["orbit", "--headless", "--feature", "news", "--json"]);
        let Ok(args) = args else {
            panic!("arguments should parse");
        };
        assert!(args.headless);
        assert!(args.json);
        assert_eq!(args.feature, Some(FeatureArg::News));
    }

    #[test]
    fn feature_requires_headless() {
        assert!(CliArgs::try_parse_from(["orbit", "--feature", "weather"]).is_err());
    }

    #[test]
    fn accepts_negative_coordinates() {
        let Ok(args) = CliArgs::try_parse_from(["orbit", "--lat", "-33.8", "--lon", "151.2"]) else {
            panic!("coordinates should parse");
        };
        assert_eq!(args.lat, Some(-33.8));
        assert_eq!(args.cell_width, 8);
    }

    #[test]
    fn help_mentions_headless() {
        assert!(CliArgs::help_text().contains("--headless"));
    }
}
