// Shared state for the Orbit launcher, used by both the web and terminal front ends
pub mod animation;
pub mod cache;
pub mod config;
pub mod error;
pub mod feature;
pub mod layout;
pub mod menu;
pub mod nav;
pub mod providers;
pub mod search;
pub mod theme;

pub use cache::{Begin, FeatureCache, FetchState, FetchTicket};
pub use config::{Config, Units};
pub use error::FetchError;
pub use feature::{FeatureContent, Headline, WeatherReport};
pub use menu::{FeatureSource, MenuEvent, MenuOption, OptionId, RadialMenu, RemoteFeature, Selection};
pub use nav::NavKey;
pub use search::{SearchEvent, SearchOutcome, SearchPanel};
pub use theme::{Palette, Rgb, Theme, ThemeContext};
