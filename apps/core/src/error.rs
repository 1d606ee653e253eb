use thiserror::Error;

/// Everything that can go wrong while loading a remote feature.
///
/// None of these escape to the shell: the cache stores them and the feature
/// panel renders [`FetchError::placeholder`] in their place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("location access denied")]
    LocationDenied,

    #[error("geolocation unavailable: {0}")]
    LocationUnavailable(String),

    #[error("no API key configured for {0}")]
    MissingCredential(&'static str),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("provider rejected the request: {0}")]
    Provider(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Inline message shown in the feature panel.
    pub fn placeholder(&self) -> String {
        match self {
            Self::LocationDenied => {
                "Location access denied. Allow location access to see local weather.".to_string()
            }
            Self::LocationUnavailable(_) => {
                "Geolocation is not available, so local weather cannot be shown.".to_string()
            }
            Self::MissingCredential(provider) => {
                format!("Unable to load {provider}: no API key is configured.")
            }
            Self::Provider(message) => format!("Unable to load data: {message}"),
            Self::Network(_) | Self::Status(_) | Self::Decode(_) => {
                "Unable to load data right now. Please try again later.".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
