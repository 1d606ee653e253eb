//! Remote feature loading for the terminal build.
//!
//! Each fetch runs as its own task and reports back over a channel. The
//! [`Fetcher`] aborts whatever is still running when it is dropped.

use color_eyre::Result;
use orbit_core::providers::{self, Coordinates};
use orbit_core::{Config, FeatureContent, FetchError, FetchTicket, RemoteFeature};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = concat!("orbit/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<FeatureContent, FetchError>,
}

pub struct Fetcher {
    client: reqwest::Client,
    config: Arc<Config>,
    sender: UnboundedSender<FetchOutcome>,
    tasks: Vec<JoinHandle<()>>,
}

impl Fetcher {
    pub fn new(config: Config) -> Result<(Self, UnboundedReceiver<FetchOutcome>)> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let (sender, receiver) = mpsc::unbounded_channel();

        Ok((
            Self {
                client,
                config: Arc::new(config),
                sender,
                tasks: Vec::new(),
            },
            receiver,
        ))
    }

    pub fn spawn(&mut self, ticket: FetchTicket) {
        self.tasks.retain(|task| !task.is_finished());

        let client = self.client.clone();
        let config = Arc::clone(&self.config);
        let sender = self.sender.clone();

        self.tasks.push(tokio::spawn(async move {
            let result = load(&client, &config, ticket.feature).await;
            // The receiver is gone once the app shuts down
            let _ = sender.send(FetchOutcome { ticket, result });
        }));
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }

    pub fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        self.abort_all();
    }
}

pub async fn load(
    client: &reqwest::Client,
    config: &Config,
    feature: RemoteFeature,
) -> Result<FeatureContent, FetchError> {
    tracing::info!(provider = feature.provider(), "fetching");
    match feature {
        RemoteFeature::Weather => {
            let position = locate(config)?;
            let url = providers::weather_url(config, position)?;
            let body = get(client, &url).await?;
            providers::parse_weather(&body, config.units)
        }
        RemoteFeature::News => {
            let url = providers::news_url(config)?;
            let body = get(client, &url).await?;
            providers::parse_news(&body)
        }
    }
}

/// The terminal has no geolocation service; the position comes from config.
fn locate(config: &Config) -> Result<Coordinates, FetchError> {
    config.coordinates.ok_or_else(|| {
        FetchError::LocationUnavailable(
            "set ORBIT_LATITUDE and ORBIT_LONGITUDE or pass --lat/--lon".to_string(),
        )
    })
}

async fn get(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|error| FetchError::Network(error.without_url().to_string()))?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|error| FetchError::Network(error.without_url().to_string()))?;

    providers::check_status(status, &body)?;
    Ok(body)
}
