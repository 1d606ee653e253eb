use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Promise;
use orbit_core::config::{
    LATITUDE_VAR, LONGITUDE_VAR, NEWS_API_KEY_VAR, NEWS_COUNTRY_VAR, UNITS_VAR,
    WEATHER_API_KEY_VAR,
};
use orbit_core::providers::{
    check_status, news_url, parse_news, parse_weather, weather_url, Coordinates,
};
use orbit_core::{Config, FeatureContent, FetchError, FetchTicket, RemoteFeature};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Position, Request, RequestInit, RequestMode, Response};

use crate::shell::Shell;

/// `GeolocationPositionError.PERMISSION_DENIED`
const PERMISSION_DENIED: u16 = 1;

/// Provider settings baked in at build time.
pub fn build_config() -> Config {
    Config::from_lookup(|name| {
        let value = match name {
            WEATHER_API_KEY_VAR => option_env!("ORBIT_WEATHER_API_KEY"),
            NEWS_API_KEY_VAR => option_env!("ORBIT_NEWS_API_KEY"),
            NEWS_COUNTRY_VAR => option_env!("ORBIT_NEWS_COUNTRY"),
            UNITS_VAR => option_env!("ORBIT_UNITS"),
            LATITUDE_VAR => option_env!("ORBIT_LATITUDE"),
            LONGITUDE_VAR => option_env!("ORBIT_LONGITUDE"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

/// Runs a fetch in the background and hands the result back to the shell.
///
/// Only a weak handle is kept, so a result arriving after the page tore the
/// shell down is dropped.
pub fn spawn_fetch(shell: &Rc<RefCell<Shell>>, ticket: FetchTicket) {
    let config = shell.borrow().config.clone();
    let handle: Weak<RefCell<Shell>> = Rc::downgrade(shell);

    spawn_local(async move {
        let result = load(&config, ticket.feature).await;
        if let Err(error) = &result {
            web_sys::console::warn_1(
                &format!("{} fetch failed: {error}", ticket.feature.provider()).into(),
            );
        }

        let Some(shell) = handle.upgrade() else {
            return;
        };
        let mut shell = shell.borrow_mut();
        let failed = result.is_err();
        if shell.menu.complete(&ticket, result) && failed {
            shell.status = format!("Could not load {}", ticket.feature.provider());
        }
    });
}

async fn load(config: &Config, feature: RemoteFeature) -> Result<FeatureContent, FetchError> {
    match feature {
        RemoteFeature::Weather => {
            let position = locate(config).await?;
            let url = weather_url(config, position)?;
            let body = get(&url).await?;
            parse_weather(&body, config.units)
        }
        RemoteFeature::News => {
            let url = news_url(config)?;
            let body = get(&url).await?;
            parse_news(&body)
        }
    }
}

/// Coordinates from the build, otherwise from the browser's geolocation prompt.
async fn locate(config: &Config) -> Result<Coordinates, FetchError> {
    if let Some(coordinates) = config.coordinates {
        return Ok(coordinates);
    }

    let window = web_sys::window()
        .ok_or_else(|| FetchError::LocationUnavailable("no window".to_string()))?;
    let geolocation = window.navigator().geolocation().map_err(|_| {
        FetchError::LocationUnavailable("geolocation is not supported".to_string())
    })?;

    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(error) =
            geolocation.get_current_position_with_error_callback(&resolve, Some(&reject))
        {
            let _ = reject.call1(&JsValue::NULL, &error);
        }
    });

    match JsFuture::from(promise).await {
        Ok(value) => {
            // Browsers name the class GeolocationPosition, so an instanceof check would fail
            let position: Position = value.unchecked_into();
            let coords = position.coords();
            Coordinates::checked(Some(coords.latitude()), Some(coords.longitude())).ok_or_else(
                || FetchError::LocationUnavailable("position out of range".to_string()),
            )
        }
        Err(value) => Err(position_error(&value)),
    }
}

fn position_error(value: &JsValue) -> FetchError {
    let field = |name: &str| js_sys::Reflect::get(value, &JsValue::from_str(name)).ok();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let code = field("code")
        .and_then(|code| code.as_f64())
        .map(|code| code as u16);
    let message = field("message")
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| describe(value));
    classify_position_error(code, message)
}

fn classify_position_error(code: Option<u16>, message: String) -> FetchError {
    match code {
        Some(PERMISSION_DENIED) => FetchError::LocationDenied,
        _ => FetchError::LocationUnavailable(message),
    }
}

async fn get(url: &str) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|error| FetchError::Network(describe(&error)))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|error| FetchError::Network(describe(&error)))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| FetchError::Network("unexpected response value".to_string()))?;

    let text = response
        .text()
        .map_err(|error| FetchError::Network(describe(&error)))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|error| FetchError::Network(describe(&error)))?
        .as_string()
        .unwrap_or_default();

    check_status(response.status(), &body)?;
    Ok(body)
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Opens a link in a new tab.
pub fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(error) = window.open_with_url_and_target(url, "_blank") {
        web_sys::console::error_1(&format!("Failed to open {url}: {}", describe(&error)).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denied_permission_shows_the_access_message() {
        let error = classify_position_error(Some(1), "User denied Geolocation".to_string());
        assert_eq!(error, FetchError::LocationDenied);
        assert_eq!(
            error.placeholder(),
            "Location access denied. Allow location access to see local weather."
        );
    }

    #[test]
    fn other_position_failures_are_unavailable() {
        let timeout = classify_position_error(Some(3), "Timeout expired".to_string());
        assert_eq!(
            timeout,
            FetchError::LocationUnavailable("Timeout expired".to_string())
        );

        let unknown = classify_position_error(None, "no code".to_string());
        assert!(matches!(unknown, FetchError::LocationUnavailable(_)));
    }
}
