use crate::{
    error::ApiError,
    http_client::{handle_http_response, http_client, parse_json},
    types::{DeviceStatus, DisplayMode, PowerActionKind},
};
use anyhow::Result;
use log::debug;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::{fmt::Debug, time::Duration};
use trait_variant::make;

/// Body of `POST /api/system/{shutdown,restart}`
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct PowerActionRequest {
    #[validate(minimum = 1)]
    #[validate(maximum = 3600)]
    pub countdown: u32,
}

#[derive(Debug, Serialize)]
struct DisplayRequest {
    action: DisplayMode,
}

#[derive(Debug, Deserialize)]
struct PauseResponse {
    paused: bool,
}

#[make(Send)]
#[cfg_attr(any(test, feature = "mock"), automock)]
pub trait FrameClient {
    async fn status(&self) -> Result<DeviceStatus, ApiError>;
    async fn power_action(
        &self,
        kind: PowerActionKind,
        countdown_seconds: u32,
    ) -> Result<(), ApiError>;
    async fn cancel_power_action(&self) -> Result<(), ApiError>;
    async fn next_image(&self) -> Result<(), ApiError>;
    async fn previous_image(&self) -> Result<(), ApiError>;
    async fn toggle_pause(&self) -> Result<bool, ApiError>;
    async fn set_display(&self, mode: DisplayMode) -> Result<(), ApiError>;
}

#[derive(Clone)]
pub struct HttpFrameClient {
    client: Client,
    base_url: String,
}

impl HttpFrameClient {
    // API endpoint constants
    const STATUS_ENDPOINT: &str = "/api/status";
    const SHUTDOWN_ENDPOINT: &str = "/api/system/shutdown";
    const RESTART_ENDPOINT: &str = "/api/system/restart";
    const CANCEL_ENDPOINT: &str = "/api/system/cancel";
    const NEXT_ENDPOINT: &str = "/api/next";
    const PREV_ENDPOINT: &str = "/api/prev";
    const PAUSE_ENDPOINT: &str = "/api/pause";
    const DISPLAY_ENDPOINT: &str = "/api/display";

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(HttpFrameClient {
            client: http_client(timeout)?,
            base_url: base_url.into(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        // Normalize to exactly one "/" between base and path
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn power_endpoint(kind: PowerActionKind) -> &'static str {
        match kind {
            PowerActionKind::Shutdown => Self::SHUTDOWN_ENDPOINT,
            PowerActionKind::Restart => Self::RESTART_ENDPOINT,
        }
    }

    /// GET request to the device API
    async fn get(&self, path: &str) -> Result<String, ApiError> {
        let url = self.build_url(path);
        debug!("GET {url}");

        let res = self.client.get(&url).send().await?;

        handle_http_response(res, &format!("GET {url}")).await
    }

    /// POST request to the device API (empty body)
    async fn post(&self, path: &str) -> Result<String, ApiError> {
        let url = self.build_url(path);
        debug!("POST {url}");

        let res = self.client.post(&url).send().await?;

        handle_http_response(res, &format!("POST {url}")).await
    }

    /// POST request to the device API with JSON body
    async fn post_json(&self, path: &str, body: impl Debug + Serialize) -> Result<String, ApiError> {
        let url = self.build_url(path);
        debug!("POST {url} with body: {body:?}");

        let res = self.client.post(&url).json(&body).send().await?;

        handle_http_response(res, &format!("POST {url}")).await
    }
}

impl FrameClient for HttpFrameClient {
    async fn status(&self) -> Result<DeviceStatus, ApiError> {
        let body = self.get(Self::STATUS_ENDPOINT).await?;
        parse_json(&body, "status")
    }

    async fn power_action(
        &self,
        kind: PowerActionKind,
        countdown_seconds: u32,
    ) -> Result<(), ApiError> {
        let request = PowerActionRequest {
            countdown: countdown_seconds,
        };
        self.post_json(Self::power_endpoint(kind), request).await?;
        Ok(())
    }

    async fn cancel_power_action(&self) -> Result<(), ApiError> {
        self.post(Self::CANCEL_ENDPOINT).await?;
        Ok(())
    }

    async fn next_image(&self) -> Result<(), ApiError> {
        self.post(Self::NEXT_ENDPOINT).await?;
        Ok(())
    }

    async fn previous_image(&self) -> Result<(), ApiError> {
        self.post(Self::PREV_ENDPOINT).await?;
        Ok(())
    }

    async fn toggle_pause(&self) -> Result<bool, ApiError> {
        let body = self.post(Self::PAUSE_ENDPOINT).await?;
        parse_json::<PauseResponse>(&body, "pause").map(|r| r.paused)
    }

    async fn set_display(&self, mode: DisplayMode) -> Result<(), ApiError> {
        self.post_json(Self::DISPLAY_ENDPOINT, DisplayRequest { action: mode })
            .await?;
        Ok(())
    }
}
