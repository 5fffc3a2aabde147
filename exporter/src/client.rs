use crate::errors::{Error, Result};
use crate::model::{Device, LoginRequest, LoginResponse, PageData, TimeseriesData};
use crate::window::TimeWindow;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Read access to a ThingsBoard tenant.
#[async_trait]
pub trait TelemetrySource {
    async fn login(&mut self, username: &str, password: &str) -> Result<()>;

    /// Every device of the tenant, across all pages.
    async fn list_devices(&self) -> Result<Vec<Device>>;

    async fn device_keys(&self, device_id: &str) -> Result<Vec<String>>;

    async fn timeseries(
        &self,
        device_id: &str,
        keys: &[String],
        window: &TimeWindow,
        limit: u64,
    ) -> Result<TimeseriesData>;
}

/// REST client for the ThingsBoard API.
#[derive(Debug, Clone)]
pub struct ThingsboardClient {
    http: Client,
    base_url: String,
    page_size: u32,
    token: Option<String>,
}

impl ThingsboardClient {
    pub fn new(base_url: &str, page_size: u32) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: page_size.max(1),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn bearer(&self) -> Result<String> {
        self.token
            .as_ref()
            .map(|token| format!("Bearer {}", token))
            .ok_or(Error::NotAuthenticated)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .header("X-Authorization", self.bearer()?)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TelemetrySource for ThingsboardClient {
    async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        info!(base_url = %self.base_url, username, "Logging in to ThingsBoard");

        let response = self
            .http
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&LoginRequest { username, password })
            .send()
            .await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(username, "Login rejected");
            return Err(Error::InvalidCredentials);
        }

        let login: LoginResponse = response.error_for_status()?.json().await?;
        self.token = Some(login.token);
        Ok(())
    }

    async fn list_devices(&self) -> Result<Vec<Device>> {
        let mut devices = Vec::new();
        let mut page = 0u32;

        loop {
            let data: PageData<Device> = self
                .get_json(
                    "/api/tenant/deviceInfos",
                    &[
                        ("pageSize", self.page_size.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;

            let fetched = data.data.len();
            devices.extend(data.data);
            debug!(page, fetched, total = data.total_elements, "Fetched device page");

            if !data.has_next || fetched == 0 {
                break;
            }
            page += 1;
        }

        info!(count = devices.len(), "Listed devices");
        Ok(devices)
    }

    async fn device_keys(&self, device_id: &str) -> Result<Vec<String>> {
        self.get_json(
            &format!("/api/plugins/telemetry/DEVICE/{}/keys/timeseries", device_id),
            &[],
        )
        .await
    }

    async fn timeseries(
        &self,
        device_id: &str,
        keys: &[String],
        window: &TimeWindow,
        limit: u64,
    ) -> Result<TimeseriesData> {
        self.get_json(
            &format!("/api/plugins/telemetry/DEVICE/{}/values/timeseries", device_id),
            &[
                ("keys", keys.join(",")),
                ("startTs", window.start_ts().to_string()),
                ("endTs", window.end_ts().to_string()),
                ("interval", "0".to_string()),
                ("limit", limit.to_string()),
                ("useStrictDataTypes", "false".to_string()),
            ],
        )
        .await
    }
}
