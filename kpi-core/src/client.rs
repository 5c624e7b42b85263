//! HTTP loader for the portal API.
//!
//! Fetches the results, indicators and headquarters collections concurrently.
//! A failure in any of the three fails the whole load; there is no retry and
//! no partial result, the caller reloads explicitly.

use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::collections::{decode_collection, Collections, HEADQUARTERS, INDICATORS, RESULTS};
use crate::config::PortalConfig;
use crate::error::{PortalError, Result};
use crate::{Headquarters, Indicator, ResultRecord};

/// A configured client for the three collection endpoints.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: Client,
    config: PortalConfig,
}

impl PortalClient {
    pub fn new(config: PortalConfig) -> Result<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| PortalError::Http {
                collection: "client",
                source,
            })?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        collection: &'static str,
        path: &str,
    ) -> Result<Vec<T>> {
        let url = self.config.endpoint(path);
        debug!("GET {} ({})", url, collection);

        let mut request = self.http.get(&url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| PortalError::Http { collection, source })?;
        let status = response.status();
        if !status.is_success() {
            warn!("Bad response status for {}: {}", collection, status);
            return Err(PortalError::Status {
                collection,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| PortalError::Http { collection, source })?;
        let items = decode_collection(collection, &body)?;
        info!("Fetched {} {}", items.len(), collection);
        Ok(items)
    }

    pub async fn fetch_results(&self) -> Result<Vec<ResultRecord>> {
        self.get_collection(RESULTS, &self.config.results_path).await
    }

    pub async fn fetch_indicators(&self) -> Result<Vec<Indicator>> {
        self.get_collection(INDICATORS, &self.config.indicators_path).await
    }

    pub async fn fetch_headquarters(&self) -> Result<Vec<Headquarters>> {
        self.get_collection(HEADQUARTERS, &self.config.headquarters_path).await
    }

    /// Fetch all three collections concurrently.
    pub async fn load_collections(&self) -> Result<Collections> {
        let (headquarters, indicators, results) = tokio::try_join!(
            self.fetch_headquarters(),
            self.fetch_indicators(),
            self.fetch_results()
        )?;
        Ok(Collections::new(results, indicators, headquarters))
    }
}
