use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::config::ResolvedConfig;
use crate::domain::{DatesIndex, Endpoint, LocationsIndex, RelationsIndex, RemoteArtist};
use crate::error::CatalogError;

/// The remote data provider behind a refresh cycle.
///
/// Each call is one request; implementations do not retry or cache.
pub trait CatalogSource: Send + Sync {
    fn fetch_artists(&self) -> Result<Vec<RemoteArtist>, CatalogError>;
    fn fetch_locations(&self) -> Result<LocationsIndex, CatalogError>;
    fn fetch_dates(&self) -> Result<DatesIndex, CatalogError>;
    fn fetch_relations(&self) -> Result<RelationsIndex, CatalogError>;
}

#[derive(Clone)]
pub struct HttpCatalogSource {
    client: Client,
    config: ResolvedConfig,
}

impl HttpCatalogSource {
    pub fn new(config: ResolvedConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|err| CatalogError::InvalidConfig(err.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|err| CatalogError::HttpClient(err.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn fetch_typed<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, CatalogError> {
        let url = self.config.url(endpoint);
        tracing::debug!(%endpoint, %url, "fetching");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| CatalogError::Transport {
                endpoint,
                message: err.to_string(),
            })?;
        let response = Self::handle_status(endpoint, response)?;
        let body = response.bytes().map_err(|err| CatalogError::Transport {
            endpoint,
            message: err.to_string(),
        })?;
        let value = serde_json::from_slice(&body).map_err(|err| CatalogError::Decode {
            endpoint,
            message: err.to_string(),
        })?;
        tracing::debug!(%endpoint, bytes = body.len(), "fetched");
        Ok(value)
    }

    fn handle_status(
        endpoint: Endpoint,
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, CatalogError> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(CatalogError::Status {
            endpoint,
            status: response.status().as_u16(),
        })
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch_artists(&self) -> Result<Vec<RemoteArtist>, CatalogError> {
        self.fetch_typed(Endpoint::Artists)
    }

    fn fetch_locations(&self) -> Result<LocationsIndex, CatalogError> {
        self.fetch_typed(Endpoint::Locations)
    }

    fn fetch_dates(&self) -> Result<DatesIndex, CatalogError> {
        self.fetch_typed(Endpoint::Dates)
    }

    fn fetch_relations(&self) -> Result<RelationsIndex, CatalogError> {
        self.fetch_typed(Endpoint::Relation)
    }
}

impl<S: CatalogSource + ?Sized> CatalogSource for std::sync::Arc<S> {
    fn fetch_artists(&self) -> Result<Vec<RemoteArtist>, CatalogError> {
        (**self).fetch_artists()
    }

    fn fetch_locations(&self) -> Result<LocationsIndex, CatalogError> {
        (**self).fetch_locations()
    }

    fn fetch_dates(&self) -> Result<DatesIndex, CatalogError> {
        (**self).fetch_dates()
    }

    fn fetch_relations(&self) -> Result<RelationsIndex, CatalogError> {
        (**self).fetch_relations()
    }
}
