// API client module: a small blocking HTTP client for the cars resource.
// One method per REST verb; every call returns an explicit result so the
// caller never inspects a response that does not exist.

use crate::config::ClientConfig;
use crate::model::{Car, CarDetails, CarId, NewCar};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("Could not decode server response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Outcome of a call that reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// The server answered with the status expected for the verb.
    Accepted,
    /// Any other status.
    Rejected(StatusCode),
}

impl Reply {
    fn expecting(expected: StatusCode, actual: StatusCode) -> Self {
        if actual == expected {
            Reply::Accepted
        } else {
            Reply::Rejected(actual)
        }
    }
}

/// Result of listing the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Cars(Vec<Car>),
    Rejected(StatusCode),
}

/// Blocking client bound to one server and one collection.
#[derive(Clone)]
pub struct CarsClient {
    client: Client,
    config: ClientConfig,
}

impl CarsClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::Client)?;
        Ok(CarsClient { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Probes the server root, or a single record when `id` is given.
    /// True only for a success status; transport failures count as down.
    pub fn is_reachable(&self, id: Option<CarId>) -> bool {
        let url = match id {
            Some(id) => self.config.item_url(id),
            None => self.config.root_url().to_string(),
        };
        match self.send(self.client.head(&url)) {
            Ok(status) => status.is_success(),
            Err(e) => {
                tracing::error!(%url, error = %e, "connectivity probe failed");
                false
            }
        }
    }

    /// GET the whole collection, in server order.
    pub fn list(&self) -> Result<Listing, ApiError> {
        let url = self.config.collection_url();
        tracing::debug!(%url, "GET");
        let res = self
            .client
            .get(&url)
            .send()
            .map_err(ApiError::Transport)?;
        let status = res.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "listing rejected");
            return Ok(Listing::Rejected(status));
        }
        let cars: Vec<Car> = res.json().map_err(ApiError::Decode)?;
        tracing::debug!(count = cars.len(), "listing decoded");
        Ok(Listing::Cars(cars))
    }

    /// POST a new record; accepted on `201 Created`.
    pub fn create(&self, car: &NewCar) -> Result<Reply, ApiError> {
        let url = self.config.collection_url();
        let status = self.send(self.client.post(&url).json(car))?;
        Ok(Reply::expecting(StatusCode::CREATED, status))
    }

    /// PUT new details onto an existing record; accepted on `200 OK`.
    pub fn update(&self, id: CarId, details: &CarDetails) -> Result<Reply, ApiError> {
        let url = self.config.item_url(id);
        let status = self.send(self.client.put(&url).json(details))?;
        Ok(Reply::expecting(StatusCode::OK, status))
    }

    /// DELETE a record; accepted on `200 OK`.
    pub fn delete(&self, id: CarId) -> Result<Reply, ApiError> {
        let url = self.config.item_url(id);
        let status = self.send(self.client.delete(&url))?;
        Ok(Reply::expecting(StatusCode::OK, status))
    }

    fn send(&self, req: RequestBuilder) -> Result<StatusCode, ApiError> {
        let res = req.send().map_err(ApiError::Transport)?;
        let status = res.status();
        tracing::debug!(url = %res.url(), %status, "response");
        Ok(status)
    }
}
