//! Reqwest-backed implementations of the fetch seam.

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::fetch::errors::{FetchError, FetchResult};
use crate::fetch::{FetchParams, ResourceFetcher, ResourceWriter, ResultPage};

/// Fetches one resource collection from `{endpoint}?page=..&limit=..&...`.
pub struct HttpFetcher<T> {
    client: reqwest::Client,
    endpoint: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HttpFetcher<T> {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T> ResourceFetcher<T> for HttpFetcher<T>
where
    T: DeserializeOwned + Send + Sync,
{
    async fn fetch(&self, params: &FetchParams) -> FetchResult<ResultPage<T>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&params.query_pairs())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        ResultPage::from_wire(body, params.page)
    }
}

/// Issues create/update/delete calls against `{endpoint}` and
/// `{endpoint}/{id}`.
pub struct HttpWriter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpWriter {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn expect_success(response: reqwest::Response) -> FetchResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::Status {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl<N, U> ResourceWriter<N, U> for HttpWriter
where
    N: Serialize + Send + Sync,
    U: Serialize + Send + Sync,
{
    async fn create(&self, payload: &N) -> FetchResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn update(&self, id: i64, payload: &U) -> FetchResult<()> {
        let response = self
            .client
            .put(format!("{}/{id}", self.endpoint))
            .json(payload)
            .send()
            .await?;
        Self::expect_success(response).await
    }

    async fn delete(&self, id: i64) -> FetchResult<()> {
        let response = self
            .client
            .delete(format!("{}/{id}", self.endpoint))
            .send()
            .await?;
        Self::expect_success(response).await
    }
}
