//! Remote persistence for model records.
//!
//! # Design
//! `RemoteSync` is the capability a `Model` composes. `ApiSync` implements it
//! over REST: each operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`,
//! with the injected `HttpTransport` executing the round-trip in between.
//! Building and parsing stay deterministic and free of I/O.

use std::future::Future;

use serde::de::DeserializeOwned;

use crate::error::SyncError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::record::{self, Record};

/// The sync capability a `Model` composes.
///
/// Both operations report failure through the returned future's `Err`.
pub trait RemoteSync<T: Record> {
    /// Read the remote representation of the record identified by `id`.
    fn fetch(&self, id: i64) -> impl Future<Output = Result<T::Patch, SyncError>>;

    /// Persist `data`. The response body is not surfaced.
    fn save(&self, data: T) -> impl Future<Output = Result<(), SyncError>>;
}

/// REST `RemoteSync` rooted at a collection URL such as
/// `http://localhost:3000/users`.
#[derive(Debug, Clone)]
pub struct ApiSync<H> {
    root_url: String,
    transport: H,
}

impl<H> ApiSync<H> {
    pub fn new(root_url: &str, transport: H) -> Self {
        Self {
            root_url: root_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn build_fetch(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/{id}", self.root_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Records with an id are updated in place, records without one are
    /// created.
    pub fn build_save<T: Record>(&self, data: &T) -> Result<HttpRequest, SyncError> {
        let body = serde_json::to_string(data).map_err(|e| SyncError::SerializationError(e.to_string()))?;
        let (method, path) = match record::record_id(data) {
            Some(id) => (HttpMethod::Put, format!("{}/{id}", self.root_url)),
            None => (HttpMethod::Post, self.root_url.clone()),
        };
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_fetch<P: DeserializeOwned>(&self, response: HttpResponse) -> Result<P, SyncError> {
        check_status(&response, &[200])?;
        serde_json::from_str(&response.body).map_err(|e| SyncError::DeserializationError(e.to_string()))
    }

    pub fn parse_save(&self, response: HttpResponse) -> Result<(), SyncError> {
        check_status(&response, &[200, 201])
    }
}

impl<T, H> RemoteSync<T> for ApiSync<H>
where
    T: Record,
    H: HttpTransport,
{
    fn fetch(&self, id: i64) -> impl Future<Output = Result<T::Patch, SyncError>> {
        let request = self.build_fetch(id);
        tracing::debug!(path = %request.path, "fetching record");
        async move {
            let response = self.transport.execute(request).await?;
            self.parse_fetch(response)
        }
    }

    fn save(&self, data: T) -> impl Future<Output = Result<(), SyncError>> {
        let request = self.build_save(&data);
        async move {
            let request = request?;
            tracing::debug!(method = ?request.method, path = %request.path, "saving record");
            let response = self.transport.execute(request).await?;
            self.parse_save(response)
        }
    }
}

/// Map non-success status codes to the appropriate `SyncError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), SyncError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(SyncError::NotFound);
    }
    Err(SyncError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
