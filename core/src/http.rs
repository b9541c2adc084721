//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. `ApiSync`
//! builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network; an injected `HttpTransport` performs the actual
//! round-trip. Each `ApiSync` owns its transport, so there is no process-wide
//! client.
//!
//! All fields use owned types (`String`, `Vec`) so requests can move onto a
//! blocking pool or another thread without lifetime concerns.

use std::future::Future;

use crate::error::SyncError;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Non-2xx statuses are still responses; only failures to get any response
/// at all are transport errors.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes `HttpRequest`s.
pub trait HttpTransport {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, SyncError>>;
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::future::Future;

    use super::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
    use crate::error::SyncError;

    /// `HttpTransport` backed by a blocking `ureq` agent.
    ///
    /// Each request runs on tokio's blocking pool, so a tokio runtime must be
    /// driving the returned future.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            // 4xx/5xx are returned as data so `ApiSync` interprets statuses.
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl HttpTransport for UreqTransport {
        fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, SyncError>> {
            let agent = self.agent.clone();
            async move {
                tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
                    .await
                    .map_err(|e| SyncError::Transport(e.to_string()))?
            }
        }
    }

    fn execute_blocking(agent: &ureq::Agent, req: HttpRequest) -> Result<HttpResponse, SyncError> {
        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => agent.get(&req.path).call(),
            (HttpMethod::Post, Some(body)) => agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
        };
        let mut response = result.map_err(|e| SyncError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
