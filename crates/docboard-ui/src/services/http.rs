//! `fetch`-backed transport.

use async_trait::async_trait;
use docboard_core::TransportError;
use docboard_core::ports::{HttpRequest, HttpResponse, HttpTransport, Method};
use gloo_net::http::Request;

/// Sends requests with the browser `fetch` API through `gloo-net`.
pub(crate) struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut req = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };
        for (name, value) in &request.headers {
            req = req.header(name, value);
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(|err| TransportError::Network {
            detail: err.to_string(),
        })?;
        let status = response.status();
        let body = response.text().await.map_err(|err| TransportError::Network {
            detail: err.to_string(),
        })?;
        Ok(HttpResponse::new(status, body))
    }
}
