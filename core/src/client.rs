//! Authenticated JSON request layer for the feed service API.
//!
//! # Design
//! `ApiClient` holds a snapshot of the base URL and token plus a `Transport`.
//! Every resource operation goes through the single generic `request`
//! method, which is itself split into `build_request` (produces an
//! `HttpRequest`) and `parse_response` (consumes an `HttpResponse`) with one
//! `Transport::execute` in between. No state is carried between calls.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ConfigProvider;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};

/// Payload argument for requests that carry no body.
pub(crate) const NO_PAYLOAD: Option<&()> = None;

/// Synchronous client for the feed service API.
///
/// Generic over the transport so tests can replace the network with a
/// scripted double. `ApiClient::connect` uses the blocking `ureq` transport.
#[derive(Clone)]
pub struct ApiClient<T = UreqTransport> {
    base_url: String,
    token: String,
    transport: T,
}

impl ApiClient<UreqTransport> {
    pub fn connect(config: &impl ConfigProvider) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(config: &impl ConfigProvider, transport: T) -> Self {
        Self {
            base_url: config.base_url().trim_end_matches('/').to_string(),
            token: config.token().to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Describe a request to `path` (relative to the base URL) with the
    /// JSON and bearer-token headers attached.
    pub fn build_request<P>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&P>,
    ) -> Result<HttpRequest, ApiError>
    where
        P: Serialize + ?Sized,
    {
        let body = payload
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), format!("Bearer {}", self.token)),
            ],
            body,
        })
    }

    /// Perform one round trip and decode the response into `R`.
    ///
    /// A 204 response yields `R::default()` without looking at the body.
    pub fn request<P, R>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&P>,
    ) -> Result<R, ApiError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned + Default,
    {
        let request = self.build_request(method, path, payload)?;
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, "received response");
        parse_response(response)
    }
}

/// Interpret a response: reject non-2xx, short-circuit 204, decode the rest.
pub fn parse_response<R>(response: HttpResponse) -> Result<R, ApiError>
where
    R: DeserializeOwned + Default,
{
    check_status(&response)?;
    if response.status == 204 {
        return Ok(R::default());
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-2xx status codes to `ApiError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    warn!(
        status = response.status,
        status_text = %response.status_text,
        "request failed"
    );
    Err(ApiError::HttpError {
        status: response.status,
        status_text: response.status_text.clone(),
        body: response.body.clone(),
    })
}
