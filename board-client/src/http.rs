//! HTTP client for the reservation service

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{ApiResponse, AppError, ErrorCode};

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making network requests to the reservation service
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(t) => request.bearer_auth(t),
            None => request,
        }
    }

    /// Make a GET request with query parameters
    pub async fn get<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<Option<T>> {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>> {
        let request = self.authorize(self.client.post(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>> {
        let request = self.authorize(self.client.patch(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<Option<T>> {
        let status = response.status();
        let body = response.text().await?;
        parse_envelope(status, &body)
    }
}

/// Decode a service response body into data or a structured error
///
/// Error bodies that are not an envelope still produce an [`AppError`],
/// keyed off the HTTP status, with the raw body as message.
pub(crate) fn parse_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> ClientResult<Option<T>> {
    if !status.is_success() {
        let err = match serde_json::from_str::<ApiResponse<serde_json::Value>>(body) {
            Ok(envelope) if !envelope.is_success() => match envelope.into_result() {
                Err(e) => e,
                Ok(_) => AppError::new(ErrorCode::from_http_status(status)),
            },
            _ => {
                let code = ErrorCode::from_http_status(status);
                let message = if body.trim().is_empty() {
                    code.message().to_string()
                } else {
                    body.trim().to_string()
                };
                AppError::with_message(code, message)
            }
        };
        tracing::debug!(status = %status, code = %err.code, "Reservation service rejected request");
        return Err(ClientError::Api(err));
    }

    if body.trim().is_empty() {
        return Ok(None);
    }

    let envelope: ApiResponse<T> = serde_json::from_str(body)?;
    envelope.into_result().map_err(ClientError::Api)
}
