/*
[INPUT]:  HTTP configuration (base URL, timeouts, credentials)
[OUTPUT]: Configured reqwest client and the request dispatch boundary
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use chrono::Utc;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::Credentials;
use crate::http::params::RequestParams;
use crate::http::signature::RequestSigner;
use crate::http::{MexcError, Result};
use crate::types::ApiEnvelope;

/// Base URL for the MEXC contract API
pub const BASE_URL: &str = "https://contract.mexc.com";

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "ApiKey";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the MEXC contract API
///
/// Built without credentials the client is public-only: unsigned reads work,
/// signed requests fail with [`MexcError::MissingCredentials`].
#[derive(Debug, Clone)]
pub struct MexcClient {
    http_client: Client,
    base_url: Url,
    signer: Option<RequestSigner>,
}

impl MexcClient {
    /// Create a public-only client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a public-only client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, BASE_URL, None)
    }

    /// Create an authenticated client with default configuration
    pub fn with_credentials(credentials: Credentials) -> Result<Self> {
        Self::with_config_and_base_url(ClientConfig::default(), BASE_URL, Some(credentials))
    }

    /// Create an authenticated client from `MEXC_API_KEY` / `MEXC_API_SECRET`.
    ///
    /// Fails fast when either variable is missing; use [`MexcClient::new`] for
    /// public-only access.
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::from_env()?;
        Self::with_credentials(credentials)
    }

    /// Create a client against an explicit host
    pub fn with_config_and_base_url(
        config: ClientConfig,
        base_url: &str,
        credentials: Option<Credentials>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(credentials) = &credentials {
            let name = HeaderName::from_bytes(API_KEY_HEADER.as_bytes())
                .map_err(|err| MexcError::Config(format!("invalid API key header name: {err}")))?;
            let api_key = HeaderValue::from_str(credentials.api_key())
                .map_err(|err| MexcError::Config(format!("invalid API key header: {err}")))?;
            headers.insert(name, api_key);
        }

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let client = Self {
            http_client,
            base_url: Url::parse(base_url)?,
            signer: credentials.map(RequestSigner::new),
        };

        tracing::info!(
            base_url = %client.base_url,
            authenticated = client.is_authenticated(),
            "MEXC futures client initialized"
        );
        Ok(client)
    }

    pub fn is_authenticated(&self) -> bool {
        self.signer.is_some()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self.base_url.join(endpoint)?)
    }

    /// Dispatch a request and decode the JSON body.
    ///
    /// Only GET (parameters in the query string) and POST (parameters as a JSON
    /// body) are accepted. When `signed`, `timestamp` and then `signature` are
    /// appended to `params`. Non-2xx statuses are returned as [`MexcError::Http`];
    /// nothing is retried.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        mut params: RequestParams,
        signed: bool,
    ) -> Result<Value> {
        if method != Method::GET && method != Method::POST {
            tracing::error!(%method, endpoint, "unsupported HTTP method");
            return Err(MexcError::UnsupportedMethod(method));
        }

        if signed {
            let signer = self.signer.as_ref().ok_or(MexcError::MissingCredentials)?;
            params.remove("signature");
            params.insert("timestamp", Utc::now().timestamp_millis());
            let signature = signer.sign(&params);
            params.insert("signature", signature);
        }

        let mut url = self.endpoint_url(endpoint)?;
        let builder = if method == Method::GET {
            if !params.is_empty() {
                url.set_query(Some(&params.to_query_string()));
            }
            self.http_client.get(url)
        } else {
            self.http_client.post(url).json(&params.to_json_body())
        };

        tracing::debug!(%method, endpoint, signed, params = params.len(), "dispatching request");

        self.send_json(builder).await.inspect_err(|err| {
            tracing::error!(%method, endpoint, error = %err, "API request failed");
        })
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?.error_for_status()?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Unsigned GET returning the envelope's `data`, typed as `T`.
    ///
    /// A non-200 envelope code becomes [`MexcError::Api`]; a `data` payload of
    /// the wrong shape becomes [`MexcError::InvalidResponse`].
    pub(crate) async fn get_data<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: RequestParams,
    ) -> Result<Option<T>> {
        let body = self.request(Method::GET, endpoint, params, false).await?;
        let envelope: ApiEnvelope<Value> = serde_json::from_value(body)?;

        if !envelope.is_success() {
            return Err(MexcError::api_error(envelope.code, envelope.message()));
        }

        envelope
            .data
            .filter(|data| !data.is_null())
            .map(serde_json::from_value::<T>)
            .transpose()
            .map_err(|err| MexcError::InvalidResponse(format!("{endpoint}: {err}")))
    }
}
