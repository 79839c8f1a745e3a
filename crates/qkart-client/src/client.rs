//! HTTP client for the QKart storefront REST API.
//!
//! Wraps `reqwest` with typed response deserialization and maps non-2xx
//! responses onto [`ClientError`] variants. Callers decide how each variant
//! is surfaced to the user.

use std::time::Duration;

use qkart_core::{AppConfig, CartLine, Product};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::types::{ApiMessage, Credentials, LoginResponse};

/// Client for the storefront REST API.
///
/// Use [`StorefrontClient::new`] with the API root (e.g.
/// `http://localhost:8082/api/v1`) or a wiremock server URI in tests.
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
}

impl StorefrontClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so `Url::join` appends to the
        // API root instead of replacing its last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the full catalog via `GET /products`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] / [`ClientError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a product array.
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let url = self.endpoint("products")?;
        tracing::debug!(%url, "fetching catalog");
        let response = Self::send(self.client.get(url.clone()), &url).await?;
        Self::decode(response, "GET /products").await
    }

    /// Searches the catalog via `GET /products/search?value=<query>`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotFound`] when the backend reports no matches (HTTP 404).
    /// - [`ClientError::Api`] / [`ClientError::UnexpectedStatus`] on other non-2xx statuses.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a product array.
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ClientError> {
        let url = self.search_url(query)?;
        tracing::debug!(%url, query, "searching catalog");
        let response = Self::send(self.client.get(url.clone()), &url).await?;
        Self::decode(response, &format!("GET /products/search(value={query})")).await
    }

    /// Fetches the authenticated user's cart via `GET /cart`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] with the backend message on 400/401.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a cart-line array.
    pub async fn get_cart(&self, token: &str) -> Result<Vec<CartLine>, ClientError> {
        let url = self.endpoint("cart")?;
        tracing::debug!(%url, "fetching cart");
        let request = self.client.get(url.clone()).bearer_auth(token);
        let response = Self::send(request, &url).await?;
        Self::decode(response, "GET /cart").await
    }

    /// Sets the quantity of `product_id` in the cart via `POST /cart`.
    /// A quantity of zero removes the product server-side.
    ///
    /// Returns the updated cart as reported by the backend.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] with the backend message on 400.
    /// - [`ClientError::NotFound`] with the backend message when the product
    ///   does not exist.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a cart-line array.
    pub async fn update_cart(
        &self,
        token: &str,
        product_id: &str,
        qty: i64,
    ) -> Result<Vec<CartLine>, ClientError> {
        let url = self.endpoint("cart")?;
        tracing::debug!(%url, product_id, qty, "updating cart");
        let body = CartLine {
            product_id: product_id.to_owned(),
            qty,
        };
        let request = self.client.post(url.clone()).bearer_auth(token).json(&body);
        let response = Self::send(request, &url).await?;
        Self::decode(response, &format!("POST /cart(productId={product_id})")).await
    }

    /// Exchanges credentials for a bearer token via `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] with the backend message on 400.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body lacks `token`/`username`.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let url = self.endpoint("auth/login")?;
        tracing::debug!(%url, username, "logging in");
        let request = self
            .client
            .post(url.clone())
            .json(&Credentials { username, password });
        let response = Self::send(request, &url).await?;
        Self::decode(response, "POST /auth/login").await
    }

    /// Creates an account via `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] with the backend message on 400 (e.g. username taken).
    /// - [`ClientError::Http`] on network failure.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let url = self.endpoint("auth/register")?;
        tracing::debug!(%url, username, "registering");
        let request = self
            .client
            .post(url.clone())
            .json(&Credentials { username, password });
        Self::send(request, &url).await?;
        Ok(())
    }

    /// Resolves a path relative to the API root.
    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{path}': {e}"),
            })
    }

    /// Builds the search URL with the query percent-encoded.
    fn search_url(&self, query: &str) -> Result<Url, ClientError> {
        let mut url = self.endpoint("products/search")?;
        url.query_pairs_mut().append_pair("value", query);
        Ok(url)
    }

    /// Sends the request and converts any non-2xx response into a typed error.
    async fn send(request: RequestBuilder, url: &Url) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        tracing::debug!(%url, status = status.as_u16(), "storefront API returned an error status");
        Err(Self::error_from_response(response, url).await)
    }

    async fn error_from_response(response: Response, url: &Url) -> ClientError {
        let status = response.status();
        // The body is best-effort: a failed read just means no message.
        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ApiMessage>(&body).ok())
            .map(|m| m.message);

        if status == StatusCode::NOT_FOUND {
            return ClientError::NotFound {
                url: url.to_string(),
                message,
            };
        }

        match message {
            Some(message) => ClientError::Api {
                status: status.as_u16(),
                message,
            },
            None => ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            },
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T, ClientError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
