//! Backend collaborator
//!
//! [`Backend`] is the request/response contract the workflow relies on;
//! [`HttpBackend`] speaks it over REST with JSON bodies.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use shopsmart_common::models::{
    AddItemRequest, CreateListRequest, ErrorBody, LoginRequest, PaymentRequest, RegisterRequest,
};
use shopsmart_common::{
    AuthResponse, AuthToken, Coordinate, CreateOrderRequest, Item, Order, RequestError,
    ShoppingList, VendorMatch,
};
use std::time::Duration;
use tracing::debug;

pub type ApiResult<T> = std::result::Result<T, RequestError>;

/// Operations offered by the backend.
///
/// Calls that need authentication take the session token; an absent token is
/// sent as an unauthenticated request and the backend decides.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;

    async fn list_lists(&self, token: Option<&AuthToken>) -> ApiResult<Vec<ShoppingList>>;

    async fn create_list(
        &self,
        token: Option<&AuthToken>,
        request: &CreateListRequest,
    ) -> ApiResult<ShoppingList>;

    async fn list_items(&self, token: Option<&AuthToken>, list_id: &str) -> ApiResult<Vec<Item>>;

    async fn add_item(
        &self,
        token: Option<&AuthToken>,
        list_id: &str,
        request: &AddItemRequest,
    ) -> ApiResult<Item>;

    async fn remove_item(
        &self,
        token: Option<&AuthToken>,
        list_id: &str,
        item_id: &str,
    ) -> ApiResult<()>;

    async fn search_vendors(
        &self,
        token: Option<&AuthToken>,
        coordinate: Coordinate,
        list_id: &str,
    ) -> ApiResult<Vec<VendorMatch>>;

    async fn create_order(
        &self,
        token: Option<&AuthToken>,
        request: &CreateOrderRequest,
    ) -> ApiResult<Order>;

    async fn get_order(&self, token: Option<&AuthToken>, order_id: &str) -> ApiResult<Order>;

    async fn mock_payment(
        &self,
        token: Option<&AuthToken>,
        request: &PaymentRequest,
    ) -> ApiResult<()>;
}

/// REST client for the backend
pub struct HttpBackend {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - API root, e.g. "http://localhost:4000/api"
    /// * `timeout` - per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url.into().trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API URL cannot carry a path: {}", base_url);
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Endpoint below the API root; each segment is percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(builder: RequestBuilder, token: Option<&AuthToken>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    async fn send(builder: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| RequestError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
            .and_then(|body| body.error);

        Err(RequestError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> ApiResult<T> {
        Self::send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|e| RequestError::Decode(e.to_string()))
    }

    async fn send_unit(builder: RequestBuilder) -> ApiResult<()> {
        let response = Self::send(builder).await?;
        debug!("Acknowledged with {}", response.status());
        Ok(())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        let url = self.url(&["auth", "login"]);
        debug!("POST {}", url);
        Self::send_json(self.client.post(url).json(request)).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        let url = self.url(&["auth", "register"]);
        debug!("POST {}", url);
        Self::send_json(self.client.post(url).json(request)).await
    }

    async fn list_lists(&self, token: Option<&AuthToken>) -> ApiResult<Vec<ShoppingList>> {
        let url = self.url(&["lists"]);
        debug!("GET {}", url);
        Self::send_json(Self::authorized(self.client.get(url), token)).await
    }

    async fn create_list(
        &self,
        token: Option<&AuthToken>,
        request: &CreateListRequest,
    ) -> ApiResult<ShoppingList> {
        let url = self.url(&["lists"]);
        debug!("POST {}", url);
        Self::send_json(Self::authorized(self.client.post(url), token).json(request)).await
    }

    async fn list_items(&self, token: Option<&AuthToken>, list_id: &str) -> ApiResult<Vec<Item>> {
        let url = self.url(&["lists", list_id, "items"]);
        debug!("GET {}", url);
        Self::send_json(Self::authorized(self.client.get(url), token)).await
    }

    async fn add_item(
        &self,
        token: Option<&AuthToken>,
        list_id: &str,
        request: &AddItemRequest,
    ) -> ApiResult<Item> {
        let url = self.url(&["lists", list_id, "items"]);
        debug!("POST {}", url);
        Self::send_json(Self::authorized(self.client.post(url), token).json(request)).await
    }

    async fn remove_item(
        &self,
        token: Option<&AuthToken>,
        list_id: &str,
        item_id: &str,
    ) -> ApiResult<()> {
        let url = self.url(&["lists", list_id, "items", item_id]);
        debug!("DELETE {}", url);
        Self::send_unit(Self::authorized(self.client.delete(url), token)).await
    }

    async fn search_vendors(
        &self,
        token: Option<&AuthToken>,
        coordinate: Coordinate,
        list_id: &str,
    ) -> ApiResult<Vec<VendorMatch>> {
        let url = self.url(&["vendors", "search"]);
        debug!(
            "GET {} lat={} lng={} listId={}",
            url, coordinate.lat, coordinate.lng, list_id
        );
        let query = [
            ("lat", coordinate.lat.to_string()),
            ("lng", coordinate.lng.to_string()),
            ("listId", list_id.to_string()),
        ];
        Self::send_json(Self::authorized(self.client.get(url), token).query(&query)).await
    }

    async fn create_order(
        &self,
        token: Option<&AuthToken>,
        request: &CreateOrderRequest,
    ) -> ApiResult<Order> {
        let url = self.url(&["orders"]);
        debug!("POST {}", url);
        Self::send_json(Self::authorized(self.client.post(url), token).json(request)).await
    }

    async fn get_order(&self, token: Option<&AuthToken>, order_id: &str) -> ApiResult<Order> {
        let url = self.url(&["orders", order_id]);
        debug!("GET {}", url);
        Self::send_json(Self::authorized(self.client.get(url), token)).await
    }

    async fn mock_payment(
        &self,
        token: Option<&AuthToken>,
        request: &PaymentRequest,
    ) -> ApiResult<()> {
        let url = self.url(&["payments", "mock"]);
        debug!("POST {} status={}", url, request.status);
        Self::send_unit(Self::authorized(self.client.post(url), token).json(request)).await
    }
}
