use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Order, OrderId, OrderStatus, Product, Restaurant, RestaurantId},
    error::ApiErrorBody,
    protocol::{CancelOrderRequest, ProductsResponse, RestaurantsResponse, UpdateOrderStatusRequest},
};
use tracing::debug;
use url::Url;

pub mod catalog;
pub mod error;
pub mod orders;
pub mod session;
pub mod workflow;

pub use catalog::{group_by_category, MenuCatalog, UNCATEGORIZED};
pub use error::{ClientError, ErrorKind};
pub use orders::{filter_orders, StatusFilter};
pub use session::{load_menu, resolve_restaurant, DashboardSession};
pub use workflow::{
    advance_label, enabled_events, transition, validate_action, OrderAction, OrderEvent,
    OrderWorkflowController, TransitionOutcome,
};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The REST surface the dashboard consumes.
#[async_trait]
pub trait DeliveryBackend: Send + Sync {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ClientError>;
    async fn list_orders(&self, restaurant_id: RestaurantId) -> Result<Vec<Order>, ClientError>;
    async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ClientError>;
    async fn cancel_order(&self, order_id: OrderId, reason: &str) -> Result<(), ClientError>;
    async fn list_products(&self, restaurant_id: RestaurantId)
        -> Result<Vec<Product>, ClientError>;
}

#[derive(Debug, Clone)]
pub struct BackendOptions {
    pub auth_token: Option<String>,
    pub request_timeout: Duration,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            auth_token: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

pub struct HttpBackend {
    http: Client,
    server_url: String,
    auth_token: Option<String>,
}

impl HttpBackend {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_options(server_url, BackendOptions::default())
    }

    pub fn with_options(server_url: &str, options: BackendOptions) -> Result<Self, ClientError> {
        let parsed = Url::parse(server_url.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Transport(format!(
                "unsupported backend url scheme '{}'",
                parsed.scheme()
            )));
        }
        let http = Client::builder()
            .timeout(options.request_timeout)
            .build()?;
        Ok(Self {
            http,
            server_url: server_url.trim().trim_end_matches('/').to_string(),
            auth_token: options.auth_token.filter(|token| !token.trim().is_empty()),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        debug!(path, "GET");
        let response = self
            .authorize(self.http.get(format!("{}{path}", self.server_url)))
            .send()
            .await?;
        let response = error_for_backend_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Turns a non-2xx response into [`ClientError::Backend`], keeping the
/// backend's own message when it sent one.
async fn error_for_backend_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let raw = response.text().await.unwrap_or_default();
    let message = ApiErrorBody::parse_text(&raw)
        .unwrap_or_else(|| format!("request failed with status {status}"));
    Err(ClientError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl DeliveryBackend for HttpBackend {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ClientError> {
        let body: RestaurantsResponse = self.get_json("/api/restaurants").await?;
        Ok(body.restaurants.unwrap_or_default())
    }

    async fn list_orders(&self, restaurant_id: RestaurantId) -> Result<Vec<Order>, ClientError> {
        let orders: Option<Vec<Order>> = self
            .get_json(&format!("/api/orders/restaurant/{restaurant_id}"))
            .await?;
        Ok(orders.unwrap_or_default())
    }

    async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ClientError> {
        debug!(order_id = order_id.0, %status, "PATCH order status");
        let response = self
            .authorize(
                self.http
                    .patch(format!("{}/api/orders/{order_id}/status", self.server_url)),
            )
            .json(&UpdateOrderStatusRequest { status })
            .send()
            .await?;
        error_for_backend_status(response).await?;
        Ok(())
    }

    async fn cancel_order(&self, order_id: OrderId, reason: &str) -> Result<(), ClientError> {
        debug!(order_id = order_id.0, "POST order cancel");
        let response = self
            .authorize(
                self.http
                    .post(format!("{}/api/orders/{order_id}/cancel", self.server_url)),
            )
            .json(&CancelOrderRequest {
                reason: reason.to_string(),
            })
            .send()
            .await?;
        error_for_backend_status(response).await?;
        Ok(())
    }

    async fn list_products(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Product>, ClientError> {
        let body: ProductsResponse = self
            .get_json(&format!("/api/restaurants/{restaurant_id}/products"))
            .await?;
        Ok(body.products.unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
