use serde::{Deserialize, Serialize};

use crate::domain::{OrderStatus, Product, Restaurant};

/// Body of `PATCH /api/orders/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Body of `POST /api/orders/{id}/cancel`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CancelOrderRequest {
    #[serde(rename = "motivo")]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantsResponse {
    #[serde(default)]
    pub restaurants: Option<Vec<Restaurant>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Option<Vec<Product>>,
}
