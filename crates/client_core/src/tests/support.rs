//! In-memory backend used by controller and session tests.

use std::sync::Mutex;

use async_trait::async_trait;
use shared::domain::{
    Order, OrderId, OrderStatus, Product, ProductId, Restaurant, RestaurantId, UserId,
};

use crate::{error::ClientError, workflow, DeliveryBackend, OrderEvent};

pub(crate) fn order(id: i64, status: OrderStatus) -> Order {
    Order {
        id: OrderId(id),
        status,
        customer_name: format!("customer {id}"),
        total_cost: 10.0 * id as f64,
        delivery_address: format!("Street {id}"),
        cancellation_reason: None,
    }
}

pub(crate) fn product(id: i64, category: Option<&str>) -> Product {
    Product {
        id: ProductId(id),
        name: format!("product {id}"),
        description: None,
        price: 5.0,
        category: category.map(str::to_string),
        available: true,
    }
}

pub(crate) fn restaurant(id: i64, owner: i64) -> Restaurant {
    Restaurant {
        id: RestaurantId(id),
        owner_id: Some(UserId(owner)),
        name: format!("restaurant {id}"),
        address: None,
        phone: None,
        rating: None,
    }
}

/// Behaves like the real backend: validates transitions against the server
/// state machine and records every call it receives.
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub orders: Mutex<Vec<Order>>,
    pub restaurants: Vec<Restaurant>,
    pub products: Vec<Product>,
    pub calls: Mutex<Vec<String>>,
    /// When set, mutating calls fail with this status and body text.
    pub reject_with: Option<(u16, String)>,
    pub fail_list_orders: Mutex<bool>,
}

impl FakeBackend {
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self {
            orders: Mutex::new(orders),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls").clone()
    }

    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !call.starts_with("GET"))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls").push(call);
    }

    fn apply(
        &self,
        order_id: OrderId,
        event: OrderEvent,
        reason: Option<&str>,
    ) -> Result<(), ClientError> {
        if let Some((status, message)) = &self.reject_with {
            return Err(ClientError::Backend {
                status: *status,
                message: message.clone(),
            });
        }
        let mut orders = self.orders.lock().expect("orders");
        let order = orders
            .iter_mut()
            .find(|order| order.id == order_id)
            .ok_or_else(|| ClientError::Backend {
                status: 404,
                message: "order not found".into(),
            })?;
        let next =
            workflow::transition(order.status, event).ok_or_else(|| ClientError::Backend {
                status: 400,
                message: "invalid state transition".into(),
            })?;
        order.status = next;
        order.cancellation_reason = reason.map(str::to_string);
        Ok(())
    }
}

#[async_trait]
impl DeliveryBackend for FakeBackend {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ClientError> {
        self.record("GET restaurants".into());
        Ok(self.restaurants.clone())
    }

    async fn list_orders(&self, restaurant_id: RestaurantId) -> Result<Vec<Order>, ClientError> {
        self.record(format!("GET orders {restaurant_id}"));
        if *self.fail_list_orders.lock().expect("flag") {
            return Err(ClientError::Transport("connection refused".into()));
        }
        Ok(self.orders.lock().expect("orders").clone())
    }

    async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ClientError> {
        self.record(format!("PATCH {order_id} {status}"));
        let event = match status {
            OrderStatus::Aceptada => OrderEvent::Accept,
            OrderStatus::Rechazada => OrderEvent::Reject,
            _ => OrderEvent::Advance,
        };
        self.apply(order_id, event, None)
    }

    async fn cancel_order(&self, order_id: OrderId, reason: &str) -> Result<(), ClientError> {
        self.record(format!("POST {order_id} cancel {reason}"));
        self.apply(order_id, OrderEvent::Cancel, Some(reason))
    }

    async fn list_products(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Product>, ClientError> {
        self.record(format!("GET products {restaurant_id}"));
        Ok(self.products.clone())
    }
}
