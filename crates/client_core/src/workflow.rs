//! Client-side mirror of the backend order state machine.
//!
//! The controller never applies a transition locally. It asks the backend to
//! move the order and then reloads the whole collection through
//! [`OrderWorkflowController::refresh`], so the snapshot it holds is always
//! what the server last reported.

use std::borrow::Cow;

use shared::domain::{Order, OrderId, OrderStatus, RestaurantId};
use tracing::{debug, info, warn};

use crate::{error::ClientError, orders::filter_orders, DeliveryBackend, StatusFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderEvent {
    Accept,
    Reject,
    Advance,
    Cancel,
}

impl OrderEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderEvent::Accept => "accept",
            OrderEvent::Reject => "reject",
            OrderEvent::Advance => "advance",
            OrderEvent::Cancel => "cancel",
        }
    }
}

/// A user request against one order. Only cancellation carries a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    Accept,
    Reject,
    Advance,
    Cancel { reason: String },
}

impl OrderAction {
    pub fn event(&self) -> OrderEvent {
        match self {
            OrderAction::Accept => OrderEvent::Accept,
            OrderAction::Reject => OrderEvent::Reject,
            OrderAction::Advance => OrderEvent::Advance,
            OrderAction::Cancel { .. } => OrderEvent::Cancel,
        }
    }
}

/// Events offered to the operator for an order in `status`.
pub fn enabled_events(status: OrderStatus) -> &'static [OrderEvent] {
    match status {
        OrderStatus::Creada => &[OrderEvent::Accept, OrderEvent::Reject],
        OrderStatus::Aceptada | OrderStatus::EnPreparacion => {
            &[OrderEvent::Advance, OrderEvent::Cancel]
        }
        OrderStatus::Terminada | OrderStatus::Rechazada | OrderStatus::Cancelada => &[],
    }
}

pub fn transition(from: OrderStatus, event: OrderEvent) -> Option<OrderStatus> {
    match (from, event) {
        (OrderStatus::Creada, OrderEvent::Accept) => Some(OrderStatus::Aceptada),
        (OrderStatus::Creada, OrderEvent::Reject) => Some(OrderStatus::Rechazada),
        (OrderStatus::Aceptada, OrderEvent::Advance) => Some(OrderStatus::EnPreparacion),
        (OrderStatus::EnPreparacion, OrderEvent::Advance) => Some(OrderStatus::Terminada),
        (OrderStatus::Aceptada | OrderStatus::EnPreparacion, OrderEvent::Cancel) => {
            Some(OrderStatus::Cancelada)
        }
        _ => None,
    }
}

/// Operator facing label of the generic "next state" action.
pub fn advance_label(status: OrderStatus) -> Option<&'static str> {
    match status {
        OrderStatus::Aceptada => Some("Start preparation"),
        OrderStatus::EnPreparacion => Some("Mark complete"),
        _ => None,
    }
}

/// Checks that need no server state. Runs before any request is sent.
pub fn validate_action(action: &OrderAction) -> Result<(), ClientError> {
    if let OrderAction::Cancel { reason } = action {
        if reason.trim().is_empty() {
            return Err(ClientError::Validation(
                "a cancellation reason is required".to_string(),
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    /// Backend accepted the request. `order` is the order as the reloaded
    /// snapshot reports it, if still listed. When the reload itself fails the
    /// transition still stands: `refresh_error` carries the failure, `order`
    /// is `None` and the previous snapshot is kept.
    Applied {
        order: Option<Order>,
        refresh_error: Option<ClientError>,
    },
    /// The action is not offered in the order's current state; nothing was sent.
    NotOffered { status: OrderStatus },
}

pub struct OrderWorkflowController<B: DeliveryBackend> {
    backend: B,
    restaurant_id: RestaurantId,
    orders: Vec<Order>,
    filter: StatusFilter,
}

impl<B: DeliveryBackend> OrderWorkflowController<B> {
    pub fn new(backend: B, restaurant_id: RestaurantId) -> Self {
        Self {
            backend,
            restaurant_id,
            orders: Vec::new(),
            filter: StatusFilter::All,
        }
    }

    pub fn restaurant_id(&self) -> RestaurantId {
        self.restaurant_id
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == order_id)
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn visible_orders(&self) -> Cow<'_, [Order]> {
        filter_orders(&self.orders, self.filter)
    }

    /// Reloads the full order collection and replaces the snapshot. On
    /// failure the previous snapshot is kept.
    pub async fn refresh(&mut self) -> Result<&[Order], ClientError> {
        let orders = self.backend.list_orders(self.restaurant_id).await?;
        debug!(
            restaurant_id = self.restaurant_id.0,
            count = orders.len(),
            "order snapshot refreshed"
        );
        self.orders = orders;
        Ok(&self.orders)
    }

    pub async fn request_transition(
        &mut self,
        order_id: OrderId,
        action: OrderAction,
    ) -> Result<TransitionOutcome, ClientError> {
        validate_action(&action)?;

        let current = self
            .order(order_id)
            .map(|order| order.status)
            .ok_or(ClientError::UnknownOrder(order_id))?;
        let event = action.event();
        let Some(target) = transition(current, event) else {
            debug!(
                order_id = order_id.0,
                status = %current,
                event = event.as_str(),
                "action not offered in current state"
            );
            return Ok(TransitionOutcome::NotOffered { status: current });
        };

        let sent = match &action {
            OrderAction::Cancel { reason } => {
                self.backend.cancel_order(order_id, reason).await
            }
            _ => self.backend.update_order_status(order_id, target).await,
        };
        if let Err(err) = sent {
            warn!(
                order_id = order_id.0,
                event = event.as_str(),
                error = %err,
                "transition request failed"
            );
            return Err(err);
        }
        info!(
            order_id = order_id.0,
            from = %current,
            to = %target,
            "transition accepted by backend"
        );

        let refreshed = self.refresh().await.map(|_| ());
        match refreshed {
            Ok(()) => Ok(TransitionOutcome::Applied {
                order: self.order(order_id).cloned(),
                refresh_error: None,
            }),
            Err(err) => {
                warn!(
                    order_id = order_id.0,
                    error = %err,
                    "reload after accepted transition failed"
                );
                Ok(TransitionOutcome::Applied {
                    order: None,
                    refresh_error: Some(err),
                })
            }
        }
    }

    pub async fn accept(&mut self, order_id: OrderId) -> Result<TransitionOutcome, ClientError> {
        self.request_transition(order_id, OrderAction::Accept).await
    }

    pub async fn reject(&mut self, order_id: OrderId) -> Result<TransitionOutcome, ClientError> {
        self.request_transition(order_id, OrderAction::Reject).await
    }

    pub async fn advance(&mut self, order_id: OrderId) -> Result<TransitionOutcome, ClientError> {
        self.request_transition(order_id, OrderAction::Advance).await
    }

    pub async fn cancel(
        &mut self,
        order_id: OrderId,
        reason: impl Into<String>,
    ) -> Result<TransitionOutcome, ClientError> {
        self.request_transition(
            order_id,
            OrderAction::Cancel {
                reason: reason.into(),
            },
        )
        .await
    }
}

#[cfg(test)]
#[path = "tests/workflow_tests.rs"]
mod tests;
