use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(RestaurantId);
id_newtype!(OrderId);
id_newtype!(ProductId);

/// Lifecycle state of an order as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Creada,
    Aceptada,
    EnPreparacion,
    Terminada,
    Rechazada,
    Cancelada,
}

impl OrderStatus {
    /// All states in workflow order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Creada,
        OrderStatus::Aceptada,
        OrderStatus::EnPreparacion,
        OrderStatus::Terminada,
        OrderStatus::Rechazada,
        OrderStatus::Cancelada,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Creada => "CREADA",
            OrderStatus::Aceptada => "ACEPTADA",
            OrderStatus::EnPreparacion => "EN_PREPARACION",
            OrderStatus::Terminada => "TERMINADA",
            OrderStatus::Rechazada => "RECHAZADA",
            OrderStatus::Cancelada => "CANCELADA",
        }
    }

    /// Human readable badge text.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Creada => "CREADA",
            OrderStatus::Aceptada => "ACEPTADA",
            OrderStatus::EnPreparacion => "EN PREPARACION",
            OrderStatus::Terminada => "TERMINADA",
            OrderStatus::Rechazada => "RECHAZADA",
            OrderStatus::Cancelada => "CANCELADA",
        }
    }

    /// Style token used by views to color the status badge.
    pub fn style_token(self) -> &'static str {
        match self {
            OrderStatus::Creada => "status-creada",
            OrderStatus::Aceptada => "status-aceptada",
            OrderStatus::EnPreparacion => "status-en-preparacion",
            OrderStatus::Terminada => "status-terminada",
            OrderStatus::Rechazada => "status-rechazada",
            OrderStatus::Cancelada => "status-cancelada",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Terminada | OrderStatus::Rechazada | OrderStatus::Cancelada
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownStatus(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "cliente_nombre", default)]
    pub customer_name: String,
    #[serde(rename = "costo_total", default)]
    pub total_cost: f64,
    #[serde(rename = "direccion_entrega", default)]
    pub delivery_address: String,
    #[serde(
        rename = "motivo_cancelacion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: f64,
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "disponible", default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "calificacion", default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
