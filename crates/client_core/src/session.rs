//! Dashboard session context.
//!
//! The operator's restaurant is resolved once at start-up and then passed
//! explicitly to everything that needs it.

use shared::domain::{Restaurant, RestaurantId, UserId};
use tracing::debug;

use crate::{
    catalog::{group_by_category, MenuCatalog},
    error::ClientError,
    DeliveryBackend,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSession {
    pub restaurant_id: RestaurantId,
    pub restaurant: Option<Restaurant>,
}

impl DashboardSession {
    /// Session for a restaurant whose id is already known.
    pub fn for_restaurant(restaurant_id: RestaurantId) -> Self {
        Self {
            restaurant_id,
            restaurant: None,
        }
    }

    pub async fn for_owner<B: DeliveryBackend + ?Sized>(
        backend: &B,
        owner: UserId,
    ) -> Result<Self, ClientError> {
        let restaurant = resolve_restaurant(backend, owner).await?;
        Ok(Self {
            restaurant_id: restaurant.id,
            restaurant: Some(restaurant),
        })
    }

    pub fn display_name(&self) -> String {
        match &self.restaurant {
            Some(restaurant) if !restaurant.name.is_empty() => restaurant.name.clone(),
            _ => format!("Restaurant #{}", self.restaurant_id),
        }
    }
}

/// Finds the restaurant owned by `owner`.
pub async fn resolve_restaurant<B: DeliveryBackend + ?Sized>(
    backend: &B,
    owner: UserId,
) -> Result<Restaurant, ClientError> {
    let restaurants = backend.list_restaurants().await?;
    debug!(count = restaurants.len(), owner = owner.0, "resolving restaurant");
    restaurants
        .into_iter()
        .find(|restaurant| restaurant.owner_id == Some(owner))
        .ok_or_else(|| {
            ClientError::NotFound(format!("no restaurant associated with user {owner}"))
        })
}

/// Loads a restaurant's products grouped for display.
pub async fn load_menu<B: DeliveryBackend + ?Sized>(
    backend: &B,
    restaurant_id: RestaurantId,
) -> Result<MenuCatalog, ClientError> {
    let products = backend.list_products(restaurant_id).await?;
    Ok(group_by_category(&products))
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
