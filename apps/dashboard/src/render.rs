//! Text and JSON views of the dashboard.

use std::fmt::Write as _;

use client_core::{
    advance_label, enabled_events, MenuCatalog, OrderEvent, StatusFilter, TransitionOutcome,
};
use serde::Serialize;
use shared::domain::{Order, OrderId, OrderStatus, Product, Restaurant};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionView {
    pub event: &'static str,
    pub label: String,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderCard {
    pub id: i64,
    pub customer: String,
    pub total: f64,
    pub address: String,
    pub status: OrderStatus,
    pub status_label: &'static str,
    pub style: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub actions: Vec<ActionView>,
}

fn action_view(order: &Order, event: OrderEvent) -> ActionView {
    let id = order.id;
    let (label, command) = match event {
        OrderEvent::Accept => ("Accept".to_string(), format!("accept {id}")),
        OrderEvent::Reject => ("Reject".to_string(), format!("reject {id}")),
        OrderEvent::Advance => (
            advance_label(order.status).unwrap_or("Next").to_string(),
            format!("advance {id}"),
        ),
        OrderEvent::Cancel => (
            "Cancel order".to_string(),
            format!("cancel {id} --reason <reason>"),
        ),
    };
    ActionView {
        event: event.as_str(),
        label,
        command,
    }
}

pub fn order_card(order: &Order) -> OrderCard {
    OrderCard {
        id: order.id.0,
        customer: order.customer_name.clone(),
        total: order.total_cost,
        address: order.delivery_address.clone(),
        status: order.status,
        status_label: order.status.label(),
        style: order.status.style_token(),
        cancellation_reason: order.cancellation_reason.clone(),
        actions: enabled_events(order.status)
            .iter()
            .map(|event| action_view(order, *event))
            .collect(),
    }
}

pub fn render_card(card: &OrderCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order #{}  [{}]", card.id, card.status_label);
    let _ = writeln!(out, "  Customer: {}", card.customer);
    let _ = writeln!(out, "  Total:    ${:.2}", card.total);
    let _ = writeln!(out, "  Address:  {}", card.address);
    if let Some(reason) = &card.cancellation_reason {
        let _ = writeln!(out, "  Reason:   {reason}");
    }
    for action in &card.actions {
        let _ = writeln!(out, "  -> {:<18} {}", action.label, action.command);
    }
    out
}

/// Result of one accept/reject/advance/cancel command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TransitionReport {
    Updated {
        order: OrderCard,
    },
    /// Applied, but the order no longer appears in the restaurant's list.
    Unlisted {
        order_id: i64,
    },
    /// Applied, but the order list could not be reloaded afterwards.
    Unconfirmed {
        order_id: i64,
    },
    NotOffered {
        order_id: i64,
        status: OrderStatus,
        status_label: &'static str,
        event: &'static str,
    },
}

pub fn transition_report(
    order_id: OrderId,
    event: OrderEvent,
    outcome: &TransitionOutcome,
) -> TransitionReport {
    match outcome {
        TransitionOutcome::Applied {
            refresh_error: Some(_),
            ..
        } => TransitionReport::Unconfirmed {
            order_id: order_id.0,
        },
        TransitionOutcome::Applied {
            order: Some(order), ..
        } => TransitionReport::Updated {
            order: order_card(order),
        },
        TransitionOutcome::Applied { order: None, .. } => TransitionReport::Unlisted {
            order_id: order_id.0,
        },
        TransitionOutcome::NotOffered { status } => TransitionReport::NotOffered {
            order_id: order_id.0,
            status: *status,
            status_label: status.label(),
            event: event.as_str(),
        },
    }
}

pub fn render_transition(report: &TransitionReport) -> String {
    match report {
        TransitionReport::Updated { order } => render_card(order),
        TransitionReport::Unlisted { order_id } => {
            format!("Order #{order_id} updated; it is no longer listed for this restaurant.\n")
        }
        TransitionReport::Unconfirmed { order_id } => format!(
            "Order #{order_id} updated; its new state will show on the next refresh.\n"
        ),
        TransitionReport::NotOffered {
            order_id,
            status_label,
            event,
            ..
        } => format!("Order #{order_id} is {status_label}; '{event}' is not available in this state.\n"),
    }
}

pub fn filter_bar(active: StatusFilter) -> String {
    StatusFilter::choices()
        .map(|choice| {
            let name = match choice {
                StatusFilter::All => "ALL",
                StatusFilter::Only(status) => status.label(),
            };
            if choice == active {
                format!("[{name}]")
            } else {
                name.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn empty_orders_message(filter: StatusFilter) -> String {
    match filter {
        StatusFilter::All => "No orders".to_string(),
        StatusFilter::Only(status) => format!("No orders in state {}", status.label()),
    }
}

pub fn render_order_list(title: &str, orders: &[Order], filter: StatusFilter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", filter_bar(filter));
    let _ = writeln!(out);
    if orders.is_empty() {
        let _ = writeln!(out, "{}", empty_orders_message(filter));
        let _ = writeln!(out, "Orders appear here when customers place them.");
        return out;
    }
    for order in orders {
        out.push_str(&render_card(&order_card(order)));
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub available: bool,
    pub action_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryView {
    pub category: String,
    pub products: Vec<ProductView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant: Option<Restaurant>,
    pub categories: Vec<CategoryView>,
}

pub fn availability_label(product: &Product) -> &'static str {
    if product.available {
        "Add"
    } else {
        "Sold out"
    }
}

pub fn menu_view(restaurant: Option<Restaurant>, catalog: &MenuCatalog) -> MenuView {
    MenuView {
        restaurant,
        categories: catalog
            .iter()
            .map(|(category, products)| CategoryView {
                category: category.to_string(),
                products: products
                    .iter()
                    .map(|product| ProductView {
                        id: product.id.0,
                        name: product.name.clone(),
                        description: product.description.clone(),
                        price: product.price,
                        available: product.available,
                        action_label: availability_label(product),
                    })
                    .collect(),
            })
            .collect(),
    }
}

pub fn render_menu(view: &MenuView) -> String {
    let mut out = String::new();
    if let Some(restaurant) = &view.restaurant {
        let _ = writeln!(out, "{}", restaurant.name);
        let mut meta = Vec::new();
        if let Some(rating) = restaurant.rating {
            meta.push(format!("rating {rating:.1}"));
        }
        if let Some(address) = &restaurant.address {
            meta.push(address.clone());
        }
        if let Some(phone) = &restaurant.phone {
            meta.push(phone.clone());
        }
        if !meta.is_empty() {
            let _ = writeln!(out, "{}", meta.join(" · "));
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "Menu");
    if view.categories.is_empty() {
        let _ = writeln!(out, "No products available");
        let _ = writeln!(out, "This restaurant has no products on its menu yet.");
        return out;
    }
    for category in &view.categories {
        let _ = writeln!(out, "\n{}", category.category);
        for product in &category.products {
            let _ = writeln!(
                out,
                "  {:<28} ${:>7.2}  [{}]",
                product.name, product.price, product.action_label
            );
            if let Some(description) = &product.description {
                let _ = writeln!(out, "    {description}");
            }
        }
    }
    out
}

pub fn render_restaurants(restaurants: &[Restaurant]) -> String {
    if restaurants.is_empty() {
        return "No restaurants\n".to_string();
    }
    let mut out = String::new();
    for restaurant in restaurants {
        let owner = restaurant
            .owner_id
            .map(|owner| owner.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "#{:<5} {:<30} owner {}",
            restaurant.id.0, restaurant.name, owner
        );
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
