use std::{borrow::Cow, fmt, str::FromStr};

use shared::domain::{Order, OrderStatus, UnknownStatus};

/// Selector of the order list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    /// Selector bar contents, in display order.
    pub fn choices() -> impl Iterator<Item = StatusFilter> {
        std::iter::once(StatusFilter::All)
            .chain(OrderStatus::ALL.into_iter().map(StatusFilter::Only))
    }

    pub fn matches(self, order: &Order) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => order.status == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("ALL"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ALL" | "TODAS" => Ok(StatusFilter::All),
            _ => raw.parse().map(StatusFilter::Only),
        }
    }
}

/// Orders matching `selector`, in their original relative order. `All`
/// borrows the input untouched.
pub fn filter_orders(orders: &[Order], selector: StatusFilter) -> Cow<'_, [Order]> {
    match selector {
        StatusFilter::All => Cow::Borrowed(orders),
        StatusFilter::Only(_) => Cow::Owned(
            orders
                .iter()
                .filter(|order| selector.matches(order))
                .cloned()
                .collect(),
        ),
    }
}

#[cfg(test)]
#[path = "tests/orders_tests.rs"]
mod tests;
