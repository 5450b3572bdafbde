//! Operator-facing notices for failed dashboard actions.

use std::fmt;

use client_core::{ClientError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeContext {
    LoadRestaurant,
    LoadOrders,
    UpdateStatus,
    CancelOrder,
    LoadMenu,
}

impl NoticeContext {
    fn prefix(self) -> &'static str {
        match self {
            NoticeContext::LoadRestaurant => "Error loading restaurant information",
            NoticeContext::LoadOrders => "Error loading orders",
            NoticeContext::UpdateStatus => "Error updating status",
            NoticeContext::CancelOrder => "Error cancelling order",
            NoticeContext::LoadMenu => "Error loading menu",
        }
    }
}

/// A failure ready to be shown to the operator. Local validation problems
/// are shown as-is; backend and transport failures get the action prefix.
#[derive(Debug, Clone)]
pub struct Notice {
    context: NoticeContext,
    kind: ErrorKind,
    message: String,
}

impl Notice {
    pub fn new(context: NoticeContext, err: &ClientError) -> Self {
        Self {
            context,
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Validation => f.write_str(&self.message),
            ErrorKind::Backend | ErrorKind::Transport => {
                write!(f, "{}: {}", self.context.prefix(), self.message)
            }
        }
    }
}

impl std::error::Error for Notice {}

/// Adapter for `map_err` at call sites.
pub fn notice(context: NoticeContext) -> impl Fn(ClientError) -> Notice {
    move |err| Notice::new(context, &err)
}

#[cfg(test)]
#[path = "tests/notice_tests.rs"]
mod tests;
