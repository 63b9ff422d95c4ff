//! Order ledger models and the status vocabulary
//!
//! An order is an immutable snapshot of cart contents plus delivery details.
//! Only the status field changes after placement, and only while the order
//! has not reached a terminal [`OrderStatus`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::cart::CartLine;

/// Fixed order status vocabulary.
///
/// A non-terminal order accepts any status change; `Delivered` and
/// `Cancelled` are terminal and reject all further changes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(OrderStatus::Pending),
            "Processing" => Ok(OrderStatus::Processing),
            "Shipped" => Ok(OrderStatus::Shipped),
            "Delivered" => Ok(OrderStatus::Delivered),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("Unknown order status: {}", other)),
        }
    }
}

impl OrderStatus {
    /// Whether no further transitions are allowed out of this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether a change from `self` to another status is allowed. Only the
    /// terminal statuses pin the order down.
    pub fn can_transition_to(self, _next: OrderStatus) -> bool {
        !self.is_terminal()
    }
}

/// Customer delivery details captured at placement time (free text).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub payment_method: String,
}

/// A placed order as stored in the ledger.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub order_id: String,
    pub user_id: Uuid,
    pub items: Vec<CartLine>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub customer_details: CustomerDetails,
    pub order_date: Option<String>,
    pub order_time: Option<String>,
    pub delivery_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal owner identity attached to admin order listings.
/// Never carries the password hash or any token material.
#[derive(Debug, Clone, Serialize)]
pub struct OrderOwner {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// An order decorated with its owner, as returned to admins.
#[derive(Debug, Clone, Serialize)]
pub struct AdminOrderView {
    #[serde(flatten)]
    pub order: Order,
    pub user: OrderOwner,
}

/// Client-supplied order payload.
///
/// The client's `totalAmount` is accepted for wire compatibility but
/// ignored: the server recomputes the total from the item snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub id: Option<String>,
    #[serde(default)]
    pub items: Vec<CartLine>,
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub customer_details: CustomerDetails,
    pub order_date: Option<String>,
    pub order_time: Option<String>,
    pub delivery_date: Option<String>,
}

/// Request body for `POST /api/user/orders`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderBody {
    pub order_data: OrderRequest,
}

/// Validated, server-normalized order ready for insertion into the ledger.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_id: String,
    pub user_id: Uuid,
    pub items: Vec<CartLine>,
    pub total_amount: f64,
    pub customer_details: CustomerDetails,
    pub order_date: Option<String>,
    pub order_time: Option<String>,
    pub delivery_date: Option<String>,
}

/// Request body for `PUT /api/admin/orders/:orderId`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: String,
}

/// Generate a server-side order id when the client omits one.
pub fn generate_order_id(now: DateTime<Utc>) -> String {
    format!("ORD{}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Processing));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_pending_order_can_be_marked_shipped_directly() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
        assert!(OrderStatus::Processing.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_non_terminal_orders_accept_any_change() {
        for from in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
        ] {
            assert!(from.can_transition_to(OrderStatus::Cancelled));
            assert!(from.can_transition_to(OrderStatus::Pending));
        }
    }

    #[test]
    fn test_terminal_states_reject_all_transitions() {
        for next in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert!(!OrderStatus::Delivered.can_transition_to(next));
            assert!(!OrderStatus::Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let parsed: OrderStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!("processing".parse::<OrderStatus>().is_err());
        assert!("Unknown".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_generate_order_id_format() {
        let now = Utc::now();
        let id = generate_order_id(now);
        assert!(id.starts_with("ORD"));
        assert_eq!(id[3..].parse::<i64>().unwrap(), now.timestamp_millis());
    }
}
