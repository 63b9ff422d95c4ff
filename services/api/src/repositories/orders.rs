//! Order ledger repository
//!
//! Order placement and the owner's cart clear run inside one transaction:
//! either the order is recorded and the cart emptied, or neither happens.
//! Status updates read the current status under a row lock so the terminal
//! guard is checked against the committed value.

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};
use tracing::info;
use uuid::Uuid;

use crate::models::{
    AdminOrderView, CartLine, CustomerDetails, NewOrder, Order, OrderOwner, OrderStatus,
};

const ORDER_COLUMNS: &str = "id, order_id, user_id, items, total_amount, status, \
     customer_details, order_date, order_time, delivery_date, created_at, updated_at";

fn order_from_row(row: &PgRow) -> Result<Order> {
    let Json(items): Json<Vec<CartLine>> = row.get("items");
    let Json(customer_details): Json<CustomerDetails> = row.get("customer_details");
    let status: String = row.get("status");
    let status: OrderStatus = status.parse().map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(Order {
        id: row.get("id"),
        order_id: row.get("order_id"),
        user_id: row.get("user_id"),
        items,
        total_amount: row.get("total_amount"),
        status,
        customer_details,
        order_date: row.get("order_date"),
        order_time: row.get("order_time"),
        delivery_date: row.get("delivery_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Outcome of an admin status update
#[derive(Debug)]
pub enum StatusUpdate {
    /// Transition applied; carries the updated order
    Updated(Order),
    /// No order with that id
    NotFound,
    /// The current status is terminal and rejects the change
    InvalidTransition { from: OrderStatus },
}

/// Order repository
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order and clear the owner's cart atomically.
    ///
    /// The insert and the cart clear commit together; any failure rolls
    /// both back and the cart is left untouched.
    pub async fn place(&self, order: &NewOrder) -> Result<Order> {
        info!(
            "Placing order {} for user {}",
            order.order_id, order.user_id
        );

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO orders
                (order_id, user_id, items, total_amount, status, customer_details,
                 order_date, order_time, delivery_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&order.order_id)
        .bind(order.user_id)
        .bind(Json(&order.items))
        .bind(order.total_amount)
        .bind(OrderStatus::default().to_string())
        .bind(Json(&order.customer_details))
        .bind(&order.order_date)
        .bind(&order.order_time)
        .bind(&order.delivery_date)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET cart = '[]'::jsonb, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(order.user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        order_from_row(&row)
    }

    /// List a user's orders, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(order_from_row).collect()
    }

    /// List all orders across all users, newest first, each decorated with
    /// the owner's name and email only
    pub async fn list_all_with_owner(&self) -> Result<Vec<AdminOrderView>> {
        let rows = sqlx::query(
            r#"
            SELECT o.id, o.order_id, o.user_id, o.items, o.total_amount, o.status,
                   o.customer_details, o.order_date, o.order_time, o.delivery_date,
                   o.created_at, o.updated_at,
                   u.name AS owner_name, u.email AS owner_email
            FROM orders o
            JOIN users u ON u.id = o.user_id
            ORDER BY o.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let order = order_from_row(row)?;
                let user = OrderOwner {
                    id: order.user_id,
                    name: row.get("owner_name"),
                    email: row.get("owner_email"),
                };
                Ok(AdminOrderView { order, user })
            })
            .collect()
    }

    /// Apply a status change, checking the terminal guard against the
    /// committed status under a row lock
    pub async fn set_status(&self, order_id: &str, new_status: OrderStatus) -> Result<StatusUpdate> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT status FROM orders WHERE order_id = $1 FOR UPDATE")
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(row) = row else {
            return Ok(StatusUpdate::NotFound);
        };

        let current: String = row.get("status");
        let current: OrderStatus = current.parse().map_err(|e| anyhow::anyhow!("{}", e))?;

        if !current.can_transition_to(new_status) {
            return Ok(StatusUpdate::InvalidTransition { from: current });
        }

        let row = sqlx::query(&format!(
            r#"
            UPDATE orders
            SET status = $2, updated_at = now()
            WHERE order_id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(new_status.to_string())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Order {} moved {} -> {}", order_id, current, new_status);
        Ok(StatusUpdate::Updated(order_from_row(&row)?))
    }
}
