//! # Order Module
//!
//! Orders and their lines.
//!
//! ## Status Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │     ┌──────┐   pay()   ┌──────┐  complete()  ┌───────────┐              │
//! │     │ Open │──────────►│ Paid │─────────────►│ Completed │              │
//! │     └──┬───┘           └──┬───┘              └───────────┘              │
//! │        │ cancel()         │ cancel()                                    │
//! │        ▼                  ▼                                             │
//! │     ┌───────────────────────┐                                           │
//! │     │       Cancelled       │                                           │
//! │     └───────────────────────┘                                           │
//! │                                                                         │
//! │  Lines can only be added or removed while the order is Open.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::Product;
use crate::config::SalespointConfig;
use crate::error::{CoreError, CoreResult};
use crate::metric::Metric;
use crate::money::Money;
use crate::quantity::Quantity;
use crate::rounding::{RoundingPolicy, MONETARY_ROUNDING};
use crate::validation::validate_cart_quantity;

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order is being assembled.
    #[default]
    Open,
    /// Order has been paid.
    Paid,
    /// Order has been handed over to the customer.
    Completed,
    /// Order was cancelled.
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Open => write!(f, "open"),
            OrderStatus::Paid => write!(f, "paid"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line in an order.
/// Uses snapshot pattern to freeze product data at the time it was ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub product_id: String,
    /// Product name at time of ordering (frozen).
    pub product_name: String,
    /// Unit price at time of ordering (frozen).
    pub unit_price: Money,
    pub quantity: Quantity,
}

impl OrderLine {
    fn new(product: &Product, quantity: Quantity) -> Self {
        OrderLine {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            unit_price: product.price.clone(),
            quantity,
        }
    }

    /// Line total (unit price × quantity).
    pub fn price(&self) -> CoreResult<Money> {
        self.unit_price.times(&self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    /// Currency every line price is summed in.
    pub currency: Metric,
    /// Rounding of the total when the order has no lines.
    #[serde(default)]
    pub rounding: RoundingPolicy,
    pub lines: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates an empty, open order priced in euros.
    pub fn new() -> Self {
        Order::with_currency(Metric::EURO)
    }

    pub fn with_currency(currency: Metric) -> Self {
        Order::with_pricing(currency, MONETARY_ROUNDING)
    }

    /// Creates an empty, open order using the configured currency and rounding.
    pub fn from_config(config: &SalespointConfig) -> CoreResult<Self> {
        Ok(Order::with_pricing(
            config.pricing.currency()?,
            config.pricing.rounding,
        ))
    }

    fn with_pricing(currency: Metric, rounding: RoundingPolicy) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            status: OrderStatus::Open,
            currency,
            rounding,
            lines: Vec::new(),
            created_at: Utc::now(),
            paid_at: None,
        }
    }

    /// Adds a line for `quantity` of `product`.
    ///
    /// ## Errors
    /// - `CoreError::InvalidOrderStatus` unless the order is open
    /// - `CoreError::Validation` if the quantity is not positive
    pub fn add_line(&mut self, product: &Product, quantity: Quantity) -> CoreResult<&OrderLine> {
        self.ensure_status(OrderStatus::Open)?;
        validate_cart_quantity(&quantity)?;

        debug!(order_id = %self.id, product_id = %product.id, %quantity, "Adding order line");
        let index = self.lines.len();
        self.lines.push(OrderLine::new(product, quantity));
        Ok(&self.lines[index])
    }

    /// Removes a line by id while the order is open.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<Option<OrderLine>> {
        self.ensure_status(OrderStatus::Open)?;

        let removed = self
            .lines
            .iter()
            .position(|line| line.id == line_id)
            .map(|index| self.lines.remove(index));
        Ok(removed)
    }

    pub fn get_line(&self, line_id: &str) -> Option<&OrderLine> {
        self.lines.iter().find(|line| line.id == line_id)
    }

    /// Sum of all line prices, rounded like the line prices.
    pub fn total(&self) -> CoreResult<Money> {
        let prices = self
            .lines
            .iter()
            .map(OrderLine::price)
            .collect::<CoreResult<Vec<_>>>()?;
        Money::sum(self.currency.clone(), self.rounding, &prices)
    }

    /// Marks an open order as paid.
    ///
    /// ## Errors
    /// `CoreError::EmptyOrder` if the order has no lines.
    pub fn pay(&mut self) -> CoreResult<()> {
        self.ensure_status(OrderStatus::Open)?;
        if self.lines.is_empty() {
            return Err(CoreError::EmptyOrder(self.id.clone()));
        }

        self.status = OrderStatus::Paid;
        self.paid_at = Some(Utc::now());
        info!(order_id = %self.id, lines = self.lines.len(), "Order paid");
        Ok(())
    }

    /// Marks a paid order as completed.
    pub fn complete(&mut self) -> CoreResult<()> {
        self.ensure_status(OrderStatus::Paid)?;
        self.status = OrderStatus::Completed;
        info!(order_id = %self.id, "Order completed");
        Ok(())
    }

    /// Cancels an open or paid order.
    pub fn cancel(&mut self) -> CoreResult<()> {
        match self.status {
            OrderStatus::Open | OrderStatus::Paid => {
                self.status = OrderStatus::Cancelled;
                info!(order_id = %self.id, "Order cancelled");
                Ok(())
            }
            current_status => Err(CoreError::InvalidOrderStatus {
                order_id: self.id.clone(),
                current_status,
            }),
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    fn ensure_status(&self, expected: OrderStatus) -> CoreResult<()> {
        if self.status != expected {
            return Err(CoreError::InvalidOrderStatus {
                order_id: self.id.clone(),
                current_status: self.status,
            });
        }
        Ok(())
    }
}

impl Default for Order {
    fn default() -> Self {
        Order::new()
    }
}
