//! # salespoint-core: E-Commerce Domain Core
//!
//! Value objects and entities for web shops: quantities, money, products,
//! carts and orders. Pure domain logic with no persistence and no HTTP.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Salespoint Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Web / Application Layer (external)                 │   │
//! │  │     parses form input, dispatches requests, renders pages       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ salespoint-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌───────┐  │   │
//! │  │  │ rounding │ │ quantity │ │  money   │ │   cart   │ │ order │  │   │
//! │  │  │  policy  │►│  metric  │►│          │►│ catalog  │►│       │  │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └──────────┘ └───────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK (config file aside)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Persistence Layer (external)                       │   │
//! │  │        identifiers, schema mapping, transactions                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`rounding`] - Rounding policies (monetary, integral, custom)
//! - [`metric`] - Units of measure
//! - [`quantity`] - The rounded `Quantity` value object
//! - [`money`] - Money as a currency-denominated quantity
//! - [`catalog`] - Products
//! - [`cart`] - Shopping cart
//! - [`order`] - Orders and order lines
//! - [`config`] - Cart and pricing configuration
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Round on Construction**: every quantity holds an already-rounded amount
//! 2. **Immutable Values**: arithmetic returns new quantities
//! 3. **Decimal Money**: no floating point in monetary arithmetic
//! 4. **Explicit Errors**: division by zero and parse failures are typed errors
//!
//! ## Example Usage
//!
//! ```rust
//! use salespoint_core::{Cart, Money, Order, Product, Quantity};
//!
//! let espresso = Product::new("Espresso", "2.50".parse::<Money>().unwrap()).unwrap();
//!
//! let mut cart = Cart::new();
//! cart.add_or_update_item(&espresso, Quantity::of(2)).unwrap();
//! cart.add_or_update_item(&espresso, Quantity::of(1)).unwrap();
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.price().unwrap().to_string(), "7.5000€");
//!
//! let mut order = Order::new();
//! cart.add_items_to(&mut order).unwrap();
//! order.pay().unwrap();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod metric;
pub mod money;
pub mod order;
pub mod quantity;
pub mod rounding;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use catalog::Product;
pub use config::SalespointConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use metric::Metric;
pub use money::Money;
pub use order::{Order, OrderLine, OrderStatus};
pub use quantity::Quantity;
pub use rounding::{RoundingMode, RoundingPolicy, RoundingStrategy, MONETARY_ROUNDING, ROUND_ONE};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default maximum of distinct items in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts. Overridable through `[cart] max_items`.
pub const MAX_CART_ITEMS: usize = 100;
