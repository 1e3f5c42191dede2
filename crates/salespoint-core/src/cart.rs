//! # Cart Module
//!
//! The shopping cart: products and quantities collected before ordering.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller Action            Cart Method                State Change       │
//! │  ─────────────            ───────────                ────────────       │
//! │                                                                         │
//! │  Put product in cart ───► add_or_update_item() ────► push / replace     │
//! │                                                                         │
//! │  Remove line ───────────► remove_item(id) ─────────► items.remove(i)    │
//! │                                                                         │
//! │  Empty cart ────────────► clear() ─────────────────► items.clear()      │
//! │                                                                         │
//! │  Checkout ──────────────► add_items_to(order) ─────► (read only)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! `Cart` is a plain value. Callers that share a cart across threads wrap it
//! in their own lock.

use std::slice;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::Product;
use crate::config::SalespointConfig;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::metric::Metric;
use crate::money::Money;
use crate::order::Order;
use crate::quantity::Quantity;
use crate::rounding::{RoundingPolicy, MONETARY_ROUNDING};
use crate::validation::{validate_cart_quantity, validate_limit};
use crate::MAX_CART_ITEMS;

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the shopping cart.
///
/// ## Design Notes
/// - `id`: fresh UUID per item; replacing an item (when the same product is
///   added again) yields a new id
/// - `product`: copy of the product at the time it was added
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub product: Product,
    pub quantity: Quantity,
}

impl CartItem {
    fn new(product: Product, quantity: Quantity) -> Self {
        CartItem {
            id: Uuid::new_v4().to_string(),
            product,
            quantity,
        }
    }

    /// Calculates the item price (unit price × quantity).
    pub fn price(&self) -> CoreResult<Money> {
        self.product.price.times(&self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one item per product id (adding the same product again merges
///   the quantities into a replacement item)
/// - Quantities are positive
/// - At most `max_items` distinct items
///
/// Deserialized carts are checked against the same invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCart")]
pub struct Cart {
    items: Vec<CartItem>,
    currency: Metric,
    /// Rounding of the total when the cart is empty.
    rounding: RoundingPolicy,
    max_items: usize,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty euro cart with the default item limit.
    pub fn new() -> Self {
        Cart::with_limits(Metric::EURO, MONETARY_ROUNDING, MAX_CART_ITEMS)
    }

    /// Creates an empty cart using the configured currency, rounding and
    /// item limit.
    ///
    /// ## Errors
    /// `CoreError::Validation` if the configured currency is invalid.
    pub fn from_config(config: &SalespointConfig) -> CoreResult<Self> {
        Ok(Cart::with_limits(
            config.pricing.currency()?,
            config.pricing.rounding,
            config.cart.max_items,
        ))
    }

    fn with_limits(currency: Metric, rounding: RoundingPolicy, max_items: usize) -> Self {
        Cart {
            items: Vec::new(),
            currency,
            rounding,
            max_items,
            created_at: Utc::now(),
        }
    }

    /// Adds `quantity` of `product`, or merges it into the existing item for
    /// that product.
    ///
    /// ## Behavior
    /// - Product not in cart: a new item is appended
    /// - Product already in cart: the item is replaced, in place, by a new
    ///   item (new id) holding the summed quantity
    ///
    /// ## Returns
    /// The item now representing `product` in the cart.
    ///
    /// ## Errors
    /// - `CoreError::Validation` if `quantity` is not positive
    /// - `CoreError::CartTooLarge` if a new item would exceed the limit
    pub fn add_or_update_item(
        &mut self,
        product: &Product,
        quantity: Quantity,
    ) -> CoreResult<CartItem> {
        validate_cart_quantity(&quantity)?;

        if let Some(index) = self.position_of_product(&product.id) {
            let merged = self.items[index].quantity.add(&quantity)?;
            let item = CartItem::new(product.clone(), merged);
            debug!(
                product_id = %product.id,
                quantity = %item.quantity,
                "Updated cart item"
            );
            self.items[index] = item.clone();
            return Ok(item);
        }

        if self.items.len() >= self.max_items {
            return Err(CoreError::CartTooLarge {
                max: self.max_items,
            });
        }

        let item = CartItem::new(product.clone(), quantity);
        debug!(product_id = %product.id, quantity = %item.quantity, "Added cart item");
        self.items.push(item.clone());
        Ok(item)
    }

    /// Removes the item with the given id.
    pub fn remove_item(&mut self, item_id: &str) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id == item_id)?;
        debug!(item_id, "Removed cart item");
        Some(self.items.remove(index))
    }

    /// Returns the item with the given id.
    pub fn get_item(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Returns the item holding `product_id`, if any.
    pub fn item_for_product(&self, product_id: &str) -> Option<&CartItem> {
        self.position_of_product(product_id)
            .map(|index| &self.items[index])
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    pub fn currency(&self) -> &Metric {
        &self.currency
    }

    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Total price of all items, rounded like the item prices.
    ///
    /// ## Errors
    /// `CoreError::CurrencyMismatch` if an item is priced in another currency.
    pub fn price(&self) -> CoreResult<Money> {
        let prices = self
            .items
            .iter()
            .map(CartItem::price)
            .collect::<CoreResult<Vec<_>>>()?;
        Money::sum(self.currency.clone(), self.rounding, &prices)
    }

    /// Copies every item into `order` as an order line.
    ///
    /// The cart itself is left untouched; call [`Cart::clear`] after a
    /// successful checkout.
    pub fn add_items_to(&self, order: &mut Order) -> CoreResult<()> {
        for item in &self.items {
            order.add_line(&item.product, item.quantity.clone())?;
        }
        info!(order_id = %order.id, items = self.items.len(), "Cart items added to order");
        Ok(())
    }

    fn position_of_product(&self, product_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product.id == product_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Serde
// =============================================================================

/// Wire form of a cart; checked by `TryFrom` before it becomes a `Cart`.
#[derive(Deserialize)]
struct RawCart {
    items: Vec<CartItem>,
    currency: Metric,
    #[serde(default)]
    rounding: RoundingPolicy,
    max_items: usize,
    created_at: DateTime<Utc>,
}

impl TryFrom<RawCart> for Cart {
    type Error = CoreError;

    fn try_from(raw: RawCart) -> Result<Self, Self::Error> {
        validate_limit("cart.max_items", raw.max_items)?;
        if raw.items.len() > raw.max_items {
            return Err(CoreError::CartTooLarge { max: raw.max_items });
        }

        for (index, item) in raw.items.iter().enumerate() {
            validate_cart_quantity(&item.quantity)?;
            if raw.items[..index]
                .iter()
                .any(|earlier| earlier.product.id == item.product.id)
            {
                return Err(ValidationError::InvalidFormat {
                    field: "items".to_string(),
                    reason: format!("product {} appears more than once", item.product.id),
                }
                .into());
            }
        }

        Ok(Cart {
            items: raw.items,
            currency: raw.currency,
            rounding: raw.rounding,
            max_items: raw.max_items,
            created_at: raw.created_at,
        })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderStatus;
    use rust_decimal::Decimal;

    fn quantity() -> Quantity {
        Quantity::of(10)
    }

    fn product() -> Product {
        Product::new("name", Money::euros(1)).unwrap()
    }

    #[test]
    fn test_adds_cart_item_correctly() {
        let mut cart = Cart::new();
        let reference = cart.add_or_update_item(&product(), quantity()).unwrap();

        assert!(cart.iter().any(|item| *item == reference));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        let result = cart.add_or_update_item(&product(), Quantity::of(0));
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_removes_items_correctly() {
        let mut cart = Cart::new();
        let reference = cart.add_or_update_item(&product(), quantity()).unwrap();

        assert_eq!(cart.remove_item(&reference.id), Some(reference));
        assert_eq!(cart.len(), 0);
    }

    #[test]
    fn test_remove_unknown_item_returns_none() {
        let mut cart = Cart::new();
        cart.add_or_update_item(&product(), quantity()).unwrap();
        assert!(cart.remove_item("foobar").is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_provides_access_to_cart_item() {
        let mut cart = Cart::new();
        let reference = cart.add_or_update_item(&product(), quantity()).unwrap();

        assert_eq!(cart.get_item(&reference.id), Some(&reference));
    }

    #[test]
    fn test_returns_none_for_non_existing_identifier() {
        let mut cart = Cart::new();
        cart.add_or_update_item(&product(), quantity()).unwrap();

        assert!(cart.get_item("foobar").is_none());
    }

    #[test]
    fn test_clears_cart_correctly() {
        let mut cart = Cart::new();
        cart.add_or_update_item(&product(), quantity()).unwrap();
        cart.clear();

        assert_eq!(cart.iter().count(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_is_empty() {
        let mut cart = Cart::new();
        assert!(cart.is_empty());

        cart.add_or_update_item(&product(), quantity()).unwrap();
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_updates_cart_item_if_one_for_product_already_exists() {
        let mut cart = Cart::new();
        let product = product();

        let item = cart.add_or_update_item(&product, quantity()).unwrap();
        assert_eq!(item.product, product);
        assert_eq!(item.quantity, quantity());
        assert_eq!(cart.len(), 1);

        let updated = cart.add_or_update_item(&product, quantity()).unwrap();
        assert_ne!(updated, item);
        assert_eq!(cart.len(), 1);
        assert_eq!(updated.product, product);
        assert_eq!(updated.quantity, quantity().add(&quantity()).unwrap());
        assert!(cart.get_item(&item.id).is_none());
        assert_eq!(cart.item_for_product(&product.id), Some(&updated));
    }

    #[test]
    fn test_update_keeps_item_position() {
        let mut cart = Cart::new();
        let first = product();
        let second = Product::new("other", Money::euros(2)).unwrap();

        cart.add_or_update_item(&first, quantity()).unwrap();
        cart.add_or_update_item(&second, quantity()).unwrap();
        cart.add_or_update_item(&first, Quantity::of(1)).unwrap();

        let names: Vec<_> = cart.iter().map(|item| item.product.name.as_str()).collect();
        assert_eq!(names, vec!["name", "other"]);
    }

    #[test]
    fn test_max_items() {
        let mut config = SalespointConfig::default();
        config.cart.max_items = 1;
        let mut cart = Cart::from_config(&config).unwrap();

        let first = product();
        cart.add_or_update_item(&first, quantity()).unwrap();
        assert!(matches!(
            cart.add_or_update_item(&product(), quantity()),
            Err(CoreError::CartTooLarge { max: 1 })
        ));
        // Merging into an existing item is still allowed at the limit.
        assert!(cart.add_or_update_item(&first, quantity()).is_ok());
    }

    #[test]
    fn test_price() {
        let mut cart = Cart::new();
        let espresso = Product::new("Espresso", Money::euros(Decimal::new(250, 2))).unwrap();
        let cookie = Product::new("Cookie", Money::euros(Decimal::new(120, 2))).unwrap();

        cart.add_or_update_item(&espresso, Quantity::of(2)).unwrap();
        cart.add_or_update_item(&cookie, Quantity::of(3)).unwrap();

        assert_eq!(cart.price().unwrap(), Money::euros(Decimal::new(860, 2)));
        assert!(Cart::new().price().unwrap().is_zero());
    }

    #[test]
    fn test_price_keeps_configured_rounding() {
        let mut config = SalespointConfig::default();
        config.pricing.rounding = "half_up:2".parse().unwrap();
        let mut cart = Cart::from_config(&config).unwrap();
        assert_eq!(cart.price().unwrap().to_string(), "0.00€");

        let espresso = Product::new("Espresso", config.pricing.parse_money("2.50").unwrap()).unwrap();
        let item = cart.add_or_update_item(&espresso, Quantity::of(2)).unwrap();

        let line = item.price().unwrap();
        let total = cart.price().unwrap();
        assert_eq!(line.to_string(), "5.00€");
        assert_eq!(total.to_string(), "5.00€");
        assert_eq!(total, line);
        assert_eq!(total, config.pricing.parse_money("5").unwrap());
    }

    #[test]
    fn test_from_config_rejects_invalid_currency() {
        let mut config = SalespointConfig::default();
        config.pricing.currency_name = String::new();
        assert!(matches!(
            Cart::from_config(&config),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add_or_update_item(&product(), quantity()).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.iter().next(), cart.iter().next());
        assert_eq!(back.price().unwrap(), cart.price().unwrap());
    }

    #[test]
    fn test_deserialization_enforces_invariants() {
        let mut cart = Cart::new();
        cart.add_or_update_item(&product(), quantity()).unwrap();
        let valid = serde_json::to_value(&cart).unwrap();

        let mut zero_quantity = valid.clone();
        zero_quantity["items"][0]["quantity"]["amount"] = "0".into();
        assert!(serde_json::from_value::<Cart>(zero_quantity).is_err());

        let mut over_limit = valid.clone();
        over_limit["max_items"] = 0.into();
        assert!(serde_json::from_value::<Cart>(over_limit).is_err());

        let mut duplicated = valid.clone();
        let item = duplicated["items"][0].clone();
        duplicated["items"].as_array_mut().unwrap().push(item);
        assert!(serde_json::from_value::<Cart>(duplicated).is_err());

        assert!(serde_json::from_value::<Cart>(valid).is_ok());
    }

    #[test]
    fn test_add_items_to_order() {
        let mut cart = Cart::new();
        let product = product();
        cart.add_or_update_item(&product, quantity()).unwrap();

        let mut order = Order::new();
        cart.add_items_to(&mut order).unwrap();

        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].product_id, product.id);
        assert_eq!(order.lines[0].quantity, quantity());
        assert_eq!(order.total().unwrap(), cart.price().unwrap());
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_add_items_to_closed_order_fails() {
        let mut cart = Cart::new();
        cart.add_or_update_item(&product(), quantity()).unwrap();

        let mut order = Order::new();
        order.cancel().unwrap();
        assert!(matches!(
            cart.add_items_to(&mut order),
            Err(CoreError::InvalidOrderStatus {
                current_status: OrderStatus::Cancelled,
                ..
            })
        ));
    }

    #[test]
    fn test_iterates_by_reference() {
        let mut cart = Cart::new();
        cart.add_or_update_item(&product(), quantity()).unwrap();

        let mut count = 0;
        for item in &cart {
            assert_eq!(item.quantity, quantity());
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
