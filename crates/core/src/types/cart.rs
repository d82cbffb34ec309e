//! Cart responses.
//!
//! Carts are owned by the commerce platform. These types only describe what
//! the API returns after reading or mutating one upstream; every amount is the
//! platform's own figure.

use serde::{Deserialize, Serialize};

use super::media::{Image, SelectedOption};
use super::money::Money;

/// One line of a cart, flattened from the upstream merchandise/product nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Cart line ID, used for quantity updates and removal.
    pub id: String,
    pub quantity: i64,
    /// Variant ID of the purchased merchandise.
    pub merchandise_id: String,
    /// Variant title (e.g., "Large / Blue").
    pub title: String,
    pub product_title: String,
    pub product_handle: String,
    pub featured_image: Option<Image>,
    pub selected_options: Vec<SelectedOption>,
    /// Unit price of the variant.
    pub price: Money,
    /// Line total as computed upstream (quantity, unit price and line discounts).
    pub total_price: Money,
}

/// Cart totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCost {
    pub subtotal: Money,
    pub total: Money,
    /// Estimated tax, when the platform reports one.
    pub tax: Option<Money>,
}

/// A cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    /// Opaque cart ID issued upstream.
    pub id: String,
    /// Opaque checkout URL issued upstream.
    pub checkout_url: String,
    pub total_quantity: i64,
    pub lines: Vec<CartLineItem>,
    pub cost: CartCost,
}

/// Checkout hand-off target for a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub checkout_url: String,
}
