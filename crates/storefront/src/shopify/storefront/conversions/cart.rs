//! Cart conversions.

use storefront_api_core::{CartCost, CartLineItem, CartResponse};

use crate::shopify::types::{self, Cart, CartLine};

use super::check_money;

fn convert_cart_line(line: CartLine) -> CartLineItem {
    check_money("line.cost.totalAmount", &line.cost.total_amount);

    let merchandise = line.merchandise;
    CartLineItem {
        id: line.id,
        quantity: line.quantity,
        merchandise_id: merchandise.id,
        title: merchandise.title,
        product_title: merchandise.product.title,
        product_handle: merchandise.product.handle,
        featured_image: merchandise.product.featured_image,
        selected_options: merchandise.selected_options,
        price: merchandise.price,
        total_price: line.cost.total_amount,
    }
}

fn convert_cart_cost(cost: types::CartCost) -> CartCost {
    check_money("cost.subtotalAmount", &cost.subtotal_amount);
    check_money("cost.totalAmount", &cost.total_amount);

    CartCost {
        subtotal: cost.subtotal_amount,
        total: cost.total_amount,
        tax: cost.total_tax_amount,
    }
}

/// Flatten a cart, preserving line order and upstream totals.
#[must_use]
pub fn convert_cart(cart: Cart) -> CartResponse {
    CartResponse {
        id: cart.id,
        checkout_url: cart.checkout_url,
        total_quantity: cart.total_quantity,
        lines: cart
            .lines
            .edges
            .into_iter()
            .map(|edge| convert_cart_line(edge.node))
            .collect(),
        cost: convert_cart_cost(cart.cost),
    }
}
