//! Pure reshaping of raw Storefront API payloads into response types.
//!
//! Every function here is deterministic and order-preserving: list order is
//! upstream order, cursors are copied verbatim and amounts are never
//! recomputed.

mod cart;
mod products;

pub use cart::convert_cart;
pub use products::{
    convert_collection_products, convert_page_info, convert_product_detail, convert_product_list,
    convert_product_list_item,
};

use storefront_api_core::Money;
use tracing::warn;

/// Log amounts that do not look like non-negative decimals with an ISO code.
///
/// The amount is passed through unchanged either way.
fn check_money(field: &'static str, money: &Money) {
    if let Err(error) = money.validate() {
        warn!(field, amount = %money.amount, currency = %money.currency_code, %error, "Unexpected money value from Storefront API");
    }
}
