//! Wire types for the storefront API.
//!
//! Every type here serializes with `camelCase` field names, matching the
//! contract consumed by the storefront frontend.

pub mod cart;
pub mod media;
pub mod money;
pub mod page;
pub mod product;

pub use cart::{CartCost, CartLineItem, CartResponse, CheckoutResponse};
pub use media::{Image, SelectedOption, Seo};
pub use money::{Money, MoneyError};
pub use page::{Cursor, PageInfo};
pub use product::{
    PriceRange, ProductDetailResponse, ProductListItem, ProductListResponse, ProductVariant,
};
