//! Raw Storefront API payloads.
//!
//! These mirror the JSON that the operations in `storefront::queries` select,
//! graph-shaped (`edges[].node`) exactly as Shopify returns it. The
//! `conversions` module flattens them into the wire types of
//! `storefront-api-core`.

use serde::{Deserialize, Serialize};
use storefront_api_core::{Image, Money, SelectedOption, Seo};

// =============================================================================
// Connections
// =============================================================================

/// An edge of a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge<T> {
    /// Opaque cursor for this edge, when selected.
    #[serde(default)]
    pub cursor: Option<String>,
    pub node: T,
}

/// A connection without pagination state (images, variants, cart lines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

/// Pagination state as returned upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// A paginated list of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    pub edges: Vec<Edge<ProductSummary>>,
    pub page_info: PageInfo,
}

// =============================================================================
// Product Types
// =============================================================================

/// Price range for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPriceRange {
    /// Minimum price among all variants.
    pub min_variant_price: Money,
    /// Maximum price among all variants.
    pub max_variant_price: Money,
}

/// Product fields selected by list queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub available_for_sale: bool,
    pub featured_image: Option<Image>,
    pub price_range: ProductPriceRange,
}

/// A product variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    #[serde(default)]
    pub quantity_available: Option<i64>,
    pub selected_options: Vec<SelectedOption>,
    pub price: Money,
    pub compare_at_price: Option<Money>,
}

/// Product fields selected by the product-by-handle query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub description: String,
    pub description_html: String,
    pub available_for_sale: bool,
    pub featured_image: Option<Image>,
    pub images: Connection<Image>,
    pub price_range: ProductPriceRange,
    pub variants: Connection<ProductVariant>,
    pub seo: Seo,
}

/// Sort keys accepted by the products query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKey {
    Title,
    Price,
    BestSelling,
    CreatedAt,
    UpdatedAt,
    ProductType,
    Vendor,
}

impl ProductSortKey {
    /// All accepted keys, in GraphQL spelling.
    pub const ALL: [Self; 7] = [
        Self::Title,
        Self::Price,
        Self::BestSelling,
        Self::CreatedAt,
        Self::UpdatedAt,
        Self::ProductType,
        Self::Vendor,
    ];

    /// GraphQL enum value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::Price => "PRICE",
            Self::BestSelling => "BEST_SELLING",
            Self::CreatedAt => "CREATED_AT",
            Self::UpdatedAt => "UPDATED_AT",
            Self::ProductType => "PRODUCT_TYPE",
            Self::Vendor => "VENDOR",
        }
    }

    /// Look up a key by its GraphQL spelling.
    #[must_use]
    pub fn from_graphql(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == value)
    }
}

// =============================================================================
// Collection Types
// =============================================================================

/// A collection with one page of its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub products: ProductConnection,
}

// =============================================================================
// Cart Types
// =============================================================================

/// Product that a cart line's merchandise belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchandiseProduct {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub featured_image: Option<Image>,
}

/// The variant purchased by a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchandise {
    pub id: String,
    pub title: String,
    pub product: MerchandiseProduct,
    pub selected_options: Vec<SelectedOption>,
    pub price: Money,
}

/// Cost of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCost {
    pub total_amount: Money,
    pub amount_per_quantity: Money,
}

/// A line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub quantity: i64,
    pub merchandise: Merchandise,
    pub cost: CartLineCost,
}

/// Cart totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    pub subtotal_amount: Money,
    pub total_amount: Money,
    #[serde(default)]
    pub total_tax_amount: Option<Money>,
}

/// A shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub checkout_url: String,
    pub total_quantity: i64,
    pub lines: Connection<CartLine>,
    pub cost: CartCost,
}

/// Business-rule rejection of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartUserError {
    /// Path to the offending input field.
    pub field: Option<Vec<String>>,
    /// Error message.
    pub message: String,
    /// Error code (e.g., `INVALID`, `MERCHANDISE_NOT_ENOUGH_STOCK`).
    pub code: Option<String>,
}

/// Result of any cart mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    pub cart: Option<Cart>,
    #[serde(default)]
    pub user_errors: Vec<CartUserError>,
}

// =============================================================================
// Cart Inputs
// =============================================================================

/// Input for adding a line to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: String,
    /// Quantity to add.
    pub quantity: i64,
}

/// Input for changing the quantity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: String,
    /// New quantity; zero removes the line.
    pub quantity: i64,
}

// =============================================================================
// Response Data
// =============================================================================

/// `data` of the products query.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsData {
    pub products: ProductConnection,
}

/// `data` of the product-by-handle query.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductByHandleData {
    pub product: Option<Product>,
}

/// `data` of the collection-products query.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionProductsData {
    pub collection: Option<Collection>,
}

/// `data` of the cart query.
#[derive(Debug, Clone, Deserialize)]
pub struct CartData {
    pub cart: Option<Cart>,
}

/// `data` of the cartCreate mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCreateData {
    pub cart_create: Option<CartMutationPayload>,
}

/// `data` of the cartLinesAdd mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesAddData {
    pub cart_lines_add: Option<CartMutationPayload>,
}

/// `data` of the cartLinesUpdate mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesUpdateData {
    pub cart_lines_update: Option<CartMutationPayload>,
}

/// `data` of the cartLinesRemove mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLinesRemoveData {
    pub cart_lines_remove: Option<CartMutationPayload>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_round_trips_graphql_spelling() {
        for key in ProductSortKey::ALL {
            assert_eq!(ProductSortKey::from_graphql(key.as_str()), Some(key));
            let json = serde_json::to_value(key).unwrap();
            assert_eq!(json, key.as_str());
        }
        assert_eq!(ProductSortKey::from_graphql("title"), None);
        assert_eq!(ProductSortKey::from_graphql("RELEVANCE"), None);
    }

    #[test]
    fn test_cart_mutation_payload_defaults_user_errors() {
        let payload: CartMutationPayload = serde_json::from_value(serde_json::json!({
            "cart": null
        }))
        .unwrap();
        assert!(payload.cart.is_none());
        assert!(payload.user_errors.is_empty());
    }

    #[test]
    fn test_cart_line_update_input_uses_id() {
        let input = CartLineUpdateInput {
            id: "gid://shopify/CartLine/1".to_string(),
            quantity: 0,
        };
        assert_eq!(
            serde_json::to_value(input).unwrap(),
            serde_json::json!({"id": "gid://shopify/CartLine/1", "quantity": 0})
        );
    }
}
