//! Product listing and product detail responses.

use serde::{Deserialize, Serialize};

use super::media::{Image, SelectedOption, Seo};
use super::money::Money;
use super::page::PageInfo;

/// Price range across a product's variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Lowest variant price.
    pub min_price: Money,
    /// Highest variant price.
    pub max_price: Money,
}

/// One product in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub featured_image: Option<Image>,
    pub price_range: PriceRange,
    pub available_for_sale: bool,
}

/// A page of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    /// Products in upstream order.
    pub items: Vec<ProductListItem>,
    pub page_info: PageInfo,
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant ID, used as `merchandiseId` when adding to a cart.
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub selected_options: Vec<SelectedOption>,
    pub price: Money,
    /// Original price when the variant is on sale.
    pub compare_at_price: Option<Money>,
    /// Stock level, when the storefront token may read inventory.
    pub quantity_available: Option<i64>,
}

/// Full product detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub id: String,
    pub title: String,
    pub handle: String,
    pub description: String,
    pub description_html: String,
    pub available_for_sale: bool,
    /// Images in upstream order.
    pub images: Vec<Image>,
    /// Variants in upstream order.
    pub variants: Vec<ProductVariant>,
    pub seo: Seo,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Cursor;

    #[test]
    fn test_list_response_field_names() {
        let response = ProductListResponse {
            items: vec![ProductListItem {
                id: "gid://shopify/Product/1".to_string(),
                title: "Dried Pineapple".to_string(),
                handle: "dried-pineapple".to_string(),
                featured_image: None,
                price_range: PriceRange {
                    min_price: Money::new("8.0", "USD"),
                    max_price: Money::new("12.0", "USD"),
                },
                available_for_sale: true,
            }],
            page_info: PageInfo {
                has_next_page: true,
                end_cursor: Some(Cursor::new("c1")),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        let item = &json["items"][0];
        assert_eq!(item["availableForSale"], true);
        assert_eq!(item["featuredImage"], serde_json::Value::Null);
        assert_eq!(item["priceRange"]["minPrice"]["amount"], "8.0");
        assert_eq!(json["pageInfo"]["endCursor"], "c1");
    }
}
