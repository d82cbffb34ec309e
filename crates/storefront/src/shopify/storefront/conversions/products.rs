//! Product and collection conversions.

use storefront_api_core::{
    Cursor, PageInfo, PriceRange, ProductDetailResponse, ProductListItem, ProductListResponse,
    ProductVariant,
};

use crate::shopify::types::{self, Collection, Product, ProductConnection, ProductSummary};

use super::check_money;

/// Flatten one product of a listing.
#[must_use]
pub fn convert_product_list_item(product: ProductSummary) -> ProductListItem {
    check_money("priceRange.minVariantPrice", &product.price_range.min_variant_price);
    check_money("priceRange.maxVariantPrice", &product.price_range.max_variant_price);

    ProductListItem {
        id: product.id,
        title: product.title,
        handle: product.handle,
        featured_image: product.featured_image,
        price_range: PriceRange {
            min_price: product.price_range.min_variant_price,
            max_price: product.price_range.max_variant_price,
        },
        available_for_sale: product.available_for_sale,
    }
}

/// Keep only the fields clients page with; the end cursor is copied verbatim.
#[must_use]
pub fn convert_page_info(page_info: types::PageInfo) -> PageInfo {
    PageInfo {
        has_next_page: page_info.has_next_page,
        end_cursor: page_info.end_cursor.map(Cursor::from),
    }
}

/// Flatten a product connection, preserving edge order.
#[must_use]
pub fn convert_product_list(connection: ProductConnection) -> ProductListResponse {
    ProductListResponse {
        items: connection
            .edges
            .into_iter()
            .map(|edge| convert_product_list_item(edge.node))
            .collect(),
        page_info: convert_page_info(connection.page_info),
    }
}

/// Flatten a collection's product page into a listing.
#[must_use]
pub fn convert_collection_products(collection: Collection) -> ProductListResponse {
    convert_product_list(collection.products)
}

fn convert_variant(variant: types::ProductVariant) -> ProductVariant {
    check_money("variant.price", &variant.price);
    if let Some(compare_at) = &variant.compare_at_price {
        check_money("variant.compareAtPrice", compare_at);
    }

    ProductVariant {
        id: variant.id,
        title: variant.title,
        available_for_sale: variant.available_for_sale,
        selected_options: variant.selected_options,
        price: variant.price,
        compare_at_price: variant.compare_at_price,
        quantity_available: variant.quantity_available,
    }
}

/// Flatten a product detail, unwrapping images and variants in upstream order.
#[must_use]
pub fn convert_product_detail(product: Product) -> ProductDetailResponse {
    ProductDetailResponse {
        id: product.id,
        title: product.title,
        handle: product.handle,
        description: product.description,
        description_html: product.description_html,
        available_for_sale: product.available_for_sale,
        images: product.images.edges.into_iter().map(|e| e.node).collect(),
        variants: product
            .variants
            .edges
            .into_iter()
            .map(|e| convert_variant(e.node))
            .collect(),
        seo: product.seo,
    }
}
