//! GraphQL operation documents for the Shopify Storefront API.
//!
//! Each operation pairs a document with its kind. Only [`OperationKind::Query`]
//! operations are ever served from the response cache or retried.

/// Whether an operation reads or writes upstream state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// A named GraphQL document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation name, sent as `operationName`.
    pub name: &'static str,
    pub kind: OperationKind,
    /// Full GraphQL document text.
    pub document: &'static str,
}

impl Operation {
    /// Whether this operation only reads data.
    #[must_use]
    pub const fn is_query(&self) -> bool {
        matches!(self.kind, OperationKind::Query)
    }
}

// Selection sets shared between operations.
macro_rules! product_summary_fields {
    () => {
        "id title handle availableForSale \
         featuredImage { url altText width height } \
         priceRange { minVariantPrice { amount currencyCode } maxVariantPrice { amount currencyCode } }"
    };
}

macro_rules! cart_fields {
    () => {
        "id checkoutUrl totalQuantity \
         lines(first: 100) { edges { node { id quantity \
           merchandise { ... on ProductVariant { id title \
             selectedOptions { name value } \
             price { amount currencyCode } \
             product { id title handle featuredImage { url altText width height } } } } \
           cost { totalAmount { amount currencyCode } amountPerQuantity { amount currencyCode } } } } } \
         cost { subtotalAmount { amount currencyCode } totalAmount { amount currencyCode } \
           totalTaxAmount { amount currencyCode } }"
    };
}

// =============================================================================
// Product queries
// =============================================================================

pub const GET_PRODUCTS: Operation = Operation {
    name: "GetProducts",
    kind: OperationKind::Query,
    document: concat!(
        "query GetProducts($first: Int!, $after: String, $query: String, ",
        "$sortKey: ProductSortKeys, $reverse: Boolean) { ",
        "products(first: $first, after: $after, query: $query, sortKey: $sortKey, reverse: $reverse) { ",
        "edges { cursor node { ",
        product_summary_fields!(),
        " } } pageInfo { hasNextPage hasPreviousPage startCursor endCursor } } }"
    ),
};

pub const GET_PRODUCT_BY_HANDLE: Operation = Operation {
    name: "GetProductByHandle",
    kind: OperationKind::Query,
    document: concat!(
        "query GetProductByHandle($handle: String!) { product(handle: $handle) { ",
        "id title handle description descriptionHtml availableForSale ",
        "featuredImage { url altText width height } ",
        "images(first: 20) { edges { node { url altText width height } } } ",
        "priceRange { minVariantPrice { amount currencyCode } maxVariantPrice { amount currencyCode } } ",
        "variants(first: 100) { edges { node { id title availableForSale quantityAvailable ",
        "selectedOptions { name value } price { amount currencyCode } ",
        "compareAtPrice { amount currencyCode } } } } ",
        "seo { title description } } }"
    ),
};

// =============================================================================
// Collection queries
// =============================================================================

pub const GET_COLLECTION_PRODUCTS: Operation = Operation {
    name: "GetCollectionProducts",
    kind: OperationKind::Query,
    document: concat!(
        "query GetCollectionProducts($handle: String!, $first: Int!, $after: String) { ",
        "collection(handle: $handle) { id title description ",
        "products(first: $first, after: $after) { edges { cursor node { ",
        product_summary_fields!(),
        " } } pageInfo { hasNextPage hasPreviousPage startCursor endCursor } } } }"
    ),
};

// =============================================================================
// Cart operations
// =============================================================================

pub const GET_CART: Operation = Operation {
    name: "GetCart",
    kind: OperationKind::Query,
    document: concat!(
        "query GetCart($id: ID!) { cart(id: $id) { ",
        cart_fields!(),
        " } }"
    ),
};

pub const CART_CREATE: Operation = Operation {
    name: "CartCreate",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation CartCreate($lines: [CartLineInput!]) { cartCreate(input: { lines: $lines }) { ",
        "cart { ",
        cart_fields!(),
        " } userErrors { field message code } } }"
    ),
};

pub const CART_LINES_ADD: Operation = Operation {
    name: "CartLinesAdd",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation CartLinesAdd($cartId: ID!, $lines: [CartLineInput!]!) { ",
        "cartLinesAdd(cartId: $cartId, lines: $lines) { cart { ",
        cart_fields!(),
        " } userErrors { field message code } } }"
    ),
};

pub const CART_LINES_UPDATE: Operation = Operation {
    name: "CartLinesUpdate",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation CartLinesUpdate($cartId: ID!, $lines: [CartLineUpdateInput!]!) { ",
        "cartLinesUpdate(cartId: $cartId, lines: $lines) { cart { ",
        cart_fields!(),
        " } userErrors { field message code } } }"
    ),
};

pub const CART_LINES_REMOVE: Operation = Operation {
    name: "CartLinesRemove",
    kind: OperationKind::Mutation,
    document: concat!(
        "mutation CartLinesRemove($cartId: ID!, $lineIds: [ID!]!) { ",
        "cartLinesRemove(cartId: $cartId, lineIds: $lineIds) { cart { ",
        cart_fields!(),
        " } userErrors { field message code } } }"
    ),
};
