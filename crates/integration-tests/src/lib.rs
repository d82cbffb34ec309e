//! Integration tests for the storefront API.
//!
//! Each test boots the full router on an ephemeral port with the Shopify
//! endpoint pointed at a `wiremock` server, then talks to it over HTTP with
//! `reqwest`. No Shopify credentials or network access are needed.
//!
//! ```bash
//! cargo test -p storefront-api-integration-tests
//! ```

use std::net::{Ipv4Addr, SocketAddr};

use secrecy::SecretString;
use serde_json::{Value, json};
use storefront_api::config::{Environment, ShopifyStorefrontConfig, StorefrontConfig};
use storefront_api::shopify::ResponseCache;
use storefront_api::state::AppState;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Storefront token the mock upstream expects.
pub const TEST_TOKEN: &str = "integration-test-token";

/// A running API instance and its mock upstream.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub upstream: MockServer,
    pub cache: ResponseCache,
}

impl TestContext {
    /// Start an API instance in production mode.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Start an API instance in development mode.
    pub async fn development() -> Self {
        Self::with_config(|config| config.environment = Environment::Development).await
    }

    /// Start an API instance after adjusting the default test configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut StorefrontConfig)) -> Self {
        let upstream = MockServer::start().await;

        let endpoint =
            Url::parse(&format!("{}/graphql", upstream.uri())).expect("mock server URI is a URL");
        let mut config = StorefrontConfig {
            host: Ipv4Addr::LOCALHOST.into(),
            port: 0,
            environment: Environment::Production,
            shopify: ShopifyStorefrontConfig {
                store_domain: Some("integration.myshopify.com".to_string()),
                access_token: Some(SecretString::from(TEST_TOKEN)),
                endpoint_override: Some(endpoint),
                ..ShopifyStorefrontConfig::default()
            },
            sentry_dsn: None,
        };
        adjust(&mut config);

        let cache = ResponseCache::new(&config.shopify);
        let state =
            AppState::with_cache(config, cache.clone()).expect("Failed to build application state");
        let app = storefront_api::app(state);

        let listener = tokio::net::TcpListener::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has an address");
        tokio::spawn(async move { axum::serve(listener, app).await });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            upstream,
            cache,
        }
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Answer `operation` with a GraphQL `data` object, expecting exactly
    /// `calls` requests for it.
    pub async fn mock_data(&self, operation: &str, data: Value, calls: u64) {
        self.mock_response(operation, json!({ "data": data }), calls)
            .await;
    }

    /// Answer `operation` with a full GraphQL response body.
    pub async fn mock_response(&self, operation: &str, body: Value, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "operationName": operation })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(calls)
            .named(operation)
            .mount(&self.upstream)
            .await;
    }

    /// Answer every request with a bare HTTP status.
    pub async fn mock_status(&self, status: u16) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
            .mount(&self.upstream)
            .await;
    }

    /// Number of requests the upstream has seen.
    pub async fn upstream_calls(&self) -> usize {
        self.upstream
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }

    /// JSON bodies the upstream has received, in order.
    pub async fn upstream_bodies(&self) -> Vec<Value> {
        self.upstream
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub mod fixtures {
    //! Upstream payloads shaped like the Storefront API's.

    use serde_json::{Value, json};

    /// Percent-encoded form of [`CART_ID`] for use in paths.
    pub const CART_ID_PATH: &str = "gid%3A%2F%2Fshopify%2FCart%2Fabc123";

    /// Cart ID used throughout the cart tests.
    pub const CART_ID: &str = "gid://shopify/Cart/abc123";

    fn money(amount: &str) -> Value {
        json!({ "amount": amount, "currencyCode": "USD" })
    }

    /// A product as selected by list queries.
    #[must_use]
    pub fn product_summary(n: u32) -> Value {
        json!({
            "id": format!("gid://shopify/Product/{n}"),
            "title": format!("Product {n}"),
            "handle": format!("product-{n}"),
            "availableForSale": true,
            "featuredImage": {
                "url": format!("https://cdn.shopify.com/p{n}.jpg"),
                "altText": null,
                "width": 800,
                "height": 800
            },
            "priceRange": {
                "minVariantPrice": money("8.00"),
                "maxVariantPrice": money("12.00")
            }
        })
    }

    /// A product connection over `count` products with cursors `c1..`.
    #[must_use]
    pub fn product_connection(count: u32, has_next_page: bool) -> Value {
        let edges: Vec<Value> = (1..=count)
            .map(|n| json!({ "cursor": format!("c{n}"), "node": product_summary(n) }))
            .collect();
        let end_cursor = (count > 0).then(|| format!("c{count}"));
        json!({
            "edges": edges,
            "pageInfo": {
                "hasNextPage": has_next_page,
                "hasPreviousPage": false,
                "startCursor": (count > 0).then(|| "c1"),
                "endCursor": end_cursor
            }
        })
    }

    /// A full product as selected by the product-by-handle query.
    #[must_use]
    pub fn product_detail(handle: &str) -> Value {
        json!({
            "id": "gid://shopify/Product/1",
            "title": "Dried Pineapple",
            "handle": handle,
            "description": "Sun-dried pineapple rings.",
            "descriptionHtml": "<p>Sun-dried pineapple rings.</p>",
            "availableForSale": true,
            "featuredImage": null,
            "images": { "edges": [
                { "node": { "url": "https://cdn.shopify.com/a.jpg", "altText": "Front", "width": 800, "height": 800 } },
                { "node": { "url": "https://cdn.shopify.com/b.jpg", "altText": null, "width": null, "height": null } }
            ] },
            "priceRange": { "minVariantPrice": money("8.00"), "maxVariantPrice": money("12.00") },
            "variants": { "edges": [
                { "node": {
                    "id": "gid://shopify/ProductVariant/11",
                    "title": "Small",
                    "availableForSale": true,
                    "quantityAvailable": 4,
                    "selectedOptions": [{ "name": "Size", "value": "Small" }],
                    "price": money("8.00"),
                    "compareAtPrice": null
                } },
                { "node": {
                    "id": "gid://shopify/ProductVariant/12",
                    "title": "Large",
                    "availableForSale": false,
                    "quantityAvailable": 0,
                    "selectedOptions": [{ "name": "Size", "value": "Large" }],
                    "price": money("12.00"),
                    "compareAtPrice": money("15.00")
                } }
            ] },
            "seo": { "title": "Dried Pineapple", "description": null }
        })
    }

    /// A cart with one line of two units.
    #[must_use]
    pub fn cart() -> Value {
        json!({
            "id": CART_ID,
            "checkoutUrl": "https://integration.myshopify.com/cart/c/abc123",
            "totalQuantity": 2,
            "lines": { "edges": [
                { "node": {
                    "id": "gid://shopify/CartLine/1",
                    "quantity": 2,
                    "merchandise": {
                        "id": "gid://shopify/ProductVariant/11",
                        "title": "Small",
                        "selectedOptions": [{ "name": "Size", "value": "Small" }],
                        "price": money("8.00"),
                        "product": {
                            "id": "gid://shopify/Product/1",
                            "title": "Dried Pineapple",
                            "handle": "dried-pineapple",
                            "featuredImage": null
                        }
                    },
                    "cost": { "totalAmount": money("15.00"), "amountPerQuantity": money("8.00") }
                } }
            ] },
            "cost": {
                "subtotalAmount": money("15.00"),
                "totalAmount": money("16.24"),
                "totalTaxAmount": money("1.24")
            }
        })
    }

    /// A cart mutation payload.
    #[must_use]
    pub fn mutation_payload(cart: Option<Value>, user_errors: Value) -> Value {
        json!({ "cart": cart, "userErrors": user_errors })
    }
}
