//! Shopify Storefront API client implementation.
//!
//! Documents are sent as plain strings inside `graphql_client`'s request
//! envelope, with `reqwest` 0.13 for HTTP. Read queries may be cached in an
//! injected [`ResponseCache`] and retried per [`RetryPolicy`].

mod cache;
pub mod conversions;
pub mod queries;
mod retry;

pub use cache::{ResponseCache, cache_key};
pub use queries::{Operation, OperationKind};
pub use retry::RetryPolicy;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{QueryBody, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use storefront_api_core::Cursor;
use tracing::{debug, instrument, warn};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::types::{
    Cart, CartCreateData, CartData, CartLineInput, CartLineUpdateInput, CartLinesAddData,
    CartLinesRemoveData, CartLinesUpdateData, CartMutationPayload, Collection,
    CollectionProductsData, Product, ProductByHandleData, ProductConnection, ProductSortKey,
    ProductsData,
};
use crate::shopify::{GraphQLError, ShopifyError};

/// Header carrying the public Storefront API token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Characters of an error body kept for diagnostics.
const ERROR_BODY_LIMIT: usize = 200;

/// Per-call caching options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// Serve from and store in the response cache (queries only).
    pub cacheable: bool,
    /// TTL override; the cache default applies when `None`.
    pub cache_ttl: Option<Duration>,
}

impl ExecuteOptions {
    /// Cache with the default TTL.
    #[must_use]
    pub const fn cached() -> Self {
        Self {
            cacheable: true,
            cache_ttl: None,
        }
    }

    /// Always hit the network.
    #[must_use]
    pub const fn uncached() -> Self {
        Self {
            cacheable: false,
            cache_ttl: None,
        }
    }

    /// Cache with an explicit TTL.
    #[must_use]
    pub const fn with_ttl(ttl: Duration) -> Self {
        Self {
            cacheable: true,
            cache_ttl: Some(ttl),
        }
    }
}

/// Seconds from a `Retry-After` header; HTTP-date values are ignored.
fn retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Cloning is cheap; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: Option<String>,
    access_token: Option<SecretString>,
    cache: ResponseCache,
    retry: RetryPolicy,
}

impl std::fmt::Debug for StorefrontClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontClient")
            .field("endpoint", &self.inner.endpoint)
            .field("cache", &self.inner.cache)
            .field("retry", &self.inner.retry)
            .finish_non_exhaustive()
    }
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    ///
    /// Missing credentials are not an error here; every call reports
    /// [`ShopifyError::Configuration`] instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ShopifyStorefrontConfig, cache: ResponseCache) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(StorefrontClientInner {
                client,
                endpoint: config.endpoint(),
                access_token: config.access_token.clone(),
                cache,
                retry: RetryPolicy::with_retries(config.read_retries),
            }),
        })
    }

    /// The cache this client reads from and writes to.
    #[must_use]
    pub fn cache(&self) -> &ResponseCache {
        &self.inner.cache
    }

    fn credentials(&self) -> Result<(&str, &SecretString), ShopifyError> {
        let endpoint = self.inner.endpoint.as_deref().ok_or_else(|| {
            ShopifyError::Configuration("SHOPIFY_STORE_DOMAIN is not set".to_string())
        })?;
        let token = self.inner.access_token.as_ref().ok_or_else(|| {
            ShopifyError::Configuration("SHOPIFY_STOREFRONT_API_TOKEN is not set".to_string())
        })?;
        Ok((endpoint, token))
    }

    /// Execute an operation and decode its `data` object into `T`.
    ///
    /// Queries with `options.cacheable` are answered from the cache while an
    /// unexpired entry exists. Mutations always reach the network.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Configuration`] before any I/O when
    /// credentials are missing, and the network, GraphQL or decoding error
    /// otherwise.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        variables: serde_json::Value,
        options: ExecuteOptions,
    ) -> Result<T, ShopifyError> {
        let (endpoint, token) = self.credentials()?;

        if options.cacheable && !operation.is_query() {
            warn!(
                operation = operation.name,
                "Ignoring cacheable flag on a mutation"
            );
        }

        let key = (options.cacheable && operation.is_query())
            .then(|| cache_key(operation.document, &variables));

        if let Some(key) = &key
            && let Some(hit) = self.inner.cache.get(key).await
        {
            debug!(operation = operation.name, "Cache hit");
            return Ok(T::deserialize(&*hit)?);
        }

        let data = self
            .send_with_retry(endpoint, token, operation, &variables)
            .await?;
        let decoded = T::deserialize(&data)?;

        if let Some(key) = key {
            self.inner.cache.set(key, data, options.cache_ttl).await;
            debug!(
                operation = operation.name,
                entries = self.inner.cache.entry_count(),
                "Stored response in cache"
            );
        }

        Ok(decoded)
    }

    async fn send_with_retry(
        &self,
        endpoint: &str,
        token: &SecretString,
        operation: &Operation,
        variables: &serde_json::Value,
    ) -> Result<serde_json::Value, ShopifyError> {
        let mut attempt = 1;
        loop {
            match self.send(endpoint, token, operation, variables).await {
                Ok(data) => return Ok(data),
                Err(error) => {
                    let Some(delay) =
                        self.inner
                            .retry
                            .next_delay(&error, attempt, operation.is_query())
                    else {
                        return Err(error);
                    };
                    warn!(
                        operation = operation.name,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %error,
                        "Retrying Storefront API request"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn send(
        &self,
        endpoint: &str,
        token: &SecretString,
        operation: &Operation,
        variables: &serde_json::Value,
    ) -> Result<serde_json::Value, ShopifyError> {
        let request_body = QueryBody {
            variables,
            query: operation.document,
            operation_name: operation.name,
        };

        let response = self
            .inner
            .client
            .post(endpoint)
            .header(ACCESS_TOKEN_HEADER, token.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let retry_after = retry_after(response.headers());

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let body: String = response_text.chars().take(ERROR_BODY_LIMIT).collect();
            tracing::error!(
                status = %status,
                body = %body,
                operation = operation.name,
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::Status {
                status: status.as_u16(),
                body,
                retry_after,
            });
        }

        let response: Response<serde_json::Value> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        // Errors win over any partial data
        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(GraphQLError::from).collect(),
            ));
        }

        match response.data {
            Some(serde_json::Value::Object(map)) if map.is_empty() => {
                Err(ShopifyError::EmptyResponse)
            }
            Some(serde_json::Value::Null) | None => Err(ShopifyError::EmptyResponse),
            Some(data) => Ok(data),
        }
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a page of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(
        &self,
        first: i64,
        after: Option<&Cursor>,
        query: Option<&str>,
        sort_key: Option<ProductSortKey>,
        reverse: bool,
    ) -> Result<ProductConnection, ShopifyError> {
        let variables = json!({
            "first": first,
            "after": after.map(Cursor::as_str),
            "query": query,
            "sortKey": sort_key,
            "reverse": reverse,
        });

        let data: ProductsData = self
            .execute(&queries::GET_PRODUCTS, variables, ExecuteOptions::cached())
            .await?;
        Ok(data.products)
    }

    /// Get a product by its handle, `None` when no product has that handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<Option<Product>, ShopifyError> {
        let data: ProductByHandleData = self
            .execute(
                &queries::GET_PRODUCT_BY_HANDLE,
                json!({ "handle": handle }),
                ExecuteOptions::cached(),
            )
            .await?;
        Ok(data.product)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get a collection with one page of its products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_collection_products(
        &self,
        handle: &str,
        first: i64,
        after: Option<&Cursor>,
    ) -> Result<Option<Collection>, ShopifyError> {
        let variables = json!({
            "handle": handle,
            "first": first,
            "after": after.map(Cursor::as_str),
        });

        let data: CollectionProductsData = self
            .execute(
                &queries::GET_COLLECTION_PRODUCTS,
                variables,
                ExecuteOptions::cached(),
            )
            .await?;
        Ok(data.collection)
    }

    // =========================================================================
    // Cart Methods
    // =========================================================================

    /// Get a cart, `None` when the ID is unknown or the cart has expired.
    ///
    /// Never cached: carts change between requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &str) -> Result<Option<Cart>, ShopifyError> {
        let data: CartData = self
            .execute(
                &queries::GET_CART,
                json!({ "id": cart_id }),
                ExecuteOptions::uncached(),
            )
            .await?;
        Ok(data.cart)
    }

    /// Create a cart, optionally with initial lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails. User errors are returned
    /// in the payload, not as `Err`.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn create_cart(
        &self,
        lines: &[CartLineInput],
    ) -> Result<CartMutationPayload, ShopifyError> {
        let data: CartCreateData = self
            .execute(
                &queries::CART_CREATE,
                json!({ "lines": lines }),
                ExecuteOptions::uncached(),
            )
            .await?;
        Ok(data.cart_create.unwrap_or_default())
    }

    /// Add lines to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id, line_count = lines.len()))]
    pub async fn add_cart_lines(
        &self,
        cart_id: &str,
        lines: &[CartLineInput],
    ) -> Result<CartMutationPayload, ShopifyError> {
        let data: CartLinesAddData = self
            .execute(
                &queries::CART_LINES_ADD,
                json!({ "cartId": cart_id, "lines": lines }),
                ExecuteOptions::uncached(),
            )
            .await?;
        Ok(data.cart_lines_add.unwrap_or_default())
    }

    /// Change line quantities; a quantity of zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id, line_count = lines.len()))]
    pub async fn update_cart_lines(
        &self,
        cart_id: &str,
        lines: &[CartLineUpdateInput],
    ) -> Result<CartMutationPayload, ShopifyError> {
        let data: CartLinesUpdateData = self
            .execute(
                &queries::CART_LINES_UPDATE,
                json!({ "cartId": cart_id, "lines": lines }),
                ExecuteOptions::uncached(),
            )
            .await?;
        Ok(data.cart_lines_update.unwrap_or_default())
    }

    /// Remove lines from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id, line_count = line_ids.len()))]
    pub async fn remove_cart_lines(
        &self,
        cart_id: &str,
        line_ids: &[String],
    ) -> Result<CartMutationPayload, ShopifyError> {
        let data: CartLinesRemoveData = self
            .execute(
                &queries::CART_LINES_REMOVE,
                json!({ "cartId": cart_id, "lineIds": line_ids }),
                ExecuteOptions::uncached(),
            )
            .await?;
        Ok(data.cart_lines_remove.unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use url::Url;
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "test-storefront-token";

    fn config_for(server: &MockServer) -> ShopifyStorefrontConfig {
        ShopifyStorefrontConfig {
            store_domain: Some("test.myshopify.com".to_string()),
            access_token: Some(SecretString::from(TOKEN)),
            endpoint_override: Some(Url::parse(&format!("{}/graphql", server.uri())).unwrap()),
            ..ShopifyStorefrontConfig::default()
        }
    }

    fn client_for(config: &ShopifyStorefrontConfig) -> StorefrontClient {
        StorefrontClient::new(config, ResponseCache::new(config)).unwrap()
    }

    fn products_body(cursor: &str) -> serde_json::Value {
        json!({"data": {"products": {
            "edges": [{"cursor": cursor, "node": {
                "id": "gid://shopify/Product/1",
                "title": "Dried Pineapple",
                "handle": "dried-pineapple",
                "availableForSale": true,
                "featuredImage": null,
                "priceRange": {
                    "minVariantPrice": {"amount": "8.0", "currencyCode": "USD"},
                    "maxVariantPrice": {"amount": "8.0", "currencyCode": "USD"}
                }
            }}],
            "pageInfo": {"hasNextPage": false, "endCursor": cursor}
        }}})
    }

    #[tokio::test]
    async fn test_missing_domain_fails_before_io() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = ShopifyStorefrontConfig {
            access_token: Some(SecretString::from(TOKEN)),
            ..ShopifyStorefrontConfig::default()
        };
        let err = client_for(&config)
            .get_product_by_handle("anything")
            .await
            .unwrap_err();

        assert!(
            matches!(err, ShopifyError::Configuration(ref m) if m.contains("SHOPIFY_STORE_DOMAIN"))
        );
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_io() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = ShopifyStorefrontConfig {
            access_token: None,
            ..config_for(&server)
        };
        let err = client_for(&config).get_cart("c").await.unwrap_err();

        assert!(
            matches!(err, ShopifyError::Configuration(ref m) if m.contains("SHOPIFY_STOREFRONT_API_TOKEN"))
        );
    }

    #[tokio::test]
    async fn test_sends_token_header_and_operation_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header(ACCESS_TOKEN_HEADER, TOKEN))
            .and(body_partial_json(json!({
                "operationName": "GetProducts",
                "variables": {"first": 2, "after": null, "reverse": false}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(products_body("c1")))
            .expect(1)
            .mount(&server)
            .await;

        let connection = client_for(&config_for(&server))
            .get_products(2, None, None, None, false)
            .await
            .unwrap();

        assert_eq!(connection.edges.len(), 1);
        assert_eq!(connection.page_info.end_cursor.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_errors_take_precedence_over_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"product": null},
                "errors": [{"message": "X"}]
            })))
            .mount(&server)
            .await;

        let err = client_for(&config_for(&server))
            .get_product_by_handle("p")
            .await
            .unwrap_err();

        assert!(matches!(err, ShopifyError::GraphQL(_)));
        assert_eq!(err.to_string(), "GraphQL errors: X");
    }

    #[tokio::test]
    async fn test_empty_data_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let err = client_for(&config_for(&server))
            .get_cart("c")
            .await
            .unwrap_err();
        assert!(matches!(err, ShopifyError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&config_for(&server))
            .get_product_by_handle("p")
            .await
            .unwrap_err();

        assert!(err.is_network());
        assert!(
            matches!(err, ShopifyError::Status { status: 503, ref body, .. } if body == "upstream unavailable")
        );
    }

    #[tokio::test]
    async fn test_undecodable_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&config_for(&server))
            .get_cart("c")
            .await
            .unwrap_err();
        assert!(matches!(err, ShopifyError::Parse(_)));
    }

    #[tokio::test]
    async fn test_cached_query_hits_network_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(products_body("c1")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&config_for(&server));
        let first = client.get_products(2, None, None, None, false).await.unwrap();
        let second = client.get_products(2, None, None, None, false).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(products_body("c1")))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&config_for(&server));
        let options = ExecuteOptions::with_ttl(Duration::from_millis(50));
        let vars = json!({"first": 2});

        let _: ProductsData = client
            .execute(&queries::GET_PRODUCTS, vars.clone(), options)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        let _: ProductsData = client
            .execute(&queries::GET_PRODUCTS, vars, options)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_mutations_bypass_cache() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"cartCreate": {"cart": null, "userErrors": []}}
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&config_for(&server));
        for _ in 0..2 {
            let _: CartCreateData = client
                .execute(&queries::CART_CREATE, json!({"lines": []}), ExecuteOptions::cached())
                .await
                .unwrap();
        }
        let key = cache_key(queries::CART_CREATE.document, &json!({"lines": []}));
        assert!(client.cache().get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_read_queries_are_retried_on_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"cart": null}})))
            .expect(1)
            .mount(&server)
            .await;

        let config = ShopifyStorefrontConfig {
            read_retries: 1,
            ..config_for(&server)
        };
        let cart = client_for(&config).get_cart("c").await.unwrap();
        assert!(cart.is_none());
    }

    #[tokio::test]
    async fn test_rate_limit_waits_for_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"cart": null}})))
            .expect(1)
            .mount(&server)
            .await;

        let config = ShopifyStorefrontConfig {
            read_retries: 1,
            ..config_for(&server)
        };
        assert!(client_for(&config).get_cart("c").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_long_retry_after_is_not_waited_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "120"))
            .expect(1)
            .mount(&server)
            .await;

        let config = ShopifyStorefrontConfig {
            read_retries: 3,
            ..config_for(&server)
        };
        let err = client_for(&config).get_cart("c").await.unwrap_err();
        assert_eq!(err.retry_after(), Some(Duration::from_secs(120)));
    }

    #[tokio::test]
    async fn test_mutations_are_never_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&server)
            .await;

        let config = ShopifyStorefrontConfig {
            read_retries: 3,
            ..config_for(&server)
        };
        let err = client_for(&config).create_cart(&[]).await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_null_mutation_payload_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"cartLinesAdd": null}})),
            )
            .mount(&server)
            .await;

        let payload = client_for(&config_for(&server))
            .add_cart_lines(
                "gid://shopify/Cart/1",
                &[CartLineInput {
                    merchandise_id: "gid://shopify/ProductVariant/1".to_string(),
                    quantity: 1,
                }],
            )
            .await
            .unwrap();

        assert!(payload.cart.is_none());
        assert!(payload.user_errors.is_empty());
    }
}
