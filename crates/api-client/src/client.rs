//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{ContactApi, DishesApi, RestaurantDishesApi, RestaurantsApi, UsersApi};
use crate::error::{ApiError, ApiResult};
use crate::payload::Payload;
use crate::storage::{ACCESS_TOKEN_KEY, TokenStore};
use crate::transport::{ApiRequest, RawResponse, ReqwestTransport, RequestBody, Transport};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

/// SearchDish API client
///
/// Cheap to clone: the transport, token store and configuration are shared.
/// The access token is read from the store on every request, so a login or
/// logout is visible to all clones immediately.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    store: Arc<dyn TokenStore>,
    config: Arc<ClientConfig>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client that talks HTTP through `reqwest`
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> ApiResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config.base_url, config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport), store))
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        Self {
            transport,
            store,
            config: Arc::new(config),
        }
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Token store shared with the session
    #[must_use]
    pub fn store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.store)
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access registration and user activation endpoints
    #[must_use]
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access restaurant endpoints
    #[must_use]
    pub fn restaurants(&self) -> RestaurantsApi {
        RestaurantsApi::new(self.clone())
    }

    /// Access the global dish catalog
    #[must_use]
    pub fn dishes(&self) -> DishesApi {
        DishesApi::new(self.clone())
    }

    /// Access menu entries (restaurant/dish links)
    #[must_use]
    pub fn restaurant_dishes(&self) -> RestaurantDishesApi {
        RestaurantDishesApi::new(self.clone())
    }

    /// Access the contact form endpoint
    #[must_use]
    pub fn contact(&self) -> ContactApi {
        ContactApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a GET request
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::GET, path, Vec::new(), RequestBody::Empty)
            .await
    }

    /// Perform a GET request with query parameters
    #[instrument(skip(self, query))]
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let query = query
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        self.execute(Method::GET, path, query, RequestBody::Empty)
            .await
    }

    /// Perform a POST request with a JSON body
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        self.execute(Method::POST, path, Vec::new(), body).await
    }

    /// Perform a PATCH request with a JSON body
    #[instrument(skip(self, body))]
    pub async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = RequestBody::Json(serde_json::to_value(body)?);
        self.execute(Method::PATCH, path, Vec::new(), body).await
    }

    /// Perform a PATCH request without a body, keeping whatever comes back
    #[instrument(skip(self))]
    pub async fn patch_empty(&self, path: &str) -> ApiResult<Value> {
        self.execute(Method::PATCH, path, Vec::new(), RequestBody::Empty)
            .await
    }

    /// Perform a DELETE request, discarding the response body
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute::<Value>(Method::DELETE, path, Vec::new(), RequestBody::Empty)
            .await
            .map(|_| ())
    }

    /// Send an encoded payload (JSON or multipart)
    #[instrument(skip(self, payload), fields(multipart = payload.is_multipart()))]
    pub async fn send_payload<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Payload,
    ) -> ApiResult<T> {
        let body = match payload {
            Payload::Json(value) => RequestBody::Json(value),
            Payload::Multipart(form) => RequestBody::Multipart(form),
        };
        self.execute(method, path, Vec::new(), body).await
    }

    fn bearer(&self) -> ApiResult<Option<String>> {
        Ok(self
            .store
            .get(ACCESS_TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: RequestBody,
    ) -> ApiResult<T> {
        let request = ApiRequest {
            method: method.clone(),
            path: path.trim_start_matches('/').to_string(),
            query,
            bearer: self.bearer()?,
            request_id: Uuid::new_v4().to_string(),
            body,
        };
        let request_id = request.request_id.clone();

        let start = Instant::now();
        let result = self.transport.send(request).await;
        let elapsed = start.elapsed();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                debug!(
                    request_id = %request_id,
                    %method,
                    path,
                    elapsed_ms = elapsed.as_millis(),
                    error = %e,
                    "Request failed"
                );
                return Err(e);
            }
        };

        debug!(
            request_id = %request_id,
            %method,
            path,
            status = response.status,
            elapsed_ms = elapsed.as_millis(),
            "Request completed"
        );

        decode(response)
    }
}

/// Map a raw response to a typed value or an error
fn decode<T: DeserializeOwned>(response: RawResponse) -> ApiResult<T> {
    if !response.is_success() {
        return Err(ApiError::from_response(response.status, &response.body));
    }

    let body = response.body.trim();
    if body.is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(body)?)
}
