//! In-process transport for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::Method;
use searchdish_api_client::storage::MemoryTokenStore;
use searchdish_api_client::transport::{ApiRequest, RawResponse, Transport};
use searchdish_api_client::{ApiClient, ApiResult, ClientConfig};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

type Handler = Box<dyn Fn(&ApiRequest) -> RawResponse + Send + Sync>;

/// Routes requests by method and path, recording every request
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<Vec<(Method, String, Handler)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer `method path` with a handler; later routes win
    pub fn on(
        &self,
        method: Method,
        path: &str,
        handler: impl Fn(&ApiRequest) -> RawResponse + Send + Sync + 'static,
    ) {
        self.routes
            .lock()
            .unwrap()
            .push((method, path.to_string(), Box::new(handler)));
    }

    /// Answer `method path` with a fixed JSON body
    pub fn json(&self, method: Method, path: &str, status: u16, body: Value) {
        let body = body.to_string();
        self.on(method, path, move |_| RawResponse::new(status, body.clone()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &Method, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| &r.method == method && r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let routes = self.routes.lock().unwrap();
        let response = routes
            .iter()
            .rev()
            .find(|(method, path, _)| *method == request.method && *path == request.path)
            .map_or_else(
                || RawResponse::new(404, json!({"message": "Not Found"}).to_string()),
                |(_, _, handler)| handler(&request),
            );
        Ok(response)
    }
}

pub fn client(transport: &Arc<FakeTransport>, store: &Arc<MemoryTokenStore>) -> ApiClient {
    ApiClient::with_transport(
        ClientConfig::default().with_base_url("http://backend.test/api/v1"),
        transport.clone(),
        store.clone(),
    )
}

pub fn restaurant_json(n: usize, name: &str) -> Value {
    json!({
        "id": format!("r{n}"),
        "name": name,
        "country": "Dakar",
        "userId": format!("u{n}"),
        "isActive": n % 2 == 0,
    })
}

pub fn menu_entry_json(id: &str, dish: &str) -> Value {
    json!({
        "id": id,
        "restaurantId": "r1",
        "dishId": format!("d-{id}"),
        "price": 2500,
        "currency": "Fcfa",
        "description": format!("{dish} maison"),
        "isAvailable": true,
        "dish": {"id": format!("d-{id}"), "name": dish, "category": "Plat"}
    })
}

/// Page `page` of `items` in the backend's envelope
pub fn paginate(items: &[Value], page: usize, limit: usize) -> Value {
    let start = (page.saturating_sub(1) * limit).min(items.len());
    let end = (start + limit).min(items.len());
    json!({
        "data": items[start..end].to_vec(),
        "total": items.len(),
        "totalPage": items.len().div_ceil(limit),
        "page": page,
        "limit": limit,
    })
}

pub fn query_usize(request: &ApiRequest, name: &str) -> usize {
    request
        .query_param(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(1)
}
