//! In-process fake of the ShopSmart backend for integration tests

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const TOKEN: &str = "test-token";

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

#[derive(Default)]
pub struct Data {
    /// "METHOD /path" for every request received
    pub requests: Vec<String>,
    pub lists: Vec<Value>,
    pub items: HashMap<String, Vec<Value>>,
    pub orders: HashMap<String, Value>,
    pub payments: Vec<Value>,
    pub searches: Vec<HashMap<String, String>>,
    pub fail_search: bool,
}

pub struct FakeServer {
    pub base_url: String,
    pub data: Arc<Mutex<Data>>,
}

impl FakeServer {
    pub async fn start() -> Self {
        let data = Arc::new(Mutex::new(Data::default()));

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/lists", get(get_lists).post(create_list))
            .route("/api/lists/{id}/items", get(get_items).post(add_item))
            .route("/api/lists/{id}/items/{item_id}", delete(remove_item))
            .route("/api/vendors/search", get(search))
            .route("/api/orders", post(create_order))
            .route("/api/orders/{id}", get(get_order))
            .route("/api/payments/mock", post(pay))
            .with_state(data.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            data,
        }
    }

    pub async fn requests(&self) -> Vec<String> {
        self.data.lock().await.requests.clone()
    }

    pub async fn count(&self, request: &str) -> usize {
        self.data
            .lock()
            .await
            .requests
            .iter()
            .filter(|r| r.as_str() == request)
            .count()
    }
}

fn id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

fn authorize(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let expected = format!("Bearer {}", TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(reject(StatusCode::UNAUTHORIZED, "Unauthorized")),
    }
}

async fn login(State(data): State<Arc<Mutex<Data>>>, Json(body): Json<Value>) -> ApiResult {
    data.lock().await.requests.push("POST /auth/login".to_string());
    if body["password"] != "secret" {
        return Err(reject(StatusCode::UNAUTHORIZED, "Invalid credentials"));
    }
    Ok(Json(json!({
        "token": TOKEN,
        "user": { "_id": "u1", "name": "Asha", "email": body["email"] }
    })))
}

async fn register(State(data): State<Arc<Mutex<Data>>>, Json(body): Json<Value>) -> ApiResult {
    data.lock().await.requests.push("POST /auth/register".to_string());
    Ok(Json(json!({
        "token": TOKEN,
        "user": { "_id": "u2", "name": body["name"], "email": body["email"] }
    })))
}

async fn get_lists(State(data): State<Arc<Mutex<Data>>>, headers: HeaderMap) -> ApiResult {
    let mut data = data.lock().await;
    data.requests.push("GET /lists".to_string());
    authorize(&headers)?;
    Ok(Json(Value::Array(data.lists.clone())))
}

async fn create_list(
    State(data): State<Arc<Mutex<Data>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut data = data.lock().await;
    data.requests.push("POST /lists".to_string());
    authorize(&headers)?;
    let list = json!({
        "_id": id(),
        "title": body["title"],
        "createdAt": "2026-10-16T09:30:00Z"
    });
    data.lists.insert(0, list.clone());
    Ok(Json(list))
}

async fn get_items(
    State(data): State<Arc<Mutex<Data>>>,
    headers: HeaderMap,
    Path(list_id): Path<String>,
) -> ApiResult {
    let mut data = data.lock().await;
    data.requests.push(format!("GET /lists/{}/items", list_id));
    authorize(&headers)?;
    let items = data.items.get(&list_id).cloned().unwrap_or_default();
    Ok(Json(Value::Array(items)))
}

async fn add_item(
    State(data): State<Arc<Mutex<Data>>>,
    headers: HeaderMap,
    Path(list_id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut data = data.lock().await;
    data.requests.push(format!("POST /lists/{}/items", list_id));
    authorize(&headers)?;
    let item = json!({
        "_id": id(),
        "name": body["name"],
        "quantity": body["quantity"],
        "brandPreference": body["brandPreference"]
    });
    data.items.entry(list_id).or_default().insert(0, item.clone());
    Ok(Json(item))
}

async fn remove_item(
    State(data): State<Arc<Mutex<Data>>>,
    headers: HeaderMap,
    Path((list_id, item_id)): Path<(String, String)>,
) -> ApiResult {
    let mut data = data.lock().await;
    data.requests
        .push(format!("DELETE /lists/{}/items/{}", list_id, item_id));
    authorize(&headers)?;
    if let Some(items) = data.items.get_mut(&list_id) {
        items.retain(|i| i["_id"] != item_id.as_str());
    }
    Ok(Json(json!({ "ok": true })))
}

/// Every list item is available at 10.0 apiece from "near"; "far" has only
/// the first item
async fn search(
    State(data): State<Arc<Mutex<Data>>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    let mut data = data.lock().await;
    data.requests.push("GET /vendors/search".to_string());
    authorize(&headers)?;
    data.searches.push(params.clone());

    if data.fail_search {
        return Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "search unavailable"));
    }

    let list_id = params.get("listId").cloned().unwrap_or_default();
    let items = data.items.get(&list_id).cloned().unwrap_or_default();

    let line = |item: &Value, vendor: &str| {
        json!({
            "name": item["name"],
            "quantity": item["quantity"],
            "price": 10.0,
            "vendorId": vendor
        })
    };
    let near: Vec<Value> = items.iter().map(|i| line(i, "near")).collect();
    let far: Vec<Value> = items.iter().take(1).map(|i| line(i, "far")).collect();
    let far_missing: Vec<Value> = items
        .iter()
        .skip(1)
        .map(|i| json!({ "name": i["name"], "quantity": i["quantity"] }))
        .collect();

    let far_coverage = if items.is_empty() {
        0.0
    } else {
        100.0 * far.len() as f64 / items.len() as f64
    };

    Ok(Json(json!([
        {
            "vendor": { "id": "near", "shopName": "Near Mart", "distanceKm": 0.8 },
            "coveragePct": 100,
            "totalCost": total(&near),
            "available": near,
            "missing": [],
            "tags": ["closest", "full coverage"]
        },
        {
            "vendor": { "id": "far", "shopName": "Far Grocers", "distanceKm": 4.2 },
            "coveragePct": far_coverage,
            "totalCost": total(&far),
            "available": far,
            "missing": far_missing,
            "tags": []
        }
    ])))
}

fn total(lines: &[Value]) -> f64 {
    lines
        .iter()
        .map(|l| l["price"].as_f64().unwrap_or(0.0) * l["quantity"].as_f64().unwrap_or(0.0))
        .sum()
}

async fn create_order(
    State(data): State<Arc<Mutex<Data>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut data = data.lock().await;
    data.requests.push("POST /orders".to_string());
    authorize(&headers)?;
    let order = json!({
        "_id": id(),
        "vendorIds": body["vendorIds"],
        "items": body["items"],
        "totalCost": body["totalCost"],
        "status": "pending"
    });
    let order_id = order["_id"].as_str().unwrap_or_default().to_string();
    data.orders.insert(order_id, order.clone());
    Ok(Json(order))
}

async fn get_order(
    State(data): State<Arc<Mutex<Data>>>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> ApiResult {
    let mut data = data.lock().await;
    data.requests.push(format!("GET /orders/{}", order_id));
    authorize(&headers)?;
    data.orders
        .get(&order_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Order not found"))
}

async fn pay(
    State(data): State<Arc<Mutex<Data>>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    let mut data = data.lock().await;
    data.requests.push("POST /payments/mock".to_string());
    authorize(&headers)?;
    data.payments.push(body);
    Ok(Json(json!({ "ok": true })))
}
