//! In-memory backend double for unit tests

use crate::api::{ApiResult, Backend};
use async_trait::async_trait;
use shopsmart_common::models::{
    AddItemRequest, CreateListRequest, LoginRequest, PaymentRequest, RegisterRequest,
};
use shopsmart_common::{
    AuthResponse, AuthToken, Coordinate, CreateOrderRequest, Item, Order, OrderLine,
    RequestError, ShoppingList, User, Vendor, VendorMatch,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeState {
    pub calls: Vec<String>,
    pub failing: HashSet<&'static str>,
    pub lists: Vec<ShoppingList>,
    pub items: HashMap<String, Vec<Item>>,
    pub vendors: Vec<VendorMatch>,
    pub orders: HashMap<String, Order>,
    pub order_requests: Vec<CreateOrderRequest>,
    pub payments: Vec<PaymentRequest>,
    pub registrations: Vec<RegisterRequest>,
    pub searches: Vec<(Coordinate, String)>,
    next_id: u32,
}

/// Records every call; operations named in `failing` return a network error
#[derive(Default)]
pub struct FakeBackend {
    pub state: Mutex<FakeState>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, op: &'static str) {
        self.state.lock().unwrap().failing.insert(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn with_items(self, list_id: &str, items: &[(&str, u32)]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let entries = items
                .iter()
                .enumerate()
                .map(|(i, (name, quantity))| Item {
                    id: format!("{}-item-{}", list_id, i),
                    name: name.to_string(),
                    quantity: *quantity,
                    brand_preference: None,
                })
                .collect();
            state.items.insert(list_id.to_string(), entries);
        }
        self
    }

    pub fn with_vendors(self, vendors: Vec<VendorMatch>) -> Self {
        self.state.lock().unwrap().vendors = vendors;
        self
    }

    fn record(&self, op: &'static str) -> ApiResult<std::sync::MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op.to_string());
        if state.failing.contains(op) {
            return Err(RequestError::Network("connection refused".to_string()));
        }
        Ok(state)
    }
}

impl FakeState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }
}

/// A vendor match covering the given lines
pub fn vendor_match(vendor_id: &str, lines: &[(&str, u32, f64)]) -> VendorMatch {
    let available: Vec<OrderLine> = lines
        .iter()
        .map(|(name, quantity, price)| OrderLine {
            name: name.to_string(),
            quantity: *quantity,
            price: *price,
            vendor_id: vendor_id.to_string(),
        })
        .collect();
    let total_cost = available.iter().map(OrderLine::line_total).sum();

    VendorMatch {
        vendor: Vendor {
            id: vendor_id.to_string(),
            name: format!("Shop {}", vendor_id),
            distance_km: 1.0,
        },
        coverage_pct: 100.0,
        total_cost,
        available,
        missing: vec![],
        tags: vec![],
    }
}

fn auth(name: &str) -> AuthResponse {
    AuthResponse {
        token: AuthToken::new(format!("token-for-{}", name)),
        user: User {
            id: "u1".to_string(),
            name: name.to_string(),
            email: String::new(),
        },
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        let _state = self.record("login")?;
        if request.password == "wrong" {
            return Err(RequestError::Status {
                status: 401,
                message: Some("Invalid credentials".to_string()),
            });
        }
        Ok(auth("Asha"))
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        let mut state = self.record("register")?;
        state.registrations.push(request.clone());
        Ok(auth(&request.name))
    }

    async fn list_lists(&self, _token: Option<&AuthToken>) -> ApiResult<Vec<ShoppingList>> {
        let state = self.record("list_lists")?;
        Ok(state.lists.clone())
    }

    async fn create_list(
        &self,
        _token: Option<&AuthToken>,
        request: &CreateListRequest,
    ) -> ApiResult<ShoppingList> {
        let mut state = self.record("create_list")?;
        let list = ShoppingList {
            id: state.next_id("list-"),
            title: request.title.clone(),
            created_at: None,
        };
        state.lists.insert(0, list.clone());
        Ok(list)
    }

    async fn list_items(&self, _token: Option<&AuthToken>, list_id: &str) -> ApiResult<Vec<Item>> {
        let state = self.record("list_items")?;
        Ok(state.items.get(list_id).cloned().unwrap_or_default())
    }

    async fn add_item(
        &self,
        _token: Option<&AuthToken>,
        list_id: &str,
        request: &AddItemRequest,
    ) -> ApiResult<Item> {
        let mut state = self.record("add_item")?;
        let item = Item {
            id: state.next_id("item-"),
            name: request.name.clone(),
            quantity: request.quantity,
            brand_preference: Some(request.brand_preference.clone())
                .filter(|b| !b.is_empty()),
        };
        state
            .items
            .entry(list_id.to_string())
            .or_default()
            .insert(0, item.clone());
        Ok(item)
    }

    async fn remove_item(
        &self,
        _token: Option<&AuthToken>,
        list_id: &str,
        item_id: &str,
    ) -> ApiResult<()> {
        let mut state = self.record("remove_item")?;
        if let Some(items) = state.items.get_mut(list_id) {
            items.retain(|i| i.id != item_id);
        }
        Ok(())
    }

    async fn search_vendors(
        &self,
        _token: Option<&AuthToken>,
        coordinate: Coordinate,
        list_id: &str,
    ) -> ApiResult<Vec<VendorMatch>> {
        let mut state = self.record("search_vendors")?;
        state.searches.push((coordinate, list_id.to_string()));
        Ok(state.vendors.clone())
    }

    async fn create_order(
        &self,
        _token: Option<&AuthToken>,
        request: &CreateOrderRequest,
    ) -> ApiResult<Order> {
        let mut state = self.record("create_order")?;
        state.order_requests.push(request.clone());
        let order = Order {
            id: state.next_id("order-"),
            vendor_ids: request.vendor_ids.clone(),
            items: request.items.clone(),
            total_cost: request.total_cost,
            status: Some("pending".to_string()),
        };
        state.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    async fn get_order(&self, _token: Option<&AuthToken>, order_id: &str) -> ApiResult<Order> {
        let state = self.record("get_order")?;
        state
            .orders
            .get(order_id)
            .cloned()
            .ok_or(RequestError::Status {
                status: 404,
                message: Some("Order not found".to_string()),
            })
    }

    async fn mock_payment(
        &self,
        _token: Option<&AuthToken>,
        request: &PaymentRequest,
    ) -> ApiResult<()> {
        let mut state = self.record("mock_payment")?;
        state.payments.push(request.clone());
        Ok(())
    }
}
