//! Order summary

use super::ViewContext;
use crate::routes::Route;
use shopsmart_common::Order;
use tracing::debug;

#[derive(Debug)]
pub struct OrderSummary {
    order_id: String,
    order: Option<Order>,
}

impl OrderSummary {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            order: None,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// The loaded order; `None` renders nothing
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub async fn load(&mut self, ctx: &mut ViewContext<'_>) -> Option<&Order> {
        let token = ctx.token();
        match ctx.backend.get_order(token.as_ref(), &self.order_id).await {
            Ok(order) => self.order = Some(order),
            Err(e) => {
                debug!("order fetch failed: {}", e);
                ctx.notices.error("Failed to load order");
            }
        }
        self.order.as_ref()
    }

    /// Route to the payment screen for this order
    pub fn pay_now(&self) -> Route {
        Route::Payment {
            order_id: self.order_id.clone(),
        }
    }
}

/// Format an amount in rupees with two decimals
pub fn format_amount(amount: f64) -> String {
    format!("₹{:.2}", amount)
}
