//! Simulated payment
//!
//! Not a real settlement. `success` leaves the workflow for the landing view,
//! `failed` goes back to the order summary so the user can try again. Nothing
//! is retried automatically.

use super::ViewContext;
use crate::routes::Route;
use shopsmart_common::models::PaymentRequest;
use shopsmart_common::{PaymentStatus, Result};
use tracing::info;

#[derive(Debug)]
pub struct MockPayment {
    order_id: String,
}

impl MockPayment {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Submit one simulated outcome and return where the workflow goes next.
    ///
    /// A transport failure keeps the user on this view.
    pub async fn simulate(
        &self,
        ctx: &mut ViewContext<'_>,
        status: PaymentStatus,
    ) -> Result<Route> {
        let token = ctx.token();
        let request = PaymentRequest {
            order_id: self.order_id.clone(),
            status,
        };

        if let Err(e) = ctx.backend.mock_payment(token.as_ref(), &request).await {
            ctx.notices.error("Payment error");
            return Err(e.into());
        }

        info!("Payment for order {} simulated as {}", self.order_id, status);

        match status {
            PaymentStatus::Success => {
                ctx.notices.success("Payment successful");
                Ok(Route::LANDING)
            }
            PaymentStatus::Failed => {
                ctx.notices.error("Payment failed");
                Ok(Route::OrderSummary {
                    order_id: self.order_id.clone(),
                })
            }
        }
    }
}
