//! Workflow views
//!
//! Each view owns the client-held state of one screen and exposes the user
//! actions available there. Request failures are reported through
//! [`Notices`] and leave the view in a safe state; the returned `Result`
//! only tells the caller what happened.

pub mod auth;
pub mod dashboard;
pub mod list_detail;
pub mod order;
pub mod payment;
pub mod vendors;

use crate::api::Backend;
use crate::notify::Notices;
use crate::session::SessionStore;
use shopsmart_common::{AuthToken, RequestError};

pub use dashboard::Dashboard;
pub use list_detail::ListDetail;
pub use order::OrderSummary;
pub use payment::MockPayment;
pub use vendors::{DiscoveryPhase, VendorDiscovery};

/// What a view action needs from its host
pub struct ViewContext<'a> {
    pub backend: &'a dyn Backend,
    pub session: &'a mut SessionStore,
    pub notices: &'a mut Notices,
}

impl<'a> ViewContext<'a> {
    pub fn new(
        backend: &'a dyn Backend,
        session: &'a mut SessionStore,
        notices: &'a mut Notices,
    ) -> Self {
        Self {
            backend,
            session,
            notices,
        }
    }

    /// Token to attach to authenticated requests
    pub fn token(&self) -> Option<AuthToken> {
        self.session.token().cloned()
    }
}

/// Backend message if it sent one, otherwise the fallback
pub(crate) fn failure_message(error: &RequestError, fallback: &str) -> String {
    error
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}
