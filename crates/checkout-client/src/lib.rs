//! ShopSmart checkout client
//!
//! Carries a user from an authenticated session through list curation and
//! vendor discovery to order creation and a simulated payment.
//!
//! ## Architecture
//!
//! **Components:**
//! - `session`: token store, persisted between runs
//! - `guard` / `routes`: authentication boundaries around every view
//! - `geo`: bounded, never-failing position lookup
//! - `api`: backend contract and its REST implementation
//! - `views`: per-screen state and user actions
//! - `shell`: navigation host tying the above together
//!
//! **Flow:**
//! 1. Session gates the guards, guards admit the list views
//! 2. Geolocation feeds vendor discovery
//! 3. The selected vendor match becomes an order
//! 4. Payment success returns to the dashboard, failure to the order

pub mod api;
pub mod config;
pub mod geo;
pub mod guard;
pub mod local_state;
pub mod notify;
pub mod routes;
pub mod session;
pub mod shell;
pub mod views;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use api::{Backend, HttpBackend};
pub use config::Config;
pub use geo::{FixedLocation, GeolocationResolver, LocationSource};
pub use guard::{Guard, GuardOutcome};
pub use notify::{Notice, NoticeLevel, Notices};
pub use routes::Route;
pub use session::SessionStore;
pub use shell::{Shell, View};
