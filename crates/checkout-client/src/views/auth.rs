//! Login and registration
//!
//! These are the only views that write the session token.

use super::{failure_message, ViewContext};
use crate::geo::GeolocationResolver;
use crate::routes::Route;
use shopsmart_common::models::{LoginRequest, RegisterRequest};
use shopsmart_common::{AuthResponse, GeoPoint, Result, ValidationError};
use tracing::warn;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 5;

/// Local checks run before a registration request is sent
pub fn validate_registration(name: &str, email: &str, password: &str) -> std::result::Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !email.contains('@') || !email.ends_with(".com") {
        return Err(ValidationError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

pub async fn login(ctx: &mut ViewContext<'_>, email: &str, password: &str) -> Result<Route> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    match ctx.backend.login(&request).await {
        Ok(response) => {
            let name = store_session(ctx, response);
            ctx.notices.success(format!("Welcome back, {}!", name));
            Ok(Route::LANDING)
        }
        Err(e) => {
            ctx.notices.error(failure_message(&e, "Login failed"));
            Err(e.into())
        }
    }
}

/// Register a new account located at the resolver's best-effort position
pub async fn register(
    ctx: &mut ViewContext<'_>,
    resolver: &GeolocationResolver,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Route> {
    if let Err(e) = validate_registration(name, email, password) {
        ctx.notices.error(e.to_string());
        return Err(e.into());
    }

    let coordinate = resolver.resolve().await;
    let request = RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        location: GeoPoint::from(coordinate),
    };

    match ctx.backend.register(&request).await {
        Ok(response) => {
            let name = store_session(ctx, response);
            ctx.notices
                .success(format!("Account created. Welcome, {}!", name));
            Ok(Route::LANDING)
        }
        Err(e) => {
            ctx.notices.error(failure_message(&e, "Register failed"));
            Err(e.into())
        }
    }
}

/// Keep the token and return the user's display name.
///
/// A token that cannot be persisted still authenticates this process.
fn store_session(ctx: &mut ViewContext<'_>, response: AuthResponse) -> String {
    if let Err(e) = ctx.session.set_token(response.token) {
        warn!("Session token not persisted: {}", e);
    }
    response.user.name
}
