//! Route guards
//!
//! A guard is a pure function of session state: it either hands the wrapped
//! view back for rendering or names the route to redirect to. Performing the
//! navigation is left to the shell.

use crate::routes::Route;
use crate::session::SessionStore;

/// Result of evaluating a guard
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome<V> {
    Render(V),
    Redirect(Route),
}

/// Authentication requirement wrapped around a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Only reachable with a session token; otherwise go to login
    AuthRequired,
    /// Only reachable without a session token; otherwise go to the landing view
    AuthForbidden,
}

impl Guard {
    pub fn check<V>(self, session: &SessionStore, view: V) -> GuardOutcome<V> {
        match (self, session.is_authenticated()) {
            (Guard::AuthRequired, false) => GuardOutcome::Redirect(Route::LOGIN_ENTRY),
            (Guard::AuthForbidden, true) => GuardOutcome::Redirect(Route::LANDING),
            _ => GuardOutcome::Render(view),
        }
    }

    /// Guard wrapping a route, `None` for the unguarded root redirect
    pub fn for_route(route: &Route) -> Option<Guard> {
        match route {
            Route::Root => None,
            Route::Login | Route::Register => Some(Guard::AuthForbidden),
            Route::Dashboard
            | Route::ListDetail { .. }
            | Route::VendorResults { .. }
            | Route::OrderSummary { .. }
            | Route::Payment { .. } => Some(Guard::AuthRequired),
        }
    }
}

/// Evaluate the guard for a navigation target
pub fn admit(session: &SessionStore, route: Route) -> GuardOutcome<Route> {
    match Guard::for_route(&route) {
        Some(guard) => guard.check(session, route),
        None => GuardOutcome::Redirect(Route::Dashboard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopsmart_common::{AuthToken, Coordinate};

    fn workflow_routes() -> Vec<Route> {
        vec![
            Route::Dashboard,
            Route::ListDetail {
                list_id: "l1".to_string(),
            },
            Route::VendorResults {
                list_id: "l1".to_string(),
                coordinate: Coordinate::SENTINEL,
            },
            Route::OrderSummary {
                order_id: "o1".to_string(),
            },
            Route::Payment {
                order_id: "o1".to_string(),
            },
        ]
    }

    fn authenticated() -> SessionStore {
        let mut session = SessionStore::in_memory();
        session.set_token(AuthToken::new("t")).unwrap();
        session
    }

    #[test]
    fn test_auth_required_without_token_redirects_to_login() {
        let session = SessionStore::in_memory();
        for route in workflow_routes() {
            assert_eq!(
                admit(&session, route),
                GuardOutcome::Redirect(Route::Login)
            );
        }
    }

    #[test]
    fn test_auth_required_with_token_renders() {
        let session = authenticated();
        for route in workflow_routes() {
            assert_eq!(admit(&session, route.clone()), GuardOutcome::Render(route));
        }
    }

    #[test]
    fn test_auth_forbidden_with_token_redirects_to_landing() {
        let session = authenticated();
        assert_eq!(
            admit(&session, Route::Login),
            GuardOutcome::Redirect(Route::Dashboard)
        );
        assert_eq!(
            admit(&session, Route::Register),
            GuardOutcome::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn test_auth_forbidden_without_token_renders() {
        let session = SessionStore::in_memory();
        assert_eq!(
            admit(&session, Route::Register),
            GuardOutcome::Render(Route::Register)
        );
    }

    #[test]
    fn test_guard_wraps_any_view() {
        let session = SessionStore::in_memory();
        assert_eq!(
            Guard::AuthForbidden.check(&session, "login form"),
            GuardOutcome::Render("login form")
        );
        assert_eq!(
            Guard::AuthRequired.check(&session, 42),
            GuardOutcome::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_root_always_redirects_to_dashboard() {
        assert_eq!(
            admit(&SessionStore::in_memory(), Route::Root),
            GuardOutcome::Redirect(Route::Dashboard)
        );
        assert_eq!(
            admit(&authenticated(), Route::Root),
            GuardOutcome::Redirect(Route::Dashboard)
        );
    }
}
