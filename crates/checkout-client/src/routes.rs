//! Navigable routes of the checkout workflow

use shopsmart_common::Coordinate;
use std::fmt;

/// Every place the shell can navigate to
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// `/`, always forwarded to the dashboard
    Root,
    Login,
    Register,
    /// Authenticated landing view
    Dashboard,
    ListDetail {
        list_id: String,
    },
    VendorResults {
        list_id: String,
        coordinate: Coordinate,
    },
    OrderSummary {
        order_id: String,
    },
    Payment {
        order_id: String,
    },
}

impl Route {
    /// Where unauthenticated users are sent
    pub const LOGIN_ENTRY: Route = Route::Login;

    /// Where authenticated users land
    pub const LANDING: Route = Route::Dashboard;

    /// Parse a path such as `/list/abc` or `/vendors/abc?lat=1&lng=2`
    pub fn parse(path: &str) -> Option<Route> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };

        let segments: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Route::Root,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["dashboard"] => Route::Dashboard,
            ["list", id] => Route::ListDetail {
                list_id: id.to_string(),
            },
            ["vendors", id] => Route::VendorResults {
                list_id: id.to_string(),
                coordinate: coordinate_from_query(query.unwrap_or_default()),
            },
            ["order", id] => Route::OrderSummary {
                order_id: id.to_string(),
            },
            ["pay", id] => Route::Payment {
                order_id: id.to_string(),
            },
            _ => return None,
        };

        Some(route)
    }

    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::ListDetail { list_id } => format!("/list/{}", list_id),
            Route::VendorResults {
                list_id,
                coordinate,
            } => format!(
                "/vendors/{}?lat={}&lng={}",
                list_id, coordinate.lat, coordinate.lng
            ),
            Route::OrderSummary { order_id } => format!("/order/{}", order_id),
            Route::Payment { order_id } => format!("/pay/{}", order_id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Missing or malformed lat/lng fall back to the sentinel
fn coordinate_from_query(query: &str) -> Coordinate {
    let mut lat = None;
    let mut lng = None;

    for pair in query.split('&') {
        match pair.split_once('=') {
            Some(("lat", v)) => lat = v.parse::<f64>().ok(),
            Some(("lng", v)) => lng = v.parse::<f64>().ok(),
            _ => {}
        }
    }

    match (lat, lng) {
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
        _ => Coordinate::SENTINEL,
    }
}
