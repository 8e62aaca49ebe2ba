//! Shared models and errors for the ShopSmart checkout client

pub mod error;
pub mod models;

pub use error::{Error, RequestError, Result, ValidationError};
pub use models::{
    coerce_quantity, AuthResponse, AuthToken, Coordinate, CreateOrderRequest, GeoPoint, Item,
    Order, OrderLine, PaymentStatus, ShoppingList, User, Vendor, VendorMatch,
};
