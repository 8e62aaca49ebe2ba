//! Vendor discovery and selection
//!
//! ```text
//! Idle --find_shops--> Resolving --> Discovering --> Ready
//!   ^                                     |
//!   +-- empty list (rejected locally)     +--> Failed (safe, empty)
//! ```
//!
//! The backend's ranking is authoritative; results are kept in response
//! order and the first one is selected automatically.

use super::ViewContext;
use crate::geo::GeolocationResolver;
use crate::routes::Route;
use shopsmart_common::{
    Coordinate, CreateOrderRequest, Item, Result, ValidationError, VendorMatch,
};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscoveryPhase {
    Idle,
    Resolving,
    Discovering { coordinate: Coordinate },
    Ready { coordinate: Coordinate },
    /// Discovery failed; no matches, no selection
    Failed,
}

#[derive(Debug)]
pub struct VendorDiscovery {
    list_id: String,
    phase: DiscoveryPhase,
    my_items: Vec<Item>,
    matches: Vec<VendorMatch>,
    selected: Option<usize>,
}

impl VendorDiscovery {
    pub fn new(list_id: impl Into<String>) -> Self {
        Self {
            list_id: list_id.into(),
            phase: DiscoveryPhase::Idle,
            my_items: Vec::new(),
            matches: Vec::new(),
            selected: None,
        }
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn phase(&self) -> DiscoveryPhase {
        self.phase
    }

    /// Items of the list, as shown next to the results
    pub fn my_items(&self) -> &[Item] {
        &self.my_items
    }

    /// Matches in backend order
    pub fn matches(&self) -> &[VendorMatch] {
        &self.matches
    }

    pub fn selected(&self) -> Option<&VendorMatch> {
        self.selected.and_then(|i| self.matches.get(i))
    }

    /// Run the whole discovery for `items`: resolve a position, then search.
    ///
    /// An empty list is rejected before any location query or request.
    pub async fn find_shops(
        &mut self,
        ctx: &mut ViewContext<'_>,
        items: &[Item],
        resolver: &GeolocationResolver,
    ) -> Result<Coordinate> {
        if items.is_empty() {
            ctx.notices.error(ValidationError::EmptyList.to_string());
            return Err(ValidationError::EmptyList.into());
        }

        self.my_items = items.to_vec();
        self.phase = DiscoveryPhase::Resolving;
        let coordinate = resolver.resolve().await;

        self.discover(ctx, coordinate).await;
        Ok(coordinate)
    }

    /// Search vendors around `coordinate` and auto-select the first match
    pub async fn discover(&mut self, ctx: &mut ViewContext<'_>, coordinate: Coordinate) {
        self.phase = DiscoveryPhase::Discovering { coordinate };
        self.matches.clear();
        self.selected = None;

        let token = ctx.token();
        match ctx
            .backend
            .search_vendors(token.as_ref(), coordinate, &self.list_id)
            .await
        {
            Ok(matches) => {
                info!(
                    "Found {} vendor matches for list {}",
                    matches.len(),
                    self.list_id
                );
                self.selected = if matches.is_empty() { None } else { Some(0) };
                self.matches = matches;
                self.phase = DiscoveryPhase::Ready { coordinate };
            }
            Err(e) => {
                debug!("vendor search failed: {}", e);
                ctx.notices.error("Failed to find vendors");
                self.phase = DiscoveryPhase::Failed;
            }
        }
    }

    /// Entry by route: reload the items, then search unless the list is
    /// known to be empty.
    ///
    /// If the items cannot be loaded the search still runs; the backend
    /// holds the list.
    pub async fn enter(&mut self, ctx: &mut ViewContext<'_>, coordinate: Coordinate) {
        if self.load_items(ctx).await && self.my_items.is_empty() {
            ctx.notices.error(ValidationError::EmptyList.to_string());
            self.phase = DiscoveryPhase::Idle;
            return;
        }
        self.discover(ctx, coordinate).await;
    }

    /// Reload the list's items for display; false if the fetch failed
    pub async fn load_items(&mut self, ctx: &mut ViewContext<'_>) -> bool {
        let token = ctx.token();
        match ctx.backend.list_items(token.as_ref(), &self.list_id).await {
            Ok(items) => {
                self.my_items = items;
                true
            }
            Err(e) => {
                debug!("item fetch failed: {}", e);
                ctx.notices.error("Failed to load your items");
                false
            }
        }
    }

    /// Select the match for `vendor_id`; no server effect
    pub fn select(&mut self, vendor_id: &str) -> bool {
        match self.matches.iter().position(|m| m.vendor.id == vendor_id) {
            Some(index) => {
                self.selected = Some(index);
                true
            }
            None => false,
        }
    }

    /// Select by position in the displayed order
    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.matches.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Order payload derived from the current selection
    pub fn order_request(&self) -> Option<CreateOrderRequest> {
        self.selected().map(CreateOrderRequest::from_match)
    }

    /// Create an order from the selection and return the order view route.
    ///
    /// Without a selection nothing is sent. On failure the selection is kept.
    pub async fn place_order(&mut self, ctx: &mut ViewContext<'_>) -> Result<Route> {
        let Some(request) = self.order_request() else {
            debug!("place_order without a selection ignored");
            return Err(ValidationError::NoSelection.into());
        };

        let token = ctx.token();
        match ctx.backend.create_order(token.as_ref(), &request).await {
            Ok(order) => {
                ctx.notices.success("Order created");
                Ok(Route::OrderSummary { order_id: order.id })
            }
            Err(e) => {
                ctx.notices.error("Failed to create order");
                Err(e.into())
            }
        }
    }
}
