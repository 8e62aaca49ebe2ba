//! Navigation shell
//!
//! Hosts the session, the current route and the mounted view. Every
//! navigation goes through the route guard; redirects are followed here
//! rather than inside the guards. User actions are dispatched to the mounted
//! view and their outcome drives the next navigation.
//!
//! Actions run one at a time against `&mut Shell`, so a response can only be
//! applied to the view that issued it.

use crate::api::Backend;
use crate::geo::GeolocationResolver;
use crate::guard::{admit, GuardOutcome};
use crate::notify::{Notice, Notices};
use crate::routes::Route;
use crate::session::SessionStore;
use crate::views::{
    auth, Dashboard, ListDetail, MockPayment, OrderSummary, VendorDiscovery, ViewContext,
};
use shopsmart_common::{Error, Item, Order, PaymentStatus, Result, ShoppingList};
use std::sync::Arc;
use tracing::{info, warn};

/// Redirect chains longer than this indicate a routing bug
const MAX_REDIRECTS: usize = 4;

/// The view mounted for the current route
#[derive(Debug)]
pub enum View {
    /// Nothing mounted yet
    Blank,
    Login,
    Register,
    Dashboard(Dashboard),
    ListDetail(ListDetail),
    VendorResults(VendorDiscovery),
    OrderSummary(OrderSummary),
    Payment(MockPayment),
}

impl View {
    fn name(&self) -> &'static str {
        match self {
            View::Blank => "blank",
            View::Login => "login",
            View::Register => "register",
            View::Dashboard(_) => "dashboard",
            View::ListDetail(_) => "list detail",
            View::VendorResults(_) => "vendor results",
            View::OrderSummary(_) => "order summary",
            View::Payment(_) => "payment",
        }
    }
}

pub struct Shell {
    backend: Arc<dyn Backend>,
    session: SessionStore,
    resolver: GeolocationResolver,
    notices: Notices,
    route: Route,
    view: View,
}

impl Shell {
    pub fn new(
        backend: Arc<dyn Backend>,
        session: SessionStore,
        resolver: GeolocationResolver,
    ) -> Self {
        Self {
            backend,
            session,
            resolver,
            notices: Notices::new(),
            route: Route::Root,
            view: View::Blank,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn notices(&self) -> &[Notice] {
        self.notices.pending()
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Navigate to `target`, following guard redirects, and mount the view
    pub async fn navigate(&mut self, target: Route) -> Result<&Route> {
        let mut route = target;

        for _ in 0..MAX_REDIRECTS {
            match admit(&self.session, route) {
                GuardOutcome::Render(admitted) => {
                    self.mount(admitted).await;
                    return Ok(&self.route);
                }
                GuardOutcome::Redirect(next) => {
                    info!("Redirecting to {}", next);
                    route = next;
                }
            }
        }

        Err(Error::Other(anyhow::anyhow!(
            "too many redirects while navigating"
        )))
    }

    /// Navigate to a path such as `/list/abc`
    pub async fn open(&mut self, path: &str) -> Result<&Route> {
        let route = Route::parse(path)
            .ok_or_else(|| Error::Other(anyhow::anyhow!("unknown path: {}", path)))?;
        self.navigate(route).await
    }

    async fn mount(&mut self, route: Route) {
        info!("Entering {}", route);

        let Shell {
            backend,
            session,
            notices,
            ..
        } = &mut *self;
        let mut ctx = ViewContext::new(backend.as_ref(), session, notices);

        let view = match &route {
            Route::Root => View::Blank,
            Route::Login => View::Login,
            Route::Register => View::Register,
            Route::Dashboard => {
                let mut dashboard = Dashboard::new();
                dashboard.load(&mut ctx).await;
                View::Dashboard(dashboard)
            }
            Route::ListDetail { list_id } => {
                let mut detail = ListDetail::new(list_id.clone());
                detail.load(&mut ctx).await;
                View::ListDetail(detail)
            }
            Route::VendorResults {
                list_id,
                coordinate,
            } => {
                let mut discovery = VendorDiscovery::new(list_id.clone());
                discovery.enter(&mut ctx, *coordinate).await;
                View::VendorResults(discovery)
            }
            Route::OrderSummary { order_id } => {
                let mut summary = OrderSummary::new(order_id.clone());
                summary.load(&mut ctx).await;
                View::OrderSummary(summary)
            }
            Route::Payment { order_id } => View::Payment(MockPayment::new(order_id.clone())),
        };

        self.route = route;
        self.view = view;
    }

    /// Follow an action's outcome to the next route
    async fn follow(&mut self, outcome: Result<Route>) -> Result<()> {
        let next = outcome?;
        self.navigate(next).await?;
        Ok(())
    }

    fn not_available(&self, action: &str) -> Error {
        Error::Other(anyhow::anyhow!(
            "{} is not available on the {} view",
            action,
            self.view.name()
        ))
    }

    // Authentication

    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        if !matches!(self.view, View::Login) {
            return Err(self.not_available("login"));
        }
        let mut ctx = ViewContext::new(self.backend.as_ref(), &mut self.session, &mut self.notices);
        let outcome = auth::login(&mut ctx, email, password).await;
        self.follow(outcome).await
    }

    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> Result<()> {
        if !matches!(self.view, View::Register) {
            return Err(self.not_available("register"));
        }
        let mut ctx = ViewContext::new(self.backend.as_ref(), &mut self.session, &mut self.notices);
        let outcome = auth::register(&mut ctx, &self.resolver, name, email, password).await;
        self.follow(outcome).await
    }

    /// Drop the session and return to the login entry point
    pub async fn logout(&mut self) -> Result<()> {
        if let Err(e) = self.session.clear() {
            warn!("Failed to remove persisted session: {}", e);
        }
        self.navigate(Route::LOGIN_ENTRY).await?;
        Ok(())
    }

    // Dashboard

    pub fn lists(&self) -> Option<&[ShoppingList]> {
        match &self.view {
            View::Dashboard(dashboard) => Some(dashboard.lists()),
            _ => None,
        }
    }

    pub async fn create_list(&mut self, title: &str) -> Result<ShoppingList> {
        let View::Dashboard(dashboard) = &mut self.view else {
            return Err(self.not_available("create list"));
        };
        let mut ctx = ViewContext::new(self.backend.as_ref(), &mut self.session, &mut self.notices);
        dashboard.create_list(&mut ctx, title).await
    }

    // List detail

    pub fn items(&self) -> Option<&[Item]> {
        match &self.view {
            View::ListDetail(detail) => Some(detail.items()),
            View::VendorResults(discovery) => Some(discovery.my_items()),
            _ => None,
        }
    }

    pub async fn add_item(
        &mut self,
        name: &str,
        quantity: Option<&str>,
        brand: Option<&str>,
    ) -> Result<Item> {
        let View::ListDetail(detail) = &mut self.view else {
            return Err(self.not_available("add item"));
        };
        let mut ctx = ViewContext::new(self.backend.as_ref(), &mut self.session, &mut self.notices);
        detail.add_item(&mut ctx, name, quantity, brand).await
    }

    pub async fn remove_item(&mut self, item_id: &str) -> Result<()> {
        let View::ListDetail(detail) = &mut self.view else {
            return Err(self.not_available("remove item"));
        };
        let mut ctx = ViewContext::new(self.backend.as_ref(), &mut self.session, &mut self.notices);
        detail.remove_item(&mut ctx, item_id).await
    }

    /// Resolve a position, discover vendors for the current list and move
    /// to the results view
    pub async fn find_shops(&mut self) -> Result<()> {
        let View::ListDetail(detail) = &self.view else {
            return Err(self.not_available("find shops"));
        };
        let mut discovery = VendorDiscovery::new(detail.list_id());
        let items = detail.items().to_vec();

        let mut ctx = ViewContext::new(self.backend.as_ref(), &mut self.session, &mut self.notices);
        let coordinate = discovery.find_shops(&mut ctx, &items, &self.resolver).await?;

        let route = Route::VendorResults {
            list_id: discovery.list_id().to_string(),
            coordinate,
        };

        // The results are already loaded; mount them directly if still admitted
        match admit(&self.session, route) {
            GuardOutcome::Render(route) => {
                info!("Entering {}", route);
                self.route = route;
                self.view = View::VendorResults(discovery);
                Ok(())
            }
            GuardOutcome::Redirect(next) => {
                self.navigate(next).await?;
                Ok(())
            }
        }
    }

    // Vendor results

    pub fn discovery(&self) -> Option<&VendorDiscovery> {
        match &self.view {
            View::VendorResults(discovery) => Some(discovery),
            _ => None,
        }
    }

    pub fn select_vendor(&mut self, vendor_id: &str) -> Result<bool> {
        match &mut self.view {
            View::VendorResults(discovery) => Ok(discovery.select(vendor_id)),
            _ => Err(self.not_available("select vendor")),
        }
    }

    pub fn select_vendor_at(&mut self, index: usize) -> Result<bool> {
        match &mut self.view {
            View::VendorResults(discovery) => Ok(discovery.select_index(index)),
            _ => Err(self.not_available("select vendor")),
        }
    }

    pub async fn place_order(&mut self) -> Result<()> {
        let View::VendorResults(discovery) = &mut self.view else {
            return Err(self.not_available("place order"));
        };
        let mut ctx = ViewContext::new(self.backend.as_ref(), &mut self.session, &mut self.notices);
        let outcome = discovery.place_order(&mut ctx).await;
        self.follow(outcome).await
    }

    // Order summary and payment

    pub fn order(&self) -> Option<&Order> {
        match &self.view {
            View::OrderSummary(summary) => summary.order(),
            _ => None,
        }
    }

    pub async fn pay_now(&mut self) -> Result<()> {
        let View::OrderSummary(summary) = &self.view else {
            return Err(self.not_available("pay now"));
        };
        let next = summary.pay_now();
        self.navigate(next).await?;
        Ok(())
    }

    pub async fn simulate_payment(&mut self, status: PaymentStatus) -> Result<()> {
        let View::Payment(payment) = &self.view else {
            return Err(self.not_available("payment"));
        };
        let mut ctx = ViewContext::new(self.backend.as_ref(), &mut self.session, &mut self.notices);
        let outcome = payment.simulate(&mut ctx, status).await;
        self.follow(outcome).await
    }
}
