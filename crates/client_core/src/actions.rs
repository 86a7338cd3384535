//! Action identifiers and the registry that maps them to handlers.

use std::{collections::HashMap, fmt, marker::PhantomData, str::FromStr, sync::Arc};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shared::protocol::{Customer, InventoryItem, Product, Sale, SalesReport};
use thiserror::Error;
use tracing::{debug, error};

use crate::{
    error::RenderError,
    render::{self, Formatting},
    view::{
        CUSTOMERS_CONTAINER, INVENTORY_CONTAINER, PRODUCTS_CONTAINER, REPORTS_CONTAINER,
        SALES_CONTAINER,
    },
    SessionGateway,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Logout,
    LoadProducts,
    LoadCustomers,
    LoadSales,
    LoadInventory,
    LoadReports,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Logout,
        Action::LoadProducts,
        Action::LoadCustomers,
        Action::LoadSales,
        Action::LoadInventory,
        Action::LoadReports,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Logout => "logout",
            Action::LoadProducts => "load-products",
            Action::LoadCustomers => "load-customers",
            Action::LoadSales => "load-sales",
            Action::LoadInventory => "load-inventory",
            Action::LoadReports => "load-reports",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// The element an action was triggered from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTarget {
    pub element_id: Option<String>,
}

impl ActionTarget {
    pub fn element(id: impl Into<String>) -> Self {
        Self {
            element_id: Some(id.into()),
        }
    }
}

#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn handle(&self, gateway: &SessionGateway, target: &ActionTarget);
}

pub struct LogoutHandler;

#[async_trait]
impl ActionHandler for LogoutHandler {
    async fn handle(&self, gateway: &SessionGateway, _target: &ActionTarget) {
        gateway.logout();
    }
}

/// A resource list fetched by a `load-*` action and rendered into its container.
pub trait Resource: Send + Sync + 'static {
    const PATH: &'static str;
    const CONTAINER: &'static str;
    type Payload: DeserializeOwned + Send;

    fn render(payload: &Self::Payload, fmt: &Formatting) -> Result<String, RenderError>;
}

pub struct Products;
pub struct Customers;
pub struct Sales;
pub struct Inventory;
pub struct Reports;

impl Resource for Products {
    const PATH: &'static str = "/products";
    const CONTAINER: &'static str = PRODUCTS_CONTAINER;
    type Payload = Vec<Product>;

    fn render(payload: &Self::Payload, fmt: &Formatting) -> Result<String, RenderError> {
        render::render_products(payload, fmt)
    }
}

impl Resource for Customers {
    const PATH: &'static str = "/customers";
    const CONTAINER: &'static str = CUSTOMERS_CONTAINER;
    type Payload = Vec<Customer>;

    fn render(payload: &Self::Payload, _fmt: &Formatting) -> Result<String, RenderError> {
        render::render_customers(payload)
    }
}

impl Resource for Sales {
    const PATH: &'static str = "/sales";
    const CONTAINER: &'static str = SALES_CONTAINER;
    type Payload = Vec<Sale>;

    fn render(payload: &Self::Payload, fmt: &Formatting) -> Result<String, RenderError> {
        render::render_sales(payload, fmt)
    }
}

impl Resource for Inventory {
    const PATH: &'static str = "/inventory";
    const CONTAINER: &'static str = INVENTORY_CONTAINER;
    type Payload = Vec<InventoryItem>;

    fn render(payload: &Self::Payload, _fmt: &Formatting) -> Result<String, RenderError> {
        render::render_inventory(payload)
    }
}

impl Resource for Reports {
    const PATH: &'static str = "/reports/sales";
    const CONTAINER: &'static str = REPORTS_CONTAINER;
    type Payload = SalesReport;

    fn render(payload: &Self::Payload, fmt: &Formatting) -> Result<String, RenderError> {
        render::render_reports(payload, fmt)
    }
}

/// Fetch-then-render. Failures are logged and leave the container as it was.
pub struct LoadResource<R: Resource> {
    action: Action,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> LoadResource<R> {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            _resource: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Resource> ActionHandler for LoadResource<R> {
    async fn handle(&self, gateway: &SessionGateway, _target: &ActionTarget) {
        let payload = match gateway.get::<R::Payload>(R::PATH).await {
            Ok(payload) => payload,
            Err(err) => {
                error!(action = %self.action, path = R::PATH, error = %err, "failed to load resource");
                return;
            }
        };

        let html = match R::render(&payload, &gateway.formatting()) {
            Ok(html) => html,
            Err(err) => {
                error!(action = %self.action, path = R::PATH, error = %err, "failed to render resource");
                return;
            }
        };

        if !gateway.view().set_container_html(R::CONTAINER, html) {
            debug!(action = %self.action, container = R::CONTAINER, "container absent; render skipped");
        }
    }
}

/// Closed mapping from action identifier to handler, built once per page.
pub struct ActionRegistry {
    handlers: HashMap<Action, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn backoffice() -> Self {
        Self::empty()
            .register(Action::Logout, LogoutHandler)
            .register(
                Action::LoadProducts,
                LoadResource::<Products>::new(Action::LoadProducts),
            )
            .register(
                Action::LoadCustomers,
                LoadResource::<Customers>::new(Action::LoadCustomers),
            )
            .register(
                Action::LoadSales,
                LoadResource::<Sales>::new(Action::LoadSales),
            )
            .register(
                Action::LoadInventory,
                LoadResource::<Inventory>::new(Action::LoadInventory),
            )
            .register(
                Action::LoadReports,
                LoadResource::<Reports>::new(Action::LoadReports),
            )
    }

    pub fn register(mut self, action: Action, handler: impl ActionHandler + 'static) -> Self {
        self.handlers.insert(action, Arc::new(handler));
        self
    }

    pub fn handler(&self, action_name: &str) -> Option<(Action, Arc<dyn ActionHandler>)> {
        let action = action_name.parse::<Action>().ok()?;
        let handler = self.handlers.get(&action)?;
        Some((action, Arc::clone(handler)))
    }

    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.handlers.keys().copied()
    }

    /// Runs the handler for `action_name`. Unknown identifiers are ignored
    /// and reported as `None`.
    pub async fn dispatch(
        &self,
        gateway: &SessionGateway,
        action_name: &str,
        target: &ActionTarget,
    ) -> Option<Action> {
        let Some((action, handler)) = self.handler(action_name) else {
            debug!(action = action_name, "ignoring unknown action");
            return None;
        };
        debug!(%action, element = ?target.element_id, "dispatching action");
        handler.handle(gateway, target).await;
        Some(action)
    }
}
