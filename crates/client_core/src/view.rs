//! The page surface the gateway renders into.

use std::{
    collections::BTreeMap,
    sync::{Mutex, PoisonError},
};

use shared::protocol::Permissions;

pub const LOGIN_FORM: &str = "loginForm";
pub const PRODUCTS_CONTAINER: &str = "productsContainer";
pub const CUSTOMERS_CONTAINER: &str = "customersContainer";
pub const SALES_CONTAINER: &str = "salesContainer";
pub const INVENTORY_CONTAINER: &str = "inventoryContainer";
pub const REPORTS_CONTAINER: &str = "reportsContainer";

pub const RESOURCE_CONTAINERS: [&str; 5] = [
    PRODUCTS_CONTAINER,
    CUSTOMERS_CONTAINER,
    SALES_CONTAINER,
    INVENTORY_CONTAINER,
    REPORTS_CONTAINER,
];

pub trait ViewSurface: Send + Sync {
    /// Replaces a container's content. Returns `false` when the page has no
    /// such container, in which case nothing changes.
    fn set_container_html(&self, container_id: &str, html: String) -> bool;
    /// Writes the name into every user-name slot.
    fn set_user_name(&self, name: &str);
    /// Hides every permission-gated element the user is not granted.
    fn apply_permissions(&self, permissions: &Permissions);
    /// Synchronous user-facing notice.
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GatedElement {
    permission: String,
    hidden: bool,
}

#[derive(Debug, Default)]
struct PageState {
    containers: BTreeMap<String, Option<String>>,
    user_name_slots: Vec<String>,
    gated: BTreeMap<String, GatedElement>,
    alerts: Vec<String>,
}

/// In-memory page model: declared containers, user-name slots and
/// permission-gated elements.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<PageState>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page declaring every resource container and the login form.
    pub fn backoffice_page() -> Self {
        let view = Self::new().with_container(LOGIN_FORM);
        RESOURCE_CONTAINERS
            .iter()
            .fold(view, |view, id| view.with_container(*id))
            .with_user_name_slot()
    }

    pub fn with_container(self, id: impl Into<String>) -> Self {
        self.lock().containers.insert(id.into(), None);
        self
    }

    pub fn with_user_name_slot(self) -> Self {
        self.lock().user_name_slots.push(String::new());
        self
    }

    pub fn with_gated_element(
        self,
        element_id: impl Into<String>,
        permission: impl Into<String>,
    ) -> Self {
        self.lock().gated.insert(
            element_id.into(),
            GatedElement {
                permission: permission.into(),
                hidden: false,
            },
        );
        self
    }

    pub fn container_html(&self, id: &str) -> Option<String> {
        self.lock().containers.get(id).cloned().flatten()
    }

    pub fn user_names(&self) -> Vec<String> {
        self.lock().user_name_slots.clone()
    }

    /// `None` when the element is not declared.
    pub fn is_hidden(&self, element_id: &str) -> Option<bool> {
        self.lock().gated.get(element_id).map(|element| element.hidden)
    }

    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ViewSurface for MemoryView {
    fn set_container_html(&self, container_id: &str, html: String) -> bool {
        match self.lock().containers.get_mut(container_id) {
            Some(slot) => {
                *slot = Some(html);
                true
            }
            None => false,
        }
    }

    fn set_user_name(&self, name: &str) {
        for slot in &mut self.lock().user_name_slots {
            *slot = name.to_string();
        }
    }

    fn apply_permissions(&self, permissions: &Permissions) {
        for element in self.lock().gated.values_mut() {
            if !permissions.allows(&element.permission) {
                element.hidden = true;
            }
        }
    }

    fn alert(&self, message: &str) {
        self.lock().alerts.push(message.to_string());
    }
}
