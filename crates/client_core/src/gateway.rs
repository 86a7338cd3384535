use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::ProductId,
    protocol::{InventoryMovement, LoginRequest, LoginResponse, RegisterRequest, SessionUser},
};
use tracing::{info, warn};

use crate::{
    actions::{Action, ActionRegistry, ActionTarget},
    config::GatewayConfig,
    error::{GatewayError, RequestError},
    navigation::Navigator,
    render::Formatting,
    session::{SessionContext, SessionState},
    storage::CredentialStore,
    transport::{ApiTransport, RequestOptions},
    view::ViewSurface,
};

const LOGIN_FAILED_PREFIX: &str = "Login failed: ";
const MISSING_TOKEN_MESSAGE: &str = "login response carried no credential";

/// Owns the session for one page lifetime and is the only way out to the API.
pub struct SessionGateway {
    config: GatewayConfig,
    transport: ApiTransport,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    view: Arc<dyn ViewSurface>,
    session: Mutex<SessionContext>,
    registry: OnceLock<Arc<ActionRegistry>>,
}

impl SessionGateway {
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        view: Arc<dyn ViewSurface>,
    ) -> Arc<Self> {
        Arc::new(Self {
            transport: ApiTransport::new(config.api_base()),
            config,
            store,
            navigator,
            view,
            session: Mutex::new(SessionContext::default()),
            registry: OnceLock::new(),
        })
    }

    /// Page-load entry point: restore the stored credential, wire the action
    /// registry, then verify the session with the backend.
    pub async fn initialize(&self) -> Arc<ActionRegistry> {
        let credential = match self.store.load() {
            Ok(credential) => credential,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "credential store unreadable; starting signed out");
                None
            }
        };
        *self.session() = SessionContext::restore(credential);

        let registry = self.registry();
        self.verify_session().await;
        registry
    }

    /// The action registry, built on first use and shared afterwards.
    pub fn registry(&self) -> Arc<ActionRegistry> {
        Arc::clone(
            self.registry
                .get_or_init(|| Arc::new(ActionRegistry::backoffice())),
        )
    }

    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionUser, GatewayError> {
        let result = self.login_request(email, password).await.and_then(|response| {
            if response.token.trim().is_empty() {
                Err(RequestError::new(MISSING_TOKEN_MESSAGE))
            } else {
                Ok(response)
            }
        });
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(email, error = %err, "login rejected");
                self.view.alert(&format!("{LOGIN_FAILED_PREFIX}{err}"));
                return Err(err.into());
            }
        };

        if let Err(err) = self.store.store(&response.token) {
            self.view
                .alert(&format!("{LOGIN_FAILED_PREFIX}could not save session"));
            return Err(GatewayError::Storage(err));
        }

        self.session()
            .establish(response.token, response.user.clone());
        info!(user = %response.user.name, "signed in");
        self.navigator.navigate(&self.config.landing_path);
        Ok(response.user)
    }

    async fn login_request(&self, email: &str, password: &str) -> Result<LoginResponse, RequestError> {
        let options = RequestOptions::post(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let value = self.request("/auth/login", options).await?;
        decode(value)
    }

    /// Creates an account. Does not sign the new user in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), RequestError> {
        let options = RequestOptions::post(&RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })?;
        self.request("/auth/register", options).await?;
        info!(email, "account registered");
        Ok(())
    }

    /// Confirms the held credential with the backend. Any failure purges it
    /// and sends the user to the login view.
    pub async fn verify_session(&self) -> SessionState {
        if self.credential().is_none() {
            if self.navigator.current_path() != self.config.login_path {
                self.navigator.navigate(&self.config.login_path);
            }
            return SessionState::Unauthenticated;
        }

        match self.get::<SessionUser>("/auth/me").await {
            Ok(user) => {
                self.session().set_user(user.clone());
                self.view.set_user_name(&user.name);
                self.view.apply_permissions(&user.permissions);
                info!(user = %user.name, "session verified");
                SessionState::Authenticated(user)
            }
            Err(err) => {
                warn!(error = %err, "session rejected; purging credential");
                self.purge();
                self.navigator.navigate(&self.config.login_path);
                SessionState::Unauthenticated
            }
        }
    }

    /// Idempotent: always purges and redirects, signed in or not.
    pub fn logout(&self) {
        self.purge();
        info!("signed out");
        self.navigator.navigate(&self.config.login_path);
    }

    fn purge(&self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %format!("{err:#}"), "failed to clear stored credential");
        }
        self.session().clear();
    }

    pub async fn dispatch(&self, action_name: &str, target: &ActionTarget) -> Option<Action> {
        self.registry().dispatch(self, action_name, target).await
    }

    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, RequestError> {
        let credential = self.credential();
        self.transport
            .send(path, options, credential.as_deref())
            .await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let value = self.request(path, RequestOptions::get()).await?;
        decode(value)
    }

    pub async fn inventory_movements(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<InventoryMovement>, RequestError> {
        self.get(&format!("/inventory/movements/{product_id}")).await
    }

    pub fn credential(&self) -> Option<String> {
        self.session().credential().map(str::to_string)
    }

    pub fn session_user(&self) -> Option<SessionUser> {
        self.session().user().cloned()
    }

    pub fn session_state(&self) -> SessionState {
        self.session().state()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn view(&self) -> &dyn ViewSurface {
        self.view.as_ref()
    }

    pub fn formatting(&self) -> Formatting {
        Formatting::new(self.config.currency_symbol.clone())
    }

    fn session(&self) -> MutexGuard<'_, SessionContext> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, RequestError> {
    serde_json::from_value(value)
        .map_err(|err| RequestError::new(format!("unexpected response shape: {err}")))
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
