pub mod actions;
pub mod config;
pub mod error;
mod gateway;
pub mod navigation;
pub mod render;
pub mod session;
pub mod storage;
pub mod transport;
pub mod view;

pub use actions::{Action, ActionHandler, ActionRegistry, ActionTarget};
pub use config::GatewayConfig;
pub use error::{GatewayError, RenderError, RequestError, DEFAULT_ERROR_MESSAGE};
pub use gateway::SessionGateway;
pub use navigation::{MemoryNavigator, Navigator};
pub use session::{SessionContext, SessionState};
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore, TOKEN_KEY};
pub use transport::RequestOptions;
pub use view::{MemoryView, ViewSurface};
