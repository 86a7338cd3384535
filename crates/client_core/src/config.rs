pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "R$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub server_url: String,
    pub api_prefix: String,
    pub login_path: String,
    pub landing_path: String,
    pub currency_symbol: String,
}

impl GatewayConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    /// Absolute URL prefix every API path is appended to.
    pub fn api_base(&self) -> String {
        let server = self.server_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            server.to_string()
        } else {
            format!("{server}/{prefix}")
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            api_prefix: DEFAULT_API_PREFIX.into(),
            login_path: DEFAULT_LOGIN_PATH.into(),
            landing_path: DEFAULT_LANDING_PATH.into(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.into(),
        }
    }
}
