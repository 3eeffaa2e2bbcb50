//! Client configuration

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the record endpoint
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Endpoint URL (the deployed web app address)
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// User-Agent header value
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("sheet-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Create a client from this configuration
    pub fn build_client(&self) -> crate::ClientResult<super::SheetClient> {
        super::SheetClient::new(self)
    }
}
