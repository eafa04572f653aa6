use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_COLLECT_URL: &str = "https://www.google-analytics.com/collect";

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub url: String,
    pub enabled: bool,
    pub user_agent: Option<String>,
    pub proxy: Option<Proxy>,
    /// When true, the default request is enriched from the host environment
    /// (locale, encoding, screen) at client construction.
    pub derive_system_properties: bool,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_COLLECT_URL.to_string(),
            enabled: true,
            user_agent: None,
            proxy: None,
            derive_system_properties: true,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_proxy(mut self, proxy: Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_derive_system_properties(mut self, derive: bool) -> Self {
        self.derive_system_properties = derive;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Outbound HTTP proxy, applied when the client is constructed.
#[derive(Debug, Clone, Serialize)]
pub struct Proxy {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Proxy {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

/// What came back from the collector. The default value (status code 0,
/// empty body) means the hit was never sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    pub fn is_sent(&self) -> bool {
        self.status_code != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_production_collector() {
        let config = Config::default();
        assert_eq!(config.url, DEFAULT_COLLECT_URL);
        assert!(config.enabled);
        assert!(config.derive_system_properties);
        assert!(config.user_agent.is_none());
        assert!(config.proxy.is_none());
    }

    #[test]
    fn default_response_is_unsent() {
        let response = Response::default();
        assert_eq!(response.status_code, 0);
        assert!(response.body.is_empty());
        assert!(!response.is_sent());
    }

    #[test]
    fn proxy_credentials_are_optional() {
        let proxy = Proxy::new("proxy.internal", 3128);
        assert!(proxy.username.is_none());

        let proxy = proxy.with_credentials("svc", "hunter2");
        assert_eq!(proxy.username.as_deref(), Some("svc"));
        assert_eq!(proxy.password.as_deref(), Some("hunter2"));
    }
}
