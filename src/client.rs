use std::sync::{Arc, RwLock};

use reqwest::blocking::Client as HttpClient;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::GoogleAnalyticsError;
use crate::executor::{Executor, ResponseHandle};
use crate::parameter::Parameter;
use crate::request::Request;
use crate::system;
use crate::types::{Config, Response};
use crate::utils::send_request;

/// Client for delivering hits to a collection endpoint. Delivery is
/// best-effort by contract: a failed or skipped send surfaces as the unset
/// [`Response`], never as an error.
#[derive(Clone)]
pub struct GoogleAnalytics {
    inner: Arc<Inner>,
    executor: Arc<Executor>,
}

struct Inner {
    config: Config,
    default_request: RwLock<Request>,
    http: Option<HttpClient>,
}

impl GoogleAnalytics {
    pub fn new(tracking_id: &str) -> Self {
        Self::with_config(Config::default(), Request::for_app(tracking_id, "", ""))
    }

    pub fn for_app(tracking_id: &str, app_name: &str, app_version: &str) -> Self {
        Self::with_config(
            Config::default(),
            Request::for_app(tracking_id, app_name, app_version),
        )
    }

    pub fn with_config(config: Config, default_request: Request) -> Self {
        Self::with_executor(config, default_request, Executor::new())
    }

    /// Full-control constructor: the executor runs every queued [`post`]
    /// and is owned by this client.
    ///
    /// [`post`]: GoogleAnalytics::post
    pub fn with_executor(config: Config, mut default_request: Request, executor: Executor) -> Self {
        if config.derive_system_properties {
            system::populate_system_parameters(&mut default_request);
        }
        if default_request.get(Parameter::ClientId).is_none() {
            default_request.set(Parameter::ClientId, Uuid::new_v4().to_string());
        }
        if default_request.get(Parameter::ProtocolVersion).is_none() {
            default_request.set(Parameter::ProtocolVersion, "1");
        }

        info!(url = %config.url, enabled = config.enabled, "initializing analytics client");

        let http = match build_http_client(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "failed to build HTTP client, hits will not be delivered");
                None
            }
        };

        Self {
            inner: Arc::new(Inner {
                config,
                default_request: RwLock::new(default_request),
                http,
            }),
            executor: Arc::new(executor),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn default_request(&self) -> Request {
        self.inner
            .default_request
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replaces the fallback parameter set as a whole. Sends already in
    /// flight keep the snapshot they merged against.
    pub fn set_default_request(&self, request: Request) {
        *self
            .inner
            .default_request
            .write()
            .unwrap_or_else(|e| e.into_inner()) = request;
    }

    /// Delivers one hit, blocking for the HTTP round trip. Fields the
    /// request leaves unset are filled from the default request. Returns
    /// the unset [`Response`] when the client is disabled or delivery
    /// fails; the failure is logged, never raised.
    pub fn send(&self, request: &Request) -> Response {
        self.inner.send(request)
    }

    /// Queues one hit for delivery on the dispatch worker and returns
    /// immediately. Hits are sent one at a time in submission order. When
    /// the client is disabled or already closed, the returned handle
    /// resolves at once to the unset [`Response`].
    pub fn post(&self, request: Request) -> ResponseHandle {
        if !self.inner.config.enabled {
            return ResponseHandle::ready(Response::default());
        }

        let inner = self.inner.clone();
        self.executor
            .submit(Box::new(move || inner.send(&request)))
            .unwrap_or_else(|| ResponseHandle::ready(Response::default()))
    }

    /// Shuts down the dispatch worker: queued hits are dropped, an
    /// in-flight one finishes. Later [`post`] calls resolve to the unset
    /// [`Response`]; [`send`] keeps working.
    ///
    /// [`post`]: GoogleAnalytics::post
    /// [`send`]: GoogleAnalytics::send
    pub fn close(&self) {
        self.executor.shutdown();
    }
}

impl Inner {
    fn send(&self, request: &Request) -> Response {
        if !self.config.enabled {
            return Response::default();
        }
        let Some(http) = &self.http else {
            return Response::default();
        };

        let defaults = self
            .default_request
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let params = request.merged_with(&defaults).form_pairs();

        match send_request(http, &self.config.url, &params) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, request = ?request, "failed to deliver analytics hit");
                Response::default()
            }
        }
    }
}

fn build_http_client(config: &Config) -> Result<HttpClient, GoogleAnalyticsError> {
    let mut builder = HttpClient::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout);

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }

    if let Some(proxy) = &config.proxy {
        let mut http_proxy = reqwest::Proxy::all(format!("http://{}:{}", proxy.host, proxy.port))
            .map_err(GoogleAnalyticsError::ClientBuild)?;
        if let Some(username) = &proxy.username {
            http_proxy = http_proxy.basic_auth(username, proxy.password.as_deref().unwrap_or(""));
        }
        builder = builder.proxy(http_proxy);
    }

    builder.build().map_err(GoogleAnalyticsError::ClientBuild)
}
