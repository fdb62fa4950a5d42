use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use tokio::sync::RwLock;
use url::Url;

use crate::errors::{BuildError, RequestError, Result};
use crate::session::SessionInfo;

const DEFAULT_USER_AGENT: &str = concat!("reef-client", "@", env!("CARGO_PKG_VERSION"));

/// Configures a [`ReefClient`] before construction.
///
/// Most code obtains this via [`ReefClient::builder()`], which simply
/// returns `ReefClientBuilder::default()`.
///
/// # Defaults
/// - Request timeout: reqwest default (no global timeout) unless set via
///   [`Self::request_timeout`]
/// - User-agent: `reef-client@<crate-version>` plus any
///   [`Self::user_agent_extra`]
/// - TLS: certificates are verified; see
///   [`Self::danger_accept_invalid_certs`] for dev servers
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// # use reef_client::ReefClient;
/// let client = ReefClient::builder()
///     .base_url("https://reef.example.com/")
///     .credentials("admin", "hunter2")
///     .request_timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok::<_, reef_client::BuildError>(())
/// ```
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ReefClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    accept_invalid_certs: bool,
    host_override: Option<String>,
    referer: Option<String>,
    extra_headers: Vec<(String, String)>,
    request_timeout: Option<Duration>,
    user_agent_extra: Option<String>,
}

impl ReefClientBuilder {
    /// Sets the server's base URL, e.g. `https://reef.example.com/`.
    ///
    /// All wrapper paths are resolved against it. Required.
    pub fn base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the username/password used for the lazy login call.
    ///
    /// Without credentials the client operates anonymously and the server
    /// decides which endpoints answer.
    pub fn credentials(&mut self, username: impl Into<String>, password: impl Into<String>) -> &mut Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Disables TLS certificate verification.
    ///
    /// Only for development servers with self-signed certificates.
    pub fn danger_accept_invalid_certs(&mut self, accept: bool) -> &mut Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Overrides the `Host` header on every request.
    ///
    /// Useful when the server sits behind a proxy that routes on the
    /// original virtual host.
    pub fn host_override(&mut self, host: impl Into<String>) -> &mut Self {
        self.host_override = Some(host.into());
        self
    }

    /// Sets a `Referer` header on every request.
    ///
    /// Some deployments require it for their CSRF checks.
    pub fn referer(&mut self, referer: impl Into<String>) -> &mut Self {
        self.referer = Some(referer.into());
        self
    }

    /// Adds an extra default header sent with every request.
    pub fn extra_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Set HTTP requests timeout.
    pub fn request_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Append an extra user-agent segment after the default
    /// `reef-client@<version>`. Example: `.user_agent_extra("myapp/1.2.3")`
    pub fn user_agent_extra<S: Into<String>>(&mut self, extra: S) -> &mut Self {
        self.user_agent_extra = Some(extra.into());
        self
    }

    /// Build a [`ReefClient`].
    pub fn build(&self) -> std::result::Result<ReefClient, BuildError> {
        let raw = self.base_url.as_deref().ok_or(BuildError::MissingBaseUrl)?;
        let mut base_url = Url::parse(raw)?;
        // Path joining requires a trailing slash, otherwise the last
        // segment of the base path is dropped by Url::join.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &self.extra_headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| BuildError::Header {
                    name: name.clone(),
                    message: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| BuildError::Header {
                name: name.clone(),
                message: e.to_string(),
            })?;
            headers.append(header_name, header_value);
        }

        // Compose user agent with optional extra part.
        let user_agent = match &self.user_agent_extra {
            Some(extra) if !extra.trim().is_empty() => {
                format!("{DEFAULT_USER_AGENT} {}", extra.trim())
            }
            _ => DEFAULT_USER_AGENT.to_string(),
        };

        let mut http_builder = reqwest::Client::builder()
            .user_agent(user_agent)
            .cookie_store(true)
            .default_headers(headers);

        if self.accept_invalid_certs {
            http_builder = http_builder.danger_accept_invalid_certs(true);
        }
        if let Some(timeout) = self.request_timeout {
            http_builder = http_builder.timeout(timeout);
        }

        let credentials = match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        };

        Ok(ReefClient {
            http: http_builder.build()?,
            base_url,
            credentials,
            host_override: self.host_override.clone(),
            referer: self.referer.clone(),
            session: Arc::new(RwLock::new(None)),
        })
    }
}

/// Username/password pair for the login endpoint.
#[derive(Clone)]
pub(crate) struct Credentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The request context every wrapper call runs through.
///
/// A `ReefClient` bundles the base host URL, optional credentials, the
/// authentication cookie jar, the TLS strictness flag, and the per-context
/// header overrides (`Host`, `Referer`, extra headers). It is cheap to
/// clone and thread-safe: clones share the underlying `reqwest::Client`
/// (and thus the cookie jar) and the lazily-established session.
///
/// ### What it does
/// - Resolves wrapper paths against the base URL.
/// - Logs in lazily: the first call that needs a session performs the login
///   exactly once and fills the cookie jar; concurrent first calls wait.
/// - Serializes parameter bags (query string for reads, form-encoded or
///   multipart body for writes).
/// - Classifies HTTP outcomes into [`crate::RequestError`] variants.
///
/// ### What it *doesn't* do
/// - No retries, no caching, no connection-pool tuning beyond reqwest's own.
///
/// ### Construction
/// Use [`ReefClient::builder()`]; a base URL is required.
#[derive(Clone, Debug)]
pub struct ReefClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) host_override: Option<String>,
    pub(crate) referer: Option<String>,
    pub(crate) session: Arc<RwLock<Option<SessionInfo>>>,
}

impl ReefClient {
    /// Returns a builder to edit settings before creating [`ReefClient`].
    pub fn builder() -> ReefClientBuilder {
        ReefClientBuilder::default()
    }

    /// The base URL this context resolves paths against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a wrapper path (e.g. `api/users/42`) against the base URL.
    ///
    /// Rejects paths that escape the base, including absolute URLs.
    pub(crate) fn resolve(&self, path: &str) -> Result<Url> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        if !url.as_str().starts_with(self.base_url.as_str()) {
            return Err(RequestError::Validation {
                message: format!("path `{path}` escapes the base URL"),
            }
            .into());
        }
        Ok(url)
    }

    /// Start a raw request for an endpoint the SDK does not wrap.
    ///
    /// The context's header overrides are applied; lazy login is **not**
    /// triggered. Whatever session cookie the jar holds rides along.
    ///
    /// # Example
    /// ```no_run
    /// # use reef_client::{Method, ReefClient, Result};
    /// # async fn ex(client: &ReefClient) -> Result<()> {
    /// let resp = client
    ///     .request(Method::GET, "api/system/info")?
    ///     .send()
    ///     .await?;
    /// # Ok(()) }
    /// ```
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.resolve(path)?;
        Ok(self.apply_overrides(self.http.request(method, url)))
    }

    /// Attach the per-context `Host` and `Referer` overrides.
    pub(crate) fn apply_overrides(&self, mut rb: RequestBuilder) -> RequestBuilder {
        if let Some(host) = &self.host_override {
            rb = rb.header(reqwest::header::HOST, host);
        }
        if let Some(referer) = &self.referer {
            rb = rb.header(reqwest::header::REFERER, referer);
        }
        rb
    }
}
