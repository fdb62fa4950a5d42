//! Login, logout and the lazily-established session.
//!
//! The server authenticates with a session cookie. The cookie jar on the
//! shared `reqwest::Client` carries it automatically once set; this module
//! owns *when* the login call happens (explicitly, or lazily before the
//! first substantive request) and keeps a parsed snapshot of the session
//! for callers that want to inspect it.

use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::errors::{AuthError, Error, RequestError, Result};
use crate::params::Params;
use crate::resources::users::User;
use crate::util::check_http_status;
use crate::ReefClient;

/// Name of the session cookie the server sets on a successful login.
const SESSION_COOKIE: &str = "reef_session";

/// A snapshot of an established session: the authenticated user and the
/// session cookie captured from the login response.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    user: User,
    cookie_name: String,
    cookie_value: String,
}

impl SessionInfo {
    /// The user this session belongs to.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The opaque session identifier (the cookie value).
    pub fn session_id(&self) -> &str {
        &self.cookie_value
    }

    /// The name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }
}

/// Both the login and the session-introspection endpoint wrap the user in
/// the same envelope.
#[derive(Debug, Deserialize)]
struct SessionEnvelope {
    user: User,
}

impl ReefClient {
    /// Log in with the configured credentials and remember the session.
    ///
    /// Wrappers call this implicitly before the first request that needs a
    /// session; calling it explicitly is only useful to fail fast on bad
    /// credentials or to re-login after [`ReefClient::logout`].
    pub async fn login(&self) -> Result<SessionInfo> {
        let info = self.perform_login().await?;
        *self.session.write().await = Some(info.clone());
        Ok(info)
    }

    /// Establish a session if credentials are configured and none exists yet.
    ///
    /// Exactly one login call happens per context; concurrent first calls
    /// wait on the write lock and find the session already populated.
    pub(crate) async fn ensure_session(&self) -> Result<()> {
        if self.credentials.is_none() {
            // Anonymous context; the server decides what answers.
            return Ok(());
        }
        if self.session.read().await.is_some() {
            return Ok(());
        }

        let mut slot = self.session.write().await;
        if slot.is_none() {
            // `ensure_session` -> `perform_login` -> `send` -> `ensure_session`
            // is a recursive async cycle; boxing this edge gives the future a
            // known size (E0733).
            *slot = Some(Box::pin(self.perform_login()).await?);
        }
        Ok(())
    }

    async fn perform_login(&self) -> Result<SessionInfo> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(AuthError::MissingCredentials)?;

        tracing::debug!(username = %credentials.username, "logging in");

        let params = Params::new()
            .set("username", &credentials.username)
            .set("password", &credentials.password);
        let response = self
            .send(Method::POST, "api/auth/login", params, false)
            .await?;

        // Snapshot Set-Cookie values before consuming the body.
        let mut raw_set_cookies = Vec::new();
        for val in response
            .headers()
            .get_all(reqwest::header::SET_COOKIE)
            .iter()
        {
            if let Ok(raw) = std::str::from_utf8(val.as_bytes()) {
                raw_set_cookies.push(raw.to_owned());
            }
        }

        let bytes = response.bytes().await.map_err(RequestError::from)?;
        let envelope: SessionEnvelope =
            serde_json::from_slice(&bytes).map_err(|e| RequestError::DecodeJson {
                message: format!("login response: {e}"),
            })?;

        let cookie = raw_set_cookies
            .iter()
            .filter_map(|raw| cookie::Cookie::parse(raw.clone()).ok())
            .find(|c| c.name() == SESSION_COOKIE)
            .ok_or(AuthError::MissingSessionCookie)?;

        tracing::info!(username = %envelope.user.username, "session established");

        Ok(SessionInfo {
            user: envelope.user,
            cookie_name: cookie.name().to_string(),
            cookie_value: cookie.value().to_string(),
        })
    }

    /// End the session server-side and forget it locally.
    ///
    /// A server answer of 401 counts as success: the session was already
    /// gone.
    pub async fn logout(&self) -> Result<()> {
        let result = self
            .send(Method::POST, "api/auth/logout", Params::new(), false)
            .await;
        match result {
            Ok(_) => {}
            Err(Error::Request(RequestError::Server { status, .. }))
                if status == StatusCode::UNAUTHORIZED => {}
            Err(e) => return Err(e),
        }
        *self.session.write().await = None;
        Ok(())
    }

    /// Fetch the user behind the current session.
    ///
    /// Triggers the lazy login if needed.
    pub async fn current_user(&self) -> Result<User> {
        let envelope: SessionEnvelope = self
            .call_json(Method::GET, "api/auth/session", Params::new())
            .await?;
        Ok(envelope.user)
    }

    /// Round-trip the session with the server to verify it's still valid.
    ///
    /// Returns:
    /// - `Ok(true)` if the server recognizes the session.
    /// - `Ok(false)` if it does not (expired or never established).
    /// - `Err(_)` for transport or server errors unrelated to validity.
    ///
    /// This does *not* trigger the lazy login.
    pub async fn validate_session(&self) -> Result<bool> {
        let response = self
            .request(Method::GET, "api/auth/session")?
            .send()
            .await
            .map_err(RequestError::from)?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::NOT_FOUND => Ok(false),
            _ => {
                check_http_status(response).await?;
                Ok(true)
            }
        }
    }

    /// A snapshot of the established session, if any.
    pub async fn session(&self) -> Option<SessionInfo> {
        self.session.read().await.clone()
    }
}
