//! The shared request-dispatch core.
//!
//! Every wrapper funnels through [`ReefClient::send`]: it establishes the
//! session lazily, resolves the path, serializes the parameter bag
//! (query string for reads, form-encoded or multipart body for writes),
//! applies the context's header overrides, and classifies the outcome.

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;

use crate::errors::{RequestError, Result};
use crate::params::Params;
use crate::util::check_http_status;
use crate::ReefClient;

impl ReefClient {
    /// Dispatch a request and return the status-checked response.
    ///
    /// `lazy_auth` is false only for the auth endpoints themselves (login
    /// must not recurse; logout must not log back in).
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        params: Params,
        lazy_auth: bool,
    ) -> Result<Response> {
        if lazy_auth {
            self.ensure_session().await?;
        }

        let url = self.resolve(path)?;
        let mut rb = self.http.request(method.clone(), url.clone());

        let multipart = params.has_file();
        match method {
            Method::GET | Method::HEAD | Method::DELETE => {
                if !params.is_empty() {
                    rb = rb.query(&params.text_pairs()?);
                }
            }
            _ => {
                rb = if multipart {
                    rb.multipart(params.into_multipart()?)
                } else {
                    rb.form(&params.text_pairs()?)
                };
            }
        }
        rb = self.apply_overrides(rb);

        tracing::debug!(%method, %url, multipart, "dispatching request");

        let response = rb.send().await.map_err(RequestError::from)?;
        check_http_status(response).await
    }

    /// Generic call for endpoints without a typed wrapper.
    ///
    /// Returns the parsed JSON body; a non-JSON body comes back as a JSON
    /// string, an empty body as `null`.
    ///
    /// # Example
    /// ```no_run
    /// # use reef_client::{Method, Params, ReefClient, Result};
    /// # async fn ex(client: &ReefClient) -> Result<()> {
    /// let info = client
    ///     .call(Method::GET, "api/system/info", Params::new())
    ///     .await?;
    /// println!("{}", info["version"]);
    /// # Ok(()) }
    /// ```
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<serde_json::Value> {
        let response = self.send(method, path, params, true).await?;
        let bytes = response.bytes().await.map_err(RequestError::from)?;
        if bytes.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }))
    }

    /// Dispatch and deserialize the JSON response into `T`.
    pub(crate) async fn call_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<T> {
        let response = self.send(method, path, params, true).await?;
        let bytes = response.bytes().await.map_err(RequestError::from)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| {
                RequestError::DecodeJson {
                    message: format!("{path}: {e}"),
                }
                .into()
            })
    }

    /// Dispatch and ignore the response body (deletes and toggles).
    pub(crate) async fn call_unit(&self, method: Method, path: &str, params: Params) -> Result<()> {
        self.send(method, path, params, true).await?;
        Ok(())
    }

    /// Dispatch and return the raw response body.
    pub(crate) async fn call_bytes(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<Bytes> {
        let response = self.send(method, path, params, true).await?;
        Ok(response.bytes().await.map_err(RequestError::from)?)
    }

    /// Dispatch and return the response body as a byte stream.
    pub(crate) async fn call_stream(
        &self,
        method: Method,
        path: &str,
        params: Params,
    ) -> Result<impl Stream<Item = Result<Bytes>>> {
        let response = self.send(method, path, params, true).await?;
        Ok(response
            .bytes_stream()
            .map_err(|e| crate::Error::from(RequestError::Transport(e))))
    }
}
