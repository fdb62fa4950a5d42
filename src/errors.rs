//! Unified error types for the `reef-client` crate.
//!
//! This module centralizes all failures that can occur while using the SDK
//! and provides a single top-level [`Error`] enum plus the convenient
//! [`Result`] alias. Errors from lower layers (`reqwest`, URL parsing) are
//! mapped into structured variants so callers can handle them precisely.

use thiserror::Error;

// --- Build-Time Error ---

/// Errors that can occur while building a [`crate::ReefClient`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// No base URL was supplied to the builder.
    #[error("A base URL is required to build the client")]
    MissingBaseUrl,

    /// The supplied base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// An extra default header had an invalid name or value.
    #[error("Invalid default header `{name}`: {message}")]
    Header {
        /// The offending header name.
        name: String,
        /// What was wrong with it.
        message: String,
    },

    /// Failed to build the HTTP client (reqwest configuration).
    #[error("Failed to build the HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

// --- The Main Operational Error Enum ---

/// The crate's top-level error type.
///
/// It groups failures into high-level categories:
/// - [`Error::Request`] — HTTP transport/server/validation issues
/// - [`Error::Parse`] — URL parsing failures
/// - [`Error::Authentication`] — credential and session issues
/// - [`Error::Build`] — construction of the client failed
///
/// Most lower-level errors automatically convert into this enum via `From`.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request/response failed (transport, server, validation, JSON).
    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// URL parsing failed while preparing a request or path.
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] url::ParseError),

    /// Authentication failed (missing credentials, rejected login, session).
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthError),

    /// Building the client failed (reqwest or URL configuration).
    #[error("Client build failed: {0}")]
    Build(#[from] BuildError),
}

// --- Consolidated Authentication Error ---

/// Errors originating from the login flow and session handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A call required a session but the context has no credentials.
    #[error("No credentials configured on this client")]
    MissingCredentials,

    /// The login response did not carry the expected session cookie.
    #[error("Login response did not set a session cookie")]
    MissingSessionCookie,

    /// Caller or input validation error in an auth flow.
    #[error("General authentication error: {0}")]
    Validation(String),
}

// --- Consolidated Request Error ---

/// Transport and server-side HTTP errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network/protocol failure from reqwest (timeouts, TLS, I/O, etc.).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a non-success status. Includes status and body message.
    #[error("Server responded with an error: {status} - {message}")]
    Server {
        /// The HTTP status code returned by the server.
        status: reqwest::StatusCode,
        /// The server's error message (JSON envelope if present, raw body otherwise).
        message: String,
    },

    /// Caller supplied an invalid path/parameter/file for this API.
    #[error("Invalid request: {message}")]
    Validation {
        /// Human-readable explanation of what was invalid.
        message: String,
    },

    /// JSON decoding failed when parsing a server response.
    #[error("JSON decode error: {message}")]
    DecodeJson {
        /// Error message from the JSON deserializer.
        message: String,
    },
}

/// A specialized `Result` type for `reef-client` operations.
pub type Result<T> = std::result::Result<T, Error>;

// Ergonomic "Staircase" From Implementations ---
// A macro to reduce boilerplate for converting base errors into the top-level Error.
macro_rules! impl_from_for_error {
    ($from_type:ty, $to_variant:path) => {
        impl From<$from_type> for Error {
            fn from(err: $from_type) -> Self {
                $to_variant(err.into())
            }
        }
    };
}

// Request Errors
impl_from_for_error!(reqwest::Error, Error::Request);
