//! Error kind enumeration for categorizing client errors.

/// Categorization of client errors.
///
/// Kinds are stable and meant for `match` statements. None of them triggers an
/// automatic retry; the caller decides what to show and whether to try again.
///
/// | ErrorKind         | Origin                                  |
/// |-------------------|-----------------------------------------|
/// | `Transport`       | Request could not be sent or read       |
/// | `Connection`      | DNS, TLS handshake, refused connection  |
/// | `Timeout`         | Client-side timeout elapsed             |
/// | `Backend`         | Envelope carried `success: false`       |
/// | `InvalidArgument` | HTTP 400                                |
/// | `Unauthorized`    | HTTP 401                                |
/// | `Forbidden`       | HTTP 403                                |
/// | `NotFound`        | HTTP 404                                |
/// | `Conflict`        | HTTP 409                                |
/// | `RateLimited`     | HTTP 429                                |
/// | `Internal`        | HTTP 500                                |
/// | `Unavailable`     | HTTP 502-504                            |
/// | `Validation`      | Rejected client-side before any request |
/// | `InvalidResponse` | Body could not be parsed                |
/// | `Configuration`   | Bad URL, missing settings               |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Generic transport failure (request build, send, or body read).
    #[error("transport error")]
    Transport,

    /// Connection error (DNS, TLS handshake, network unreachable).
    #[error("connection error")]
    Connection,

    /// Request timed out.
    ///
    /// Only possible when a timeout was configured on the client.
    #[error("timeout")]
    Timeout,

    /// The backend answered but reported `success: false`.
    ///
    /// The message is the backend-provided one; the backend error code, if
    /// any, is available through [`Error::code`](crate::Error::code).
    #[error("backend error")]
    Backend,

    /// Invalid request argument or payload.
    ///
    /// HTTP: 400 Bad Request
    #[error("invalid argument")]
    InvalidArgument,

    /// Authentication required or session expired.
    ///
    /// HTTP: 401 Unauthorized
    #[error("unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed.
    ///
    /// HTTP: 403 Forbidden
    #[error("forbidden")]
    Forbidden,

    /// Requested entity was not found.
    ///
    /// HTTP: 404 Not Found
    #[error("not found")]
    NotFound,

    /// Conflict with current entity state.
    ///
    /// HTTP: 409 Conflict
    #[error("conflict")]
    Conflict,

    /// Rate limit exceeded.
    ///
    /// HTTP: 429 Too Many Requests
    #[error("rate limited")]
    RateLimited,

    /// Internal server error.
    ///
    /// HTTP: 500 Internal Server Error
    #[error("internal error")]
    Internal,

    /// Service temporarily unavailable.
    ///
    /// HTTP: 502, 503, 504
    #[error("service unavailable")]
    Unavailable,

    /// Input rejected client-side before any network call.
    #[error("validation error")]
    Validation,

    /// Response could not be parsed or violated the envelope contract.
    #[error("invalid response")]
    InvalidResponse,

    /// Configuration error (invalid URL, unusable TLS material).
    #[error("configuration error")]
    Configuration,

    /// Unknown or unexpected error.
    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Returns `true` if the error originated on the network path rather than
    /// from a backend decision.
    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ErrorKind::Transport | ErrorKind::Connection | ErrorKind::Timeout
        )
    }

    /// Returns `true` if the error was raised client-side without a request.
    #[inline]
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            ErrorKind::Validation | ErrorKind::Configuration
        )
    }

    /// Creates an `ErrorKind` from an HTTP status code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::InvalidArgument,
            401 => ErrorKind::Unauthorized,
            403 => ErrorKind::Forbidden,
            404 => ErrorKind::NotFound,
            409 => ErrorKind::Conflict,
            422 => ErrorKind::Backend,
            429 => ErrorKind::RateLimited,
            500 => ErrorKind::Internal,
            502..=504 => ErrorKind::Unavailable,
            _ if (400..500).contains(&status) => ErrorKind::InvalidArgument,
            _ if status >= 500 => ErrorKind::Internal,
            _ => ErrorKind::Unknown,
        }
    }
}
