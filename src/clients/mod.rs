//! Transport layer for identity service communication.
//!
//! - [`Transport`]: the send-one-request capability every manager relies on
//! - [`HttpClient`]: the reqwest-backed [`Transport`]
//! - [`HttpRequest`] / [`HttpRequestBuilder`]: a request to send
//! - [`HttpResponse`]: a parsed response
//! - [`HttpMethod`], [`DataType`]: request verbs and body content types
//! - [`HttpError`]: everything a transport can fail with
//!
//! # Endpoints
//!
//! Each request carries a `management` flag. Administrative requests go to
//! the management URL; self-service requests (such as changing one's own
//! password) go to the public URL.
//!
//! # Retry Behavior
//!
//! None. A failed request is returned to the caller unchanged.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, REQUEST_ID_HEADER};
pub use transport::Transport;
