//! The transport seam between managers and the network.

use crate::clients::{HttpError, HttpRequest, HttpResponse};

/// Sends one request and returns the parsed response.
///
/// Implementations must fail with [`HttpError`] on network failure, on a
/// malformed body, and on any non-2xx status. Managers never retry, so any
/// retry or timeout policy belongs to the implementation.
///
/// [`HttpClient`](crate::clients::HttpClient) is the production
/// implementation. Tests can supply an in-memory transport.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends `request` and waits for the response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).send(request).await
    }
}
