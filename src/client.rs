//! The shared client context handed to every manager.

use crate::auth::Session;
use crate::clients::{HttpClient, HttpError, Transport};
use crate::config::ClientConfig;
use crate::rest::resources::{AttestationManager, RoleManager};
use crate::rest::{Manager, ResourceId};

/// Entry point of the crate: a transport plus the current user id.
///
/// Managers borrow the client, so one client can serve any number of
/// concurrent calls. The user id is only consulted by self-service
/// operations such as
/// [`update_own_password`](crate::rest::resources::AttestationManager::update_own_password).
///
/// # Example
///
/// ```rust,ignore
/// use attestation_client::{AuthToken, ClientConfig, EndpointUrl, IdentityClient, Session};
///
/// let config = ClientConfig::builder()
///     .management_url(EndpointUrl::new("https://identity.example.com:35357/v2.0")?)
///     .public_url(EndpointUrl::new("https://identity.example.com:5000/v2.0")?)
///     .build()?;
/// let session = Session::new(Some(AuthToken::new("token")?), Some("u-1".into()), None);
///
/// let client = IdentityClient::new(&session, &config)?;
/// let key = client.attestations().get("k-1").await?;
/// ```
#[derive(Debug)]
pub struct IdentityClient<T = HttpClient> {
    transport: T,
    user_id: Option<ResourceId>,
}

impl IdentityClient<HttpClient> {
    /// Creates a client that talks HTTP on behalf of `session`.
    ///
    /// An expired session is accepted; the service will reject its token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the HTTP client cannot be built.
    pub fn new(session: &Session, config: &ClientConfig) -> Result<Self, HttpError> {
        if session.expired() {
            tracing::warn!(
                user_id = ?session.user_id,
                expires = ?session.expires,
                "Creating identity client from an expired session"
            );
        }

        let transport = HttpClient::new(session, config)?;
        Ok(Self {
            transport,
            user_id: session.user_id.clone(),
        })
    }
}

impl<T: Transport> IdentityClient<T> {
    /// Creates a client over any transport.
    #[must_use]
    pub const fn with_transport(transport: T, user_id: Option<ResourceId>) -> Self {
        Self { transport, user_id }
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the authenticated principal, if known.
    #[must_use]
    pub const fn user_id(&self) -> Option<&ResourceId> {
        self.user_id.as_ref()
    }

    /// Attestation keys and accounts.
    #[must_use]
    pub const fn attestations(&self) -> AttestationManager<'_, T> {
        Manager::new(self)
    }

    /// Roles and role grants.
    #[must_use]
    pub const fn roles(&self) -> RoleManager<'_, T> {
        Manager::new(self)
    }
}

// Verify IdentityClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IdentityClient>();
};
