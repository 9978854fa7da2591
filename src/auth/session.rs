//! Session state for authenticated identity service calls.
//!
//! This module provides the [`Session`] type, the explicit context that
//! replaces any ambient "current user" lookup.

use crate::config::AuthToken;
use crate::rest::ResourceId;
use chrono::{DateTime, Utc};

/// An authenticated principal on whose behalf requests are made.
///
/// `user_id` identifies the current user for self-service operations such
/// as changing one's own password.
///
/// # Example
///
/// ```rust
/// use attestation_client::{AuthToken, Session};
///
/// let session = Session::new(
///     Some(AuthToken::new("gAAAAABk-token").unwrap()),
///     Some("u-1001".into()),
///     None,
/// );
///
/// assert!(session.is_active());
/// assert!(!session.expired());
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    /// The token sent as `X-Auth-Token`, if any.
    pub token: Option<AuthToken>,

    /// The authenticated user.
    pub user_id: Option<ResourceId>,

    /// The tenant the token is scoped to, if applicable.
    pub tenant_id: Option<ResourceId>,

    /// When the token expires, if known.
    pub expires: Option<DateTime<Utc>>,
}

impl Session {
    /// Creates a new unscoped session.
    #[must_use]
    pub const fn new(
        token: Option<AuthToken>,
        user_id: Option<ResourceId>,
        expires: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            token,
            user_id,
            tenant_id: None,
            expires,
        }
    }

    /// Returns this session scoped to the given tenant.
    #[must_use]
    pub fn with_tenant(mut self, tenant_id: impl Into<ResourceId>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Returns `true` if this session has expired.
    ///
    /// Sessions without an expiration time never expire.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires.is_some_and(|expires| Utc::now() > expires)
    }

    /// Returns `true` if this session has a token and has not expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.token.is_some() && !self.expired()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token() -> Option<AuthToken> {
        Some(AuthToken::new("token").unwrap())
    }

    #[test]
    fn test_session_expired() {
        let expired = Session::new(token(), None, Some(Utc::now() - Duration::hours(1)));
        assert!(expired.expired());

        let valid = Session::new(token(), None, Some(Utc::now() + Duration::hours(1)));
        assert!(!valid.expired());

        let no_expiry = Session::new(token(), None, None);
        assert!(!no_expiry.expired());
    }

    #[test]
    fn test_session_is_active() {
        assert!(Session::new(token(), None, None).is_active());
        assert!(!Session::new(None, None, None).is_active());

        let expired = Session::new(token(), None, Some(Utc::now() - Duration::hours(1)));
        assert!(!expired.is_active());
    }

    #[test]
    fn test_with_tenant_scopes_session() {
        let session = Session::new(token(), Some("u-1".into()), None).with_tenant("t-9");
        assert_eq!(session.tenant_id, Some(ResourceId::from("t-9")));
        assert_eq!(session.user_id, Some(ResourceId::from("u-1")));
    }

    #[test]
    fn test_session_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Session>();
    }
}
