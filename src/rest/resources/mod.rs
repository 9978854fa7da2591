//! Resource kinds exposed by the identity service.
//!
//! Each kind is a marker type implementing
//! [`ResourceKind`](crate::rest::ResourceKind) plus an inherent impl on
//! [`Manager`](crate::rest::Manager) for its kind-specific operations.
//!
//! - [`attestation`]: host key records and the accounts they belong to
//! - [`role`]: role definitions and per-account grants
//!
//! # Example
//!
//! ```rust,ignore
//! use attestation_client::rest::resources::ListParams;
//!
//! for user in client.attestations().list(&ListParams::new().tenant("t-1")).await? {
//!     let roles = client.roles().roles_for_user(&user, None).await?;
//!     println!("{user}: {} roles", roles.len());
//! }
//! ```

pub mod attestation;
pub mod role;

pub use attestation::{
    Attestation, AttestationKind, AttestationManager, AttestationQuery, AttestationUpdate,
    ListParams, NewAttestation, ValidationRequest,
};
pub use role::{Role, RoleKind, RoleManager};
