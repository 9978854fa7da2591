//! Authentication state for identity service calls.
//!
//! The library never obtains tokens itself. Callers hand it a [`Session`]
//! describing an already-authenticated principal, and every request made
//! through a client built from that session carries its token.

pub mod session;

pub use session::Session;
