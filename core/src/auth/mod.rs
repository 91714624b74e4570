// vitrine/src/auth/mod.rs

//! Owner access: password verification and time-bounded sessions.
//!
//! This is a convenience gate for a single site owner, not a security
//! boundary. Callers check [`OwnerSession::is_active`] and pass the outcome to
//! the catalog's mutation entry points as an explicit `authorized` flag.

pub mod password;
pub mod session;

pub use password::{hash_password, verify_password};
pub use session::{OwnerGate, OwnerSession, SessionBook};
