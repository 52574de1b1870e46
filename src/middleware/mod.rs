//! Middleware module
//!
//! Client identity derivation and request logging

pub mod identity;
pub mod logging;

pub use identity::client_identity;
