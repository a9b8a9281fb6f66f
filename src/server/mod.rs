//! Server module for building the payment HTTP server
//!
//! `ServerBuilder` wires a store and configuration into a `ServerHost`,
//! then exposes it over REST.

pub mod builder;
pub mod exposure;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use handlers::AppState;
pub use host::ServerHost;
