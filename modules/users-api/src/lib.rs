// === PUBLIC CONTRACT ===
// Only the contract module should be public for other crates to consume
pub mod contract;

// Re-export the public contract components
pub use contract::{error, model};

// === INTERNAL MODULES ===
// Exposed for binary wiring and comprehensive testing; external consumers
// should stick to the `contract` module.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
