//! Task management.
//!
//! This module owns the single persisted entity of the service: creating
//! tasks, applying partial updates, completing them, and deleting them. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
