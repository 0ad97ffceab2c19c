//! Step definitions for task HTTP API scenarios.

pub mod given;
pub mod then;
