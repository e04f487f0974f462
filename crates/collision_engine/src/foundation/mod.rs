//! Foundation utilities
//!
//! Low-level building blocks shared by the rest of the engine: math type
//! aliases and logging setup.

pub mod logging;
pub mod math;
