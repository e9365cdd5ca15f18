//! Movie validation engine.
//!
//! Per-field rule objects, the two deployment policies built from them, and a
//! bridge to the `validator` crate. Pure logic, no I/O.

pub mod compat;
pub mod policy;
pub mod rules;
