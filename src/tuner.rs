//! Band and Frequency Control Logic
//!
//! State and business logic for the VFO: the per-band tuning table,
//! the command/tune transitions, and the persistence policy.

pub mod state;
pub mod store;
