//! Core domain types and pricing logic.

pub mod ticker;
pub mod trade;
pub mod instrument;
pub mod exchange;
pub mod summary;
pub mod roster;
pub mod error;
