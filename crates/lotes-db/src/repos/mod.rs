//! Repository modules implementing the registry's operations.
//!
//! Each module adds methods to `LotesService` via `impl LotesService` blocks.

pub mod access_log;
pub mod area_audit;
pub mod construction;
pub mod ledger;
pub mod parcel;
pub mod stats;
pub mod user;
