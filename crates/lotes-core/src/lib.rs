//! # lotes-core
//!
//! Core types, area ledger, and error types for the parcel registry.
//!
//! This crate provides the foundational types shared across all crates:
//! - `Area`, a fixed-point square-metre quantity
//! - Entity structs for parcels, construction records, area audits, access logs, users
//! - The pure Area Ledger planner (construction/demolition deltas, direct edits)
//! - CPF check-digit validation and masking helpers
//! - ID prefix constants
//! - Cross-cutting error taxonomy
//! - Session context and role-gated routing
//! - Response payloads returned by the service and CLI

pub mod area;
pub mod cpf;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod ledger;
pub mod navigation;
pub mod responses;
