//! Tessera - Stable identities, attached data and exchange-format numbering
//!
//! This crate re-exports all layers of the Tessera system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: tessera_export      — Identifier allocation, fixity codes, list definitions
//! Layer 1: tessera_storage     — Attached data, owned collections, mapping tables
//! Layer 0: tessera_foundation  — Core types (Identity, Category, Error)
//! ```

pub use tessera_export as export;
pub use tessera_foundation as foundation;
pub use tessera_storage as storage;
