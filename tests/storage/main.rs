//! Integration tests for Layer 1: Storage
//!
//! Tests for attached data, owned collections, vertex queries and identifier
//! mapping tables.

mod mapping;
