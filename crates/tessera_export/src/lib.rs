//! Exchange-format identifier allocation for Tessera.
//!
//! This crate provides:
//! - [`IdAllocator`] - Per-category numbering with ancestor fallback and stable sub-component ids
//! - [`AllocatorConfig`] - Registered categories, start value and identifier-space names
//! - [`Bool6D`] and [`NodeSupport`] - Degree-of-freedom flags and the support data read at export
//! - [`list`] - Compressed identifier list syntax (`1 to 3 5`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod allocator;
pub mod config;
pub mod fixity;
pub mod list;

pub use allocator::{IdAllocator, SubComponentRef, SubComponents};
pub use config::AllocatorConfig;
pub use fixity::{Bool6D, NodeSupport, Restraint};
