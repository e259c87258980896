//! Client-side note filtering.
//!
//! # Responsibility
//! - Match notes against a free-text query and an optional category.
//!
//! # Invariants
//! - Filtering never mutates notes and preserves collection order.

pub mod filter;
