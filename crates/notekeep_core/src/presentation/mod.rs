//! Presentation helpers that sit outside the store.
//!
//! # Responsibility
//! - Map categories to display colors.
//! - Build the card view model shared by list and grid layouts.

pub mod card;
pub mod palette;
