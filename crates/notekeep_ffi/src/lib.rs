//! Flutter-facing bindings for NoteKeep core.
//!
//! # Responsibility
//! - Host the FRB-exported API surface in `api`.

pub mod api;
