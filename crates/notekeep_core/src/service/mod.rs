//! Core use-case services.
//!
//! # Responsibility
//! - Pair the in-memory store with a persistence backend.
//! - Apply caller-facing validation before store mutations.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod note_service;
