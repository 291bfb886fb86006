//! Utility functions and helpers for server operations.
//!
//! Currently document id generation: slugs derived from route names and random ids.

pub mod slug;
