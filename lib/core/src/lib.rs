//! Core domain types and utilities for the amber-dialer platform.
//!
//! This crate provides the foundational identifier types, slug
//! normalization, and error handling shared by the directory, assistant
//! client, relay, and server crates.

pub mod error;
pub mod id;
pub mod slug;

pub use error::Result;
pub use id::{AssistantId, ExternalMessageId, RunId, ThreadId, TurnId};
pub use slug::Slug;
