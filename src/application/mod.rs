//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `GameEngine` which acts as the primary entry point
//! for the `start`/`play` operations. State transitions are serialized per
//! player via `PlayerLocks` so concurrent requests cannot corrupt a session.

pub mod engine;
pub mod locks;
