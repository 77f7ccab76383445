//! Thin boundaries toward the embedding request handler.

pub mod json;
