//! Adapters for the domain ports: in-memory and persistent session storage,
//! the in-process ledger used by the CLI and tests, and the RNG source.

pub mod in_memory;
pub mod local_ledger;
pub mod random;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
