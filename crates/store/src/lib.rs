//! Persistence collaborator for the fulfillment engine.
//!
//! The engine talks to durable storage through [`FulfillmentStore`], which
//! runs every multi-step operation inside one atomic transaction. This crate
//! ships an in-memory implementation for tests/dev and a fault-injecting
//! wrapper for atomicity tests; SQL backends implement the same traits.

pub mod fault;
pub mod in_memory;
pub mod store;

pub use fault::CommitFaultStore;
pub use in_memory::InMemoryStore;
pub use store::{FulfillmentStore, StoreError, StoreTx};
