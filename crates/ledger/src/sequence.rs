//! Sequential document number issuance.
//!
//! Numbers come from a keyed monotonic counter with atomic
//! increment-and-fetch semantics, never from scanning existing document
//! numbers for a maximum: a read-max-then-write scheme races under
//! concurrent creation and can hand two documents the same number.

use orderflow_core::{FulfillmentError, FulfillmentResult};
use orderflow_numbering::{DocumentKind, DocumentNumber, SequenceKey};
use orderflow_store::{FulfillmentStore, StoreError, StoreTx};

/// Issue the next number for `(kind, year)` inside an open transaction.
///
/// The increment commits or rolls back with the enclosing transaction, so a
/// document-creation operation that fails after obtaining a number releases
/// it again.
pub fn next_in_tx(
    tx: &mut dyn StoreTx,
    kind: DocumentKind,
    year: i32,
) -> FulfillmentResult<DocumentNumber> {
    let seq = tx
        .increment_sequence(SequenceKey::new(kind, year))
        .map_err(|err| match err {
            StoreError::Serialization(msg) => FulfillmentError::SequenceConflict(msg),
            other => other.into(),
        })?;

    Ok(DocumentNumber::compose(kind, year, seq))
}

/// Standalone number generator over a store.
///
/// Document-creation operations obtain their numbers through [`next_in_tx`]
/// within their own transactions; this type serves callers that need a
/// number on its own.
#[derive(Debug)]
pub struct SequenceGenerator<S> {
    store: S,
}

impl<S: FulfillmentStore> SequenceGenerator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Next number for `(kind, year)`.
    ///
    /// Strictly increasing per key; two concurrent callers never receive the
    /// same value. A `SequenceConflict` is transient and may be retried.
    pub fn next_number(&self, kind: DocumentKind, year: i32) -> FulfillmentResult<DocumentNumber> {
        self.store.transact(|tx| next_in_tx(tx, kind, year))
    }
}
