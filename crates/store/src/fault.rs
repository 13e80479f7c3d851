//! Fault-injecting store wrapper for atomicity tests.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::in_memory::InMemoryStore;
use crate::store::{FulfillmentStore, StoreError, StoreTx};

/// Wraps an [`InMemoryStore`] and, when armed, fails the next transaction
/// after its body has run but before commit.
///
/// The wrapped store rolls the transaction back, so callers can assert that
/// an operation failing at commit time leaves no observable writes. The fault
/// fires once; subsequent transactions proceed normally.
#[derive(Debug, Default)]
pub struct CommitFaultStore {
    inner: InMemoryStore,
    armed: AtomicBool,
}

impl CommitFaultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next transaction at commit time.
    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }
}

impl FulfillmentStore for CommitFaultStore {
    fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.inner.transact(|tx| {
            let value = f(tx)?;
            if self.armed.swap(false, Ordering::SeqCst) {
                return Err(E::from(StoreError::unavailable(
                    "injected fault before commit",
                )));
            }
            Ok(value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_numbering::{DocumentKind, SequenceKey};

    #[test]
    fn armed_fault_rolls_the_transaction_back() {
        let store = CommitFaultStore::new();
        let key = SequenceKey::new(DocumentKind::Invoice, 2025);

        store.arm();
        let err = store
            .transact::<_, StoreError, _>(|tx| tx.increment_sequence(key))
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));

        // Fault fired once; the counter was rolled back.
        let seq = store
            .transact::<_, StoreError, _>(|tx| tx.increment_sequence(key))
            .unwrap();
        assert_eq!(seq, 1);
    }
}
