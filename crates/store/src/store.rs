use thiserror::Error;

use orderflow_core::{FulfillmentError, InvoiceId, OrderId, OrderLineId, ShipmentId};
use orderflow_numbering::SequenceKey;
use orderflow_sales::{DocumentRef, FulfillmentEvent, FulfillmentStatus, Invoice, Order, OrderLine, Shipment, Track};

/// Storage operation error.
///
/// These are **infrastructure errors** (availability, transaction conflicts,
/// corrupted state), as opposed to the domain errors the engine raises.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached, or the transaction aborted.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The transaction lost a serialization conflict and may be retried.
    #[error("serialization conflict: {0}")]
    Serialization(String),

    /// Stored state violates a structural assumption (e.g. duplicate ids).
    #[error("storage corrupted: {0}")]
    Corrupted(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }
}

impl From<StoreError> for FulfillmentError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unavailable(msg)
            | StoreError::Serialization(msg)
            | StoreError::Corrupted(msg) => FulfillmentError::StorageUnavailable(msg),
        }
    }
}

/// Operations available inside one open transaction.
///
/// Reads observe the transaction's own writes. Nothing becomes durable until
/// the transaction commits; see [`FulfillmentStore::transact`].
pub trait StoreTx {
    /// Persist an order atomically with its lines.
    fn insert_order(&mut self, order: Order, lines: Vec<OrderLine>) -> Result<(), StoreError>;

    fn order(&self, order_id: OrderId) -> Result<Option<Order>, StoreError>;

    /// The order's lines in insertion order. Empty if the order is unknown.
    fn order_lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>, StoreError>;

    fn line(&self, line_id: OrderLineId) -> Result<Option<OrderLine>, StoreError>;

    /// Overwrite the order's derived status for one track.
    fn set_status(
        &mut self,
        order_id: OrderId,
        track: Track,
        status: FulfillmentStatus,
    ) -> Result<(), StoreError>;

    /// Append one fulfillment event. Events are never updated or removed
    /// except by cascading order deletion.
    fn append_event(&mut self, event: FulfillmentEvent) -> Result<(), StoreError>;

    /// Sum of quantities consumed on `line_id` for one track.
    fn consumed_quantity(&self, line_id: OrderLineId, track: Track) -> Result<u32, StoreError>;

    /// Events recorded under one document, in insertion order.
    fn document_events(&self, document: DocumentRef) -> Result<Vec<FulfillmentEvent>, StoreError>;

    fn insert_invoice(&mut self, invoice: Invoice) -> Result<(), StoreError>;

    fn invoice(&self, invoice_id: InvoiceId) -> Result<Option<Invoice>, StoreError>;

    fn insert_shipment(&mut self, shipment: Shipment) -> Result<(), StoreError>;

    fn shipment(&self, shipment_id: ShipmentId) -> Result<Option<Shipment>, StoreError>;

    /// Delete an order, cascading to its lines, their events, and its
    /// invoices. Idempotent for unknown ids.
    fn delete_order(&mut self, order_id: OrderId) -> Result<(), StoreError>;

    /// Atomic increment-and-fetch on the counter for `key`. The first value
    /// issued for a key is 1. Rolls back with the enclosing transaction.
    fn increment_sequence(&mut self, key: SequenceKey) -> Result<u64, StoreError>;
}

/// Transactional storage for orders, lines, events, documents and counters.
///
/// Implementations must guarantee:
/// - **Atomicity**: all writes made by `f` commit together, or none do.
/// - **Isolation**: two transactions never interleave their check-then-write
///   steps against the same line (at least snapshot isolation, or a coarser
///   serialization).
/// - **Counter monotonicity**: `increment_sequence` never hands the same
///   value to two committed transactions for one key.
pub trait FulfillmentStore: Send + Sync {
    /// Run `f` inside a single atomic transaction.
    ///
    /// If `f` returns an error the transaction rolls back and none of its
    /// writes are observable afterwards.
    fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, E>,
        E: From<StoreError>;
}

impl<S> FulfillmentStore for std::sync::Arc<S>
where
    S: FulfillmentStore + ?Sized,
{
    fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, E>,
        E: From<StoreError>,
    {
        (**self).transact(f)
    }
}
