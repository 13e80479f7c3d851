use std::collections::HashMap;
use std::sync::Mutex;

use orderflow_core::{InvoiceId, OrderId, OrderLineId, ShipmentId};
use orderflow_numbering::SequenceKey;
use orderflow_sales::{DocumentRef, FulfillmentEvent, FulfillmentStatus, Invoice, Order, OrderLine, Shipment, Track};

use crate::store::{FulfillmentStore, StoreError, StoreTx};

#[derive(Debug, Clone, Default)]
struct StoreState {
    orders: HashMap<OrderId, Order>,
    /// Line ids per order, in insertion order.
    order_line_index: HashMap<OrderId, Vec<OrderLineId>>,
    lines: HashMap<OrderLineId, OrderLine>,
    events: Vec<FulfillmentEvent>,
    invoices: HashMap<InvoiceId, Invoice>,
    shipments: HashMap<ShipmentId, Shipment>,
    counters: HashMap<SequenceKey, u64>,
}

/// In-memory implementation of the persistence collaborator.
///
/// Intended for tests/dev. Transactions are serialized through a single lock,
/// which trivially satisfies the isolation contract; rollback restores a
/// snapshot taken at transaction start.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

struct InMemoryTx<'a> {
    state: &'a mut StoreState,
}

impl StoreTx for InMemoryTx<'_> {
    fn insert_order(&mut self, order: Order, lines: Vec<OrderLine>) -> Result<(), StoreError> {
        if self.state.orders.contains_key(&order.id) {
            return Err(StoreError::corrupted(format!(
                "duplicate order id {}",
                order.id
            )));
        }

        let mut index = Vec::with_capacity(lines.len());
        for line in lines {
            index.push(line.id);
            self.state.lines.insert(line.id, line);
        }
        self.state.order_line_index.insert(order.id, index);
        self.state.orders.insert(order.id, order);
        Ok(())
    }

    fn order(&self, order_id: OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.state.orders.get(&order_id).cloned())
    }

    fn order_lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>, StoreError> {
        let Some(index) = self.state.order_line_index.get(&order_id) else {
            return Ok(Vec::new());
        };

        let mut lines = Vec::with_capacity(index.len());
        for line_id in index {
            let line = self.state.lines.get(line_id).ok_or_else(|| {
                StoreError::corrupted(format!("indexed line {line_id} is missing"))
            })?;
            lines.push(line.clone());
        }
        Ok(lines)
    }

    fn line(&self, line_id: OrderLineId) -> Result<Option<OrderLine>, StoreError> {
        Ok(self.state.lines.get(&line_id).cloned())
    }

    fn set_status(
        &mut self,
        order_id: OrderId,
        track: Track,
        status: FulfillmentStatus,
    ) -> Result<(), StoreError> {
        let order = self
            .state
            .orders
            .get_mut(&order_id)
            .ok_or_else(|| StoreError::corrupted(format!("unknown order {order_id}")))?;

        match track {
            Track::Shipment => order.shipment_status = status,
            Track::Invoice => order.invoice_status = status,
        }
        Ok(())
    }

    fn append_event(&mut self, event: FulfillmentEvent) -> Result<(), StoreError> {
        self.state.events.push(event);
        Ok(())
    }

    fn consumed_quantity(&self, line_id: OrderLineId, track: Track) -> Result<u32, StoreError> {
        Ok(self
            .state
            .events
            .iter()
            .filter(|e| e.line_id == line_id && e.track == track)
            .map(|e| e.quantity)
            .sum())
    }

    fn document_events(&self, document: DocumentRef) -> Result<Vec<FulfillmentEvent>, StoreError> {
        Ok(self
            .state
            .events
            .iter()
            .filter(|e| e.document == Some(document))
            .cloned()
            .collect())
    }

    fn insert_invoice(&mut self, invoice: Invoice) -> Result<(), StoreError> {
        if self.state.invoices.contains_key(&invoice.id) {
            return Err(StoreError::corrupted(format!(
                "duplicate invoice id {}",
                invoice.id
            )));
        }
        self.state.invoices.insert(invoice.id, invoice);
        Ok(())
    }

    fn invoice(&self, invoice_id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        Ok(self.state.invoices.get(&invoice_id).cloned())
    }

    fn insert_shipment(&mut self, shipment: Shipment) -> Result<(), StoreError> {
        if self.state.shipments.contains_key(&shipment.id) {
            return Err(StoreError::corrupted(format!(
                "duplicate shipment id {}",
                shipment.id
            )));
        }
        self.state.shipments.insert(shipment.id, shipment);
        Ok(())
    }

    fn shipment(&self, shipment_id: ShipmentId) -> Result<Option<Shipment>, StoreError> {
        Ok(self.state.shipments.get(&shipment_id).cloned())
    }

    fn delete_order(&mut self, order_id: OrderId) -> Result<(), StoreError> {
        if self.state.orders.remove(&order_id).is_none() {
            return Ok(());
        }

        if let Some(index) = self.state.order_line_index.remove(&order_id) {
            for line_id in &index {
                self.state.lines.remove(line_id);
            }
            self.state
                .events
                .retain(|e| !index.contains(&e.line_id));
        }
        self.state.invoices.retain(|_, inv| inv.order_id != order_id);
        Ok(())
    }

    fn increment_sequence(&mut self, key: SequenceKey) -> Result<u64, StoreError> {
        let counter = self.state.counters.entry(key).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }
}

impl FulfillmentStore for InMemoryStore {
    fn transact<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn StoreTx) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| E::from(StoreError::unavailable("state lock poisoned")))?;

        let snapshot = guard.clone();
        let mut tx = InMemoryTx { state: &mut guard };
        match f(&mut tx) {
            Ok(value) => Ok(value),
            Err(err) => {
                *guard = snapshot;
                Err(err)
            }
        }
    }
}
