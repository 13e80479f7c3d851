use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use orderflow_core::{FulfillmentError, FulfillmentResult, InvoiceId, OrderId, OrderLineId, ShipmentId};
use orderflow_numbering::DocumentKind;
use orderflow_sales::{
    compute_totals, derive_status, DocumentRef, FulfillmentEvent, FulfillmentStatus, Invoice,
    NewOrder, Order, OrderLine, OrderTotals, Shipment, Track,
};
use orderflow_store::{FulfillmentStore, StoreTx};

use crate::sequence;

/// Requested allocation against one order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAllocation {
    pub line_id: OrderLineId,
    pub quantity: u32,
}

/// Request payload for invoicing part of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRequest {
    pub order_id: OrderId,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub items: Vec<LineAllocation>,
    pub occurred_at: DateTime<Utc>,
}

/// Request payload for shipping part of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    pub order_id: OrderId,
    pub carrier: Option<String>,
    pub tracker: Option<String>,
    pub date_delivered: Option<NaiveDate>,
    pub items: Vec<LineAllocation>,
    pub occurred_at: DateTime<Utc>,
}

/// The fulfillment-tracking engine.
///
/// Each operation validates against the authoritative event set inside one
/// store transaction: the capacity check, the event append, and the status
/// reaggregation commit together or not at all. The engine holds no caches;
/// consumed quantities are re-read from the store on every call.
#[derive(Debug)]
pub struct AllocationLedger<S> {
    store: S,
}

impl<S: FulfillmentStore> AllocationLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create an order atomically with its lines, assigning the next SO
    /// number for the creation year.
    pub fn create_order(&self, request: NewOrder) -> FulfillmentResult<(Order, Vec<OrderLine>)> {
        for line in &request.lines {
            line.validate()?;
        }

        self.store.transact(move |tx| {
            let number =
                sequence::next_in_tx(tx, DocumentKind::SalesOrder, request.occurred_at.year())?;
            let order = Order::new(
                OrderId::new(),
                number,
                request.date,
                request.notes,
                request.occurred_at,
            );
            let lines: Vec<OrderLine> = request
                .lines
                .into_iter()
                .map(|line| line.into_line(order.id))
                .collect();

            tx.insert_order(order.clone(), lines.clone())?;
            debug!(number = %order.number, lines = lines.len(), "created sales order");
            Ok((order, lines))
        })
    }

    /// Allocate `quantity` of a line on one track.
    ///
    /// Fails with `CapacityExceeded` when prior allocations on the track
    /// leave insufficient capacity; in that case no event is recorded. On
    /// success the owning order's status for the track is reaggregated
    /// before the transaction commits.
    pub fn allocate(
        &self,
        line_id: OrderLineId,
        track: Track,
        quantity: u32,
    ) -> FulfillmentResult<FulfillmentEvent> {
        if quantity == 0 {
            return Err(FulfillmentError::InvalidQuantity);
        }

        self.store.transact(|tx| {
            let line = tx
                .line(line_id)?
                .ok_or_else(|| FulfillmentError::not_found(format!("order line {line_id}")))?;

            let event = Self::allocate_in_tx(tx, &line, track, quantity, None, Utc::now())?;
            let status = Self::reaggregate(tx, line.order_id, track)?;
            debug!(%line_id, ?track, quantity, ?status, "recorded allocation");
            Ok(event)
        })
    }

    /// Create an invoice over part of an order: assigns the next INV number,
    /// consumes capacity on the invoice track for every item, and
    /// reaggregates the order's invoice status, all in one transaction.
    pub fn create_invoice(&self, request: InvoiceRequest) -> FulfillmentResult<Invoice> {
        Self::validate_items(&request.items)?;

        self.store.transact(move |tx| {
            let order = tx.order(request.order_id)?.ok_or_else(|| {
                FulfillmentError::not_found(format!("order {}", request.order_id))
            })?;

            let number =
                sequence::next_in_tx(tx, DocumentKind::Invoice, request.occurred_at.year())?;
            let invoice = Invoice {
                id: InvoiceId::new(),
                number,
                order_id: order.id,
                date: request.date,
                due_date: request.due_date,
                notes: request.notes,
                created_at: request.occurred_at,
            };

            for item in &request.items {
                let line = Self::line_of_order(tx, item.line_id, &order)?;
                Self::allocate_in_tx(
                    tx,
                    &line,
                    Track::Invoice,
                    item.quantity,
                    Some(DocumentRef::Invoice(invoice.id)),
                    request.occurred_at,
                )?;
            }

            tx.insert_invoice(invoice.clone())?;
            let status = Self::reaggregate(tx, order.id, Track::Invoice)?;
            debug!(number = %invoice.number, order = %order.number, ?status, "created invoice");
            Ok(invoice)
        })
    }

    /// Create a shipment over part of an order. Shipments carry no document
    /// number; otherwise this mirrors [`Self::create_invoice`] on the
    /// shipment track.
    pub fn create_shipment(&self, request: ShipmentRequest) -> FulfillmentResult<Shipment> {
        Self::validate_items(&request.items)?;

        self.store.transact(move |tx| {
            let order = tx.order(request.order_id)?.ok_or_else(|| {
                FulfillmentError::not_found(format!("order {}", request.order_id))
            })?;

            let shipment = Shipment {
                id: ShipmentId::new(),
                order_id: order.id,
                carrier: request.carrier,
                tracker: request.tracker,
                date_delivered: request.date_delivered,
                created_at: request.occurred_at,
            };

            for item in &request.items {
                let line = Self::line_of_order(tx, item.line_id, &order)?;
                Self::allocate_in_tx(
                    tx,
                    &line,
                    Track::Shipment,
                    item.quantity,
                    Some(DocumentRef::Shipment(shipment.id)),
                    request.occurred_at,
                )?;
            }

            tx.insert_shipment(shipment.clone())?;
            let status = Self::reaggregate(tx, order.id, Track::Shipment)?;
            debug!(order = %order.number, ?status, "created shipment");
            Ok(shipment)
        })
    }

    /// Delete an order, cascading to its lines, their events, and its
    /// invoices.
    pub fn delete_order(&self, order_id: OrderId) -> FulfillmentResult<()> {
        self.store.transact(|tx| {
            tx.order(order_id)?
                .ok_or_else(|| FulfillmentError::not_found(format!("order {order_id}")))?;
            tx.delete_order(order_id)?;
            Ok(())
        })
    }

    pub fn order(&self, order_id: OrderId) -> FulfillmentResult<Order> {
        self.store.transact(|tx| {
            tx.order(order_id)?
                .ok_or_else(|| FulfillmentError::not_found(format!("order {order_id}")))
        })
    }

    pub fn order_lines(&self, order_id: OrderId) -> FulfillmentResult<Vec<OrderLine>> {
        self.store.transact(|tx| {
            tx.order(order_id)?
                .ok_or_else(|| FulfillmentError::not_found(format!("order {order_id}")))?;
            Ok(tx.order_lines(order_id)?)
        })
    }

    /// Totals over the order's full lines at their ordered quantities.
    pub fn order_totals(&self, order_id: OrderId) -> FulfillmentResult<OrderTotals> {
        let lines = self.order_lines(order_id)?;
        Ok(OrderTotals::for_lines(&lines))
    }

    /// Per-line consumed quantity on one track, in line order.
    pub fn consumed_quantities(
        &self,
        order_id: OrderId,
        track: Track,
    ) -> FulfillmentResult<Vec<(OrderLineId, u32)>> {
        self.store.transact(|tx| {
            tx.order(order_id)?
                .ok_or_else(|| FulfillmentError::not_found(format!("order {order_id}")))?;

            let lines = tx.order_lines(order_id)?;
            let mut consumed = Vec::with_capacity(lines.len());
            for line in &lines {
                consumed.push((line.id, tx.consumed_quantity(line.id, track)?));
            }
            Ok(consumed)
        })
    }

    pub fn invoice(&self, invoice_id: InvoiceId) -> FulfillmentResult<Invoice> {
        self.store.transact(|tx| {
            tx.invoice(invoice_id)?
                .ok_or_else(|| FulfillmentError::not_found(format!("invoice {invoice_id}")))
        })
    }

    pub fn shipment(&self, shipment_id: ShipmentId) -> FulfillmentResult<Shipment> {
        self.store.transact(|tx| {
            tx.shipment(shipment_id)?
                .ok_or_else(|| FulfillmentError::not_found(format!("shipment {shipment_id}")))
        })
    }

    /// Totals over the quantities an invoice actually covers, priced at the
    /// underlying lines' unit prices and tax rates.
    pub fn invoice_totals(&self, invoice_id: InvoiceId) -> FulfillmentResult<OrderTotals> {
        self.store.transact(|tx| {
            let invoice = tx
                .invoice(invoice_id)?
                .ok_or_else(|| FulfillmentError::not_found(format!("invoice {invoice_id}")))?;

            let events = tx.document_events(DocumentRef::Invoice(invoice.id))?;
            let mut charges = Vec::with_capacity(events.len());
            for event in &events {
                let line = tx.line(event.line_id)?.ok_or_else(|| {
                    FulfillmentError::not_found(format!("order line {}", event.line_id))
                })?;
                charges.push((event.quantity, line.unit_price, line.tax_rate));
            }
            Ok(compute_totals(charges))
        })
    }

    /// Capacity check and event append for one line, inside an open
    /// transaction. The caller reaggregates status afterwards.
    fn allocate_in_tx(
        tx: &mut dyn StoreTx,
        line: &OrderLine,
        track: Track,
        quantity: u32,
        document: Option<DocumentRef>,
        recorded_at: DateTime<Utc>,
    ) -> FulfillmentResult<FulfillmentEvent> {
        if quantity == 0 {
            return Err(FulfillmentError::InvalidQuantity);
        }

        let consumed = tx.consumed_quantity(line.id, track)?;
        let remaining = line.quantity.saturating_sub(consumed);
        if quantity > remaining {
            warn!(line_id = %line.id, ?track, quantity, remaining, "allocation exceeds capacity");
            return Err(FulfillmentError::capacity_exceeded(line.id, remaining));
        }

        let event = FulfillmentEvent::new(line.id, track, quantity, document, recorded_at);
        tx.append_event(event.clone())?;
        Ok(event)
    }

    /// Recompute and persist the order's aggregate status for one track from
    /// the full event set.
    fn reaggregate(
        tx: &mut dyn StoreTx,
        order_id: OrderId,
        track: Track,
    ) -> FulfillmentResult<FulfillmentStatus> {
        let lines = tx.order_lines(order_id)?;
        let mut consumption = Vec::with_capacity(lines.len());
        for line in &lines {
            consumption.push((line.quantity, tx.consumed_quantity(line.id, track)?));
        }

        let status = derive_status(consumption);
        tx.set_status(order_id, track, status)?;
        Ok(status)
    }

    fn line_of_order(
        tx: &mut dyn StoreTx,
        line_id: OrderLineId,
        order: &Order,
    ) -> FulfillmentResult<OrderLine> {
        tx.line(line_id)?
            .filter(|line| line.order_id == order.id)
            .ok_or_else(|| {
                FulfillmentError::not_found(format!(
                    "order line {line_id} on order {}",
                    order.number
                ))
            })
    }

    fn validate_items(items: &[LineAllocation]) -> FulfillmentResult<()> {
        if items.is_empty() {
            return Err(FulfillmentError::InvalidQuantity);
        }
        for item in items {
            if item.quantity == 0 {
                return Err(FulfillmentError::InvalidQuantity);
            }
        }
        Ok(())
    }
}
