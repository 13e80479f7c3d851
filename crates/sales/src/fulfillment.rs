use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::{FulfillmentEventId, InvoiceId, OrderLineId, ShipmentId};

/// Fulfillment dimension against which a line's quantity is consumed.
///
/// The two tracks are independent: shipping a quantity does not consume
/// invoicing capacity, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Shipment,
    Invoice,
}

/// Document a fulfillment event was recorded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentRef {
    Invoice(InvoiceId),
    Shipment(ShipmentId),
}

/// A record of partial consumption of an order line's quantity on one track.
///
/// Events are append-only: they are never mutated or deleted, and corrections
/// are modeled as new events. This keeps the allocation history auditable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentEvent {
    pub id: FulfillmentEventId,
    pub line_id: OrderLineId,
    pub track: Track,
    /// Quantity consumed; strictly positive.
    pub quantity: u32,
    /// Present when the event was created as part of an invoice or shipment
    /// document; absent for direct allocations.
    pub document: Option<DocumentRef>,
    pub recorded_at: DateTime<Utc>,
}

impl FulfillmentEvent {
    pub fn new(
        line_id: OrderLineId,
        track: Track,
        quantity: u32,
        document: Option<DocumentRef>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: FulfillmentEventId::new(),
            line_id,
            track,
            quantity,
            document,
            recorded_at,
        }
    }
}
