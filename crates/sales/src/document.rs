//! Fulfillment documents: invoices and shipments.
//!
//! A document groups the fulfillment events created by one invoicing or
//! shipping operation. Invoices carry an INV document number; shipments are
//! unnumbered.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::{InvoiceId, OrderId, ShipmentId};
use orderflow_numbering::DocumentNumber;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub number: DocumentNumber,
    pub order_id: OrderId,
    pub date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: ShipmentId,
    pub order_id: OrderId,
    pub carrier: Option<String>,
    pub tracker: Option<String>,
    pub date_delivered: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
