//! Sales order domain module.
//!
//! This crate contains the order, line and fulfillment-event model together
//! with the status derivation and totals arithmetic, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod document;
pub mod fulfillment;
pub mod order;
pub mod status;
pub mod totals;

pub use document::{Invoice, Shipment};
pub use fulfillment::{DocumentRef, FulfillmentEvent, Track};
pub use order::{NewOrder, NewOrderLine, Order, OrderLine};
pub use status::{derive_status, FulfillmentStatus, PaymentStatus};
pub use totals::{compute_totals, OrderTotals};
