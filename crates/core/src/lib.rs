//! `orderflow-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod money;

pub use error::{FulfillmentError, FulfillmentResult};
pub use id::{FulfillmentEventId, InvoiceId, OrderId, OrderLineId, ProductId, ShipmentId};
pub use money::{Money, TaxRate};
