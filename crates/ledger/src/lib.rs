//! Allocation ledger: the fulfillment-tracking engine.
//!
//! This crate orchestrates the persistence collaborator and the sales domain
//! model: it allocates partial quantities against order lines without
//! over-allocation, reaggregates order status after every allocation, and
//! issues collision-free sequential document numbers. Every multi-step
//! operation runs inside a single store transaction, so callers never
//! observe partial effects.

pub mod ledger;
pub mod sequence;

pub use ledger::{AllocationLedger, InvoiceRequest, LineAllocation, ShipmentRequest};
pub use sequence::SequenceGenerator;
