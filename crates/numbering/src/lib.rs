//! Document numbering: kinds, sequence keys, and the display format.
//!
//! Numbers are issued from year-scoped monotonic counters held by the
//! persistence collaborator; this crate only defines the keying and the
//! `{PREFIX}-{YYYY}-{NNN}` wire format external consumers depend on.

pub mod number;

pub use number::{DocumentKind, DocumentNumber, SequenceKey};
