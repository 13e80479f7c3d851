use serde::{Deserialize, Serialize};

/// Kind of sequentially numbered document.
///
/// Shipments carry no number; only orders and invoices do.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    SalesOrder,
    Invoice,
}

impl DocumentKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::SalesOrder => "SO",
            DocumentKind::Invoice => "INV",
        }
    }
}

/// Key scoping a monotonic counter: one independent sequence per kind and
/// calendar year. Different keys never contend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceKey {
    pub kind: DocumentKind,
    pub year: i32,
}

impl SequenceKey {
    pub fn new(kind: DocumentKind, year: i32) -> Self {
        Self { kind, year }
    }
}

/// Human-readable document number, e.g. `SO-2025-001`.
///
/// This is a display/wire contract: invoices shown to customers carry it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentNumber(String);

impl DocumentNumber {
    /// Compose a number from kind, calendar year and sequence value.
    ///
    /// The sequence is zero-padded to 3 digits; values >= 1000 render at
    /// their full width rather than wrapping.
    pub fn compose(kind: DocumentKind, year: i32, seq: u64) -> Self {
        Self(format!("{}-{}-{:03}", kind.prefix(), year, seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_zero_padded_numbers() {
        let cases = [
            (1, "SO-2025-001"),
            (42, "SO-2025-042"),
            (999, "SO-2025-999"),
            (1000, "SO-2025-1000"),
        ];
        for (seq, expected) in cases {
            let number = DocumentNumber::compose(DocumentKind::SalesOrder, 2025, seq);
            assert_eq!(number.as_str(), expected);
        }
    }

    #[test]
    fn invoice_numbers_use_inv_prefix() {
        let number = DocumentNumber::compose(DocumentKind::Invoice, 2025, 7);
        assert_eq!(number.as_str(), "INV-2025-007");
    }

    #[test]
    fn keys_differ_by_kind_and_year() {
        let so_2025 = SequenceKey::new(DocumentKind::SalesOrder, 2025);
        assert_ne!(so_2025, SequenceKey::new(DocumentKind::Invoice, 2025));
        assert_ne!(so_2025, SequenceKey::new(DocumentKind::SalesOrder, 2026));
        assert_eq!(so_2025, SequenceKey::new(DocumentKind::SalesOrder, 2025));
    }
}
