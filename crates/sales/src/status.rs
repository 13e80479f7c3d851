//! Aggregate status derivation.

use serde::{Deserialize, Serialize};

/// Order-level fulfillment state on one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentStatus {
    None,
    Partial,
    Complete,
}

/// Payment state carried on the order.
///
/// Payment events are an external collaborator's concern; this engine stores
/// the field but never derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

/// Derive the order-level status for one track from per-line consumption.
///
/// Each item pairs a line's ordered quantity with the quantity consumed so
/// far on the track. Every line fully consumed yields `Complete`; any
/// consumption at all yields `Partial`; otherwise `None`. An order with zero
/// lines is `None`, never vacuously `Complete`.
///
/// Pure over the full consumption set; callers re-run it after each
/// allocation instead of updating incrementally.
pub fn derive_status<I>(lines: I) -> FulfillmentStatus
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let mut seen_any_line = false;
    let mut any_consumed = false;
    let mut all_complete = true;

    for (ordered, consumed) in lines {
        seen_any_line = true;
        if consumed > 0 {
            any_consumed = true;
        }
        if consumed < ordered {
            all_complete = false;
        }
    }

    if !seen_any_line {
        return FulfillmentStatus::None;
    }
    if all_complete {
        FulfillmentStatus::Complete
    } else if any_consumed {
        FulfillmentStatus::Partial
    } else {
        FulfillmentStatus::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fully_consumed_lines_are_complete() {
        let status = derive_status([(10, 10), (3, 3)]);
        assert_eq!(status, FulfillmentStatus::Complete);
    }

    #[test]
    fn any_consumption_is_partial() {
        let status = derive_status([(10, 4), (3, 0)]);
        assert_eq!(status, FulfillmentStatus::Partial);
    }

    #[test]
    fn one_complete_line_among_untouched_is_partial() {
        let status = derive_status([(10, 10), (3, 0)]);
        assert_eq!(status, FulfillmentStatus::Partial);
    }

    #[test]
    fn no_consumption_is_none() {
        let status = derive_status([(10, 0), (3, 0)]);
        assert_eq!(status, FulfillmentStatus::None);
    }

    #[test]
    fn zero_lines_is_none_not_complete() {
        assert_eq!(derive_status([]), FulfillmentStatus::None);
    }

    proptest! {
        /// Property: the derivation agrees with the definition on arbitrary
        /// consumption sets (consumed clamped to ordered, as the ledger
        /// guarantees at commit).
        #[test]
        fn derivation_matches_definition(
            lines in prop::collection::vec((1u32..100, 0u32..100), 0..8)
        ) {
            let clamped: Vec<(u32, u32)> = lines
                .into_iter()
                .map(|(ordered, consumed)| (ordered, consumed.min(ordered)))
                .collect();

            let status = derive_status(clamped.iter().copied());

            let expected = if clamped.is_empty() {
                FulfillmentStatus::None
            } else if clamped.iter().all(|&(ordered, consumed)| consumed == ordered) {
                FulfillmentStatus::Complete
            } else if clamped.iter().any(|&(_, consumed)| consumed > 0) {
                FulfillmentStatus::Partial
            } else {
                FulfillmentStatus::None
            };

            prop_assert_eq!(status, expected);
        }
    }
}
