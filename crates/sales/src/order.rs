use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::{FulfillmentError, FulfillmentResult, Money, OrderId, OrderLineId, ProductId, TaxRate};
use orderflow_numbering::DocumentNumber;

use crate::status::{FulfillmentStatus, PaymentStatus};

/// A sales order with its derived fulfillment state.
///
/// The two fulfillment statuses are recomputed by the ledger after every
/// allocation touching the order's lines; they are never edited directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub number: DocumentNumber,
    pub date: NaiveDate,
    pub shipment_status: FulfillmentStatus,
    pub invoice_status: FulfillmentStatus,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// A freshly created order: nothing shipped, nothing invoiced, unpaid.
    pub fn new(
        id: OrderId,
        number: DocumentNumber,
        date: NaiveDate,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            number,
            date,
            shipment_status: FulfillmentStatus::None,
            invoice_status: FulfillmentStatus::None,
            payment_status: PaymentStatus::Unpaid,
            notes,
            created_at,
        }
    }
}

/// One line of a sales order. Immutable once created; lines are only removed
/// by cascading order deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    /// Ordered quantity; strictly positive.
    pub quantity: u32,
    pub unit_price: Money,
    pub tax_rate: TaxRate,
}

/// Request payload for one line of a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Money,
    pub tax_rate: TaxRate,
}

impl NewOrderLine {
    pub fn validate(&self) -> FulfillmentResult<()> {
        if self.quantity == 0 {
            return Err(FulfillmentError::InvalidQuantity);
        }
        Ok(())
    }

    /// Materialize the line under its owning order.
    pub fn into_line(self, order_id: OrderId) -> OrderLine {
        OrderLine {
            id: OrderLineId::new(),
            order_id,
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            tax_rate: self.tax_rate,
        }
    }
}

/// Request payload for creating an order atomically with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub lines: Vec<NewOrderLine>,
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_numbering::DocumentKind;

    fn test_number() -> DocumentNumber {
        DocumentNumber::compose(DocumentKind::SalesOrder, 2025, 1)
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn new_order_starts_unfulfilled_and_unpaid() {
        let order = Order::new(OrderId::new(), test_number(), test_date(), None, Utc::now());
        assert_eq!(order.shipment_status, FulfillmentStatus::None);
        assert_eq!(order.invoice_status, FulfillmentStatus::None);
        assert_eq!(order.payment_status, PaymentStatus::Unpaid);
    }

    #[test]
    fn zero_quantity_line_is_rejected() {
        let line = NewOrderLine {
            product_id: ProductId::new(),
            quantity: 0,
            unit_price: Money::from_minor(1000),
            tax_rate: TaxRate::ZERO,
        };
        assert_eq!(line.validate(), Err(FulfillmentError::InvalidQuantity));
    }

    #[test]
    fn into_line_binds_the_owning_order() {
        let order_id = OrderId::new();
        let product_id = ProductId::new();
        let line = NewOrderLine {
            product_id,
            quantity: 5,
            unit_price: Money::from_minor(250),
            tax_rate: TaxRate::from_minor(1200),
        };
        line.validate().unwrap();

        let line = line.into_line(order_id);
        assert_eq!(line.order_id, order_id);
        assert_eq!(line.product_id, product_id);
        assert_eq!(line.quantity, 5);
    }
}
