//! Order totals arithmetic.

use serde::{Deserialize, Serialize};

use orderflow_core::{Money, TaxRate};

use crate::order::OrderLine;

/// Derived monetary totals for a set of charged quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderTotals {
    pub const ZERO: OrderTotals = OrderTotals {
        subtotal: Money::ZERO,
        tax: Money::ZERO,
        total: Money::ZERO,
    };

    /// Totals over an order's full lines at their ordered quantities.
    pub fn for_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a OrderLine>,
    {
        compute_totals(
            lines
                .into_iter()
                .map(|line| (line.quantity, line.unit_price, line.tax_rate)),
        )
    }
}

/// Compute subtotal, tax and total for `(quantity, unit_price, tax_rate)`
/// charges.
///
/// Line total is quantity x unit price; line tax is line total x tax rate,
/// rounded to the 2-decimal currency representation; totals are sums. Pure
/// and deterministic. Callers pass partial quantities here to price invoices
/// that cover only part of an order.
pub fn compute_totals<I>(charges: I) -> OrderTotals
where
    I: IntoIterator<Item = (u32, Money, TaxRate)>,
{
    let mut subtotal = Money::ZERO;
    let mut tax = Money::ZERO;

    for (quantity, unit_price, tax_rate) in charges {
        let line_total = unit_price.times(quantity);
        subtotal += line_total;
        tax += tax_rate.apply(line_total);
    }

    OrderTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_core::{OrderId, OrderLineId, ProductId};

    fn line(quantity: u32, price_minor: i64, rate_minor: i64) -> OrderLine {
        OrderLine {
            id: OrderLineId::new(),
            order_id: OrderId::new(),
            product_id: ProductId::new(),
            quantity,
            unit_price: Money::from_minor(price_minor),
            tax_rate: TaxRate::from_minor(rate_minor),
        }
    }

    #[test]
    fn totals_are_deterministic() {
        // (qty 2 x 10.00 at 10%) + (qty 1 x 5.00 untaxed)
        let lines = vec![line(2, 1000, 1000), line(1, 500, 0)];
        let totals = OrderTotals::for_lines(&lines);

        assert_eq!(totals.subtotal, Money::from_minor(2500));
        assert_eq!(totals.tax, Money::from_minor(200));
        assert_eq!(totals.total, Money::from_minor(2700));
    }

    #[test]
    fn empty_charge_set_totals_zero() {
        assert_eq!(compute_totals([]), OrderTotals::ZERO);
    }

    #[test]
    fn tax_rounds_per_line() {
        // 3 x 9.99 = 29.97; at 0.0725 the raw tax is 2.172825.
        let totals = OrderTotals::for_lines(&[line(3, 999, 725)]);
        assert_eq!(totals.subtotal, Money::from_minor(2997));
        assert_eq!(totals.tax, Money::from_minor(217));
        assert_eq!(totals.total, Money::from_minor(3214));
    }

    #[test]
    fn partial_quantities_price_partial_invoices() {
        let full = line(10, 1000, 1000);
        let totals = compute_totals([(4, full.unit_price, full.tax_rate)]);
        assert_eq!(totals.subtotal, Money::from_minor(4000));
        assert_eq!(totals.tax, Money::from_minor(400));
        assert_eq!(totals.total, Money::from_minor(4400));
    }
}
