//! Receipt

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    ids::OrderId,
    items::LineItem,
    orders::Order,
    pricing::{OrderTotals, PricingError},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A line total could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing to the output failed.
    #[error("IO error")]
    Io(#[source] io::Error),
}

/// Printable breakdown of an order or a checkout quote.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    order: Option<OrderId>,
    items: Vec<LineItem<'a>>,
    totals: OrderTotals<'a>,
}

impl<'a> Receipt<'a> {
    /// Receipt for items that have been priced but not ordered.
    pub fn for_quote(items: Vec<LineItem<'a>>, totals: OrderTotals<'a>) -> Self {
        Self {
            order: None,
            items,
            totals,
        }
    }

    /// Receipt for a submitted order.
    pub fn for_order(order: &Order<'a>) -> Self {
        Self {
            order: Some(order.id().clone()),
            items: order.items().to_vec(),
            totals: *order.totals(),
        }
    }

    /// Write the receipt as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if a line total cannot be calculated or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Unit Price", "Qty", "Line Total"]);

        for item in &self.items {
            builder.push_record([
                item.name.clone(),
                item.unit_price.to_string(),
                item.quantity.get().to_string(),
                item.line_total()?.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..4), Alignment::right());

        if let Some(order) = &self.order {
            writeln!(out, "\n Order {order}").map_err(ReceiptError::Io)?;
        }

        writeln!(out, "\n{table}").map_err(ReceiptError::Io)?;

        let totals = &self.totals;
        let summary = [
            (" Subtotal:", totals.subtotal.to_string()),
            (" Tax:", totals.tax.to_string()),
            (" Shipping:", totals.shipping.to_string()),
            (" Total:", totals.total.to_string()),
        ];

        let value_width = summary.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in summary {
            writeln!(out, "{label:<11}{value:>value_width$}").map_err(ReceiptError::Io)?;
        }

        writeln!(out).map_err(ReceiptError::Io)
    }
}
