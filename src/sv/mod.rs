pub mod invoice;
pub mod line_item;
pub mod query;
pub mod store;
#[cfg(test)]
pub mod test_utils;

pub use invoice::{
  Invoice, InvoicePatch, InvoiceWithItems, LineItemView, NewInvoice,
  NewLineItem, Sort,
};
pub use line_item::{LineItem, LineItemPatch};
pub use query::Query;
pub use store::Store;
