//! Shared test utilities for database setup

#[cfg(test)]
pub mod test_db {
  use chrono::NaiveDate;

  use crate::{
    prelude::*,
    sv::{NewInvoice, NewLineItem, Store},
  };

  /// In-memory SQLite store with every migration applied
  pub async fn setup() -> Store {
    Store::open("sqlite::memory:").await.unwrap()
  }

  pub fn date(y: i32, m: u32, d: u32) -> DateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
  }

  pub fn new_invoice(
    customer: &str,
    vendor: &str,
    amount: Decimal,
  ) -> NewInvoice {
    NewInvoice {
      customer_name: customer.into(),
      vendor_name: vendor.into(),
      invoice_number: format!("INV-{customer}"),
      invoice_date: date(2024, 3, 1),
      due_date: date(2024, 4, 1),
      amount,
      line_items: vec![
        NewLineItem {
          item_name: "Consulting".into(),
          item_quantity: 4,
          item_price: Decimal::new(2500, 2),
        },
        NewLineItem {
          item_name: "License".into(),
          item_quantity: 1,
          item_price: Decimal::new(50000, 2),
        },
      ],
    }
  }
}
