use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
  prelude::*,
  state::AppState,
  sv::{NewInvoice, NewLineItem, Store},
};

pub const DEMO_USER_ID: &str = "demo-user";
pub const LOGGED_IN_USER_ID: &str = "user_0";

/// Fills the store with demo invoices when `SEED_DEMO` is set.
pub struct Plugin;

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    if !app.config.seed_demo {
      return Ok(());
    }

    let created = seed_demo(&app.store).await?;
    info!("Database seeded with {created} demo invoices");
    Ok(())
  }
}

fn day(y: i32, m: u32, d: u32) -> DateTime {
  NaiveDate::from_ymd_opt(y, m, d)
    .and_then(|date| date.and_hms_opt(0, 0, 0))
    .unwrap_or_default()
}

fn item(name: &str, quantity: i32, cents: i64) -> NewLineItem {
  NewLineItem {
    item_name: name.into(),
    item_quantity: quantity,
    item_price: Decimal::new(cents, 2),
  }
}

fn demo_invoices() -> Vec<(&'static str, NewInvoice)> {
  vec![
    (DEMO_USER_ID, NewInvoice {
      customer_name: "Acme Corp".into(),
      vendor_name: "Tech Solutions Inc".into(),
      invoice_number: "INV-001".into(),
      invoice_date: day(2024, 3, 1),
      due_date: day(2024, 4, 1),
      amount: Decimal::new(150000, 2),
      line_items: vec![
        item("Consulting Services", 40, 2500),
        item("Software License", 1, 50000),
      ],
    }),
    (LOGGED_IN_USER_ID, NewInvoice {
      customer_name: "Global Industries".into(),
      vendor_name: "Office Supplies Co".into(),
      invoice_number: "INV-002".into(),
      invoice_date: day(2024, 3, 5),
      due_date: day(2024, 4, 5),
      amount: Decimal::new(75050, 2),
      line_items: vec![
        item("Office Supplies", 100, 550),
        item("Paper Products", 50, 400),
      ],
    }),
    (LOGGED_IN_USER_ID, NewInvoice {
      customer_name: "StartupX".into(),
      vendor_name: "Cloud Services Ltd".into(),
      invoice_number: "INV-003".into(),
      invoice_date: day(2024, 3, 10),
      due_date: day(2024, 4, 10),
      amount: Decimal::new(250000, 2),
      line_items: vec![
        item("Cloud Storage", 1, 100000),
        item("API Services", 1, 150000),
      ],
    }),
  ]
}

/// Creates the demo invoices. Users that already own invoices are left
/// alone, so running it twice does not duplicate anything.
pub async fn seed_demo(store: &Store) -> Result<usize> {
  let invoices = demo_invoices();

  let mut populated = HashSet::new();
  for (user_id, _) in &invoices {
    if !populated.contains(user_id)
      && !store.invoices().by_user(user_id).await?.is_empty()
    {
      debug!("{user_id} already has invoices, skipping seed");
      populated.insert(*user_id);
    }
  }

  let mut created = 0;
  for (user_id, invoice) in invoices {
    if populated.contains(user_id) {
      continue;
    }
    store.invoices().create(user_id, invoice).await?;
    created += 1;
  }

  Ok(created)
}
