//! Keyword dispatcher behind the assistant's invoice lookup tool.
//!
//! A question is lower-cased and checked against [`INTENTS`] in order. The
//! first group with a keyword contained in the question decides the answer;
//! when nothing matches, every invoice is returned. There is no scoring and
//! no combining of intents, so "customer item totals" is a customer query.

use serde::Serialize;

use crate::{
  entity::invoice,
  prelude::*,
  sv::{self, InvoiceWithItems, LineItemView, Sort},
  utils::format_money,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
  TotalAmount,
  Customers,
  Vendors,
  LineItems,
  Overdue,
  InvoiceNumbers,
  All,
}

pub const INTENTS: &[(&[&str], Intent)] = &[
  (&["total amount", "total value"], Intent::TotalAmount),
  (&["customer", "client"], Intent::Customers),
  (&["vendor", "supplier"], Intent::Vendors),
  (&["line item", "item"], Intent::LineItems),
  (&["due date", "overdue"], Intent::Overdue),
  (&["invoice number"], Intent::InvoiceNumbers),
];

impl Intent {
  pub fn classify(query: &str) -> Self {
    let query = query.to_lowercase();
    INTENTS
      .iter()
      .find(|(keywords, _)| keywords.iter().any(|kw| query.contains(kw)))
      .map_or(Intent::All, |&(_, intent)| intent)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum QueryData {
  TotalAmount {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    total_amount: Decimal,
  },
  Customers {
    customers: Vec<String>,
  },
  Vendors {
    vendors: Vec<String>,
  },
  LineItems {
    line_items: Vec<LineItemView>,
  },
  Overdue {
    overdue_invoices: Vec<invoice::Model>,
  },
  InvoiceNumbers {
    invoice_numbers: Vec<String>,
  },
  Invoices {
    invoices: Vec<InvoiceWithItems>,
  },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
  pub message: String,
  pub data: QueryData,
}

/// Keeps the first occurrence of every name, in input order.
fn unique<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
  let mut seen = HashSet::new();
  names.filter(|name| seen.insert(*name)).map(str::to_string).collect()
}

pub fn answer(
  invoices: Vec<InvoiceWithItems>,
  query: &str,
  now: DateTime,
) -> Answer {
  match Intent::classify(query) {
    Intent::TotalAmount => {
      let total_amount = invoices
        .iter()
        .fold(Decimal::ZERO, |acc, inv| acc.saturating_add(inv.invoice.amount));
      Answer {
        message: format!(
          "The total amount across all invoices is {}",
          format_money(total_amount)
        ),
        data: QueryData::TotalAmount { total_amount },
      }
    }
    Intent::Customers => {
      let customers =
        unique(invoices.iter().map(|inv| inv.invoice.customer_name.as_str()));
      Answer {
        message: format!(
          "Found {} unique customers: {}",
          customers.len(),
          customers.join(", ")
        ),
        data: QueryData::Customers { customers },
      }
    }
    Intent::Vendors => {
      let vendors =
        unique(invoices.iter().map(|inv| inv.invoice.vendor_name.as_str()));
      Answer {
        message: format!(
          "Found {} unique vendors: {}",
          vendors.len(),
          vendors.join(", ")
        ),
        data: QueryData::Vendors { vendors },
      }
    }
    Intent::LineItems => {
      let line_items: Vec<_> =
        invoices.into_iter().flat_map(|inv| inv.line_items).collect();
      Answer {
        message: format!(
          "Found {} line items across all invoices",
          line_items.len()
        ),
        data: QueryData::LineItems { line_items },
      }
    }
    Intent::Overdue => {
      let overdue_invoices: Vec<_> = invoices
        .into_iter()
        .map(|inv| inv.invoice)
        .filter(|inv| inv.due_date < now)
        .collect();
      Answer {
        message: format!("Found {} overdue invoices", overdue_invoices.len()),
        data: QueryData::Overdue { overdue_invoices },
      }
    }
    Intent::InvoiceNumbers => {
      let invoice_numbers: Vec<_> = invoices
        .into_iter()
        .map(|inv| inv.invoice.invoice_number)
        .collect();
      Answer {
        message: format!(
          "Found {} invoice numbers: {}",
          invoice_numbers.len(),
          invoice_numbers.join(", ")
        ),
        data: QueryData::InvoiceNumbers { invoice_numbers },
      }
    }
    Intent::All => Answer {
      message: format!("Found {} invoices in total", invoices.len()),
      data: QueryData::Invoices { invoices },
    },
  }
}

pub struct Query<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Query<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn ask(&self, user_id: &str, query: &str) -> Result<Answer> {
    let invoices = sv::Invoice::new(self.db)
      .with_line_items(user_id, Sort::default())
      .await?;

    let answer = answer(invoices, query, Utc::now().naive_utc());
    debug!("Answered `{query}` for {user_id}: {}", answer.message);
    Ok(answer)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::line_item,
    sv::test_utils::test_db::{self, date, new_invoice},
  };

  fn invoice(
    id: &str,
    customer: &str,
    vendor: &str,
    amount: Decimal,
    due_date: DateTime,
  ) -> InvoiceWithItems {
    let item = line_item::Model {
      id: format!("{id}-item"),
      invoice_id: id.into(),
      item_name: "Widget".into(),
      item_quantity: 2,
      item_price: Decimal::new(1000, 2),
      created_at: date(2024, 3, 1),
    };

    InvoiceWithItems {
      invoice: invoice::Model {
        id: id.into(),
        user_id: "u".into(),
        customer_name: customer.into(),
        vendor_name: vendor.into(),
        invoice_number: format!("INV-{id}"),
        invoice_date: date(2024, 3, 1),
        due_date,
        amount,
        created_at: date(2024, 3, 1),
      },
      line_items: vec![item.into()],
    }
  }

  fn now() -> DateTime {
    date(2025, 1, 1)
  }

  fn sample() -> Vec<InvoiceWithItems> {
    vec![
      invoice("1", "Acme", "Tech", Decimal::new(10000, 2), date(2024, 4, 1)),
      invoice("2", "Acme", "Cloud", Decimal::new(25050, 2), date(2026, 4, 1)),
    ]
  }

  #[test]
  fn test_classify_order() {
    let cases = [
      ("What is the TOTAL VALUE?", Intent::TotalAmount),
      ("which customer bought each item", Intent::Customers),
      ("list suppliers", Intent::Vendors),
      ("show line items", Intent::LineItems),
      ("anything past the due date?", Intent::Overdue),
      ("every invoice number", Intent::InvoiceNumbers),
      ("hello there", Intent::All),
      ("", Intent::All),
    ];

    for (query, intent) in cases {
      assert_eq!(Intent::classify(query), intent, "{query}");
    }
  }

  #[test]
  fn test_total_amount() {
    let answer = answer(sample(), "What is the total amount?", now());

    assert!(answer.message.contains("$350.50"), "{}", answer.message);
    assert_eq!(
      answer.data,
      QueryData::TotalAmount { total_amount: Decimal::new(35050, 2) }
    );

    let value = json::to_value(&answer).unwrap();
    assert_eq!(value["data"]["totalAmount"], json::json!(350.5));
  }

  #[test]
  fn test_total_amount_saturates() {
    let invoices = vec![
      invoice("1", "A", "V", Decimal::MAX, now()),
      invoice("2", "B", "V", Decimal::MAX, now()),
    ];

    let answer = answer(invoices, "total amount", now());
    assert_eq!(
      answer.data,
      QueryData::TotalAmount { total_amount: Decimal::MAX }
    );
  }

  #[test]
  fn test_customers_are_unique() {
    let answer = answer(sample(), "Who are the customers?", now());

    assert_eq!(answer.message, "Found 1 unique customers: Acme");
    assert_eq!(
      answer.data,
      QueryData::Customers { customers: vec!["Acme".into()] }
    );
  }

  #[test]
  fn test_vendors_keep_first_seen_order() {
    let mut invoices = sample();
    invoices.push(invoice("3", "Zed", "Tech", Decimal::ONE, now()));

    let answer = answer(invoices, "vendor list", now());
    assert_eq!(
      answer.data,
      QueryData::Vendors { vendors: vec!["Tech".into(), "Cloud".into()] }
    );
  }

  #[test]
  fn test_line_items_are_flattened() {
    let answer = answer(sample(), "show me every item", now());

    assert_eq!(answer.message, "Found 2 line items across all invoices");
    let QueryData::LineItems { line_items } = answer.data else {
      panic!("expected line items");
    };
    let owners: Vec<_> =
      line_items.iter().map(|li| li.item.invoice_id.as_str()).collect();
    assert_eq!(owners, ["1", "2"]);
    assert_eq!(line_items[0].line_total, Decimal::new(2000, 2));
  }

  #[test]
  fn test_overdue_only_past_due() {
    let answer = answer(sample(), "Show overdue invoices", now());

    assert_eq!(answer.message, "Found 1 overdue invoices");
    let QueryData::Overdue { overdue_invoices } = answer.data else {
      panic!("expected overdue invoices");
    };
    assert_eq!(overdue_invoices.len(), 1);
    assert_eq!(overdue_invoices[0].id, "1");
  }

  #[test]
  fn test_due_exactly_now_is_not_overdue() {
    let invoices = vec![invoice("1", "A", "V", Decimal::ONE, now())];

    let answer = answer(invoices, "overdue?", now());
    assert_eq!(answer.data, QueryData::Overdue { overdue_invoices: vec![] });
  }

  #[test]
  fn test_invoice_numbers_not_deduplicated() {
    let mut invoices = sample();
    invoices[1].invoice.invoice_number = "INV-1".into();

    let answer = answer(invoices, "invoice number please", now());
    assert_eq!(answer.message, "Found 2 invoice numbers: INV-1, INV-1");
  }

  #[test]
  fn test_fallback_returns_everything() {
    let invoices = sample();

    let answer = answer(invoices.clone(), "how is business?", now());
    assert_eq!(answer.message, "Found 2 invoices in total");
    assert_eq!(answer.data, QueryData::Invoices { invoices });

    let value = json::to_value(&answer).unwrap();
    let item = &value["data"]["invoices"][0]["lineItems"][0];
    assert_eq!(item["lineTotal"], json::json!(20.0));
  }

  #[tokio::test]
  async fn test_ask_reads_only_own_invoices() {
    let store = test_db::setup().await;
    let sv = store.invoices();
    let rows =
      [("alice", "Acme", 10000), ("alice", "Beta", 25050), ("bob", "X", 9900)];
    for (user, customer, cents) in rows {
      let new = new_invoice(customer, "V", Decimal::new(cents, 2));
      sv.create(user, new).await.unwrap();
    }

    let answer = store.query().ask("alice", "total value").await.unwrap();
    assert_eq!(
      answer.data,
      QueryData::TotalAmount { total_amount: Decimal::new(35050, 2) }
    );
  }
}
