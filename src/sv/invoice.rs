use sea_orm::{LoaderTrait, Order};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  entity::{invoice, line_item},
  prelude::*,
  utils,
};

/// Line item as the API and the assistant see it, with its derived total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemView {
  #[serde(flatten)]
  pub item: line_item::Model,
  #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
  pub line_total: Decimal,
}

impl From<line_item::Model> for LineItemView {
  fn from(item: line_item::Model) -> Self {
    let line_total = item.line_total();
    Self { item, line_total }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceWithItems {
  #[serde(flatten)]
  pub invoice: invoice::Model,
  pub line_items: Vec<LineItemView>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewLineItem {
  pub item_name: String,
  pub item_quantity: i32,
  pub item_price: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewInvoice {
  pub customer_name: String,
  pub vendor_name: String,
  pub invoice_number: String,
  #[serde(deserialize_with = "utils::deserialize_date")]
  pub invoice_date: DateTime,
  #[serde(deserialize_with = "utils::deserialize_date")]
  pub due_date: DateTime,
  pub amount: Decimal,
  #[serde(default)]
  pub line_items: Vec<NewLineItem>,
}

/// Fields of an invoice a client may change. Anything else is rejected.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InvoicePatch {
  pub customer_name: Option<String>,
  pub vendor_name: Option<String>,
  pub invoice_number: Option<String>,
  #[serde(default, deserialize_with = "utils::deserialize_opt_date")]
  pub invoice_date: Option<DateTime>,
  #[serde(default, deserialize_with = "utils::deserialize_opt_date")]
  pub due_date: Option<DateTime>,
  pub amount: Option<Decimal>,
}

impl InvoicePatch {
  pub fn is_empty(&self) -> bool {
    self.customer_name.is_none()
      && self.vendor_name.is_none()
      && self.invoice_number.is_none()
      && self.invoice_date.is_none()
      && self.due_date.is_none()
      && self.amount.is_none()
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
  CustomerName,
  VendorName,
  InvoiceNumber,
  InvoiceDate,
  DueDate,
  Amount,
  #[default]
  CreatedAt,
}

impl SortColumn {
  fn column(self) -> invoice::Column {
    match self {
      Self::CustomerName => invoice::Column::CustomerName,
      Self::VendorName => invoice::Column::VendorName,
      Self::InvoiceNumber => invoice::Column::InvoiceNumber,
      Self::InvoiceDate => invoice::Column::InvoiceDate,
      Self::DueDate => invoice::Column::DueDate,
      Self::Amount => invoice::Column::Amount,
      Self::CreatedAt => invoice::Column::CreatedAt,
    }
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  Asc,
  #[default]
  Desc,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Sort {
  #[serde(default)]
  pub sort: SortColumn,
  #[serde(default)]
  pub order: SortOrder,
}

pub struct Invoice<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Invoice<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Newest first.
  pub async fn by_user(&self, user_id: &str) -> Result<Vec<invoice::Model>> {
    let invoices = invoice::Entity::find()
      .filter(invoice::Column::UserId.eq(user_id))
      .order_by_desc(invoice::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(invoices)
  }

  pub async fn with_line_items(
    &self,
    user_id: &str,
    sort: Sort,
  ) -> Result<Vec<InvoiceWithItems>> {
    let order = match sort.order {
      SortOrder::Asc => Order::Asc,
      SortOrder::Desc => Order::Desc,
    };

    let invoices = invoice::Entity::find()
      .filter(invoice::Column::UserId.eq(user_id))
      .order_by(sort.sort.column(), order)
      .order_by_asc(invoice::Column::Id)
      .all(self.db)
      .await?;

    let items = invoices
      .load_many(
        line_item::Entity::find().order_by_asc(line_item::Column::CreatedAt),
        self.db,
      )
      .await?;

    Ok(
      invoices
        .into_iter()
        .zip(items)
        .map(|(invoice, items)| InvoiceWithItems {
          invoice,
          line_items: items.into_iter().map(LineItemView::from).collect(),
        })
        .collect(),
    )
  }

  pub async fn owned(
    &self,
    user_id: &str,
    id: &str,
  ) -> Result<Option<invoice::Model>> {
    let invoice = invoice::Entity::find_by_id(id)
      .filter(invoice::Column::UserId.eq(user_id))
      .one(self.db)
      .await?;
    Ok(invoice)
  }

  /// Inserts the invoice and all of its line items in one transaction.
  pub async fn create(
    &self,
    user_id: &str,
    new: NewInvoice,
  ) -> Result<InvoiceWithItems> {
    validate_amount(new.amount)?;
    for item in &new.line_items {
      validate_item(item.item_quantity, item.item_price)?;
    }

    let txn = self.db.begin().await?;
    let now = Utc::now().naive_utc();
    let id = Uuid::new_v4().to_string();

    let invoice = invoice::ActiveModel {
      id: Set(id.clone()),
      user_id: Set(user_id.to_string()),
      customer_name: Set(new.customer_name),
      vendor_name: Set(new.vendor_name),
      invoice_number: Set(new.invoice_number),
      invoice_date: Set(new.invoice_date),
      due_date: Set(new.due_date),
      amount: Set(new.amount),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let mut line_items = Vec::with_capacity(new.line_items.len());
    for item in new.line_items {
      let item = line_item::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        invoice_id: Set(id.clone()),
        item_name: Set(item.item_name),
        item_quantity: Set(item.item_quantity),
        item_price: Set(item.item_price),
        created_at: Set(now),
      }
      .insert(&txn)
      .await?;
      line_items.push(LineItemView::from(item));
    }

    txn.commit().await?;
    debug!(
      "Created invoice {} for {user_id} with {} line items",
      invoice.id,
      line_items.len()
    );

    Ok(InvoiceWithItems { invoice, line_items })
  }

  pub async fn update(
    &self,
    user_id: &str,
    id: &str,
    patch: InvoicePatch,
  ) -> Result<invoice::Model> {
    let invoice =
      self.owned(user_id, id).await?.ok_or(Error::InvoiceNotFound)?;

    if let Some(amount) = patch.amount {
      validate_amount(amount)?;
    }
    if patch.is_empty() {
      return Ok(invoice);
    }

    let mut model: invoice::ActiveModel = invoice.into();
    if let Some(customer_name) = patch.customer_name {
      model.customer_name = Set(customer_name);
    }
    if let Some(vendor_name) = patch.vendor_name {
      model.vendor_name = Set(vendor_name);
    }
    if let Some(invoice_number) = patch.invoice_number {
      model.invoice_number = Set(invoice_number);
    }
    if let Some(invoice_date) = patch.invoice_date {
      model.invoice_date = Set(invoice_date);
    }
    if let Some(due_date) = patch.due_date {
      model.due_date = Set(due_date);
    }
    if let Some(amount) = patch.amount {
      model.amount = Set(amount);
    }

    Ok(model.update(self.db).await?)
  }

  /// Removes the invoice's line items, then the invoice itself.
  pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
    let txn = self.db.begin().await?;

    let invoice = invoice::Entity::find_by_id(id)
      .filter(invoice::Column::UserId.eq(user_id))
      .one(&txn)
      .await?
      .ok_or(Error::InvoiceNotFound)?;

    let removed = line_item::Entity::delete_many()
      .filter(line_item::Column::InvoiceId.eq(invoice.id.as_str()))
      .exec(&txn)
      .await?;

    invoice.delete(&txn).await?;
    txn.commit().await?;

    debug!("Deleted invoice {id} and {} line items", removed.rows_affected);
    Ok(())
  }
}

/// Money columns are `DECIMAL(16, 4)`: at most twelve integer digits.
fn money_limit() -> Decimal {
  Decimal::new(1_000_000_000_000, 0)
}

fn validate_amount(amount: Decimal) -> Result<()> {
  if amount.abs() >= money_limit() {
    return Err(Error::invalid("Amount is too large"));
  }
  Ok(())
}

pub(crate) fn validate_item(quantity: i32, price: Decimal) -> Result<()> {
  if quantity < 0 {
    return Err(Error::invalid("Item quantity must not be negative"));
  }
  if price < Decimal::ZERO {
    return Err(Error::invalid("Item price must not be negative"));
  }
  if price >= money_limit() {
    return Err(Error::invalid("Item price is too large"));
  }
  if price.checked_mul(Decimal::from(quantity)).is_none() {
    return Err(Error::invalid("Line total is too large"));
  }
  Ok(())
}
