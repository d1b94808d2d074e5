use serde::Deserialize;

use crate::{
  entity::{invoice, line_item},
  prelude::*,
  sv::invoice::validate_item,
};

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineItemPatch {
  pub item_name: Option<String>,
  pub item_quantity: Option<i32>,
  pub item_price: Option<Decimal>,
}

pub struct LineItem<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> LineItem<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Oldest first.
  #[cfg(test)]
  pub async fn by_invoice(
    &self,
    invoice_id: &str,
  ) -> Result<Vec<line_item::Model>> {
    let items = line_item::Entity::find()
      .filter(line_item::Column::InvoiceId.eq(invoice_id))
      .order_by_asc(line_item::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(items)
  }

  /// A line item is visible only through an invoice the user owns.
  pub async fn owned(
    &self,
    user_id: &str,
    id: &str,
  ) -> Result<Option<line_item::Model>> {
    let found = line_item::Entity::find_by_id(id)
      .find_also_related(invoice::Entity)
      .one(self.db)
      .await?;

    Ok(match found {
      Some((item, Some(invoice))) if invoice.user_id == user_id => Some(item),
      _ => None,
    })
  }

  pub async fn update(
    &self,
    user_id: &str,
    id: &str,
    patch: LineItemPatch,
  ) -> Result<line_item::Model> {
    let item =
      self.owned(user_id, id).await?.ok_or(Error::LineItemNotFound)?;

    validate_item(
      patch.item_quantity.unwrap_or(item.item_quantity),
      patch.item_price.unwrap_or(item.item_price),
    )?;

    if patch.item_name.is_none()
      && patch.item_quantity.is_none()
      && patch.item_price.is_none()
    {
      return Ok(item);
    }

    let mut model: line_item::ActiveModel = item.into();
    if let Some(item_name) = patch.item_name {
      model.item_name = Set(item_name);
    }
    if let Some(item_quantity) = patch.item_quantity {
      model.item_quantity = Set(item_quantity);
    }
    if let Some(item_price) = patch.item_price {
      model.item_price = Set(item_price);
    }

    Ok(model.update(self.db).await?)
  }

  pub async fn delete(&self, user_id: &str, id: &str) -> Result<()> {
    let item =
      self.owned(user_id, id).await?.ok_or(Error::LineItemNotFound)?;

    item.delete(self.db).await?;
    Ok(())
  }
}
