use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::invoice;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "line_items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub invoice_id: String,
  pub item_name: String,
  pub item_quantity: i32,
  #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
  #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
  pub item_price: Decimal,
  pub created_at: DateTime,
}

impl Model {
  /// Quantity times unit price, clamped to the representable range. Never
  /// persisted.
  pub fn line_total(&self) -> Decimal {
    self.item_price.saturating_mul(Decimal::from(self.item_quantity))
  }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "invoice::Entity",
    from = "Column::InvoiceId",
    to = "invoice::Column::Id"
  )]
  Invoice,
}

impl Related<invoice::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Invoice.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
