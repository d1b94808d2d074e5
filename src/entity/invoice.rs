use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::line_item;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
#[serde(rename_all = "camelCase")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub id: String,
  pub user_id: String,
  pub customer_name: String,
  pub vendor_name: String,
  pub invoice_number: String,
  pub invoice_date: DateTime,
  pub due_date: DateTime,
  #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
  #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
  pub amount: Decimal,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "line_item::Entity")]
  LineItems,
}

impl Related<line_item::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::LineItems.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
