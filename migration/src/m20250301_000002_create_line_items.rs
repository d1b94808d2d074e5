use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_invoices::Invoices;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(LineItems::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(LineItems::Id).string().not_null().primary_key(),
          )
          .col(ColumnDef::new(LineItems::InvoiceId).string().not_null())
          .col(ColumnDef::new(LineItems::ItemName).string().not_null())
          .col(ColumnDef::new(LineItems::ItemQuantity).integer().not_null())
          .col(
            ColumnDef::new(LineItems::ItemPrice).decimal_len(16, 4).not_null(),
          )
          .col(ColumnDef::new(LineItems::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_line_items_invoice")
              .from(LineItems::Table, LineItems::InvoiceId)
              .to(Invoices::Table, Invoices::Id)
              .on_delete(ForeignKeyAction::Restrict),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_line_items_invoice")
          .table(LineItems::Table)
          .col(LineItems::InvoiceId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(LineItems::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum LineItems {
  Table,
  Id,
  InvoiceId,
  ItemName,
  ItemQuantity,
  ItemPrice,
  CreatedAt,
}
