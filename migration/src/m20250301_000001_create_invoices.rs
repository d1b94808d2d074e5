use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Invoices::Table)
          .if_not_exists()
          .col(ColumnDef::new(Invoices::Id).string().not_null().primary_key())
          .col(ColumnDef::new(Invoices::UserId).string().not_null())
          .col(ColumnDef::new(Invoices::CustomerName).string().not_null())
          .col(ColumnDef::new(Invoices::VendorName).string().not_null())
          .col(ColumnDef::new(Invoices::InvoiceNumber).string().not_null())
          .col(ColumnDef::new(Invoices::InvoiceDate).date_time().not_null())
          .col(ColumnDef::new(Invoices::DueDate).date_time().not_null())
          .col(
            ColumnDef::new(Invoices::Amount).decimal_len(16, 4).not_null(),
          )
          .col(ColumnDef::new(Invoices::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_invoices_user")
          .table(Invoices::Table)
          .col(Invoices::UserId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Invoices::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Invoices {
  Table,
  Id,
  UserId,
  CustomerName,
  VendorName,
  InvoiceNumber,
  InvoiceDate,
  DueDate,
  Amount,
  CreatedAt,
}
