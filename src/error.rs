use sea_orm::DbErr;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Unauthorized")]
  Unauthorized,
  #[error("{0}")]
  InvalidArgs(String),
  #[error("Invoice not found")]
  InvoiceNotFound,
  #[error("Line item not found")]
  LineItemNotFound,
  #[error("Database error: {0}")]
  Db(#[from] DbErr),
}

impl Error {
  pub fn invalid(msg: impl Into<String>) -> Self {
    Self::InvalidArgs(msg.into())
  }
}
