use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use crate::{prelude::*, sv};

/// Owns the connection pool. Opened once at startup and handed to whoever
/// needs the database; nothing reaches for a global handle.
pub struct Store {
  db: DatabaseConnection,
}

impl Store {
  /// Connects and brings the schema up to date.
  pub async fn open(url: &str) -> Result<Self> {
    let db = Database::connect(url).await?;
    Migrator::up(&db, None).await?;
    debug!("Store opened at {url}");
    Ok(Self { db })
  }

  pub fn invoices(&self) -> sv::Invoice<'_> {
    sv::Invoice::new(&self.db)
  }

  pub fn line_items(&self) -> sv::LineItem<'_> {
    sv::LineItem::new(&self.db)
  }

  pub fn query(&self) -> sv::Query<'_> {
    sv::Query::new(&self.db)
  }

  /// Drains and closes the pool. Every clone of the connection shares it, so
  /// the store is unusable afterwards.
  pub async fn close(&self) -> Result<()> {
    self.db.clone().close().await?;
    info!("Store closed");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_open_runs_migrations() {
    let store = Store::open("sqlite::memory:").await.unwrap();

    let invoices = store.invoices().by_user("nobody").await.unwrap();
    assert!(invoices.is_empty());

    store.close().await.unwrap();
  }
}
