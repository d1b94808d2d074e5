pub use std::{
  collections::{HashMap, HashSet},
  sync::Arc,
  time::Duration,
};

pub use chrono::{NaiveDateTime as DateTime, Utc};
pub use dashmap::DashMap;
pub use rust_decimal::Decimal;
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
  ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
