use axum::{
  Json,
  extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::auth::AuthUser;
use crate::{
  prelude::*,
  state::AppState,
  sv::{
    InvoicePatch, InvoiceWithItems, LineItemPatch, NewInvoice, Sort,
    query::Answer,
  },
};

type App = State<Arc<AppState>>;

#[derive(Debug)]
pub struct ApiError {
  status: StatusCode,
  msg: String,
}

impl ApiError {
  pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
    Self { status, msg: msg.into() }
  }

  pub fn bad_request(msg: impl Into<String>) -> Self {
    Self::new(StatusCode::BAD_REQUEST, msg)
  }

  /// Maps a service error to a response. Storage failures are logged and
  /// reported with the endpoint's generic `fallback` message.
  fn from_error(err: Error, fallback: &'static str) -> Self {
    match err {
      Error::Unauthorized => {
        Self::new(StatusCode::UNAUTHORIZED, err.to_string())
      }
      Error::InvalidArgs(msg) => Self::bad_request(msg),
      Error::InvoiceNotFound | Error::LineItemNotFound => {
        Self::new(StatusCode::NOT_FOUND, err.to_string())
      }
      Error::Db(_) => {
        error!("{fallback}: {err}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
      }
    }
  }
}

impl From<Error> for ApiError {
  fn from(err: Error) -> Self {
    Self::from_error(err, "Internal server error")
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(json::json!({ "error": self.msg }))).into_response()
  }
}

trait OrFail<T> {
  fn or_fail(self, fallback: &'static str) -> Result<T, ApiError>;
}

impl<T> OrFail<T> for Result<T> {
  fn or_fail(self, fallback: &'static str) -> Result<T, ApiError> {
    self.map_err(|err| ApiError::from_error(err, fallback))
  }
}

#[derive(Serialize)]
pub struct Status {
  success: bool,
}

const SUCCESS: Json<Status> = Json(Status { success: true });

#[derive(Deserialize)]
pub struct IdParam {
  id: Option<String>,
}

#[derive(Deserialize)]
pub struct QueryReq {
  query: String,
}

fn require_id(id: Option<String>, what: &str) -> Result<String, ApiError> {
  match id {
    Some(id) if !id.trim().is_empty() => Ok(id),
    _ => Err(ApiError::bad_request(format!("{what} ID is required"))),
  }
}

/// Splits a PATCH body into its `id` and the remaining fields, then parses
/// the fields as the entity's patch type.
fn split_patch<P>(
  body: Result<Json<json::Value>, JsonRejection>,
  what: &str,
) -> Result<(String, P), ApiError>
where
  P: for<'de> Deserialize<'de>,
{
  let Json(body) =
    body.map_err(|err| ApiError::bad_request(err.body_text()))?;
  let json::Value::Object(mut fields) = body else {
    return Err(ApiError::bad_request("Expected a JSON object"));
  };

  let id = match fields.remove("id") {
    Some(json::Value::String(id)) => Some(id),
    _ => None,
  };
  let id = require_id(id, what)?;

  let patch = json::from_value(json::Value::Object(fields))
    .map_err(|err| ApiError::bad_request(err.to_string()))?;

  Ok((id, patch))
}

pub async fn health() -> &'static str {
  "OK"
}

pub async fn list_invoices(
  AuthUser(user): AuthUser,
  State(app): App,
  sort: Result<Query<Sort>, QueryRejection>,
) -> Result<Json<Vec<InvoiceWithItems>>, ApiError> {
  let Query(sort) =
    sort.map_err(|err| ApiError::bad_request(err.body_text()))?;

  let invoices = app
    .store
    .invoices()
    .with_line_items(&user, sort)
    .await
    .or_fail("Failed to fetch invoices")?;

  Ok(Json(invoices))
}

pub async fn create_invoice(
  AuthUser(user): AuthUser,
  State(app): App,
  body: Result<Json<NewInvoice>, JsonRejection>,
) -> Result<Json<InvoiceWithItems>, ApiError> {
  let Json(new) = body.map_err(|err| ApiError::bad_request(err.body_text()))?;

  let created = app
    .store
    .invoices()
    .create(&user, new)
    .await
    .or_fail("Failed to create invoice")?;

  info!("{user} created invoice {}", created.invoice.id);
  Ok(Json(created))
}

pub async fn update_invoice(
  AuthUser(user): AuthUser,
  State(app): App,
  body: Result<Json<json::Value>, JsonRejection>,
) -> Result<Json<Status>, ApiError> {
  let (id, patch) = split_patch::<InvoicePatch>(body, "Invoice")?;

  app
    .store
    .invoices()
    .update(&user, &id, patch)
    .await
    .or_fail("Failed to update invoice")?;

  Ok(SUCCESS)
}

pub async fn delete_invoice(
  AuthUser(user): AuthUser,
  State(app): App,
  Query(param): Query<IdParam>,
) -> Result<Json<Status>, ApiError> {
  let id = require_id(param.id, "Invoice")?;

  app
    .store
    .invoices()
    .delete(&user, &id)
    .await
    .or_fail("Failed to delete invoice")?;

  info!("{user} deleted invoice {id}");
  Ok(SUCCESS)
}

pub async fn update_line_item(
  AuthUser(user): AuthUser,
  State(app): App,
  body: Result<Json<json::Value>, JsonRejection>,
) -> Result<Json<Status>, ApiError> {
  let (id, patch) = split_patch::<LineItemPatch>(body, "Line Item")?;

  app
    .store
    .line_items()
    .update(&user, &id, patch)
    .await
    .or_fail("Failed to update line item")?;

  Ok(SUCCESS)
}

pub async fn delete_line_item(
  AuthUser(user): AuthUser,
  State(app): App,
  Query(param): Query<IdParam>,
) -> Result<Json<Status>, ApiError> {
  let id = require_id(param.id, "Line Item")?;

  app
    .store
    .line_items()
    .delete(&user, &id)
    .await
    .or_fail("Failed to delete line item")?;

  Ok(SUCCESS)
}

pub async fn query_invoices(
  AuthUser(user): AuthUser,
  State(app): App,
  body: Result<Json<QueryReq>, JsonRejection>,
) -> Result<Json<Answer>, ApiError> {
  let Json(req) = body.map_err(|err| ApiError::bad_request(err.body_text()))?;

  let answer = app
    .store
    .query()
    .ask(&user, &req.query)
    .await
    .or_fail("Failed to query invoices")?;

  Ok(Json(answer))
}
