//! Wire types for the storefront backend's JSON endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{ProductId, ProductSnapshot};
use crate::money::Money;

/// `GET /cart/count/`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CountReply {
  #[serde(default)]
  pub count: Option<u32>,
}

/// `GET /cart/items/`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CartItemsReply {
  #[serde(default)]
  pub cart: Option<BTreeMap<ProductId, u32>>,
}

/// Server cart snapshot: product id to quantity.
pub type CartSnapshot = BTreeMap<ProductId, u32>;

/// Reply to `POST /cart/add/{id}/` and `POST /cart/update/{id}/`.
///
/// The same shape serves both endpoints; `add` omits `quantity`, `update`
/// omits `price`. An `error` field marks the mutation as failed whatever
/// the HTTP status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartMutationReply {
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub quantity: Option<u32>,
  #[serde(default)]
  pub item_total: Option<Money>,
  #[serde(default)]
  pub cart_count: Option<u32>,
  #[serde(default)]
  pub price: Option<Money>,
  #[serde(default)]
  pub error: Option<String>,
}

/// Body of `POST /cart/update/{id}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityAction {
  Increment,
  Decrement,
}

impl QuantityAction {
  pub fn as_str(self) -> &'static str {
    match self {
      QuantityAction::Increment => "increment",
      QuantityAction::Decrement => "decrement",
    }
  }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateBody {
  pub action: QuantityAction,
}

/// `GET /api/products/`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProductsReply {
  #[serde(default)]
  pub products: Vec<ProductSnapshot>,
}

/// `GET /api/check-auth/`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthReply {
  #[serde(default)]
  pub is_authenticated: bool,
}

/// `GET /api/search/`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchReply {
  #[serde(default)]
  pub results: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
  pub name: String,
  pub url: String,
}

/// Reply to the OTP and password-reset form endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FormReply {
  #[serde(default)]
  pub status: Option<String>,
  #[serde(default)]
  pub error: Option<String>,
}

/// Outcome of an auth form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
  Ok,
  /// Server-provided error text, if any.
  Error(Option<String>),
}

impl From<FormReply> for FormStatus {
  fn from(reply: FormReply) -> Self {
    match reply.status.as_deref() {
      Some("ok") => FormStatus::Ok,
      _ => FormStatus::Error(reply.error),
    }
  }
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailBody<'a> {
  pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct OtpBody<'a> {
  pub email: &'a str,
  pub otp: &'a str,
}

/// `GET /get-address/{id}/`, field names as the backend sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressFields {
  #[serde(default)]
  pub full_name: String,
  #[serde(default)]
  pub phone: String,
  #[serde(default)]
  pub street: String,
  #[serde(default)]
  pub city: String,
  #[serde(default)]
  pub pincode: String,
  #[serde(default, skip_serializing)]
  pub error: Option<String>,
}

/// `DELETE /delete-address/{id}/`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DeleteReply {
  #[serde(default)]
  pub success: bool,
}

/// Reply to the order placement form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReply {
  #[serde(default)]
  pub success: Option<bool>,
  #[serde(default)]
  pub order_id: Option<u64>,
  #[serde(default)]
  pub error: Option<String>,
}
