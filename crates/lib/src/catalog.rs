//! Catalog types: product identifiers and read-only product snapshots.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::money::Money;

/// Opaque product identifier.
///
/// The backend sends product ids as numbers in catalog listings and as
/// strings in cart snapshots; both normalise to the same string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
  pub fn new(id: impl Into<String>) -> Self {
    Self(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for ProductId {
  fn from(id: &str) -> Self {
    Self::new(id)
  }
}

impl From<u64> for ProductId {
  fn from(id: u64) -> Self {
    Self(id.to_string())
  }
}

impl<'de> Deserialize<'de> for ProductId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Number(serde_json::Number),
      Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
      Raw::Number(n) => Self(n.to_string()),
      Raw::Text(s) => Self(s),
    })
  }
}

/// A catalog entry as listed by `/api/products/`. Never mutated by cart logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
  pub id: ProductId,
  pub name: String,
  pub price: Money,
  #[serde(default)]
  pub image: String,
  #[serde(default)]
  pub category: Option<String>,
}

/// Product listing categories, selected by the page path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
  Sticks,
  Cones,
  Tubs,
}

impl Category {
  pub fn as_str(self) -> &'static str {
    match self {
      Category::Sticks => "sticks",
      Category::Cones => "cones",
      Category::Tubs => "tubs",
    }
  }

  /// The category a listing page shows, `None` for the all-products page.
  pub fn from_path(path: &str) -> Option<Self> {
    [Category::Sticks, Category::Cones, Category::Tubs]
      .into_iter()
      .find(|category| path.contains(&format!("/{}/", category.as_str())))
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
