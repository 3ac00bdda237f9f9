//! The cart mirror: the client-held copy of server cart quantities.
//!
//! Absence encodes zero. A product is never stored with quantity 0, so
//! `contains` and `quantity > 0` always agree.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::ProductId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartMirror {
  items: BTreeMap<ProductId, u32>,
}

impl CartMirror {
  pub fn new() -> Self {
    Self::default()
  }

  /// Rebuild the mirror from a server cart snapshot, dropping zero entries.
  pub fn from_snapshot(snapshot: impl IntoIterator<Item = (ProductId, u32)>) -> Self {
    Self {
      items: snapshot.into_iter().filter(|(_, qty)| *qty > 0).collect(),
    }
  }

  pub fn quantity(&self, id: &ProductId) -> u32 {
    self.items.get(id).copied().unwrap_or(0)
  }

  pub fn contains(&self, id: &ProductId) -> bool {
    self.items.contains_key(id)
  }

  /// Set an absolute quantity; 0 removes the entry.
  pub fn set(&mut self, id: &ProductId, quantity: u32) {
    if quantity == 0 {
      self.items.remove(id);
    } else {
      self.items.insert(id.clone(), quantity);
    }
  }

  pub fn total_items(&self) -> u32 {
    self.items.values().sum()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&ProductId, u32)> {
    self.items.iter().map(|(id, qty)| (id, *qty))
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

#[derive(Debug, Error)]
pub enum BadgeCacheError {
  #[error("failed to read badge cache '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write badge cache '{path}': {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("corrupt badge cache '{path}': {source}")]
  Corrupt {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

#[derive(Debug, Serialize, Deserialize)]
struct BadgeRecord {
  count: u32,
}

/// Last displayed badge count, kept on disk purely for display continuity
/// between page loads. Never consulted for cart logic.
#[derive(Debug, Clone)]
pub struct BadgeCache {
  path: PathBuf,
}

impl BadgeCache {
  pub fn new(path: PathBuf) -> Self {
    Self { path }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// The cached count, 0 when nothing has been stored yet.
  pub fn load(&self) -> Result<u32, BadgeCacheError> {
    let content = match fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
      Err(source) => {
        return Err(BadgeCacheError::Read {
          path: self.path.clone(),
          source,
        });
      }
    };
    let record: BadgeRecord = serde_json::from_str(&content).map_err(|source| BadgeCacheError::Corrupt {
      path: self.path.clone(),
      source,
    })?;
    Ok(record.count)
  }

  pub fn store(&self, count: u32) -> Result<(), BadgeCacheError> {
    let write_err = |source| BadgeCacheError::Write {
      path: self.path.clone(),
      source,
    };

    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).map_err(write_err)?;
    }
    let json = serde_json::to_string(&BadgeRecord { count }).map_err(|e| write_err(io::Error::other(e)))?;
    fs::write(&self.path, json).map_err(write_err)?;
    debug!(count, path = %self.path.display(), "badge count cached");
    Ok(())
  }
}
