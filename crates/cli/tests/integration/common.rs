//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use mockito::{Mock, Server, ServerGuard};
use tempfile::TempDir;

pub const COOKIE: &str = "sessionid=s3ss10n; csrftoken=tok123";

/// Isolated test environment.
///
/// Each test gets its own mock backend and temporary config and data
/// directories.
pub struct TestEnv {
  pub temp: TempDir,
  pub server: ServerGuard,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
      server: Server::new(),
    }
  }

  /// Data path for the badge cache.
  pub fn data_path(&self) -> PathBuf {
    let p = self.temp.path().join("data");
    std::fs::create_dir_all(&p).unwrap();
    p
  }

  pub fn config_path(&self) -> PathBuf {
    let p = self.temp.path().join("config");
    std::fs::create_dir_all(&p).unwrap();
    p
  }

  pub fn badge_file(&self) -> PathBuf {
    self.data_path().join("scoopjoy").join("badge.json")
  }

  /// Mock a JSON endpoint on the backend.
  pub fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
    self
      .server
      .mock(method, path)
      .match_query(mockito::Matcher::Any)
      .with_status(status)
      .with_header("content-type", "application/json")
      .with_body(body)
      .create()
  }

  /// Mock the fetches a listing page makes on load.
  pub fn mock_page_load(&mut self, products: &str, cart: &str, count: u32) -> Vec<Mock> {
    vec![
      self.mock_json("GET", "/api/check-auth/", 200, r#"{"is_authenticated": true}"#),
      self.mock_json("GET", "/api/products/", 200, products),
      self.mock_json("GET", "/cart/items/", 200, cart),
      self.mock_json("GET", "/cart/count/", 200, &format!(r#"{{"count": {}}}"#, count)),
    ]
  }

  /// Get a pre-configured Command for the scoop binary.
  ///
  /// Points it at the mock backend with a session cookie and isolates the
  /// config and data directories.
  pub fn scoop_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("scoop");
    cmd.env("SCOOPJOY_BASE_URL", self.server.url());
    cmd.env("SCOOPJOY_COOKIE", COOKIE);
    cmd.env("XDG_DATA_HOME", self.data_path());
    cmd.env("XDG_CONFIG_HOME", self.config_path());
    cmd.env("LOCALAPPDATA", self.data_path()); // For Windows
    cmd.env("APPDATA", self.config_path()); // For Windows
    cmd.env_remove("SCOOPJOY_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
