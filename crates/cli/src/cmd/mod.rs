mod address;
mod badge;
mod cart;
mod checkout;
mod login;
mod products;
mod quiz;
mod search;

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;
use tracing::debug;

use scoopjoy_lib::api::StoreClient;
use scoopjoy_lib::config::Config;
use scoopjoy_lib::mirror::BadgeCache;
use scoopjoy_lib::paths;
use scoopjoy_lib::session::PageSession;
use scoopjoy_lib::toast::Toast;
use scoopjoy_lib::view::PageModel;

use crate::output::{OutputFormat, print_json, print_page, print_toasts};

pub use address::{AddressAction, cmd_address};
pub use badge::cmd_badge;
pub use cart::{CartAction, cmd_cart};
pub use checkout::cmd_checkout;
pub use login::{LoginAction, cmd_login};
pub use products::cmd_products;
pub use quiz::cmd_quiz;
pub use search::cmd_search;

/// Resolved configuration and the backend client shared by every command.
pub struct Context {
  pub config: Config,
  pub client: StoreClient,
}

impl Context {
  /// Load config, then let command-line flags win over file and environment.
  pub fn new(config_path: Option<&Path>, base_url: Option<String>, cookie: Option<String>) -> Result<Self> {
    let mut config = Config::load(config_path).context("Failed to load config")?;
    if let Some(base_url) = base_url {
      config.base_url = base_url;
    }
    if let Some(cookie) = cookie {
      config.cookie = Some(cookie);
    }
    config.validate()?;
    debug!(base_url = %config.base_url, "using storefront");

    let client = StoreClient::from_config(&config).context("Failed to create storefront client")?;
    Ok(Self { config, client })
  }

  /// A fresh page session on `path`, caching the badge in the data dir.
  pub fn session(&self, path: &str) -> PageSession {
    let session = PageSession::new(self.client.clone(), &self.config, path);
    match paths::badge_file() {
      Some(file) => session.with_badge_cache(BadgeCache::new(file)),
      None => session,
    }
  }
}

pub fn runtime() -> Result<tokio::runtime::Runtime> {
  tokio::runtime::Runtime::new().context("Failed to create async runtime")
}

/// What a page-level command leaves behind: the page and any toasts still
/// on screen.
#[derive(Serialize)]
pub struct PageReport<'a, T: Serialize> {
  #[serde(flatten)]
  pub result: T,
  pub page: &'a PageModel,
  pub toasts: Vec<Toast>,
}

pub fn report<T: Serialize>(result: T, page: &PageModel, toasts: Vec<Toast>, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    print_json(&PageReport { result, page, toasts })
  } else {
    print_toasts(&toasts);
    print_page(page);
    Ok(())
  }
}
