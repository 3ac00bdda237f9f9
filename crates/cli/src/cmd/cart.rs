//! `scoop cart`: the cart page and the product card controls.

use anyhow::{Result, bail};
use clap::{Subcommand, ValueEnum};
use serde_json::json;

use scoopjoy_lib::api::QuantityAction;
use scoopjoy_lib::catalog::ProductId;
use scoopjoy_lib::consts::CART_PATH;
use scoopjoy_lib::renderer::{render_cart, render_catalog};
use scoopjoy_lib::sync::{CartSync, Dispatch};
use scoopjoy_lib::view::PageModel;

use crate::cmd::{Context, report, runtime};
use crate::output::OutputFormat;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum QuantityArg {
  Increment,
  Decrement,
}

impl From<QuantityArg> for QuantityAction {
  fn from(arg: QuantityArg) -> Self {
    match arg {
      QuantityArg::Increment => QuantityAction::Increment,
      QuantityArg::Decrement => QuantityAction::Decrement,
    }
  }
}

#[derive(Debug, Subcommand)]
pub enum CartAction {
  /// Show the cart page
  Show,
  /// Add one unit from a product card
  Add {
    id: String,
    /// Listing page the card is on
    #[arg(long, default_value = "/")]
    path: String,
  },
  /// Card `+`
  Inc {
    id: String,
    #[arg(long, default_value = "/")]
    path: String,
  },
  /// Card `-`
  Dec {
    id: String,
    #[arg(long, default_value = "/")]
    path: String,
  },
  /// Cart page `+`/`-`
  Update {
    id: String,
    #[arg(value_enum)]
    action: QuantityArg,
  },
}

/// Load the page the control lives on, perform the action, then report the
/// page as it stands after reconciliation.
///
/// Fails when a mutation was not confirmed by the backend.
pub fn cmd_cart(ctx: &Context, action: CartAction, output: OutputFormat) -> Result<()> {
  let rt = runtime()?;
  rt.block_on(async {
    let (path, on_cart_page) = match &action {
      CartAction::Show | CartAction::Update { .. } => (CART_PATH, true),
      CartAction::Add { path, .. } | CartAction::Inc { path, .. } | CartAction::Dec { path, .. } => {
        (path.as_str(), false)
      }
    };

    let mut session = ctx.session(path).load().await;
    let mut page = if on_cart_page {
      let mut page = PageModel::cart_page(path);
      render_cart(&session, &mut page);
      page
    } else {
      let mut page = PageModel::new(path);
      render_catalog(&session, &mut page);
      page
    };

    let dispatch = {
      let mut sync = CartSync::new(&mut session, &mut page);
      match &action {
        CartAction::Show => None,
        CartAction::Add { id, .. } => Some(sync.add(&ProductId::new(id.as_str())).await),
        CartAction::Inc { id, .. } => Some(sync.increment(&ProductId::new(id.as_str())).await),
        CartAction::Dec { id, .. } => Some(sync.decrement(&ProductId::new(id.as_str())).await),
        CartAction::Update { id, action } => Some(
          sync
            .update_quantity(&ProductId::new(id.as_str()), (*action).into())
            .await,
        ),
      }
    };

    report(
      json!({ "dispatch": dispatch }),
      &page,
      session.toaster().active(),
      output,
    )?;

    match dispatch {
      Some(Dispatch::Sent(outcome)) if !outcome.is_confirmed() => bail!("cart was not updated"),
      Some(Dispatch::Blocked(_)) => bail!("cart was not updated"),
      _ => Ok(()),
    }
  })
}
