use anyhow::{Result, bail};

use scoopjoy_lib::consts::CHECKOUT_PATH;
use scoopjoy_lib::pages::checkout::{Checkout, OrderOutcome, SelectedAddress};
use scoopjoy_lib::view::PageModel;

use crate::cmd::{Context, report, runtime};
use crate::output::OutputFormat;

pub fn cmd_checkout(ctx: &Context, address_id: &str, output: OutputFormat) -> Result<()> {
  let rt = runtime()?;
  rt.block_on(async {
    let session = ctx.session(CHECKOUT_PATH);
    let mut page = PageModel::new(CHECKOUT_PATH);

    let mut checkout = Checkout::default();
    checkout.select(SelectedAddress::new(address_id, None, ""));
    let outcome = checkout.place_order(&session, &mut page).await;

    report(&outcome, &page, session.toaster().active(), output)?;
    match outcome {
      OrderOutcome::Placed { .. } => Ok(()),
      _ => bail!("order was not placed"),
    }
  })
}
