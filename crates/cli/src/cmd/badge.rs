use anyhow::Result;
use serde_json::json;
use tracing::warn;

use scoopjoy_lib::consts::HOME_PATH;
use scoopjoy_lib::mirror::BadgeCache;
use scoopjoy_lib::paths;
use scoopjoy_lib::view::PageModel;

use crate::cmd::{Context, runtime};
use crate::output::{OutputFormat, print_json, print_stat, print_warning};

/// Fetch the cart count the header badge shows, falling back to the last
/// cached value when the backend is unreachable.
pub fn cmd_badge(ctx: &Context, output: OutputFormat) -> Result<()> {
  let rt = runtime()?;
  let fetched = rt.block_on(ctx.client.cart_count());

  let (count, cached) = match fetched {
    Ok(count) => {
      let session = ctx.session(HOME_PATH);
      session.set_badge(&mut PageModel::new(HOME_PATH), count);
      (count, false)
    }
    Err(e) => {
      warn!(error = %e, "failed to fetch cart count");
      let cached = paths::badge_file()
        .map(BadgeCache::new)
        .and_then(|cache| cache.load().ok())
        .unwrap_or(0);
      (cached, true)
    }
  };

  if output.is_json() {
    print_json(&json!({ "count": count, "cached": cached }))
  } else {
    if cached {
      print_warning("Storefront unreachable, showing the last known count");
    }
    let suffix = if cached { " (cached)" } else { "" };
    print_stat("Badge", &format!("{}{}", count, suffix));
    Ok(())
  }
}
