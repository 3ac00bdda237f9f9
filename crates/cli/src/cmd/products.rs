use anyhow::Result;
use serde_json::json;

use scoopjoy_lib::renderer::render_catalog;
use scoopjoy_lib::view::PageModel;

use crate::cmd::{Context, report, runtime};
use crate::output::OutputFormat;

pub fn cmd_products(ctx: &Context, path: &str, output: OutputFormat) -> Result<()> {
  let rt = runtime()?;
  rt.block_on(async {
    let session = ctx.session(path).load().await;
    let mut page = PageModel::new(path);
    render_catalog(&session, &mut page);

    report(
      json!({ "authenticated": session.is_authenticated() }),
      &page,
      session.toaster().active(),
      output,
    )
  })
}
