use anyhow::Result;
use owo_colors::{OwoColorize, Stream};

use scoopjoy_lib::pages::search::{NO_RESULTS, Suggestions, submit_location, suggest};

use crate::cmd::{Context, runtime};
use crate::output::{OutputFormat, print_info, print_json, print_stat};

pub fn cmd_search(ctx: &Context, query: &str, output: OutputFormat) -> Result<()> {
  let rt = runtime()?;
  let suggestions = rt.block_on(suggest(&ctx.client, query));

  if output.is_json() {
    return print_json(&suggestions);
  }

  match &suggestions {
    Suggestions::Cleared => print_info("No suggestions"),
    Suggestions::NoResults => print_info(NO_RESULTS),
    Suggestions::Hits(hits) => {
      for hit in hits {
        println!(
          "  {}  {}",
          hit.name,
          hit.url.if_supports_color(Stream::Stdout, |s| s.dimmed())
        );
      }
    }
  }
  if let Some(location) = submit_location(query) {
    print_stat("All results", &location);
  }
  Ok(())
}
