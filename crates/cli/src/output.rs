//! CLI output formatting utilities.
//!
//! Colored status lines, toasts, and a plain-text rendering of the page
//! model the library reconciles.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use scoopjoy_lib::toast::{Toast, ToastKind};
use scoopjoy_lib::view::{CardControl, PageModel};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Success toasts go to stdout, error toasts to stderr.
pub fn print_toasts(toasts: &[Toast]) {
  for toast in toasts {
    match toast.kind {
      ToastKind::Success => print_success(&toast.message),
      ToastKind::Error => print_error(&toast.message),
    }
  }
}

pub fn control_label(control: CardControl, enabled: bool) -> String {
  let label = match control {
    CardControl::AddButton => "[Add to Cart]".to_string(),
    CardControl::Quantity { quantity } => format!("[- {} +]", quantity),
  };
  if enabled { label } else { format!("{} (disabled)", label) }
}

pub fn print_navigation(location: &str) {
  println!(
    "{} {}",
    symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.cyan()),
    location
  );
}

pub fn print_page(page: &PageModel) {
  if let Some(notice) = &page.notice {
    print_info(notice);
  }

  for card in &page.cards {
    println!(
      "  {} {}  {}  {}",
      card.product.id.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      card.product.name,
      card.product.price,
      control_label(card.control, card.controls_enabled)
    );
  }

  for row in &page.rows {
    let suffix = if row.controls_enabled { "" } else { " (disabled)" };
    println!(
      "  {} {} x{}  {}{}",
      row.id.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      row.name,
      row.quantity,
      row.subtotal,
      suffix
    );
  }

  if page.cart_listing
    && let Some(total) = page.cart_total
  {
    print_stat("Total", &total.to_string());
  }
  if !page.cart_bar.hidden {
    print_stat(
      "Cart bar",
      &format!("{} · {}", page.cart_bar.items_label(), page.cart_bar.price_label()),
    );
  }
  print_stat("Badge", &page.badge);

  for navigation in &page.navigations {
    print_navigation(&navigation.location);
  }
}
