mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{AddressAction, CartAction, Context, LoginAction};
use output::OutputFormat;

/// scoop - command-line client for the ScoopJoy storefront
#[derive(Parser)]
#[command(name = "scoop")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Storefront origin, e.g. https://shop.example.com
  #[arg(long, global = true)]
  base_url: Option<String>,

  /// Raw Cookie header for the session (sessionid and csrftoken)
  #[arg(long, global = true)]
  cookie: Option<String>,

  /// Path to config.toml
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List products the way a listing page shows them
  Products {
    /// Page path; category pages filter the listing (e.g. /sticks/)
    #[arg(long, default_value = "/")]
    path: String,
  },

  /// Show or change the cart
  Cart {
    #[command(subcommand)]
    action: CartAction,
  },

  /// Live search suggestions for a query
  Search { query: String },

  /// OTP login and password reset
  Login {
    #[command(subcommand)]
    action: LoginAction,
  },

  /// Place an order for the current cart
  Checkout {
    /// Id of the saved delivery address
    address_id: String,
  },

  /// Saved addresses
  Address {
    #[command(subcommand)]
    action: AddressAction,
  },

  /// Find your flavour; answers are option numbers (1-4), one per question
  Quiz { answers: Vec<usize> },

  /// Show the cart badge count
  Badge,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "error" }));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let Cli {
    base_url,
    cookie,
    config,
    output,
    command,
    ..
  } = cli;
  let context = || Context::new(config.as_deref(), base_url.clone(), cookie.clone());

  match command {
    Commands::Products { path } => cmd::cmd_products(&context()?, &path, output),
    Commands::Cart { action } => cmd::cmd_cart(&context()?, action, output),
    Commands::Search { query } => cmd::cmd_search(&context()?, &query, output),
    Commands::Login { action } => cmd::cmd_login(&context()?, action, output),
    Commands::Checkout { address_id } => cmd::cmd_checkout(&context()?, &address_id, output),
    Commands::Address { action } => cmd::cmd_address(&context()?, action, output),
    Commands::Quiz { answers } => cmd::cmd_quiz(&answers, output),
    Commands::Badge => cmd::cmd_badge(&context()?, output),
  }
}
