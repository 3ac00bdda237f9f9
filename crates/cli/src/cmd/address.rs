use anyhow::{Result, bail};
use clap::Subcommand;
use serde_json::json;

use scoopjoy_lib::pages::profile::AddressBook;
use scoopjoy_lib::view::PageModel;

use crate::cmd::{Context, runtime};
use crate::output::{OutputFormat, print_json, print_navigation, print_stat, print_success, print_toasts};

const PROFILE_PATH: &str = "/profile/";

#[derive(Debug, Subcommand)]
pub enum AddressAction {
  /// Show an address as the edit form would prefill it
  Show { id: String },
  /// Delete an address
  Delete { id: String },
}

pub fn cmd_address(ctx: &Context, action: AddressAction, output: OutputFormat) -> Result<()> {
  let rt = runtime()?;
  rt.block_on(async {
    let session = ctx.session(PROFILE_PATH);

    match action {
      AddressAction::Show { id } => {
        let mut book = AddressBook::new([id.clone()]);
        let result = book.edit(&session, &id).await;
        let toasts = session.toaster().active();

        match result {
          Ok(form) if output.is_json() => print_json(form),
          Ok(form) => {
            println!("{}", form.mode.title());
            print_stat("Name", &form.fields.full_name);
            print_stat("Phone", &form.fields.phone);
            print_stat("Street", &form.fields.street);
            print_stat("City", &form.fields.city);
            print_stat("Pincode", &form.fields.pincode);
            Ok(())
          }
          Err(e) => {
            print_toasts(&toasts);
            Err(e.into())
          }
        }
      }
      AddressAction::Delete { id } => {
        let mut page = PageModel::new(PROFILE_PATH);
        let mut book = AddressBook::new([id.clone()]);
        let deleted = book.delete(&session, &mut page, &id).await;

        if output.is_json() {
          print_json(&json!({
            "deleted": deleted,
            "toasts": session.toaster().active(),
            "navigations": page.navigations,
          }))?;
        } else {
          if deleted {
            print_success(&format!("Deleted address {}", id));
          }
          print_toasts(&session.toaster().active());
          for navigation in &page.navigations {
            print_navigation(&navigation.location);
          }
        }

        if !deleted && page.navigations.is_empty() {
          bail!("address {} was not deleted", id);
        }
        Ok(())
      }
    }
  })
}
