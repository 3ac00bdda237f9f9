//! Saved addresses on the profile page.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::api::{AddressFields, ApiError};
use crate::session::PageSession;
use crate::view::CartView;

pub const FETCH_FAILED: &str = "Failed to fetch address data.";
pub const DELETE_FAILED: &str = "Failed to delete address.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
  Add,
  Edit,
}

impl FormMode {
  pub fn title(self) -> &'static str {
    match self {
      FormMode::Add => "Add Address",
      FormMode::Edit => "Edit Address",
    }
  }
}

/// The add/edit address form while it is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressForm {
  pub mode: FormMode,
  pub address_id: Option<String>,
  pub fields: AddressFields,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AddressBook {
  cards: Vec<String>,
  form: Option<AddressForm>,
}

impl AddressBook {
  /// A profile page listing the given saved address ids.
  pub fn new(cards: impl IntoIterator<Item = String>) -> Self {
    Self {
      cards: cards.into_iter().collect(),
      form: None,
    }
  }

  pub fn cards(&self) -> &[String] {
    &self.cards
  }

  pub fn form(&self) -> Option<&AddressForm> {
    self.form.as_ref()
  }

  /// Whether the saved list is visible; it hides while a form is open.
  pub fn list_visible(&self) -> bool {
    self.form.is_none()
  }

  pub fn open_new(&mut self) {
    self.form = Some(AddressForm {
      mode: FormMode::Add,
      address_id: None,
      fields: AddressFields::default(),
    });
  }

  pub fn close_form(&mut self) {
    self.form = None;
  }

  /// Open the edit form prefilled from the backend. On failure the form
  /// stays closed and an error toast is shown.
  pub async fn edit(&mut self, session: &PageSession, id: &str) -> Result<&AddressForm, ApiError> {
    debug!(address_id = id, "edit clicked");
    match session.client().get_address(id).await {
      Ok(fields) => Ok(self.form.insert(AddressForm {
        mode: FormMode::Edit,
        address_id: Some(id.to_string()),
        fields,
      })),
      Err(e) => {
        error!(address_id = id, error = %e, "failed to fetch address");
        session.toaster().error(FETCH_FAILED);
        Err(e)
      }
    }
  }

  /// Delete one saved address. Returns whether its card was removed.
  ///
  /// A redirect reply means the backend handled the request as a page
  /// submission; the page follows it.
  pub async fn delete<V: CartView>(&mut self, session: &PageSession, view: &mut V, id: &str) -> bool {
    match session.client().delete_address(id).await {
      Ok(true) => {
        self.cards.retain(|card| card != id);
        info!(address_id = id, "address deleted");
        true
      }
      Ok(false) => {
        session.toaster().error(DELETE_FAILED);
        false
      }
      Err(ApiError::Redirected { location }) => {
        view.navigate(&location);
        false
      }
      Err(e) => {
        error!(address_id = id, error = %e, "failed to delete address");
        session.toaster().error(DELETE_FAILED);
        false
      }
    }
  }
}
