//! Login page forms: OTP login and password reset.
//!
//! Only one form is visible at a time. Switching forms clears every form
//! message. The OTP verify step reuses the email of the last successful
//! OTP request.

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::api::{ApiError, FormStatus, StoreClient};
use crate::consts::{HOME_PATH, LOGIN_REDIRECT_MS};
use crate::view::CartView;

pub const OTP_SENT: &str = "OTP sent to your email.";
pub const LOGIN_SUCCESS: &str = "Login successful! Redirecting...";
pub const RESET_SENT: &str = "Password reset link sent to your email.";
pub const GENERIC_ERROR: &str = "An error occurred.";
pub const INVALID_OTP: &str = "Invalid OTP.";
pub const REQUEST_FAILED: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthForm {
  Login,
  ForgotPassword,
  OtpRequest,
  OtpVerify,
}

/// Text shown under a form after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormMessage {
  pub text: String,
  pub success: bool,
}

impl FormMessage {
  fn ok(text: &str) -> Self {
    Self {
      text: text.to_string(),
      success: true,
    }
  }

  fn err(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      success: false,
    }
  }

  fn from_result(result: Result<FormStatus, ApiError>, ok: &str, fallback: &str) -> Self {
    match result {
      Ok(FormStatus::Ok) => Self::ok(ok),
      Ok(FormStatus::Error(message)) => Self::err(message.unwrap_or_else(|| fallback.to_string())),
      Err(e) => {
        warn!(error = %e, "auth form request failed");
        Self::err(REQUEST_FAILED)
      }
    }
  }
}

#[derive(Debug, Clone)]
pub struct AuthFlow {
  visible: AuthForm,
  last_email: Option<String>,
  message: Option<FormMessage>,
  redirect_delay: Duration,
}

impl Default for AuthFlow {
  fn default() -> Self {
    Self {
      visible: AuthForm::Login,
      last_email: None,
      message: None,
      redirect_delay: Duration::from_millis(LOGIN_REDIRECT_MS),
    }
  }
}

impl AuthFlow {
  pub fn new() -> Self {
    Self::default()
  }

  /// Start at the verify step for an email whose OTP was sent earlier.
  pub fn resume_verify(email: impl Into<String>) -> Self {
    Self {
      visible: AuthForm::OtpVerify,
      last_email: Some(email.into()),
      ..Self::default()
    }
  }

  pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
    self.redirect_delay = delay;
    self
  }

  pub fn visible(&self) -> AuthForm {
    self.visible
  }

  pub fn last_email(&self) -> Option<&str> {
    self.last_email.as_deref()
  }

  pub fn message(&self) -> Option<&FormMessage> {
    self.message.as_ref()
  }

  pub fn show(&mut self, form: AuthForm) {
    self.visible = form;
    self.message = None;
  }

  pub async fn request_password_reset(&mut self, client: &StoreClient, email: &str) -> &FormMessage {
    let result = client.password_reset(email).await;
    self.message.insert(FormMessage::from_result(result, RESET_SENT, GENERIC_ERROR))
  }

  /// On success the verify form is shown and `email` is remembered.
  pub async fn request_otp(&mut self, client: &StoreClient, email: &str) -> &FormMessage {
    let result = client.send_otp(email).await;
    let message = FormMessage::from_result(result, OTP_SENT, GENERIC_ERROR);
    if message.success {
      info!(email, "OTP requested");
      self.visible = AuthForm::OtpVerify;
      self.last_email = Some(email.to_string());
    }
    self.message.insert(message)
  }

  /// Verify `otp` for the remembered email. On success the page goes home
  /// after a short delay.
  pub async fn verify_otp<V: CartView>(&mut self, client: &StoreClient, view: &mut V, otp: &str) -> FormMessage {
    let email = self.last_email.clone().unwrap_or_default();
    let result = client.verify_otp(&email, otp).await;
    let message = FormMessage::from_result(result, LOGIN_SUCCESS, INVALID_OTP);
    self.message = Some(message.clone());

    if message.success {
      info!(email = %email, "OTP login succeeded");
      tokio::time::sleep(self.redirect_delay).await;
      view.navigate(HOME_PATH);
    }
    message
  }
}
