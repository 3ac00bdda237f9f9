//! `scoop login`: the login page's OTP and password reset forms.

use anyhow::{Result, bail};
use clap::Subcommand;
use serde_json::json;

use scoopjoy_lib::consts::LOGIN_PATH;
use scoopjoy_lib::pages::auth::{AuthFlow, AuthForm, FormMessage};
use scoopjoy_lib::view::PageModel;

use crate::cmd::{Context, runtime};
use crate::output::{OutputFormat, print_error, print_json, print_navigation, print_success};

#[derive(Debug, Subcommand)]
pub enum LoginAction {
  /// Email a one-time password
  OtpSend { email: String },
  /// Log in with a one-time password sent earlier
  OtpVerify { email: String, otp: String },
  /// Email a password reset link
  Reset { email: String },
}

pub fn cmd_login(ctx: &Context, action: LoginAction, output: OutputFormat) -> Result<()> {
  let rt = runtime()?;
  let mut page = PageModel::new(LOGIN_PATH);

  let (message, form) = rt.block_on(async {
    match &action {
      LoginAction::OtpSend { email } => {
        let mut flow = AuthFlow::new();
        flow.show(AuthForm::OtpRequest);
        let message = flow.request_otp(&ctx.client, email).await.clone();
        (message, flow.visible())
      }
      LoginAction::OtpVerify { email, otp } => {
        let mut flow = AuthFlow::resume_verify(email.as_str());
        let message = flow.verify_otp(&ctx.client, &mut page, otp).await;
        (message, flow.visible())
      }
      LoginAction::Reset { email } => {
        let mut flow = AuthFlow::new();
        flow.show(AuthForm::ForgotPassword);
        let message = flow.request_password_reset(&ctx.client, email).await.clone();
        (message, flow.visible())
      }
    }
  });

  if output.is_json() {
    print_json(&json!({
      "form": form,
      "message": message,
      "navigations": page.navigations,
    }))?;
  } else {
    print_message(&message);
    for navigation in &page.navigations {
      print_navigation(&navigation.location);
    }
  }

  if !message.success {
    bail!("{}", message.text);
  }
  Ok(())
}

fn print_message(message: &FormMessage) {
  if message.success {
    print_success(&message.text);
  } else {
    print_error(&message.text);
  }
}
