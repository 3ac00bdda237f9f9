use std::time::Duration;

use mockito::{Matcher, Server};
use scoopjoy_lib::api::StoreClient;
use scoopjoy_lib::pages::auth::{AuthFlow, AuthForm, INVALID_OTP, LOGIN_SUCCESS, OTP_SENT};
use scoopjoy_lib::pages::checkout::{CART_EMPTY, Checkout, ORDER_PLACED, OrderOutcome, SelectedAddress};
use scoopjoy_lib::pages::profile::{AddressBook, DELETE_FAILED, FETCH_FAILED, FormMode};
use scoopjoy_lib::pages::search::{Suggestions, suggest};
use scoopjoy_lib::session::PageSession;
use scoopjoy_lib::view::PageModel;
use serde_json::json;

use super::common::{TOKEN, config, json_mock};

fn page_session(server: &mockito::ServerGuard) -> PageSession {
  let config = config(server);
  let client = StoreClient::from_config(&config).unwrap();
  PageSession::new(client, &config, "/checkout/")
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn search_suggestions() {
  let mut server = Server::new_async().await;
  let client = StoreClient::from_config(&config(&server)).unwrap();
  let _hits = server
    .mock("GET", "/api/search/")
    .match_query(Matcher::UrlEncoded("q".into(), "mango".into()))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"results": [{"name": "Mango Stick", "url": "/product/42/"}]}"#)
    .create_async()
    .await;
  let _none = server
    .mock("GET", "/api/search/")
    .match_query(Matcher::UrlEncoded("q".into(), "durian".into()))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"results": []}"#)
    .create_async()
    .await;

  match suggest(&client, " mango ").await {
    Suggestions::Hits(hits) => {
      assert_eq!(hits.len(), 1);
      assert_eq!(hits[0].url, "/product/42/");
    }
    other => panic!("expected hits, got {:?}", other),
  }
  assert_eq!(suggest(&client, "durian").await, Suggestions::NoResults);
  assert_eq!(suggest(&client, "broken").await, Suggestions::Cleared);
}

// =============================================================================
// Login forms
// =============================================================================

#[tokio::test]
async fn otp_login_flow() {
  let mut server = Server::new_async().await;
  let client = StoreClient::from_config(&config(&server)).unwrap();
  let _send = server
    .mock("POST", "/auth/send-otp/")
    .match_header("x-csrftoken", TOKEN)
    .match_body(Matcher::Json(json!({"email": "asha@example.com"})))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"status": "ok"}"#)
    .create_async()
    .await;
  let _wrong = server
    .mock("POST", "/auth/verify-otp/")
    .match_body(Matcher::Json(json!({"email": "asha@example.com", "otp": "000000"})))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"status": "error"}"#)
    .create_async()
    .await;
  let _right = server
    .mock("POST", "/auth/verify-otp/")
    .match_body(Matcher::Json(json!({"email": "asha@example.com", "otp": "482913"})))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"status": "ok"}"#)
    .create_async()
    .await;

  let mut flow = AuthFlow::new().with_redirect_delay(Duration::from_millis(5));
  flow.show(AuthForm::OtpRequest);

  let sent = flow.request_otp(&client, "asha@example.com").await;
  assert!(sent.success);
  assert_eq!(sent.text, OTP_SENT);
  assert_eq!(flow.visible(), AuthForm::OtpVerify);
  assert_eq!(flow.last_email(), Some("asha@example.com"));

  let mut page = PageModel::new("/login/");
  let wrong = flow.verify_otp(&client, &mut page, "000000").await;
  assert_eq!(wrong.text, INVALID_OTP);
  assert!(page.navigations.is_empty());

  let right = flow.verify_otp(&client, &mut page, "482913").await;
  assert_eq!(right.text, LOGIN_SUCCESS);
  assert_eq!(page.last_navigation(), Some("/"));
}

#[tokio::test]
async fn password_reset_reports_server_error() {
  let mut server = Server::new_async().await;
  let client = StoreClient::from_config(&config(&server)).unwrap();
  let _reset = json_mock(
    &mut server,
    "POST",
    "/auth/password/reset/",
    400,
    r#"{"status": "error", "error": "No account with that email"}"#,
  )
  .await;

  let mut flow = AuthFlow::new();
  flow.show(AuthForm::ForgotPassword);
  let message = flow.request_password_reset(&client, "nobody@example.com").await;

  assert!(!message.success);
  assert_eq!(message.text, "No account with that email");
}

// =============================================================================
// Checkout
// =============================================================================

fn checkout() -> Checkout {
  let mut checkout = Checkout::default();
  checkout.select(SelectedAddress::new("3", Some("Home"), "12 MG Road, Bengaluru 560001"));
  checkout
}

#[tokio::test]
async fn order_is_placed_and_page_moves_to_orders() {
  let mut server = Server::new_async().await;
  let _auth = json_mock(&mut server, "GET", "/api/check-auth/", 200, r#"{"is_authenticated": true}"#).await;
  let _items = json_mock(&mut server, "GET", "/cart/items/", 200, r#"{"cart": {"42": 1}}"#).await;
  let order = server
    .mock("POST", "/place-order/")
    .match_header("x-csrftoken", TOKEN)
    .match_body(Matcher::UrlEncoded("selected_address".into(), "3".into()))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"success": true, "order_id": 101}"#)
    .expect(1)
    .create_async()
    .await;

  let session = page_session(&server);
  let mut page = PageModel::new("/checkout/");
  let outcome = checkout().place_order(&session, &mut page).await;

  assert_eq!(outcome, OrderOutcome::Placed { order_id: Some(101) });
  assert_eq!(session.toaster().last().unwrap().message, ORDER_PLACED);
  assert_eq!(page.last_navigation(), Some("/orders/"));
  order.assert_async().await;
}

#[tokio::test]
async fn empty_cart_stops_before_ordering() {
  let mut server = Server::new_async().await;
  let _auth = json_mock(&mut server, "GET", "/api/check-auth/", 200, r#"{"is_authenticated": true}"#).await;
  let _items = json_mock(&mut server, "GET", "/cart/items/", 200, r#"{"cart": {}}"#).await;
  let order = server.mock("POST", "/place-order/").expect(0).create_async().await;

  let session = page_session(&server);
  let mut page = PageModel::new("/checkout/");
  let outcome = checkout().place_order(&session, &mut page).await;

  assert_eq!(outcome, OrderOutcome::CartEmpty);
  assert_eq!(session.toaster().last().unwrap().message, CART_EMPTY);
  assert_eq!(page.last_navigation(), Some("/cart/"));
  order.assert_async().await;
}

#[tokio::test]
async fn expired_session_goes_to_login() {
  let mut server = Server::new_async().await;
  let _auth = json_mock(&mut server, "GET", "/api/check-auth/", 200, r#"{"is_authenticated": false}"#).await;

  let session = page_session(&server);
  let mut page = PageModel::new("/checkout/");
  let outcome = checkout().place_order(&session, &mut page).await;

  assert_eq!(outcome, OrderOutcome::SessionExpired);
  assert_eq!(page.last_navigation(), Some("/login/?next=/checkout/"));
}

#[tokio::test]
async fn rejected_order_shows_server_error() {
  let mut server = Server::new_async().await;
  let _auth = json_mock(&mut server, "GET", "/api/check-auth/", 200, r#"{"is_authenticated": true}"#).await;
  let _items = json_mock(&mut server, "GET", "/cart/items/", 200, r#"{"cart": {"42": 1}}"#).await;
  let _order = json_mock(&mut server, "POST", "/place-order/", 400, r#"{"error": "Address not found"}"#).await;

  let session = page_session(&server);
  let mut page = PageModel::new("/checkout/");
  let outcome = checkout().place_order(&session, &mut page).await;

  assert_eq!(
    outcome,
    OrderOutcome::Failed {
      message: "Address not found".to_string()
    }
  );
  assert_eq!(
    session.toaster().last().unwrap().message,
    "Failed to place order: Address not found"
  );
  assert!(page.navigations.is_empty());
}

// =============================================================================
// Profile addresses
// =============================================================================

#[tokio::test]
async fn edit_prefills_form_and_reports_missing_address() {
  let mut server = Server::new_async().await;
  let _found = json_mock(
    &mut server,
    "GET",
    "/get-address/3/",
    200,
    r#"{"full_name": "Asha Rao", "phone": "9876543210", "street": "12 MG Road", "city": "Bengaluru", "pincode": "560001"}"#,
  )
  .await;
  let _missing = json_mock(&mut server, "GET", "/get-address/9/", 200, r#"{"error": "Address not found"}"#).await;

  let session = page_session(&server);
  let mut book = AddressBook::new(["3".to_string()]);

  let form = book.edit(&session, "3").await.unwrap();
  assert_eq!(form.mode, FormMode::Edit);
  assert_eq!(form.fields.full_name, "Asha Rao");
  assert_eq!(form.address_id.as_deref(), Some("3"));
  assert!(!book.list_visible());

  book.close_form();
  assert!(book.edit(&session, "9").await.is_err());
  assert!(book.form().is_none());
  assert_eq!(session.toaster().last().unwrap().message, FETCH_FAILED);
}

#[tokio::test]
async fn delete_removes_card_only_on_success() {
  let mut server = Server::new_async().await;
  let _ok = server
    .mock("DELETE", "/delete-address/3/")
    .match_header("x-csrftoken", TOKEN)
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"success": true}"#)
    .create_async()
    .await;
  let _refused = json_mock(&mut server, "DELETE", "/delete-address/4/", 200, r#"{"success": false}"#).await;

  let session = page_session(&server);
  let mut page = PageModel::new("/profile/");
  let mut book = AddressBook::new(["3".to_string(), "4".to_string()]);

  assert!(book.delete(&session, &mut page, "3").await);
  assert_eq!(book.cards(), ["4".to_string()]);

  assert!(!book.delete(&session, &mut page, "4").await);
  assert_eq!(book.cards(), ["4".to_string()]);
  assert_eq!(session.toaster().last().unwrap().message, DELETE_FAILED);
}
