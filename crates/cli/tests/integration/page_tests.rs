use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn search_prints_hits_and_no_results() {
  let mut env = TestEnv::new();
  let _hits = env
    .server
    .mock("GET", "/api/search/")
    .match_query(mockito::Matcher::UrlEncoded("q".into(), "mango".into()))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"results": [{"name": "Mango Stick", "url": "/product/42/"}]}"#)
    .create();
  let _none = env
    .server
    .mock("GET", "/api/search/")
    .match_query(mockito::Matcher::UrlEncoded("q".into(), "durian".into()))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"results": []}"#)
    .create();

  env
    .scoop_cmd()
    .args(["search", "mango"])
    .assert()
    .success()
    .stdout(predicate::str::contains("/product/42/"))
    .stdout(predicate::str::contains("/search/?q=mango"));

  env
    .scoop_cmd()
    .args(["search", "durian"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No results found"));
}

#[test]
fn otp_send_reports_server_error() {
  let mut env = TestEnv::new();
  let _m = env.mock_json(
    "POST",
    "/auth/send-otp/",
    200,
    r#"{"status": "error", "error": "Email not registered"}"#,
  );

  env
    .scoop_cmd()
    .args(["login", "otp-send", "nobody@example.com"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Email not registered"));
}

#[test]
fn otp_verify_logs_in() {
  let mut env = TestEnv::new();
  let _m = env.mock_json("POST", "/auth/verify-otp/", 200, r#"{"status": "ok"}"#);

  env
    .scoop_cmd()
    .args(["login", "otp-verify", "asha@example.com", "482913"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Login successful! Redirecting..."))
    .stdout(predicate::str::contains("→ /"));
}

#[test]
fn checkout_places_order() {
  let mut env = TestEnv::new();
  let _auth = env.mock_json("GET", "/api/check-auth/", 200, r#"{"is_authenticated": true}"#);
  let _items = env.mock_json("GET", "/cart/items/", 200, r#"{"cart": {"42": 1}}"#);
  let _order = env.mock_json("POST", "/place-order/", 200, r#"{"success": true, "order_id": 101}"#);

  env
    .scoop_cmd()
    .args(["checkout", "3"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Order placed successfully!"))
    .stdout(predicate::str::contains("/orders/"));
}

#[test]
fn checkout_with_empty_cart_fails() {
  let mut env = TestEnv::new();
  let _auth = env.mock_json("GET", "/api/check-auth/", 200, r#"{"is_authenticated": true}"#);
  let _items = env.mock_json("GET", "/cart/items/", 200, r#"{"cart": {}}"#);

  env
    .scoop_cmd()
    .args(["checkout", "3"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Your cart is empty. Please add items to proceed."));
}

#[test]
fn address_show_prefills_fields() {
  let mut env = TestEnv::new();
  let _m = env.mock_json(
    "GET",
    "/get-address/3/",
    200,
    r#"{"full_name": "Asha Rao", "phone": "9876543210", "street": "12 MG Road", "city": "Bengaluru", "pincode": "560001"}"#,
  );

  env
    .scoop_cmd()
    .args(["address", "show", "3"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Edit Address"))
    .stdout(predicate::str::contains("Asha Rao"));
}

#[test]
fn address_delete_failure_is_reported() {
  let mut env = TestEnv::new();
  let _m = env.mock_json("DELETE", "/delete-address/4/", 200, r#"{"success": false}"#);

  env
    .scoop_cmd()
    .args(["address", "delete", "4"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to delete address."));
}
