use predicates::prelude::*;

use super::common::TestEnv;

const PRODUCTS: &str = r#"{"products": [
  {"id": 42, "name": "Mango Stick", "price": "49.00", "category": "sticks"},
  {"id": 7, "name": "Kulfi Cone", "price": "25.00", "category": "cones"}
]}"#;

#[test]
fn products_lists_cards_with_cart_state() {
  let mut env = TestEnv::new();
  let _page = env.mock_page_load(PRODUCTS, r#"{"cart": {"42": 2}}"#, 2);

  env
    .scoop_cmd()
    .arg("products")
    .assert()
    .success()
    .stdout(predicate::str::contains("Mango Stick"))
    .stdout(predicate::str::contains("[- 2 +]"))
    .stdout(predicate::str::contains("[Add to Cart]"))
    .stdout(predicate::str::contains("Badge: 2"));
}

#[test]
fn cart_add_confirms_and_caches_badge() {
  let mut env = TestEnv::new();
  let _page = env.mock_page_load(PRODUCTS, r#"{"cart": {}}"#, 0);
  let add = env
    .server
    .mock("POST", "/cart/add/42/")
    .match_header("x-csrftoken", "tok123")
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(r#"{"message": "Added", "cart_count": 1, "price": "49.00"}"#)
    .expect(1)
    .create();

  env
    .scoop_cmd()
    .args(["cart", "add", "42"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Item added to cart!"))
    .stdout(predicate::str::contains("[- 1 +]"))
    .stdout(predicate::str::contains("Badge: 1"));

  add.assert();
  let cached = std::fs::read_to_string(env.badge_file()).unwrap();
  assert!(cached.contains("\"count\":1") || cached.contains("\"count\": 1"));
}

#[test]
fn cart_update_error_disables_row_and_fails() {
  let mut env = TestEnv::new();
  let _page = env.mock_page_load(PRODUCTS, r#"{"cart": {"42": 2}}"#, 2);
  let _m = env.mock_json("POST", "/cart/update/42/", 200, r#"{"error": "Only 2 left in stock"}"#);

  env
    .scoop_cmd()
    .args(["cart", "update", "42", "increment"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to update cart: Only 2 left in stock"))
    .stdout(predicate::str::contains("(disabled)"));
}

#[test]
fn cart_redirect_navigates_to_login() {
  let mut env = TestEnv::new();
  let _page = env.mock_page_load(PRODUCTS, r#"{"cart": {"42": 1}}"#, 1);
  let _m = env
    .server
    .mock("POST", "/cart/update/42/")
    .with_status(302)
    .with_header("location", "/login/?next=/cart/")
    .create();

  env
    .scoop_cmd()
    .args(["-o", "json", "cart", "update", "42", "decrement"])
    .assert()
    .failure()
    .stdout(predicate::str::contains("auth_redirect"))
    .stdout(predicate::str::contains("/login/?next=/cart/"));
}

#[test]
fn cart_without_token_sends_nothing() {
  let mut env = TestEnv::new();
  let _page = env.mock_page_load(PRODUCTS, r#"{"cart": {}}"#, 0);
  let add = env.server.mock("POST", "/cart/add/42/").expect(0).create();

  env
    .scoop_cmd()
    .env("SCOOPJOY_COOKIE", "sessionid=s3ss10n")
    .args(["cart", "add", "42"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Session error"));

  add.assert();
}

#[test]
fn badge_falls_back_to_cache() {
  let env = TestEnv::new();
  let file = env.badge_file();
  std::fs::create_dir_all(file.parent().unwrap()).unwrap();
  std::fs::write(&file, r#"{"count": 4}"#).unwrap();

  env
    .scoop_cmd()
    .arg("badge")
    .assert()
    .success()
    .stdout(predicate::str::contains("Badge: 4 (cached)"));
}
