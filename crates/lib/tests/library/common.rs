//! Shared helpers for tests that run against a mock storefront backend.

use mockito::{Mock, ServerGuard};
use scoopjoy_lib::api::StoreClient;
use scoopjoy_lib::catalog::{ProductId, ProductSnapshot};
use scoopjoy_lib::config::Config;
use scoopjoy_lib::mirror::CartMirror;
use scoopjoy_lib::money::Money;
use scoopjoy_lib::session::PageSession;

/// Session cookie carrying an anti-forgery token.
pub const COOKIE: &str = "sessionid=s3ss10n; csrftoken=tok123";
pub const TOKEN: &str = "tok123";

/// Config pointed at `server`, with redirect delays short enough for tests.
pub fn config(server: &ServerGuard) -> Config {
  Config {
    base_url: server.url(),
    cookie: Some(COOKIE.to_string()),
    empty_cart_redirect_ms: 10,
    order_redirect_ms: 10,
    ..Config::default()
  }
}

pub fn product(id: u64, paise: i64) -> ProductSnapshot {
  ProductSnapshot {
    id: ProductId::from(id),
    name: format!("Scoop {}", id),
    price: Money::from_paise(paise),
    image: format!("scoop_{}.jpg", id),
    category: Some("sticks".to_string()),
  }
}

/// An authenticated session on `path` with `products` listed and `cart`
/// mirrored.
pub fn session(
  config: &Config,
  path: &str,
  products: Vec<ProductSnapshot>,
  cart: impl IntoIterator<Item = (ProductId, u32)>,
) -> PageSession {
  let client = StoreClient::from_config(config).unwrap();
  PageSession::new(client, config, path)
    .with_authenticated(true)
    .with_products(products)
    .with_cart(CartMirror::from_snapshot(cart))
}

/// A JSON mock on `method path` answering `status` with `body`.
pub async fn json_mock(server: &mut ServerGuard, method: &str, path: &str, status: usize, body: &str) -> Mock {
  server
    .mock(method, path)
    .with_status(status)
    .with_header("content-type", "application/json")
    .with_body(body)
    .create_async()
    .await
}

/// A mutation mock that insists on the anti-forgery header and expects
/// exactly one hit.
pub async fn mutation_mock(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
  server
    .mock("POST", path)
    .match_header("x-csrftoken", TOKEN)
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(body)
    .expect(1)
    .create_async()
    .await
}
