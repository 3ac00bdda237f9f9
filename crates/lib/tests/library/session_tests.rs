use mockito::{Matcher, Server};
use scoopjoy_lib::api::StoreClient;
use scoopjoy_lib::catalog::ProductId;
use scoopjoy_lib::mirror::BadgeCache;
use scoopjoy_lib::money::Money;
use scoopjoy_lib::renderer::render_catalog;
use scoopjoy_lib::session::PageSession;
use scoopjoy_lib::view::{CardControl, NO_PRODUCTS_NOTICE, PageModel};
use tempfile::TempDir;

use super::common::{config, json_mock};

const STICKS: &str = r#"{"products": [
  {"id": 42, "name": "Mango Stick", "price": "49.00", "image": "mango.jpg", "category": "sticks"},
  {"id": 7, "name": "Kulfi Stick", "price": 25, "image": "kulfi.jpg", "category": "sticks"}
]}"#;

#[tokio::test]
async fn load_reads_auth_products_cart_and_count() {
  let mut server = Server::new_async().await;
  let config = config(&server);
  let _auth = json_mock(&mut server, "GET", "/api/check-auth/", 200, r#"{"is_authenticated": true}"#).await;
  let _products = server
    .mock("GET", "/api/products/")
    .match_query(Matcher::UrlEncoded("category".into(), "sticks".into()))
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(STICKS)
    .create_async()
    .await;
  let _items = json_mock(&mut server, "GET", "/cart/items/", 200, r#"{"cart": {"42": 2}}"#).await;
  let _count = json_mock(&mut server, "GET", "/cart/count/", 200, r#"{"count": 2}"#).await;

  let client = StoreClient::from_config(&config).unwrap();
  let session = PageSession::new(client, &config, "/sticks/").load().await;

  assert!(session.is_authenticated());
  assert_eq!(session.products().len(), 2);
  assert_eq!(session.cart().mirror().quantity(&ProductId::from(42)), 2);
  assert_eq!(session.initial_badge(), Some(2));

  let mut page = PageModel::new("/sticks/");
  render_catalog(&session, &mut page);
  assert_eq!(
    page.card(&ProductId::from(42)).unwrap().control,
    CardControl::Quantity { quantity: 2 }
  );
  assert_eq!(page.card(&ProductId::from(7)).unwrap().control, CardControl::AddButton);
  assert_eq!(page.badge, "2");
  assert_eq!(page.cart_bar.items, 2);
  assert_eq!(page.cart_bar.price, Money::from_paise(9800));
}

#[tokio::test]
async fn load_survives_backend_outage() {
  // No mocks: every request gets mockito's 501.
  let server = Server::new_async().await;
  let config = config(&server);
  let temp = TempDir::new().unwrap();
  let cache = BadgeCache::new(temp.path().join("badge.json"));
  cache.store(5).unwrap();

  let client = StoreClient::from_config(&config).unwrap();
  let session = PageSession::new(client, &config, "/")
    .with_badge_cache(cache)
    .load()
    .await;

  assert!(!session.is_authenticated());
  assert!(session.products().is_empty());
  assert!(session.cart().mirror().is_empty());
  assert_eq!(session.initial_badge(), Some(5));

  let mut page = PageModel::new("/");
  render_catalog(&session, &mut page);
  assert_eq!(page.notice.as_deref(), Some(NO_PRODUCTS_NOTICE));
  assert_eq!(page.badge, "5");
}

#[tokio::test]
async fn redirected_cart_reads_as_empty() {
  let mut server = Server::new_async().await;
  let config = config(&server);
  let _items = server
    .mock("GET", "/cart/items/")
    .with_status(302)
    .with_header("location", "/login/?next=/cart/items/")
    .create_async()
    .await;

  let client = StoreClient::from_config(&config).unwrap();
  assert!(client.cart_items().await.unwrap().is_empty());
  assert!(client.cart_items_strict().await.is_err());
}
