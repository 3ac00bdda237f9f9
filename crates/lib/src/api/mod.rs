//! HTTP client for the storefront backend.
//!
//! Redirects are never followed: the backend answers unauthenticated
//! requests with a redirect to the login page, and callers need to see that
//! redirect to treat it as an expired session rather than a page of HTML.
//!
//! Every state-mutating request carries the anti-forgery token in the
//! `X-CSRFToken` header.

pub mod types;

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::{Category, ProductId, ProductSnapshot};
use crate::config::Config;
use crate::consts::{CSRF_HEADER, LOGIN_PATH};
use crate::cookie::CsrfToken;

pub use types::{
  AddressFields, CartMutationReply, CartSnapshot, FormStatus, OrderReply, QuantityAction, SearchHit,
};
use types::{
  AuthReply, CartItemsReply, CountReply, DeleteReply, EmailBody, FormReply, OtpBody, ProductsReply, SearchReply,
  UpdateBody,
};

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("invalid base url '{url}': {source}")]
  BaseUrl {
    url: String,
    #[source]
    source: url::ParseError,
  },

  #[error("invalid request path '{path}': {source}")]
  Path {
    path: String,
    #[source]
    source: url::ParseError,
  },

  #[error("cookie header contains invalid characters")]
  InvalidCookie(#[source] header::InvalidHeaderValue),

  #[error("failed to build http client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("request to '{url}' failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("invalid response from '{url}': {source}")]
  Decode {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("'{url}' returned HTTP {status}")]
  Status {
    url: String,
    status: u16,
    message: Option<String>,
  },

  #[error("session expired, redirected to '{location}'")]
  Redirected { location: String },

  #[error("anti-forgery token missing from session cookies")]
  MissingCsrfToken,
}

/// A classified backend reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
  /// 2xx with a decoded body.
  Body(T),
  /// Any 3xx. `location` is a site-relative path when the target is on the
  /// backend's own origin.
  Redirect { location: String },
  /// Non-2xx, non-3xx. `message` is the body's `error` field when present.
  Status { code: u16, message: Option<String> },
}

impl<T> Reply<T> {
  /// Collapse everything but a 2xx body into an error.
  pub fn into_body(self, url: &str) -> Result<T, ApiError> {
    match self {
      Reply::Body(body) => Ok(body),
      Reply::Redirect { location } => Err(ApiError::Redirected { location }),
      Reply::Status { code, message } => Err(ApiError::Status {
        url: url.to_string(),
        status: code,
        message,
      }),
    }
  }
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
  #[serde(default)]
  error: Option<String>,
}

/// Client for one storefront session.
#[derive(Debug, Clone)]
pub struct StoreClient {
  http: reqwest::Client,
  base: Url,
  csrf: Option<CsrfToken>,
}

impl StoreClient {
  pub fn from_config(config: &Config) -> Result<Self, ApiError> {
    Self::new(&config.base_url, config.cookie.as_deref(), config.request_timeout())
  }

  /// Create a client for `base_url`, sending `cookie` as the `Cookie` header
  /// on every request. The anti-forgery token is read from the same header
  /// once, here.
  pub fn new(base_url: &str, cookie: Option<&str>, timeout: Option<Duration>) -> Result<Self, ApiError> {
    let base = Url::parse(base_url).map_err(|source| ApiError::BaseUrl {
      url: base_url.to_string(),
      source,
    })?;

    let mut headers = HeaderMap::new();
    headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
    if let Some(cookie) = cookie.filter(|c| !c.is_empty()) {
      headers.insert(
        header::COOKIE,
        HeaderValue::from_str(cookie).map_err(ApiError::InvalidCookie)?,
      );
    }

    let mut builder = reqwest::Client::builder()
      .redirect(reqwest::redirect::Policy::none())
      .default_headers(headers);
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    let http = builder.build().map_err(ApiError::Client)?;

    let csrf = cookie.and_then(CsrfToken::from_cookie_header);
    if csrf.is_none() {
      debug!("no anti-forgery token in session cookies");
    }

    Ok(Self { http, base, csrf })
  }

  pub fn csrf(&self) -> Option<&CsrfToken> {
    self.csrf.as_ref()
  }

  pub fn base_url(&self) -> &Url {
    &self.base
  }

  fn url(&self, path: &str) -> Result<Url, ApiError> {
    self.base.join(path).map_err(|source| ApiError::Path {
      path: path.to_string(),
      source,
    })
  }

  fn csrf_header(&self) -> Result<&str, ApiError> {
    self.csrf.as_ref().map(CsrfToken::as_str).ok_or(ApiError::MissingCsrfToken)
  }

  /// Turn a redirect target into the location a page would navigate to.
  fn site_location(&self, target: &Url) -> String {
    if target.origin() == self.base.origin() {
      match target.query() {
        Some(query) => format!("{}?{}", target.path(), query),
        None => target.path().to_string(),
      }
    } else {
      target.to_string()
    }
  }

  async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> Result<Reply<T>, ApiError> {
    let response = request.send().await.map_err(|source| ApiError::Transport {
      url: url.to_string(),
      source,
    })?;
    let status = response.status();
    debug!(url = %url, status = %status, "backend replied");

    if status.is_redirection() {
      let target = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|location| url.join(location).ok());
      let location = match target {
        Some(target) => self.site_location(&target),
        None => login_location(url.path()),
      };
      warn!(url = %url, location = %location, "request redirected, treating as expired session");
      return Ok(Reply::Redirect { location });
    }

    if !status.is_success() {
      let message = response.json::<ErrorBody>().await.ok().and_then(|body| body.error);
      warn!(url = %url, status = %status, message = ?message, "backend returned error status");
      return Ok(Reply::Status {
        code: status.as_u16(),
        message,
      });
    }

    let body = response.json::<T>().await.map_err(|source| ApiError::Decode {
      url: url.to_string(),
      source,
    })?;
    Ok(Reply::Body(body))
  }

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Reply<T>, ApiError> {
    let url = self.url(path)?;
    self.send(self.http.get(url.clone()), &url).await
  }

  async fn mutate<T: DeserializeOwned, B: Serialize>(
    &self,
    method: Method,
    path: &str,
    body: Option<&B>,
  ) -> Result<Reply<T>, ApiError> {
    let token = self.csrf_header()?;
    let url = self.url(path)?;
    let mut request = self.http.request(method, url.clone()).header(CSRF_HEADER, token);
    if let Some(body) = body {
      request = request.json(body);
    }
    self.send(request, &url).await
  }

  /// `GET /cart/count/`. A missing count reads as 0.
  pub async fn cart_count(&self) -> Result<u32, ApiError> {
    const PATH: &str = "/cart/count/";
    let reply: CountReply = self.get(PATH).await?.into_body(PATH)?;
    Ok(reply.count.unwrap_or(0))
  }

  /// `GET /cart/items/`. A redirect (anonymous session) reads as an empty cart.
  pub async fn cart_items(&self) -> Result<CartSnapshot, ApiError> {
    const PATH: &str = "/cart/items/";
    match self.get::<CartItemsReply>(PATH).await? {
      Reply::Redirect { location } => {
        debug!(location = %location, "cart items redirected, treating cart as empty");
        Ok(CartSnapshot::new())
      }
      reply => Ok(reply.into_body(PATH)?.cart.unwrap_or_default()),
    }
  }

  /// Like [`cart_items`](Self::cart_items), but surfaces the redirect so
  /// callers that must distinguish an expired session can do so.
  pub async fn cart_items_strict(&self) -> Result<CartSnapshot, ApiError> {
    const PATH: &str = "/cart/items/";
    let reply: CartItemsReply = self.get(PATH).await?.into_body(PATH)?;
    Ok(reply.cart.unwrap_or_default())
  }

  /// `POST /cart/add/{id}/` with an empty JSON body.
  pub async fn add_to_cart(&self, id: &ProductId) -> Result<Reply<CartMutationReply>, ApiError> {
    let path = format!("/cart/add/{}/", id);
    debug!(product_id = %id, "adding to cart");
    self
      .mutate(Method::POST, &path, Some(&serde_json::Map::new()))
      .await
  }

  /// `POST /cart/update/{id}/` with `{"action": ...}`.
  pub async fn update_quantity(
    &self,
    id: &ProductId,
    action: QuantityAction,
  ) -> Result<Reply<CartMutationReply>, ApiError> {
    let path = format!("/cart/update/{}/", id);
    debug!(product_id = %id, action = action.as_str(), "updating cart quantity");
    self.mutate(Method::POST, &path, Some(&UpdateBody { action })).await
  }

  /// `GET /api/products/`, optionally filtered by category.
  pub async fn products(&self, category: Option<Category>) -> Result<Vec<ProductSnapshot>, ApiError> {
    let path = match category {
      Some(category) => format!("/api/products/?category={}", category),
      None => "/api/products/".to_string(),
    };
    let reply: ProductsReply = self.get(&path).await?.into_body(&path)?;
    Ok(reply.products)
  }

  /// `GET /api/check-auth/`
  pub async fn check_auth(&self) -> Result<bool, ApiError> {
    const PATH: &str = "/api/check-auth/";
    let reply: AuthReply = self.get(PATH).await?.into_body(PATH)?;
    Ok(reply.is_authenticated)
  }

  /// `GET /api/search/?q=`
  pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ApiError> {
    let path = format!("/api/search/?q={}", urlencoding::encode(query));
    let reply: SearchReply = self.get(&path).await?.into_body(&path)?;
    Ok(reply.results)
  }

  async fn submit_form<B: Serialize>(&self, path: &str, body: &B) -> Result<FormStatus, ApiError> {
    match self.mutate::<FormReply, B>(Method::POST, path, Some(body)).await? {
      Reply::Body(reply) => Ok(reply.into()),
      Reply::Status { message, .. } => Ok(FormStatus::Error(message)),
      Reply::Redirect { location } => Err(ApiError::Redirected { location }),
    }
  }

  /// `POST /auth/send-otp/`
  pub async fn send_otp(&self, email: &str) -> Result<FormStatus, ApiError> {
    self.submit_form("/auth/send-otp/", &EmailBody { email }).await
  }

  /// `POST /auth/verify-otp/`
  pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<FormStatus, ApiError> {
    self.submit_form("/auth/verify-otp/", &OtpBody { email, otp }).await
  }

  /// `POST /auth/password/reset/`
  pub async fn password_reset(&self, email: &str) -> Result<FormStatus, ApiError> {
    self.submit_form("/auth/password/reset/", &EmailBody { email }).await
  }

  /// `GET /get-address/{id}/`. A body carrying `error` is reported as a
  /// 404-style status error.
  pub async fn get_address(&self, id: &str) -> Result<AddressFields, ApiError> {
    let path = format!("/get-address/{}/", id);
    let fields: AddressFields = self.get(&path).await?.into_body(&path)?;
    match fields.error {
      Some(message) => Err(ApiError::Status {
        url: path,
        status: StatusCode::NOT_FOUND.as_u16(),
        message: Some(message),
      }),
      None => Ok(fields),
    }
  }

  /// `DELETE /delete-address/{id}/`. Returns the body's `success` flag.
  pub async fn delete_address(&self, id: &str) -> Result<bool, ApiError> {
    let path = format!("/delete-address/{}/", id);
    let reply: DeleteReply = self
      .mutate::<DeleteReply, ()>(Method::DELETE, &path, None)
      .await?
      .into_body(&path)?;
    Ok(reply.success)
  }

  /// Submit the order form (form-encoded `selected_address`) to `action_path`.
  pub async fn place_order(&self, action_path: &str, address_id: &str) -> Result<Reply<OrderReply>, ApiError> {
    let token = self.csrf_header()?;
    let url = self.url(action_path)?;
    let request = self
      .http
      .post(url.clone())
      .header(CSRF_HEADER, token)
      .form(&[("selected_address", address_id), ("csrfmiddlewaretoken", token)]);
    self.send(request, &url).await
  }
}

/// The login page with a return path, e.g. `/login/?next=%2Fcart%2F`.
pub fn login_location(return_path: &str) -> String {
  format!("{}?next={}", LOGIN_PATH, urlencoding::encode(return_path))
}
