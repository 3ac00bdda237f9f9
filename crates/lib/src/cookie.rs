//! Cookie header parsing and the anti-forgery token.

use std::fmt;

use crate::consts::CSRF_COOKIE;

/// Read a single cookie value out of a `Cookie` header string.
///
/// Pairs are separated by `;` with optional surrounding whitespace. The first
/// pair whose name matches exactly wins, and its value is percent-decoded.
/// A value that is not valid percent-encoding is returned as-is.
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
  if header.is_empty() || name.is_empty() {
    return None;
  }

  header.split(';').find_map(|pair| {
    let value = pair.trim_start().strip_prefix(name)?.strip_prefix('=')?;
    let value = value.trim_end();
    Some(
      urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| value.to_string()),
    )
  })
}

/// The per-session anti-forgery token sent as `X-CSRFToken` on every
/// state-mutating request.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
  pub fn new(token: impl Into<String>) -> Self {
    Self(token.into())
  }

  /// Extract the token from the session's cookie header.
  ///
  /// Returns `None` when the cookie is absent or empty.
  pub fn from_cookie_header(header: &str) -> Option<Self> {
    read_cookie(header, CSRF_COOKIE).filter(|token| !token.is_empty()).map(Self)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for CsrfToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("CsrfToken(***)")
  }
}
