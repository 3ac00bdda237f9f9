/// Application name used for config and data directories.
pub const APP_NAME: &str = "scoopjoy";

/// Name of the cookie carrying the anti-forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the backend expects the anti-forgery token in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Currency symbol prefixed to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Default backend address when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_TOAST_MS: u64 = 3000;
pub const DEFAULT_EMPTY_CART_REDIRECT_MS: u64 = 1000;
pub const DEFAULT_ORDER_REDIRECT_MS: u64 = 1500;

pub const LOGIN_PATH: &str = "/login/";
pub const CART_PATH: &str = "/cart/";
pub const CHECKOUT_PATH: &str = "/checkout/";
pub const ORDERS_PATH: &str = "/orders/";
pub const PLACE_ORDER_PATH: &str = "/place-order/";
pub const HOME_PATH: &str = "/";

/// Delay between a successful OTP login and the redirect home.
pub const LOGIN_REDIRECT_MS: u64 = 1000;
