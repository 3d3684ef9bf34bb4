//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. Carts live in
//! the session, so its lifetime is the cart's lifetime. The session cookie
//! is signed with a key derived from `STOREFRONT_SESSION_SECRET`.

use sqlx::PgPool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::{ConfigError, StorefrontConfig};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "bq_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// # Arguments
///
/// * `pool` - `PostgreSQL` connection pool
/// * `config` - Storefront configuration (signing key, cookie security)
///
/// # Errors
///
/// Returns `ConfigError::InsecureSecret` if no signing key can be derived
/// from the session secret.
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> Result<SessionManagerLayer<PostgresStore, SignedCookie>, ConfigError> {
    // The session table is created by `bq-cli migrate`
    let store = PostgresStore::new(pool.clone());
    Ok(session_layer_with_store(
        store,
        config.session_key()?,
        config.is_secure(),
    ))
}

/// Apply the storefront's cookie settings to any session store.
#[must_use]
pub fn session_layer_with_store<S: SessionStore>(
    store: S,
    key: Key,
    is_secure: bool,
) -> SessionManagerLayer<S, SignedCookie> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}
