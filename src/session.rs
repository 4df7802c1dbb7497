//! Mock admin login.
//!
//! The product has no authentication backend: the dashboard gates on a
//! hardcoded credential pair, and the "session" is a token plus a user
//! record written to the store under `hotelToken` / `hotelUser`. A real
//! deployment would replace this module with an actual authentication
//! service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StorageError;
use crate::store::{Store, StoreKey};

/// The one accepted username.
pub const ADMIN_USERNAME: &str = "admin";
/// The one accepted password.
pub const ADMIN_PASSWORD: &str = "swiftstay2024";

/// The stored admin user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub username: String,
    pub role: String,
}

/// Error returned by [`AdminSession::login`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The credential pair did not match.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The session could not be persisted.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Store-backed admin session state.
#[derive(Debug, Clone)]
pub struct AdminSession {
    store: Store,
}

impl AdminSession {
    /// Wrap the store the session keys live in.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Check the credential pair and, on success, persist a fresh token
    /// and the user record.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on a mismatch,
    /// [`AuthError::Storage`] if the session cannot be written.
    pub fn login(&self, username: &str, password: &str) -> Result<AdminUser, AuthError> {
        if username != ADMIN_USERNAME || password != ADMIN_PASSWORD {
            tracing::warn!(username = %username, "rejected admin login");
            return Err(AuthError::InvalidCredentials);
        }
        let token = Uuid::new_v4().simple().to_string();
        let user = AdminUser {
            username: username.to_owned(),
            role: "admin".to_owned(),
        };
        self.store.set_value(StoreKey::HotelToken, &token)?;
        self.store.set_value(StoreKey::HotelUser, &user)?;
        tracing::info!(username = %user.username, "admin logged in");
        Ok(user)
    }

    /// The stored user record, if a session exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be read.
    pub fn current_user(&self) -> Result<Option<AdminUser>, StorageError> {
        self.store.get_value(StoreKey::HotelUser)
    }

    /// Whether a session token is present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, StorageError> {
        Ok(self
            .store
            .get_value::<String>(StoreKey::HotelToken)?
            .is_some())
    }

    /// Clear the token and user record.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be written.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.clear_value(StoreKey::HotelToken)?;
        self.store.clear_value(StoreKey::HotelUser)?;
        tracing::info!("admin logged out");
        Ok(())
    }
}
