//! Administrative credential storage and verification.
//!
//! The core performs no session handling or authentication flow - that is
//! the surrounding web layer's job. This module only stores the single
//! admin-style credential as a salted argon2id hash, seeds the bootstrap
//! `admin`/`admin` credential when no user exists yet, and answers
//! verification queries.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use sea_orm::{Set, prelude::*};
use tracing::info;

/// Hashes a password into an argon2id PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::PasswordHash(e.to_string()))
}

/// Verifies a password against a stored PHC string.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash).map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Finds a user by username.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Provisions the bootstrap credential if no user exists yet.
///
/// Returns the created user, or `None` when the user table is already
/// populated. Startup convenience only; the password must be changed through
/// [`change_password`] afterwards.
pub async fn ensure_default_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<user::Model>> {
    if User::find().one(db).await?.is_some() {
        return Ok(None);
    }

    let admin = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(hash_password(password)?),
        ..Default::default()
    };

    let created = admin.insert(db).await?;
    info!("Created default admin user '{}'", created.username);
    Ok(Some(created))
}

/// Checks a username/password pair against the credential store.
///
/// Returns the matching user on success, `None` for an unknown username or a
/// wrong password - callers cannot distinguish the two cases.
pub async fn verify_credentials(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<Option<user::Model>> {
    let Some(user) = get_user_by_username(db, username).await? else {
        return Ok(None);
    };

    if verify_password(password, &user.password_hash)? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Replaces a user's password with a freshly salted hash.
pub async fn change_password(
    db: &DatabaseConnection,
    username: &str,
    new_password: &str,
) -> Result<user::Model> {
    if new_password.is_empty() {
        return Err(Error::Validation {
            message: "Password cannot be empty".to_string(),
        });
    }

    let user = get_user_by_username(db, username)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            username: username.to_string(),
        })?;

    let mut active: user::ActiveModel = user.into();
    active.password_hash = Set(hash_password(new_password)?);

    let result = active.update(db).await?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_hash_and_verify_round_trip() -> Result<()> {
        let hash = hash_password("hunter2")?;
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash)?);
        assert!(!verify_password("hunter3", &hash)?);
        Ok(())
    }

    #[test]
    fn test_hashes_are_salted() -> Result<()> {
        // Same password, different salt, different PHC string
        let first = hash_password("admin")?;
        let second = hash_password("admin")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let result = verify_password("admin", "not-a-phc-string");
        assert!(matches!(result.unwrap_err(), Error::PasswordHash(_)));
    }

    #[tokio::test]
    async fn test_ensure_default_admin_seeds_once() -> Result<()> {
        let db = setup_test_db().await?;

        let created = ensure_default_admin(&db, "admin", "admin").await?;
        assert!(created.is_some());
        assert_eq!(created.unwrap().username, "admin");

        // Second call is a no-op
        let again = ensure_default_admin(&db, "admin", "admin").await?;
        assert!(again.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_ensure_default_admin_skipped_when_users_exist() -> Result<()> {
        let db = setup_test_db().await?;
        ensure_default_admin(&db, "shopkeeper", "s3cret").await?;

        // A different bootstrap credential is not added alongside
        let result = ensure_default_admin(&db, "admin", "admin").await?;
        assert!(result.is_none());
        assert!(get_user_by_username(&db, "admin").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_credentials() -> Result<()> {
        let db = setup_test_db().await?;
        ensure_default_admin(&db, "admin", "admin").await?;

        assert!(verify_credentials(&db, "admin", "admin").await?.is_some());
        assert!(verify_credentials(&db, "admin", "wrong").await?.is_none());
        assert!(verify_credentials(&db, "ghost", "admin").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_change_password() -> Result<()> {
        let db = setup_test_db().await?;
        ensure_default_admin(&db, "admin", "admin").await?;

        change_password(&db, "admin", "better-password").await?;

        assert!(verify_credentials(&db, "admin", "admin").await?.is_none());
        assert!(
            verify_credentials(&db, "admin", "better-password")
                .await?
                .is_some()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_change_password_validation() -> Result<()> {
        let db = setup_test_db().await?;
        ensure_default_admin(&db, "admin", "admin").await?;

        let result = change_password(&db, "admin", "").await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = change_password(&db, "ghost", "pw").await;
        assert!(matches!(result.unwrap_err(), Error::UserNotFound { .. }));

        Ok(())
    }
}
