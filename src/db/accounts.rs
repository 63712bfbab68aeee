/// Account queries: registration, login, logout
///
/// All operations go through the shared [`Database`] handle. Passwords are
/// stored as salted argon2 hashes; the plaintext never touches the database.

use crate::db::models::{normalize_email, Account};
use crate::db::Database;
use crate::error::{IntakeError, Result};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand_core::OsRng;
use sqlx::Row;

const CREDENTIALS_REQUIRED: &str = "Email and password are required.";

impl Database {
    /// Register a new field worker account
    ///
    /// The email is trimmed and lowercased before storage; uniqueness is
    /// enforced on that normalized form, so `A@X.com` and `a@x.com` are the
    /// same account.
    ///
    /// # Arguments
    /// * `email` - Email address, normalized internally
    /// * `password` - Password, hashed before storage
    ///
    /// # Returns
    /// * `Ok(i64)` - The new account ID
    /// * `Err(IntakeError::Validation)` - Empty email or password
    /// * `Err(IntakeError::DuplicateAccount)` - Email already registered
    pub async fn register_account(&self, email: &str, password: &str) -> Result<i64> {
        let email = normalize_email(email);
        if email.is_empty() || password.trim().is_empty() {
            return Err(IntakeError::Validation(CREDENTIALS_REQUIRED.to_string()));
        }

        let password_hash = hash_password(password)?;

        let result = sqlx::query(
            "INSERT INTO accounts (email, password_hash) VALUES (?, ?) RETURNING id",
        )
        .bind(&email)
        .bind(&password_hash)
        .fetch_one(self.pool())
        .await;

        match result {
            Ok(row) => Ok(row.get(0)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(IntakeError::DuplicateAccount)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Log a field worker in
    ///
    /// Looks up the account by normalized email and verifies the password
    /// against the stored hash. A failed login leaves the database untouched.
    ///
    /// # Returns
    /// * `Ok(Account)` - The matched account, login flag set
    /// * `Err(IntakeError::Validation)` - Empty email or password
    /// * `Err(IntakeError::InvalidCredentials)` - Unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> Result<Account> {
        let email = normalize_email(email);
        if email.is_empty() || password.trim().is_empty() {
            return Err(IntakeError::Validation(CREDENTIALS_REQUIRED.to_string()));
        }

        match self.find_account(&email).await? {
            Some(mut account) if verify_password(password, &account.password_hash) => {
                sqlx::query("UPDATE accounts SET is_logged_in = 1 WHERE id = ?")
                    .bind(account.id)
                    .execute(self.pool())
                    .await?;

                account.is_logged_in = true;
                Ok(account)
            }
            _ => Err(IntakeError::InvalidCredentials),
        }
    }

    /// Clear the login flag on all accounts
    ///
    /// The device holds one worker's session at a time, so logout is a bulk
    /// clear rather than scoped to a single account.
    pub async fn logout_all(&self) -> Result<()> {
        sqlx::query("UPDATE accounts SET is_logged_in = 0")
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Look up an account by email (normalized internally)
    pub async fn find_account(&self, email: &str) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = ?")
            .bind(normalize_email(email))
            .fetch_optional(self.pool())
            .await?;

        Ok(account)
    }
}

// Fresh random salt per account. Output is a PHC string, self-describing
// enough that verification needs no extra columns.
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| IntakeError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

// A hash that fails to parse cannot verify anyone.
fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_login() {
        let db = Database::new_test().await.unwrap();

        let id = db
            .register_account("collector@example.com", "hunter2")
            .await
            .unwrap();
        assert!(id > 0);

        let account = db.login("collector@example.com", "hunter2").await.unwrap();
        assert_eq!(account.email, "collector@example.com");
        assert!(account.is_logged_in);
    }

    #[tokio::test]
    async fn test_login_normalizes_email() {
        let db = Database::new_test().await.unwrap();

        db.register_account("Collector@Example.COM", "hunter2")
            .await
            .unwrap();

        // Different casing and padding, same account
        let account = db.login("  collector@example.com ", "hunter2").await.unwrap();
        assert_eq!(account.email, "collector@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new_test().await.unwrap();

        db.register_account("A@X.com", "first").await.unwrap();

        // Same email after normalization
        let result = db.register_account("a@x.com", "second").await;
        match result {
            Err(IntakeError::DuplicateAccount) => {}
            other => panic!("Expected DuplicateAccount, got {:?}", other.map(|_| ())),
        }

        // The failed insert must not have created a row
        let stats = db.stats().await.unwrap();
        assert_eq!(stats.total_accounts, 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let db = Database::new_test().await.unwrap();

        db.register_account("collector@example.com", "hunter2")
            .await
            .unwrap();

        let result = db.login("collector@example.com", "wrong").await;
        match result {
            Err(IntakeError::InvalidCredentials) => {}
            other => panic!("Expected InvalidCredentials, got {:?}", other.map(|_| ())),
        }

        // Failed login must not mutate state
        let account = db
            .find_account("collector@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(!account.is_logged_in);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let db = Database::new_test().await.unwrap();

        let result = db.login("nobody@example.com", "whatever").await;
        match result {
            Err(IntakeError::InvalidCredentials) => {
                assert_eq!(
                    IntakeError::InvalidCredentials.user_message(),
                    "Invalid credentials"
                );
            }
            other => panic!("Expected InvalidCredentials, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_empty_inputs_rejected() {
        let db = Database::new_test().await.unwrap();

        for (email, password) in [("", "pw"), ("a@x.com", ""), ("   ", "pw"), ("a@x.com", "  ")] {
            let result = db.register_account(email, password).await;
            assert!(
                matches!(result, Err(IntakeError::Validation(_))),
                "register({:?}, {:?}) should fail validation",
                email,
                password
            );

            let result = db.login(email, password).await;
            assert!(matches!(result, Err(IntakeError::Validation(_))));
        }

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.total_accounts, 0);
    }

    #[tokio::test]
    async fn test_logout_clears_all_flags() {
        let db = Database::new_test().await.unwrap();

        db.register_account("one@x.com", "pw1").await.unwrap();
        db.register_account("two@x.com", "pw2").await.unwrap();
        db.login("one@x.com", "pw1").await.unwrap();
        db.login("two@x.com", "pw2").await.unwrap();

        db.logout_all().await.unwrap();

        for email in ["one@x.com", "two@x.com"] {
            let account = db.find_account(email).await.unwrap().unwrap();
            assert!(!account.is_logged_in);
        }
    }

    #[tokio::test]
    async fn test_password_stored_hashed() {
        let db = Database::new_test().await.unwrap();

        db.register_account("collector@example.com", "hunter2")
            .await
            .unwrap();

        let account = db
            .find_account("collector@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(account.password_hash, "hunter2");
        assert!(account.password_hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }
}
