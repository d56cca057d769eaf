//! # Session Store
//!
//! Mock authentication against two hardcoded demo accounts, plus
//! registration of throwaway accounts. A fixed delay imitates the
//! round-trip to an auth backend and is injectable for tests.
//!
//! Passwords never enter the persisted [`User`]; only the password-less
//! profile is written under the `user` key.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::keys;
use crate::kv::KvStore;
use tienda_core::types::{Address, PaymentMethodSummary, Role, User};
use tienda_core::validation::{validate_email, validate_name};

/// Simulated auth backend latency.
const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(800);

/// A demo account: a profile plus the password it accepts.
#[derive(Debug, Clone)]
struct DemoAccount {
    user: User,
    password: String,
}

fn demo_accounts() -> Vec<DemoAccount> {
    vec![
        DemoAccount {
            user: User {
                id: "1".to_string(),
                name: "Carlos".to_string(),
                email: "carlos@gmail.com".to_string(),
                role: Role::User,
                address: Some(Address {
                    street: "Calle Principal 123".to_string(),
                    city: "Madrid".to_string(),
                    state: "Madrid".to_string(),
                    postal_code: "28001".to_string(),
                    country: "España".to_string(),
                }),
                phone: Some("+34 612 345 678".to_string()),
                payment_method: Some(PaymentMethodSummary {
                    kind: "Tarjeta de crédito".to_string(),
                    last_digits: "4321".to_string(),
                }),
            },
            password: "password123".to_string(),
        },
        DemoAccount {
            user: User {
                id: "2".to_string(),
                name: "Aurelio".to_string(),
                email: "aurelio@gmail.com".to_string(),
                role: Role::Admin,
                address: Some(Address {
                    street: "Avenida Central 456".to_string(),
                    city: "Barcelona".to_string(),
                    state: "Cataluña".to_string(),
                    postal_code: "08001".to_string(),
                    country: "España".to_string(),
                }),
                phone: Some("+34 698 765 432".to_string()),
                payment_method: Some(PaymentMethodSummary {
                    kind: "PayPal".to_string(),
                    last_digits: "N/A".to_string(),
                }),
            },
            password: "contraseña123".to_string(),
        },
    ]
}

/// The authenticated session, persisted under the `user` key.
pub struct SessionStore {
    accounts: Mutex<Vec<DemoAccount>>,
    current: Mutex<Option<User>>,
    kv: Arc<dyn KvStore>,
    auth_delay: Duration,
}

impl SessionStore {
    /// Restores the session from storage. A corrupt persisted profile is
    /// removed rather than kept around to fail on every load.
    pub async fn load(kv: Arc<dyn KvStore>) -> StoreResult<Self> {
        let current = match kv.get(keys::USER).await? {
            Some(blob) => match serde_json::from_str::<User>(&blob) {
                Ok(user) => {
                    debug!(email = %user.email, "restored session");
                    Some(user)
                }
                Err(error) => {
                    warn!(%error, key = keys::USER, "discarding corrupt session state");
                    kv.delete(keys::USER).await?;
                    None
                }
            },
            None => None,
        };

        Ok(SessionStore {
            accounts: Mutex::new(demo_accounts()),
            current: Mutex::new(current),
            kv,
            auth_delay: DEFAULT_AUTH_DELAY,
        })
    }

    /// Overrides the simulated backend latency. Tests use zero.
    pub fn with_auth_delay(mut self, delay: Duration) -> Self {
        self.auth_delay = delay;
        self
    }

    fn lock_accounts(&self) -> MutexGuard<'_, Vec<DemoAccount>> {
        self.accounts.lock().expect("session mutex poisoned")
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<User>> {
        self.current.lock().expect("session mutex poisoned")
    }

    async fn persist_user(&self, user: &User) -> StoreResult<()> {
        let blob = serde_json::to_string(user)?;
        self.kv.put(keys::USER, &blob).await?;
        Ok(())
    }

    /// Authenticates against the known accounts.
    ///
    /// Email matching is case-insensitive; the password must match
    /// exactly. A successful login persists the profile and becomes the
    /// current session.
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<User> {
        tokio::time::sleep(self.auth_delay).await;

        let wanted = email.trim().to_lowercase();
        let matched = self
            .lock_accounts()
            .iter()
            .find(|a| a.user.email.to_lowercase() == wanted && a.password == password)
            .map(|a| a.user.clone());

        let user = matched.ok_or(StoreError::InvalidCredentials)?;

        info!(email = %user.email, role = ?user.role, "login succeeded");
        self.persist_user(&user).await?;
        *self.lock_current() = Some(user.clone());
        Ok(user)
    }

    /// Registers a new account with role `User` and a sequential id.
    ///
    /// The name and email are validated, duplicate emails are rejected,
    /// and the password is held only in the in-memory account table.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> StoreResult<User> {
        validate_name(name)?;
        validate_email(email)?;

        tokio::time::sleep(self.auth_delay).await;

        let user = {
            let mut accounts = self.lock_accounts();

            let wanted = email.trim().to_lowercase();
            if accounts.iter().any(|a| a.user.email.to_lowercase() == wanted) {
                return Err(StoreError::DuplicateEmail {
                    email: email.trim().to_string(),
                });
            }

            let user = User {
                id: (accounts.len() + 1).to_string(),
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                role: Role::User,
                address: None,
                phone: None,
                payment_method: None,
            };
            accounts.push(DemoAccount {
                user: user.clone(),
                password: password.to_string(),
            });
            user
        };

        info!(email = %user.email, "registration succeeded");
        self.persist_user(&user).await?;
        *self.lock_current() = Some(user.clone());
        Ok(user)
    }

    /// Ends the session and removes the persisted profile.
    pub async fn logout(&self) -> StoreResult<()> {
        *self.lock_current() = None;
        self.kv.delete(keys::USER).await?;
        info!("logged out");
        Ok(())
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.lock_current().clone()
    }

    /// Checks if a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.lock_current().is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::memory::MemoryKv;

    async fn store(kv: Arc<MemoryKv>) -> SessionStore {
        SessionStore::load(kv)
            .await
            .unwrap()
            .with_auth_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_login_known_account() {
        let kv = Arc::new(MemoryKv::new());
        let session = store(kv.clone()).await;

        let user = session.login("carlos@gmail.com", "password123").await.unwrap();
        assert_eq!(user.name, "Carlos");
        assert!(!user.is_admin());
        assert!(session.is_authenticated());

        // The persisted profile never contains a password field.
        let blob = kv.get(keys::USER).await.unwrap().unwrap();
        assert!(!blob.contains("password"));
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let kv = Arc::new(MemoryKv::new());
        let session = store(kv).await;

        let user = session
            .login("AURELIO@gmail.com", "contraseña123")
            .await
            .unwrap();
        assert!(user.is_admin());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let kv = Arc::new(MemoryKv::new());
        let session = store(kv.clone()).await;

        let err = session
            .login("carlos@gmail.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
        assert!(!session.is_authenticated());
        assert_eq!(kv.get(keys::USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let kv = Arc::new(MemoryKv::new());
        let session = store(kv).await;

        let user = session
            .register("María", "maria@gmail.com", "secreto")
            .await
            .unwrap();
        assert_eq!(user.id, "3");
        assert_eq!(user.role, Role::User);

        session.logout().await.unwrap();
        let back = session.login("maria@gmail.com", "secreto").await.unwrap();
        assert_eq!(back.id, "3");
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let kv = Arc::new(MemoryKv::new());
        let session = store(kv).await;

        let err = session
            .register("Otro Carlos", "Carlos@Gmail.com", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail { .. }));
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let kv = Arc::new(MemoryKv::new());
        let session = store(kv).await;

        assert!(session.register("", "nueva@gmail.com", "x").await.is_err());
        assert!(session.register("Nueva", "sin-arroba", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_logout_removes_persisted_profile() {
        let kv = Arc::new(MemoryKv::new());
        let session = store(kv.clone()).await;

        session.login("carlos@gmail.com", "password123").await.unwrap();
        session.logout().await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(kv.get(keys::USER).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_session_restores_across_loads() {
        let kv = Arc::new(MemoryKv::new());
        {
            let session = store(kv.clone()).await;
            session.login("carlos@gmail.com", "password123").await.unwrap();
        }

        let session = store(kv).await;
        assert_eq!(session.current_user().unwrap().name, "Carlos");
    }

    #[tokio::test]
    async fn test_corrupt_profile_is_discarded_and_deleted() {
        let kv = Arc::new(MemoryKv::new());
        kv.put(keys::USER, "{broken").await.unwrap();

        let session = store(kv.clone()).await;
        assert!(!session.is_authenticated());
        assert_eq!(kv.get(keys::USER).await.unwrap(), None);
    }
}
