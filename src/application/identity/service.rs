//! Identity service — application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::domain::email::is_plausible_email;
use crate::domain::{
    normalize_email, Account, Actor, DomainError, DomainResult, NewAccount, RepositoryProvider,
    User, UserRole,
};
use crate::infrastructure::crypto::{create_token, hash_password, verify_password, JwtConfig};

pub const PASSWORD_MIN_LEN: usize = 6;
pub const PASSWORD_MAX_LEN: usize = 128;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
    pub role: UserRole,
}

/// Owns the account store and decides every caller's role.
pub struct IdentityService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl IdentityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig, bcrypt_cost: u32) -> Self {
        Self {
            repos,
            jwt_config,
            bcrypt_cost,
        }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Registration ────────────────────────────────────────────

    /// Create an account plus its employee user record.
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = validate_email(email)?;
        validate_password(password)?;

        if self.repos.accounts().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "An account for {} already exists",
                email
            )));
        }

        let account = self
            .repos
            .accounts()
            .create(NewAccount {
                email,
                password_hash: self.hash(password)?,
            })
            .await?;

        let user = User::employee(account.id.clone(), &account.email);
        self.repos.users().create(user.clone()).await?;

        info!(user_id = %user.id, email = %user.email, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Verify credentials, resolve the role and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = normalize_email(email);

        let Some(account) = self.repos.accounts().find_by_email(&email).await? else {
            warn!(email = %email, "Login for unknown account");
            metrics::counter!("logins_total", "outcome" => "rejected").increment(1);
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !password_matches(password, &account.password_hash, &account.id) {
            warn!(user_id = %account.id, "Login with wrong password");
            metrics::counter!("logins_total", "outcome" => "rejected").increment(1);
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let (user, role) = self.resolve_role(&account).await?;
        self.repos
            .accounts()
            .record_login(&account.id, Utc::now())
            .await?;

        let token = create_token(&account.id, &account.email, role.as_str(), &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        metrics::counter!("logins_total", "outcome" => "accepted").increment(1);
        info!(user_id = %user.id, role = %role, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expires_in_seconds(),
            user,
            role,
        })
    }

    /// Decide the role for an authenticated account.
    ///
    /// Admin-set membership wins. Otherwise an existing user record means
    /// employee, and a missing record is created as employee. The record's
    /// mirrored role is rewritten when it disagrees.
    pub async fn resolve_role(&self, account: &Account) -> DomainResult<(User, UserRole)> {
        let role = if self.repos.admins().is_admin(&account.id).await? {
            UserRole::Admin
        } else {
            UserRole::Employee
        };

        let mut user = match self.repos.users().find_by_id(&account.id).await? {
            Some(user) => user,
            None => {
                let user = User::employee(account.id.clone(), &account.email);
                self.repos.users().create(user.clone()).await?;
                info!(user_id = %user.id, "Created user record on first login");
                user
            }
        };

        if user.role != role {
            self.repos.users().set_role(&user.id, role).await?;
            user.role = role;
        }

        Ok((user, role))
    }

    // ── Queries ─────────────────────────────────────────────────

    /// The caller's user record
    pub async fn current_user(&self, actor: &Actor) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(&actor.user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&actor.user_id))
    }

    // ── Commands ────────────────────────────────────────────────

    /// Change a password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        validate_password(new_password)?;

        let account = self
            .repos
            .accounts()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(user_id))?;

        if !password_matches(current_password, &account.password_hash, &account.id) {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        let new_hash = self.hash(new_password)?;
        self.repos
            .accounts()
            .update_password(user_id, &new_hash)
            .await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    /// Make sure the bootstrap administrator exists and is in the admin set.
    ///
    /// An existing account keeps its password.
    pub async fn seed_admin(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = validate_email(email)?;

        let account = match self.repos.accounts().find_by_email(&email).await? {
            Some(account) => account,
            None => {
                validate_password(password)?;
                let account = self
                    .repos
                    .accounts()
                    .create(NewAccount {
                        email: email.clone(),
                        password_hash: self.hash(password)?,
                    })
                    .await?;
                info!(email = %email, "Created bootstrap admin account");
                account
            }
        };

        // The membership row references the user record, so resolve first
        let (mut user, role) = self.resolve_role(&account).await?;
        if !role.is_admin() {
            self.repos.admins().grant(&account.id).await?;
            self.repos.users().set_role(&account.id, UserRole::Admin).await?;
            user.role = UserRole::Admin;
        }
        Ok(user)
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))
    }
}

fn validate_email(raw: &str) -> DomainResult<String> {
    if !is_plausible_email(raw) {
        return Err(DomainError::Validation("Invalid email address".into()));
    }
    Ok(normalize_email(raw))
}

fn validate_password(password: &str) -> DomainResult<()> {
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(DomainError::Validation(format!(
            "Password must be {}-{} characters",
            PASSWORD_MIN_LEN, PASSWORD_MAX_LEN
        )));
    }
    Ok(())
}

/// A hash bcrypt cannot parse is a storage defect, not a wrong password.
/// It is logged and the caller still sees a plain credential failure.
fn password_matches(password: &str, stored_hash: &str, account_id: &str) -> bool {
    match verify_password(password, stored_hash) {
        Ok(valid) => valid,
        Err(e) => {
            error!(account_id, error = %e, "Stored password hash could not be verified");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::password::MIN_COST;
    use crate::infrastructure::crypto::verify_token;
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn service() -> (IdentityService, Arc<dyn RepositoryProvider>) {
        let repos = InMemoryRepositoryProvider::shared();
        let svc = IdentityService::new(repos.clone(), JwtConfig::default(), MIN_COST);
        (svc, repos)
    }

    #[tokio::test]
    async fn register_then_login_as_employee() {
        let (svc, _) = service();
        let user = svc.register(" Alice@Corp.com ", "hunter22").await.unwrap();
        assert_eq!(user.email, "alice@corp.com");
        assert_eq!(user.role, UserRole::Employee);

        let auth = svc.login("ALICE@corp.com", "hunter22").await.unwrap();
        assert_eq!(auth.role, UserRole::Employee);
        assert_eq!(auth.token_type, "Bearer");

        let claims = verify_token(&auth.token, svc.jwt_config()).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, "employee");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let (svc, _) = service();
        svc.register("a@corp.com", "secret1").await.unwrap();
        let err = svc.register("A@CORP.COM", "secret2").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn registration_validates_input() {
        let (svc, _) = service();
        assert!(matches!(
            svc.register("not-an-email", "secret1").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.register("a@corp.com", "short").await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let (svc, _) = service();
        svc.register("a@corp.com", "secret1").await.unwrap();

        let wrong = svc.login("a@corp.com", "nope-nope").await.unwrap_err();
        let unknown = svc.login("ghost@corp.com", "secret1").await.unwrap_err();
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_rejected_as_bad_credentials() {
        let (svc, repos) = service();
        repos
            .accounts()
            .create(NewAccount {
                email: "broken@corp.com".into(),
                password_hash: "not-a-bcrypt-hash".into(),
            })
            .await
            .unwrap();

        assert!(verify_password("secret1", "not-a-bcrypt-hash").is_err());
        assert!(!password_matches("secret1", "not-a-bcrypt-hash", "acc-1"));

        let err = svc.login("broken@corp.com", "secret1").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(ref m) if m == INVALID_CREDENTIALS));
    }

    #[tokio::test]
    async fn first_login_without_record_creates_employee() {
        let (svc, repos) = service();
        let account = repos
            .accounts()
            .create(NewAccount {
                email: "new@corp.com".into(),
                password_hash: hash_password("secret1", MIN_COST).unwrap(),
            })
            .await
            .unwrap();
        assert!(repos.users().find_by_id(&account.id).await.unwrap().is_none());

        let auth = svc.login("new@corp.com", "secret1").await.unwrap();
        assert_eq!(auth.role, UserRole::Employee);

        let record = repos.users().find_by_id(&account.id).await.unwrap().unwrap();
        assert_eq!(record.email, "new@corp.com");
        assert_eq!(record.role, UserRole::Employee);
    }

    #[tokio::test]
    async fn admin_membership_overrides_record_role() {
        let (svc, repos) = service();
        let user = svc.register("boss@corp.com", "secret1").await.unwrap();
        repos.admins().grant(&user.id).await.unwrap();

        let auth = svc.login("boss@corp.com", "secret1").await.unwrap();
        assert_eq!(auth.role, UserRole::Admin);
        assert_eq!(auth.user.role, UserRole::Admin);

        let record = repos.users().find_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(record.role, UserRole::Admin);

        repos.admins().revoke(&user.id).await.unwrap();
        let auth = svc.login("boss@corp.com", "secret1").await.unwrap();
        assert_eq!(auth.role, UserRole::Employee);
    }

    #[tokio::test]
    async fn change_password_requires_current() {
        let (svc, _) = service();
        let user = svc.register("a@corp.com", "secret1").await.unwrap();

        assert!(matches!(
            svc.change_password(&user.id, "wrong1", "secret2").await,
            Err(DomainError::Unauthorized(_))
        ));

        svc.change_password(&user.id, "secret1", "secret2").await.unwrap();
        assert!(svc.login("a@corp.com", "secret1").await.is_err());
        assert!(svc.login("a@corp.com", "secret2").await.is_ok());
    }

    #[tokio::test]
    async fn seed_admin_is_idempotent() {
        let (svc, repos) = service();
        let first = svc.seed_admin("root@corp.com", "admin123").await.unwrap();
        let second = svc.seed_admin("root@corp.com", "other-password").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.role, UserRole::Admin);
        assert_eq!(repos.admins().list_ids().await.unwrap().len(), 1);
        assert!(svc.login("root@corp.com", "admin123").await.is_ok());
    }
}
