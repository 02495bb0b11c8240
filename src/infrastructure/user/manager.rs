//! User manager: validated account creation and authentication

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::domain::user::{
    normalize_email, validate_email, validate_password, CreateUserFields, NewUser, User, UserId,
    UserRepository, UserValidationError,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Creation factory and lookup entry point for user accounts
///
/// Every account goes through [`UserManager::create_user`]: required
/// arguments are checked first, then the email and the password are
/// validated (in that order), and only then is the record persisted.
#[derive(Clone)]
pub struct UserManager {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl std::fmt::Debug for UserManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserManager").finish_non_exhaustive()
    }
}

fn invalid(error: UserValidationError) -> DomainError {
    DomainError::validation(error.to_string())
}

impl UserManager {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Create a regular account
    ///
    /// The record is active, non-staff and non-superuser unless the extra
    /// fields say otherwise.
    pub async fn create_user(&self, fields: CreateUserFields) -> Result<User, DomainError> {
        let (Some(email), Some(password)) = (&fields.email, &fields.password) else {
            return Err(DomainError::missing_arguments(
                "create_user",
                &fields.missing_required(),
            ));
        };

        let email = validate_email(email).map_err(invalid)?;
        let password = validate_password(password).map_err(invalid)?;

        let mut new_user = NewUser::new(email, self.hasher.hash(password)?);
        apply_extra_fields(&mut new_user, &fields);

        let user = self.repository.create(new_user).await?;

        info!(
            user_id = %user.id(),
            is_staff = user.is_staff(),
            is_superuser = user.is_superuser(),
            "Created user"
        );

        Ok(user)
    }

    /// Create an account with staff and superuser privileges
    ///
    /// Errors from the underlying creation are returned unchanged.
    pub async fn create_superuser(&self, fields: CreateUserFields) -> Result<User, DomainError> {
        let missing = fields.missing_required();

        if !missing.is_empty() {
            return Err(DomainError::missing_arguments("create_superuser", &missing));
        }

        self.create_user(fields.is_staff(true).is_superuser(true))
            .await
    }

    /// Check a raw password against the user's stored hash
    pub fn check_password(&self, user: &User, password: &str) -> bool {
        self.hasher.verify(password, user.password_hash())
    }

    /// Resolve credentials to an active user without touching the login time
    ///
    /// Unknown emails, inactive accounts and wrong passwords all yield `None`.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let email = normalize_email(email);

        let Some(user) = self.repository.get_by_email(&email).await? else {
            debug!("Authentication failed: unknown email");
            return Ok(None);
        };

        if !user.is_active() {
            debug!(user_id = %user.id(), "Authentication failed: inactive user");
            return Ok(None);
        }

        if !self.check_password(&user, password) {
            debug!(user_id = %user.id(), "Authentication failed: wrong password");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Resolve credentials like `verify_credentials` and record the login
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(user) = self.verify_credentials(email, password).await? else {
            return Ok(None);
        };

        self.repository.record_login(user.id()).await?;

        self.repository.get(user.id()).await
    }

    /// Replace a user's password after checking the complexity policy
    pub async fn set_password(&self, id: UserId, password: &str) -> Result<User, DomainError> {
        let candidate = Value::from(password);
        let password = validate_password(&candidate).map_err(invalid)?;

        let mut user = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        user.set_password_hash(self.hasher.hash(password)?);

        self.repository.update(&user).await
    }

    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_email(&normalize_email(email)).await
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    pub async fn exists(&self) -> Result<bool, DomainError> {
        self.repository.exists().await
    }
}

fn apply_extra_fields(user: &mut NewUser, fields: &CreateUserFields) {
    if let Some(first_name) = &fields.first_name {
        user.first_name = first_name.clone();
    }

    if let Some(last_name) = &fields.last_name {
        user.last_name = last_name.clone();
    }

    if let Some(is_active) = fields.is_active {
        user.is_active = is_active;
    }

    if let Some(is_staff) = fields.is_staff {
        user.is_staff = is_staff;
    }

    if let Some(is_superuser) = fields.is_superuser {
        user.is_superuser = is_superuser;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::password::Argon2Hasher;
    use crate::infrastructure::user::repository::InMemoryUserRepository;
    use serde_json::json;

    const EMAIL: &str = "test@studiofard.com";
    const PASSWORD: &str = "TestPassword123$%^";
    const EMAIL_MESSAGE: &str = "Email has invalid format or is empty";
    const PASSWORD_MESSAGE: &str = "Password must be at least 8 characters long, contain at least \
        one uppercase letter, one lowercase letter, one digit, and one special character";

    fn create_manager() -> (UserManager, Arc<InMemoryUserRepository>) {
        let repository = Arc::new(InMemoryUserRepository::new());
        let manager = UserManager::new(repository.clone(), Arc::new(Argon2Hasher::new()));
        (manager, repository)
    }

    fn full_fields() -> CreateUserFields {
        CreateUserFields::new(EMAIL, PASSWORD)
            .first_name("first")
            .last_name("last")
    }

    #[tokio::test]
    async fn test_create_user_no_args_fail() {
        let (manager, repository) = create_manager();
        assert!(!repository.exists().await.unwrap());

        let err = manager
            .create_user(CreateUserFields::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::MissingArgument { .. }));
        assert_eq!(
            err.to_string(),
            "create_user() missing 2 required arguments: 'email' and 'password'"
        );
        assert!(!repository.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_user_missing_password_fail() {
        let (manager, repository) = create_manager();

        let fields = CreateUserFields {
            email: Some(json!(EMAIL)),
            ..CreateUserFields::default()
        };

        let err = manager.create_user(fields).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "create_user() missing 1 required argument: 'password'"
        );
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_user_email_invalid_fail() {
        let (manager, repository) = create_manager();

        let emails = [
            Value::Null,
            json!(false),
            json!(true),
            json!(""),
            json!(" "),
            json!("test"),
            json!("test@"),
            json!("@test"),
            json!("@test.com"),
            json!("test@test"),
            json!("test@test."),
            json!("test.com"),
            json!(0),
            json!(123),
            json!(123.456),
            json!({}),
            json!([]),
        ];

        for email in emails {
            let fields = CreateUserFields {
                email: Some(email.clone()),
                password: Some(json!(PASSWORD)),
                ..CreateUserFields::default()
            };

            let err = manager.create_user(fields).await.unwrap_err();

            assert!(
                matches!(err, DomainError::Validation { .. }),
                "{} should be a validation error",
                email
            );
            assert_eq!(err.messages(), [EMAIL_MESSAGE]);
            assert!(!repository.exists().await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_create_user_password_invalid_fail() {
        let (manager, repository) = create_manager();

        let passwords = [
            Value::Null,
            json!(""),
            json!(" "),
            json!("test"),
            json!("testtest"),
            json!("testtesttesttest"),
            json!("12345678"),
            json!("test12345678"),
            json!("!@#$%^"),
            json!("Test1234567890"),
            json!("TEST1234567!@#$$"),
            json!("test1234567!@#$$"),
            json!("1234567!@#$$"),
            json!("Test1!"),
            json!("1@Test"),
            json!("!@#$%^&*()"),
            json!(0),
            json!(123),
            json!(1234567890),
            json!(123.456),
            json!(123456.789012),
            json!(false),
            json!(true),
            json!({}),
            json!([]),
        ];

        for password in passwords {
            let fields = CreateUserFields {
                email: Some(json!(EMAIL)),
                password: Some(password.clone()),
                ..CreateUserFields::default()
            };

            let err = manager.create_user(fields).await.unwrap_err();

            assert_eq!(err.messages(), [PASSWORD_MESSAGE], "password {}", password);
            assert!(!repository.exists().await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_email_checked_before_password() {
        let (manager, _) = create_manager();

        let fields = CreateUserFields::new("not-an-email", "weak");

        let err = manager.create_user(fields).await.unwrap_err();
        assert_eq!(err.messages(), [EMAIL_MESSAGE]);
    }

    #[tokio::test]
    async fn test_create_user_valid() {
        let (manager, repository) = create_manager();
        assert!(!repository.exists().await.unwrap());

        let created = manager.create_user(full_fields()).await.unwrap();

        assert!(repository.exists().await.unwrap());
        assert_eq!(repository.count().await.unwrap(), 1);
        assert_eq!(repository.list().await.unwrap(), vec![created.clone()]);
        assert_eq!(created.email(), EMAIL);
        assert!(manager.check_password(&created, PASSWORD));
        assert_ne!(created.password_hash(), PASSWORD);
        assert!(created.is_active());
        assert!(!created.is_staff());
        assert!(!created.is_superuser());
        assert_eq!(created.first_name(), "first");
        assert_eq!(created.last_name(), "last");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let (manager, repository) = create_manager();
        manager.create_user(full_fields()).await.unwrap();

        let err = manager.create_user(full_fields()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
        assert_eq!(repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_user_extra_flags_applied() {
        let (manager, _) = create_manager();

        let user = manager
            .create_user(CreateUserFields::new(EMAIL, PASSWORD).is_active(false).is_staff(true))
            .await
            .unwrap();

        assert!(!user.is_active());
        assert!(user.is_staff());
        assert!(!user.is_superuser());
    }

    #[tokio::test]
    async fn test_create_superuser_ok() {
        let (manager, repository) = create_manager();
        assert!(!repository.exists().await.unwrap());

        let created = manager.create_superuser(full_fields()).await.unwrap();

        assert_eq!(repository.count().await.unwrap(), 1);
        assert_eq!(repository.get(created.id()).await.unwrap(), Some(created.clone()));
        assert_eq!(created.email(), EMAIL);
        assert!(manager.check_password(&created, PASSWORD));
        assert!(created.is_active());
        assert!(created.is_staff());
        assert!(created.is_superuser());
        assert_eq!(created.first_name(), "first");
        assert_eq!(created.last_name(), "last");
    }

    #[tokio::test]
    async fn test_create_superuser_overrides_flags() {
        let (manager, _) = create_manager();

        let fields = CreateUserFields::new(EMAIL, PASSWORD)
            .is_staff(false)
            .is_superuser(false);

        let created = manager.create_superuser(fields).await.unwrap();
        assert!(created.is_staff());
        assert!(created.is_superuser());
    }

    #[tokio::test]
    async fn test_create_superuser_no_args_fail() {
        let (manager, repository) = create_manager();

        let err = manager
            .create_superuser(CreateUserFields::default())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "create_superuser() missing 2 required arguments: 'email' and 'password'"
        );
        assert!(!repository.exists().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_superuser_fail() {
        let mut repository = MockUserRepository::new();

        repository
            .expect_create()
            .withf(|user| user.is_staff && user.is_superuser)
            .times(1)
            .returning(|_| Err(DomainError::internal("mock exception")));

        let manager = UserManager::new(Arc::new(repository), Arc::new(Argon2Hasher::new()));

        let err = manager
            .create_superuser(CreateUserFields::new(EMAIL, PASSWORD))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Internal { .. }));
        assert_eq!(err.to_string(), "Internal error: mock exception");
    }

    #[tokio::test]
    async fn test_create_superuser_invalid_email_never_persists() {
        let mut repository = MockUserRepository::new();
        repository.expect_create().never();

        let manager = UserManager::new(Arc::new(repository), Arc::new(Argon2Hasher::new()));

        let err = manager
            .create_superuser(CreateUserFields::new("test@test", PASSWORD))
            .await
            .unwrap_err();

        assert_eq!(err.messages(), [EMAIL_MESSAGE]);
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let (manager, _) = create_manager();
        manager.create_user(full_fields()).await.unwrap();

        let user = manager.authenticate(EMAIL, PASSWORD).await.unwrap();

        let user = user.expect("credentials should authenticate");
        assert_eq!(user.email(), EMAIL);
        assert!(user.last_login_at().is_some());
    }

    #[tokio::test]
    async fn test_authenticate_normalizes_domain() {
        let (manager, _) = create_manager();
        manager.create_user(full_fields()).await.unwrap();

        let user = manager
            .authenticate("test@StudioFard.com", PASSWORD)
            .await
            .unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let (manager, _) = create_manager();
        manager.create_user(full_fields()).await.unwrap();

        let user = manager
            .authenticate(EMAIL, "WrongPassword123$%^")
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let (manager, _) = create_manager();

        let user = manager.authenticate("nobody@test.com", PASSWORD).await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_inactive_user() {
        let (manager, _) = create_manager();
        manager
            .create_user(full_fields().is_active(false))
            .await
            .unwrap();

        let user = manager.authenticate(EMAIL, PASSWORD).await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_set_password() {
        let (manager, _) = create_manager();
        let user = manager.create_user(full_fields()).await.unwrap();

        let updated = manager
            .set_password(user.id(), "NewPassword456!")
            .await
            .unwrap();

        assert!(manager.check_password(&updated, "NewPassword456!"));
        assert!(!manager.check_password(&updated, PASSWORD));
    }

    #[tokio::test]
    async fn test_set_password_rejects_weak() {
        let (manager, _) = create_manager();
        let user = manager.create_user(full_fields()).await.unwrap();

        let err = manager.set_password(user.id(), "weak").await.unwrap_err();
        assert_eq!(err.messages(), [PASSWORD_MESSAGE]);
    }

    #[tokio::test]
    async fn test_verify_credentials_leaves_last_login_unset() {
        let (manager, _) = create_manager();
        manager.create_user(full_fields()).await.unwrap();

        let user = manager
            .verify_credentials("test@StudioFard.com", PASSWORD)
            .await
            .unwrap()
            .expect("credentials should verify");
        assert!(user.last_login_at().is_none());

        let stored = manager.get_by_email(EMAIL).await.unwrap().unwrap();
        assert!(stored.last_login_at().is_none());
    }

    #[tokio::test]
    async fn test_verify_credentials_rejects_wrong_password() {
        let (manager, _) = create_manager();
        manager.create_user(full_fields()).await.unwrap();

        let user = manager
            .verify_credentials(EMAIL, "WrongPassword123$%^")
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let (manager, _) = create_manager();
        let user = manager.create_user(full_fields()).await.unwrap();

        let found = manager.get(user.id()).await.unwrap().unwrap();
        assert_eq!(found.email(), EMAIL);
        assert_eq!(manager.list().await.unwrap().len(), 1);
        assert!(manager.exists().await.unwrap());
    }
}
