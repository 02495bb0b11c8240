//! Public view of a user account

use serde::Serialize;

use crate::domain::user::User;

/// User response (never carries the password hash)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            email: user.email().to_string(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            full_name: user.full_name(),
            is_active: user.is_active(),
            is_staff: user.is_staff(),
            is_superuser: user.is_superuser(),
            created_at: user.created_at().to_rfc3339(),
            last_login_at: user.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserId;

    #[test]
    fn test_user_response_hides_password_hash() {
        let mut user = User::new(UserId::new(7), "ada@studiofard.com", "argon2-hash");
        user.set_first_name("Ada");
        user.set_last_name("Lovelace");

        let response = UserResponse::from(&user);
        let json = serde_json::to_string(&response).unwrap();

        assert_eq!(response.id, 7);
        assert_eq!(response.full_name, "Ada Lovelace");
        assert!(!json.contains("argon2-hash"));
        assert!(json.contains("\"last_login_at\":null"));
    }
}
