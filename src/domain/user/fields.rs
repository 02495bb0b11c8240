//! Arguments accepted by user creation

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Fields supplied to `create_user` / `create_superuser`
///
/// `email` and `password` are kept as raw JSON values: `None` means the
/// argument was not supplied at all, while `Some(Value::Null)` is an explicit
/// null that still goes through validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserFields {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub password: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_superuser: Option<bool>,
}

/// Wrap whatever value is present, including null, in `Some`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl CreateUserFields {
    /// Fields with both required arguments supplied
    pub fn new(email: impl Into<Value>, password: impl Into<Value>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn is_staff(mut self, is_staff: bool) -> Self {
        self.is_staff = Some(is_staff);
        self
    }

    pub fn is_superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = Some(is_superuser);
        self
    }

    /// Names of required arguments that were not supplied, in declaration order
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.email.is_none() {
            missing.push("email");
        }

        if self.password.is_none() {
            missing.push("password");
        }

        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_all() {
        let fields = CreateUserFields::default();
        assert_eq!(fields.missing_required(), vec!["email", "password"]);
    }

    #[test]
    fn test_missing_required_none() {
        let fields = CreateUserFields::new("a@b.co", "secret");
        assert!(fields.missing_required().is_empty());
    }

    #[test]
    fn test_deserialize_absent_vs_null() {
        let fields: CreateUserFields =
            serde_json::from_str(r#"{"email": null, "first_name": "first"}"#).unwrap();

        assert_eq!(fields.email, Some(Value::Null));
        assert_eq!(fields.password, None);
        assert_eq!(fields.first_name.as_deref(), Some("first"));
        assert_eq!(fields.missing_required(), vec!["password"]);
    }

    #[test]
    fn test_deserialize_keeps_wrong_types() {
        let fields: CreateUserFields =
            serde_json::from_str(r#"{"email": 123, "password": [1, 2]}"#).unwrap();

        assert_eq!(fields.email, Some(serde_json::json!(123)));
        assert_eq!(fields.password, Some(serde_json::json!([1, 2])));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: Result<CreateUserFields, _> =
            serde_json::from_str(r#"{"email": "a@b.co", "username": "x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_builder() {
        let fields = CreateUserFields::new("a@b.co", "pw")
            .first_name("first")
            .last_name("last")
            .is_staff(true);

        assert_eq!(fields.first_name.as_deref(), Some("first"));
        assert_eq!(fields.last_name.as_deref(), Some("last"));
        assert_eq!(fields.is_staff, Some(true));
        assert_eq!(fields.is_superuser, None);
    }
}
