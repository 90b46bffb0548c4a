use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// An authenticated account as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "user_id")]
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub bio: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accepts_user_id_alias() {
        let user: User = serde_json::from_str(
            r#"{"user_id": 9, "username": "arya", "email": "a@w.es", "role": "admin"}"#,
        )
        .unwrap();
        assert_eq!(user.id, 9);
        assert!(user.is_admin());
        assert_eq!(user.role.to_string(), "admin");
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
    }
}
